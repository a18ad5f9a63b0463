use std::path::{Path, PathBuf};

use laurel_export::styles::CertificateStyles;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaurelConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Where certificates land when no explicit output path is given.
    pub output_dir: PathBuf,
    /// Base of the link encoded into generated QR codes. Added in v1; when
    /// unset the QR code carries the bare certificate URN.
    #[serde(default)]
    pub verification_base_url: Option<String>,
    /// Added in v1.
    #[serde(default)]
    pub styles: CertificateStyles,
}

impl Default for LaurelConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            output_dir: PathBuf::from("."),
            verification_base_url: None,
            styles: CertificateStyles::default(),
        }
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("laurel").join("config.json"))
}

/// Load the config at `path`, falling back to defaults when it does not
/// exist.
pub fn load_config(path: &Path) -> eyre::Result<LaurelConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(LaurelConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let raw_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    let on_disk_version = u32::try_from(raw_version)
        .map_err(|_| eyre::eyre!("config_version {raw_version} is out of range"))?;

    let migrated = migrate(json, on_disk_version)?;
    let config: LaurelConfig = serde_json::from_value(migrated)?;
    config
        .styles
        .validate()
        .map_err(|e| eyre::eyre!("invalid config at {}: {e}", path.display()))?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update laurel."
        ));
    }

    // v0 → v1: add verification_base_url and styles
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("verification_base_url")
            .or_insert(serde_json::Value::Null);
        obj.entry("styles")
            .or_insert(serde_json::to_value(CertificateStyles::default())?);
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added verification_base_url, styles)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &LaurelConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
