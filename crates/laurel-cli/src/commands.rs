use std::path::{Path, PathBuf};

use eyre::WrapErr;
use laurel_core::models::certificate::{CertificateRequest, IssuedCertificate};
use laurel_core::models::qr_image::QrImage;
use laurel_core::paths::certificate_path;
use laurel_export::CertificateGenerator;
use laurel_export::qr::{encode_png, verification_url};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::LaurelConfig;

/// Where the QR image printed on a certificate comes from.
#[derive(Debug, Clone)]
pub enum QrSource {
    /// A PNG file on disk.
    File(PathBuf),
    /// Base64-encoded PNG passed through untouched.
    Base64(String),
    /// Arbitrary text encoded into a fresh QR code.
    Text(String),
    /// The verification link (or URN) of the certificate being issued.
    Verification,
}

#[derive(Debug, Clone)]
pub struct IssueRequest {
    pub recipient_name: String,
    pub task_title: String,
    /// Explicit destination; defaults to the conventional file name inside
    /// the configured output directory.
    pub output: Option<PathBuf>,
    pub qr: QrSource,
}

/// One entry of a batch manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub recipient_name: String,
    pub task_title: String,
    #[serde(default)]
    pub qr_text: Option<String>,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub index: usize,
    pub recipient_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub issued: Vec<IssuedCertificate>,
    pub failures: Vec<BatchFailure>,
}

/// Issues certificates according to a loaded config.
pub struct Issuer<'a> {
    config: &'a LaurelConfig,
    generator: CertificateGenerator,
}

impl<'a> Issuer<'a> {
    pub fn new(config: &'a LaurelConfig) -> Self {
        Self {
            config,
            generator: CertificateGenerator::new(config.styles.clone()),
        }
    }

    /// Pin the issue date instead of using today.
    pub fn with_issue_date(mut self, date: jiff::civil::Date) -> Self {
        self.generator = self.generator.with_issue_date(date);
        self
    }

    /// Issue one certificate. Unlike the library, blank names and titles
    /// are rejected here.
    pub fn issue(&self, request: IssueRequest) -> eyre::Result<IssuedCertificate> {
        CertificateRequest::new(&request.recipient_name, &request.task_title, "")
            .require_text()?;

        let id = Uuid::new_v4();
        let qr_image_base64 = self.resolve_qr(&request.qr, id)?;

        let output = match request.output {
            Some(path) => path,
            None => {
                std::fs::create_dir_all(&self.config.output_dir).wrap_err_with(|| {
                    format!(
                        "failed to create output directory {}",
                        self.config.output_dir.display()
                    )
                })?;
                certificate_path(
                    &self.config.output_dir,
                    &request.recipient_name,
                    &request.task_title,
                )
            }
        };

        let certificate =
            CertificateRequest::new(request.recipient_name, request.task_title, qr_image_base64);
        let issued = self.generator.issue(id, &certificate, &output)?;
        Ok(issued)
    }

    /// Issue every manifest entry in order. A failed entry is recorded and
    /// does not stop the rest.
    pub fn batch(&self, entries: Vec<BatchEntry>) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for (index, entry) in entries.into_iter().enumerate() {
            let recipient_name = entry.recipient_name.clone();
            let request = IssueRequest {
                recipient_name: entry.recipient_name,
                task_title: entry.task_title,
                output: entry.output,
                qr: entry.qr_text.map_or(QrSource::Verification, QrSource::Text),
            };

            match self.issue(request) {
                Ok(issued) => summary.issued.push(issued),
                Err(e) => {
                    warn!(index, recipient = %recipient_name, error = %e, "batch entry failed");
                    summary.failures.push(BatchFailure {
                        index,
                        recipient_name,
                        error: format!("{e:#}"),
                    });
                }
            }
        }

        info!(
            issued = summary.issued.len(),
            failed = summary.failures.len(),
            "batch complete"
        );
        summary
    }

    fn resolve_qr(&self, source: &QrSource, id: Uuid) -> eyre::Result<String> {
        let encoded = match source {
            QrSource::File(path) => {
                let bytes = std::fs::read(path)
                    .wrap_err_with(|| format!("failed to read QR image {}", path.display()))?;
                QrImage::from_png_bytes(bytes)?.to_base64()
            }
            QrSource::Base64(encoded) => encoded.clone(),
            QrSource::Text(text) => encode_png(text)?.to_base64(),
            QrSource::Verification => encode_png(&self.verification_content(id))?.to_base64(),
        };
        Ok(encoded)
    }

    fn verification_content(&self, id: Uuid) -> String {
        match &self.config.verification_base_url {
            Some(base) => verification_url(base, id),
            None => format!("urn:uuid:{id}"),
        }
    }
}

pub fn read_manifest(path: &Path) -> eyre::Result<Vec<BatchEntry>> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read manifest {}", path.display()))?;
    let entries: Vec<BatchEntry> = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("invalid manifest {}", path.display()))?;
    Ok(entries)
}
