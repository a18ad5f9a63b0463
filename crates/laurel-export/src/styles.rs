use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Visual configuration for the certificate template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateStyles {
    /// CSS font-family stack for all text.
    pub font_family: String,

    /// Outer border, headings and recipient name.
    pub primary_color: String,

    /// Inner border and the name underline.
    pub accent_color: String,

    /// Ribbon background and task title.
    pub highlight_color: String,

    /// Subtitle, date and signature caption.
    pub muted_color: String,

    pub page_size: PageSize,

    /// Page margin in inches (applied uniformly).
    pub margin_inches: f64,
}

impl Default for CertificateStyles {
    fn default() -> Self {
        Self {
            font_family: "'Georgia', serif".to_string(),
            primary_color: "#2c3e50".to_string(),
            accent_color: "#f39c12".to_string(),
            highlight_color: "#e74c3c".to_string(),
            muted_color: "#7f8c8d".to_string(),
            page_size: PageSize::A4,
            margin_inches: 0.3,
        }
    }
}

impl CertificateStyles {
    /// Check that every value can be interpolated into the stylesheet
    /// without closing the declaration it sits in.
    ///
    /// Font stacks may hold family names, commas and quotes. Colours may
    /// hold `#`, letters and digits only.
    pub fn validate(&self) -> Result<(), ExportError> {
        let font_ok = !self.font_family.trim().is_empty()
            && self.font_family.chars().all(|c| {
                c.is_ascii_alphanumeric() || matches!(c, ' ' | ',' | '-' | '_' | '\'' | '"')
            })
            && self.font_family.matches('\'').count() % 2 == 0
            && self.font_family.matches('"').count() % 2 == 0;
        if !font_ok {
            return Err(ExportError::InvalidStyle {
                field: "font_family",
                value: self.font_family.clone(),
            });
        }

        for (field, value) in [
            ("primary_color", &self.primary_color),
            ("accent_color", &self.accent_color),
            ("highlight_color", &self.highlight_color),
            ("muted_color", &self.muted_color),
        ] {
            if !is_css_color(value) {
                return Err(ExportError::InvalidStyle {
                    field,
                    value: value.clone(),
                });
            }
        }

        if !(0.0..=2.0).contains(&self.margin_inches) {
            return Err(ExportError::InvalidStyle {
                field: "margin_inches",
                value: self.margin_inches.to_string(),
            });
        }
        Ok(())
    }
}

/// `#rgb`, `#rrggbb` or a bare keyword such as `navy`.
fn is_css_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic()),
    }
}

/// Paper size. Certificates are always laid out landscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// (width, height) in millimetres, landscape.
    pub fn landscape_mm(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (297.0, 210.0),
            PageSize::Letter => (279.4, 215.9),
        }
    }
}
