use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::qr_image::QrImage;
use crate::error::CoreError;

/// Everything needed to issue one certificate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateRequest {
    pub recipient_name: String,
    pub task_title: String,
    /// Base64-encoded PNG of the QR code printed on the certificate.
    pub qr_image_base64: String,
}

impl CertificateRequest {
    pub fn new(
        recipient_name: impl Into<String>,
        task_title: impl Into<String>,
        qr_image_base64: impl Into<String>,
    ) -> Self {
        Self {
            recipient_name: recipient_name.into(),
            task_title: task_title.into(),
            qr_image_base64: qr_image_base64.into(),
        }
    }

    /// Decode the QR image. Any text is accepted for the name and title,
    /// including the empty string.
    pub fn validate(&self) -> Result<QrImage, CoreError> {
        QrImage::from_base64(&self.qr_image_base64)
    }

    /// Stricter check for interactive callers: the name and title must
    /// contain something other than whitespace.
    pub fn require_text(&self) -> Result<(), CoreError> {
        if self.recipient_name.trim().is_empty() {
            return Err(CoreError::MissingField("recipient_name".to_string()));
        }
        if self.task_title.trim().is_empty() {
            return Err(CoreError::MissingField("task_title".to_string()));
        }
        Ok(())
    }
}

/// Record of a certificate that was written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedCertificate {
    pub id: Uuid,
    pub recipient_name: String,
    pub task_title: String,
    pub issued_on: jiff::civil::Date,
    pub output_path: PathBuf,
    pub byte_len: usize,
}
