use std::path::PathBuf;

use laurel_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid certificate input: {0}")]
    Input(#[from] CoreError),

    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("invalid style {field}: {value:?}")]
    InvalidStyle { field: &'static str, value: String },

    #[error("QR encoding failed: {0}")]
    QrEncode(String),

    #[error("image encoding failed: {0}")]
    Image(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<tera::Error> for ExportError {
    fn from(e: tera::Error) -> Self {
        ExportError::TemplateRender(e.to_string())
    }
}

impl From<qrcode::types::QrError> for ExportError {
    fn from(e: qrcode::types::QrError) -> Self {
        ExportError::QrEncode(e.to_string())
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Image(e.to_string())
    }
}
