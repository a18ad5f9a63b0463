use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::CoreError;

/// The eight-byte signature every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// A decoded QR code image, guaranteed to carry PNG bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    png: Vec<u8>,
}

impl QrImage {
    /// Decode a base64 (standard alphabet) PNG.
    ///
    /// Surrounding whitespace and a leading `data:image/png;base64,` prefix
    /// are tolerated. Anything else that is not a base64-encoded PNG is
    /// rejected.
    pub fn from_base64(encoded: &str) -> Result<Self, CoreError> {
        let trimmed = encoded.trim();
        let payload = trimmed.strip_prefix(DATA_URI_PREFIX).unwrap_or(trimmed);
        if payload.is_empty() {
            return Err(CoreError::InvalidQrImage("image data is empty".to_string()));
        }

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| CoreError::InvalidQrImage(format!("not valid base64: {e}")))?;

        Self::from_png_bytes(bytes)
    }

    /// Wrap raw PNG bytes, checking the signature.
    pub fn from_png_bytes(png: Vec<u8>) -> Result<Self, CoreError> {
        if !png.starts_with(&PNG_SIGNATURE) {
            return Err(CoreError::InvalidQrImage(
                "decoded data is not a PNG image".to_string(),
            ));
        }
        Ok(Self { png })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.png
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.png)
    }

    /// Inline `data:` URI for embedding in markup.
    pub fn data_uri(&self) -> String {
        format!("{DATA_URI_PREFIX}{}", self.to_base64())
    }
}
