use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use laurel_core::models::qr_image::QrImage;
use qrcode::QrCode;
use uuid::Uuid;

use crate::error::ExportError;

/// Minimum rendered edge length in pixels; keeps the code scannable once
/// scaled into the 100px slot on the certificate.
const MIN_EDGE_PX: u32 = 200;

/// Encode `content` as a QR code and rasterise it to PNG.
pub fn encode_png(content: &str) -> Result<QrImage, ExportError> {
    let code = QrCode::new(content.as_bytes())?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_EDGE_PX, MIN_EDGE_PX)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(QrImage::from_png_bytes(png)?)
}

/// `<base>/<certificate id>`, joined with exactly one slash.
pub fn verification_url(base: &str, certificate_id: Uuid) -> String {
    format!("{}/{certificate_id}", base.trim_end_matches('/'))
}
