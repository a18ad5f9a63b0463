use std::collections::BTreeMap;

use laurel_core::models::qr_image::QrImage;
use printpdf::{
    GeneratePdfOptions, Op, PdfDocument, PdfSaveOptions, Pt, RawImage, XObjectTransform,
};
use tracing::{debug, warn};

use crate::error::ExportError;
use crate::render::{margin_pt, mm_to_pt};
use crate::styles::CertificateStyles;

/// Edge length of the printed QR code, in points.
pub const QR_EDGE_PT: f32 = 100.0;

/// Distance from the right page margin to the centre of the QR slot: outer
/// border, inner margin, inner border and padding plus half the slot width.
const QR_CENTER_INSET_PT: f32 = 12.0 + 15.0 + 2.0 + 25.0 + 90.0;

/// Render certificate HTML to PDF bytes.
///
/// The HTML is laid out on a single landscape page sized from `styles` and
/// the QR image is drawn into the empty slot the template leaves for it.
/// No stylesheets or images are fetched.
pub fn generate_pdf(
    html: &str,
    qr: &QrImage,
    styles: &CertificateStyles,
) -> Result<Vec<u8>, ExportError> {
    let document = render_document(html, qr, styles)?;
    save_document(&document)
}

/// Serialize a laid-out document.
pub fn save_document(document: &PdfDocument) -> Result<Vec<u8>, ExportError> {
    let mut warnings = Vec::new();
    let bytes = document.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        debug!(count = warnings.len(), ?warnings, "PDF serialization warnings");
    }

    if bytes.is_empty() {
        return Err(ExportError::Pdf("renderer produced no output".to_string()));
    }
    Ok(bytes)
}

/// Lay out the HTML and place the QR code, without serializing.
pub fn render_document(
    html: &str,
    qr: &QrImage,
    styles: &CertificateStyles,
) -> Result<PdfDocument, ExportError> {
    let (page_width, page_height) = styles.page_size.landscape_mm();
    let options = GeneratePdfOptions {
        page_width: Some(page_width),
        page_height: Some(page_height),
        ..Default::default()
    };

    let mut warnings = Vec::new();
    let mut document =
        PdfDocument::from_html(html, &BTreeMap::new(), &BTreeMap::new(), &options, &mut warnings)
            .map_err(ExportError::Pdf)?;
    if !warnings.is_empty() {
        debug!(count = warnings.len(), ?warnings, "HTML layout warnings");
    }

    if document.pages.len() > 1 {
        warn!(pages = document.pages.len(), "certificate layout overflowed the first page");
    }

    let mut image_warnings = Vec::new();
    let image = RawImage::decode_from_bytes(qr.as_bytes(), &mut image_warnings)
        .map_err(ExportError::Image)?;
    if image.width == 0 || image.height == 0 {
        return Err(ExportError::Image("QR image has no pixels".to_string()));
    }

    // Scale so the longer side spans QR_EDGE_PT whatever the pixel size.
    let dpi = image.width.max(image.height) as f32 * 72.0 / QR_EDGE_PT;
    let center_x = mm_to_pt(page_width) - margin_pt(styles) - QR_CENTER_INSET_PT;
    let transform = XObjectTransform {
        translate_x: Some(Pt(center_x - QR_EDGE_PT / 2.0)),
        translate_y: Some(Pt((mm_to_pt(page_height) - QR_EDGE_PT) / 2.0)),
        dpi: Some(dpi),
        ..Default::default()
    };

    let id = document.add_image(&image);
    let page = document
        .pages
        .first_mut()
        .ok_or_else(|| ExportError::Pdf("layout produced no pages".to_string()))?;
    page.ops.extend([
        Op::SaveGraphicsState,
        Op::UseXobject { id, transform },
        Op::RestoreGraphicsState,
    ]);

    Ok(document)
}
