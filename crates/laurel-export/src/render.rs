use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ExportError;
use crate::styles::CertificateStyles;

/// Built-in certificate layout. The `.html` name turns on Tera's
/// autoescaping for every interpolated value not marked `safe`.
pub const CERTIFICATE_TEMPLATE_NAME: &str = "certificate.html";
const CERTIFICATE_TEMPLATE: &str = include_str!("../templates/certificate.html.tera");

const PT_PER_INCH: f32 = 72.0;
const MM_PER_INCH: f32 = 25.4;

/// Width of the outer certificate border, in points.
const OUTER_BORDER_PT: f32 = 12.0;

/// Slack left between the bordered container and the page margins so the
/// layout never spills onto a second page.
const CONTAINER_SLACK_PT: f32 = 12.0;

/// Values interpolated into the certificate template.
#[derive(Debug, Clone, Serialize)]
pub struct CertificateContext<'a> {
    pub recipient_name: &'a str,
    pub task_title: &'a str,
    /// ISO `YYYY-MM-DD`.
    pub issued_on: String,
    /// `src` of the QR `<img>`, usually a `data:` URI. `None` leaves the QR
    /// slot empty so the image can be placed on the page afterwards.
    pub qr_src: Option<&'a str>,
}

#[derive(Serialize)]
struct StyleContext<'a> {
    font_family: &'a str,
    primary_color: &'a str,
    accent_color: &'a str,
    highlight_color: &'a str,
    muted_color: &'a str,
    page_width_mm: String,
    page_height_mm: String,
    margin_pt: String,
    container_height_pt: String,
}

impl<'a> StyleContext<'a> {
    fn new(styles: &'a CertificateStyles) -> Self {
        let (width_mm, height_mm) = styles.page_size.landscape_mm();
        let margin_pt = margin_pt(styles);
        let container_height = mm_to_pt(height_mm)
            - 2.0 * margin_pt
            - 2.0 * OUTER_BORDER_PT
            - CONTAINER_SLACK_PT;

        Self {
            font_family: &styles.font_family,
            primary_color: &styles.primary_color,
            accent_color: &styles.accent_color,
            highlight_color: &styles.highlight_color,
            muted_color: &styles.muted_color,
            page_width_mm: format!("{width_mm:.1}"),
            page_height_mm: format!("{height_mm:.1}"),
            margin_pt: format!("{margin_pt:.1}"),
            container_height_pt: format!("{:.1}", container_height.max(72.0)),
        }
    }
}

pub(crate) fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_INCH * PT_PER_INCH
}

pub(crate) fn margin_pt(styles: &CertificateStyles) -> f32 {
    styles.margin_inches as f32 * PT_PER_INCH
}

/// Render the certificate HTML document.
pub fn render_certificate(
    certificate: &CertificateContext<'_>,
    styles: &CertificateStyles,
) -> Result<String, ExportError> {
    styles.validate()?;

    let mut tera = Tera::default();
    tera.add_raw_template(CERTIFICATE_TEMPLATE_NAME, CERTIFICATE_TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let mut context = Context::from_serialize(certificate)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;
    context.insert("styles", &StyleContext::new(styles));

    let rendered = tera.render(CERTIFICATE_TEMPLATE_NAME, &context)?;
    Ok(rendered)
}
