use std::fs::File;
use std::io::Write;
use std::path::Path;

use jiff::Zoned;
use jiff::civil::Date;
use laurel_core::models::certificate::{CertificateRequest, IssuedCertificate};
use printpdf::PdfDocument;
use tracing::info;
use uuid::Uuid;

use crate::error::ExportError;
use crate::pdf::{render_document, save_document};
use crate::render::{CertificateContext, render_certificate};
use crate::styles::CertificateStyles;

/// Generate a certificate PDF at `output_path` with the default styles.
///
/// `qr_image_base64` must be a base64-encoded PNG. The file is created or
/// truncated. On error the contents of `output_path` are unspecified;
/// invalid input is rejected before the file is touched.
pub fn generate(
    recipient_name: &str,
    task_title: &str,
    output_path: impl AsRef<Path>,
    qr_image_base64: &str,
) -> Result<IssuedCertificate, ExportError> {
    let request = CertificateRequest::new(recipient_name, task_title, qr_image_base64);
    CertificateGenerator::default().generate_request(&request, output_path.as_ref())
}

/// Renders certificates with a fixed set of styles.
#[derive(Debug, Clone, Default)]
pub struct CertificateGenerator {
    styles: CertificateStyles,
    /// Pinned issue date; `None` means today in the local time zone.
    issue_date: Option<Date>,
}

impl CertificateGenerator {
    pub fn new(styles: CertificateStyles) -> Self {
        Self {
            styles,
            issue_date: None,
        }
    }

    pub fn with_issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    pub fn styles(&self) -> &CertificateStyles {
        &self.styles
    }

    pub fn issue_date(&self) -> Date {
        self.issue_date.unwrap_or_else(|| Zoned::now().date())
    }

    /// Standalone HTML for the certificate, with the QR code inlined as a
    /// `data:` URI.
    pub fn render_html(&self, request: &CertificateRequest) -> Result<String, ExportError> {
        let qr = request.validate()?;
        let qr_src = qr.data_uri();
        let context = self.context(request, Some(&qr_src), self.issue_date());
        render_certificate(&context, &self.styles)
    }

    /// Lay out the certificate as an in-memory PDF document.
    pub fn render_pdf(&self, request: &CertificateRequest) -> Result<PdfDocument, ExportError> {
        self.layout(request, self.issue_date())
    }

    pub fn generate_request(
        &self,
        request: &CertificateRequest,
        output_path: &Path,
    ) -> Result<IssuedCertificate, ExportError> {
        self.issue(Uuid::new_v4(), request, output_path)
    }

    /// Render and write a certificate under a caller-chosen id (e.g. one
    /// already encoded into the QR code).
    pub fn issue(
        &self,
        id: Uuid,
        request: &CertificateRequest,
        output_path: &Path,
    ) -> Result<IssuedCertificate, ExportError> {
        let issued_on = self.issue_date();
        let document = self.layout(request, issued_on)?;
        let pdf = save_document(&document)?;
        write_output(output_path, &pdf)?;

        info!(
            certificate.id = %id,
            certificate.path = %output_path.display(),
            certificate.bytes = pdf.len(),
            "certificate issued"
        );

        Ok(IssuedCertificate {
            id,
            recipient_name: request.recipient_name.clone(),
            task_title: request.task_title.clone(),
            issued_on,
            output_path: output_path.to_path_buf(),
            byte_len: pdf.len(),
        })
    }

    fn layout(
        &self,
        request: &CertificateRequest,
        issued_on: Date,
    ) -> Result<PdfDocument, ExportError> {
        let qr = request.validate()?;
        let context = self.context(request, None, issued_on);
        let html = render_certificate(&context, &self.styles)?;
        render_document(&html, &qr, &self.styles)
    }

    fn context<'a>(
        &self,
        request: &'a CertificateRequest,
        qr_src: Option<&'a str>,
        issued_on: Date,
    ) -> CertificateContext<'a> {
        CertificateContext {
            recipient_name: &request.recipient_name,
            task_title: &request.task_title,
            issued_on: issued_on.to_string(),
            qr_src,
        }
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)?;
    file.sync_all().map_err(io_err)?;
    Ok(())
}
