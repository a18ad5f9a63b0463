use jiff::civil::date;
use laurel_core::models::certificate::CertificateRequest;
use laurel_export::pdf::{QR_EDGE_PT, generate_pdf};
use laurel_export::qr::encode_png;
use laurel_export::render::{CertificateContext, render_certificate};
use laurel_export::styles::{CertificateStyles, PageSize};
use laurel_export::{CertificateGenerator, generate};
use printpdf::{Op, PdfDocument, XObject};

fn request(name: &str, task: &str) -> CertificateRequest {
    let qr = encode_png("https://certs.example.org/verify/42").unwrap();
    CertificateRequest::new(name, task, qr.to_base64())
}

/// Page text with all whitespace removed; the layout engine positions
/// words individually and does not emit the spaces between them.
fn page_text(document: &PdfDocument) -> String {
    document.pages[0]
        .extract_text(&document.resources)
        .concat()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

fn image_draws(document: &PdfDocument) -> Vec<&Op> {
    document.pages[0]
        .ops
        .iter()
        .filter(|op| match op {
            Op::UseXobject { id, .. } => matches!(
                document.resources.xobjects.map.get(id),
                Some(XObject::Image(_))
            ),
            _ => false,
        })
        .collect()
}

#[test]
fn certificate_is_a_single_page() {
    for page_size in [PageSize::A4, PageSize::Letter] {
        let styles = CertificateStyles {
            page_size,
            ..CertificateStyles::default()
        };
        let document = CertificateGenerator::new(styles)
            .render_pdf(&request("Ada Lovelace", "Beach Cleanup"))
            .unwrap();
        assert_eq!(document.pages.len(), 1, "{page_size:?}");
    }
}

#[test]
fn page_text_carries_name_task_and_date() {
    let document = CertificateGenerator::default()
        .with_issue_date(date(2024, 3, 9))
        .render_pdf(&request("Grace Hopper", "Community Garden Build"))
        .unwrap();
    let text = page_text(&document);

    assert!(text.contains("GraceHopper"), "{text}");
    assert!(text.contains("CommunityGardenBuild"), "{text}");
    assert!(text.contains("2024-03-09"), "{text}");
}

#[test]
fn default_issue_date_is_printed() {
    let document = CertificateGenerator::default()
        .render_pdf(&request("Ada Lovelace", "Beach Cleanup"))
        .unwrap();
    let today = jiff::Zoned::now().date().to_string();
    assert!(page_text(&document).contains(&today));
}

#[test]
fn decorations_survive_layout() {
    let document = CertificateGenerator::default()
        .render_pdf(&request("Ada Lovelace", "Beach Cleanup"))
        .unwrap();
    let text = page_text(&document);

    assert!(text.contains("CERTIFIED"), "{text}");
    assert!(text.contains("CERTIFICATEOFCOMPLETION"), "{text}");
    assert!(text.contains("Thiscertificateisproudlypresentedto"), "{text}");
    assert!(text.contains("Forsuccessfullycompletingthetask:"), "{text}");
    assert!(text.contains("AuthorizedSignature"), "{text}");
}

#[test]
fn qr_image_is_drawn_once_inside_the_page() {
    let document = CertificateGenerator::default()
        .render_pdf(&request("Ada Lovelace", "Beach Cleanup"))
        .unwrap();

    let draws = image_draws(&document);
    assert_eq!(draws.len(), 1);

    let Op::UseXobject { transform, .. } = draws[0] else {
        unreachable!()
    };
    let (width_mm, height_mm) = PageSize::A4.landscape_mm();
    let page_width_pt = width_mm / 25.4 * 72.0;
    let page_height_pt = height_mm / 25.4 * 72.0;
    let x = transform.translate_x.unwrap().0;
    let y = transform.translate_y.unwrap().0;
    assert!(x > page_width_pt / 2.0 && x + QR_EDGE_PT < page_width_pt, "x = {x}");
    assert!(y > 0.0 && y + QR_EDGE_PT < page_height_pt, "y = {y}");
}

#[test]
fn saved_pdf_contains_image_xobject() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("certificate.pdf");
    let qr = encode_png("urn:uuid:42").unwrap().to_base64();

    generate("Ada Lovelace", "Beach Cleanup", &path, &qr).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(contains(&bytes, b"/Subtype/Image"));
    assert!(contains(&bytes, b" Do"));
}

#[test]
fn generate_pdf_places_qr_without_img_tag() {
    let qr = encode_png("urn:uuid:42").unwrap();
    let styles = CertificateStyles::default();
    let html = render_certificate(
        &CertificateContext {
            recipient_name: "Ada Lovelace",
            task_title: "Beach Cleanup",
            issued_on: "2024-03-09".to_string(),
            qr_src: None,
        },
        &styles,
    )
    .unwrap();
    assert!(!html.contains("<img"));

    let bytes = generate_pdf(&html, &qr, &styles).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(contains(&bytes, b"/Subtype/Image"));
}

#[test]
fn empty_name_and_title_still_render() {
    let document = CertificateGenerator::default()
        .render_pdf(&request("", ""))
        .unwrap();
    assert_eq!(document.pages.len(), 1);
    assert_eq!(image_draws(&document).len(), 1);
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
