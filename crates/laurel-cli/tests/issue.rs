use laurel_cli::commands::{BatchEntry, IssueRequest, Issuer, QrSource};
use laurel_cli::config::LaurelConfig;
use laurel_export::qr::encode_png;

fn config_in(dir: &std::path::Path) -> LaurelConfig {
    LaurelConfig {
        output_dir: dir.join("certificates"),
        verification_base_url: Some("https://certs.example.org/verify".to_string()),
        ..LaurelConfig::default()
    }
}

#[test]
fn issue_uses_conventional_path_in_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let issued = Issuer::new(&config)
        .issue(IssueRequest {
            recipient_name: "Ada Lovelace".to_string(),
            task_title: "Beach Cleanup".to_string(),
            output: None,
            qr: QrSource::Verification,
        })
        .unwrap();

    assert_eq!(
        issued.output_path,
        config
            .output_dir
            .join("certificate-ada-lovelace-beach-cleanup.pdf")
    );
    assert!(std::fs::read(&issued.output_path).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn issue_reads_qr_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let qr_path = dir.path().join("qr.png");
    std::fs::write(&qr_path, encode_png("hello").unwrap().as_bytes()).unwrap();
    let out = dir.path().join("explicit.pdf");

    let issued = Issuer::new(&config)
        .with_issue_date(jiff::civil::date(2024, 1, 31))
        .issue(IssueRequest {
            recipient_name: "Ada Lovelace".to_string(),
            task_title: "Beach Cleanup".to_string(),
            output: Some(out.clone()),
            qr: QrSource::File(qr_path),
        })
        .unwrap();

    assert_eq!(issued.output_path, out);
    assert_eq!(issued.issued_on, jiff::civil::date(2024, 1, 31));
}

#[test]
fn non_png_qr_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let qr_path = dir.path().join("qr.png");
    std::fs::write(&qr_path, b"not an image").unwrap();

    let result = Issuer::new(&config).issue(IssueRequest {
        recipient_name: "Ada Lovelace".to_string(),
        task_title: "Beach Cleanup".to_string(),
        output: None,
        qr: QrSource::File(qr_path),
    });
    assert!(result.is_err());
}

#[test]
fn batch_records_failures_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let entries: Vec<BatchEntry> = serde_json::from_str(
        r#"[
            {"recipient_name": "Ada Lovelace", "task_title": "Beach Cleanup"},
            {"recipient_name": "   ", "task_title": "Beach Cleanup"},
            {"recipient_name": "Grace Hopper", "task_title": "Tutoring", "qr_text": "room 12"}
        ]"#,
    )
    .unwrap();

    let summary = Issuer::new(&config).batch(entries);

    assert_eq!(summary.issued.len(), 2);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].index, 1);
    assert!(summary.failures[0].error.contains("recipient_name"));
    for issued in &summary.issued {
        assert!(issued.output_path.exists());
    }
}

#[test]
fn blank_task_title_is_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let out = dir.path().join("blank.pdf");

    let err = Issuer::new(&config)
        .issue(IssueRequest {
            recipient_name: "Ada Lovelace".to_string(),
            task_title: " \t".to_string(),
            output: Some(out.clone()),
            qr: QrSource::Verification,
        })
        .unwrap_err();

    assert!(format!("{err:#}").contains("task_title"));
    assert!(!out.exists());
}
