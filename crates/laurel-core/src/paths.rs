//! Certificate file naming conventions.
//!
//! Pure string/path functions, no filesystem access.

use std::path::{Path, PathBuf};

pub const CERTIFICATE_EXTENSION: &str = "pdf";

const EMPTY_SLUG: &str = "untitled";

/// `certificate-<recipient>-<task>.pdf`
pub fn certificate_file_name(recipient_name: &str, task_title: &str) -> String {
    format!(
        "certificate-{}-{}.{CERTIFICATE_EXTENSION}",
        slug(recipient_name),
        slug(task_title)
    )
}

pub fn certificate_path(dir: &Path, recipient_name: &str, task_title: &str) -> PathBuf {
    dir.join(certificate_file_name(recipient_name, task_title))
}

/// Lowercase ASCII alphanumerics; every other run of characters becomes a
/// single `-`. Never returns an empty string.
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if out.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        out
    }
}
