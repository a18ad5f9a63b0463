//! laurel-export
//!
//! Certificate HTML rendering, QR encoding and HTML-to-PDF generation.

pub mod certificate;
pub mod error;
pub mod pdf;
pub mod qr;
pub mod render;
pub mod styles;

pub use certificate::{CertificateGenerator, generate};
