//! laurel-core
//!
//! Pure domain types for certificate issuance and the file naming
//! conventions shared by the exporter and the CLI. No rendering dependency.

pub mod error;
pub mod models;
pub mod paths;
