pub mod certificate;
pub mod qr_image;
