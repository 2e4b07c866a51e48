pub mod generation;
pub mod notification;
pub mod qr_code;
pub mod qr_params;
