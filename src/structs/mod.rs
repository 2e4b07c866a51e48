pub mod qr_request;
pub mod qr_response;
