pub mod health_handlers;
pub mod history_handlers;
pub mod notification_handlers;
pub mod qr_handlers;
