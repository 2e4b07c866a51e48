pub mod app_state;
pub mod generation;
pub mod notifications;
pub mod preview;
