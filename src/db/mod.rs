pub mod backend;
pub mod history_store;
