pub mod generation_mode;
pub mod id_source;
pub mod request_builder;
