pub mod posts;
pub mod required_fields;
pub mod settings;
