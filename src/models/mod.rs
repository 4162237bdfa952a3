pub mod config;
pub mod export_spec;

pub use config::{AppConfig, DefaultSettings, GridStyle};
pub use export_spec::ExportSpec;
