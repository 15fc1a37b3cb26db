//! Loading of export options from layered sources.

mod builder;
mod env;
mod error;
mod source;

pub use builder::{ExportOptions, ExportOptionsBuilder};
pub use env::EnvSource;
pub use error::ConfigError;
pub use source::{ConfigSource, SourceEntry, TomlSource};
