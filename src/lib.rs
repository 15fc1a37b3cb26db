//! Flattens resolved setting trees into an ordered stream of `key=value`
//! entries, for config dumps or for handing settings to another process.

pub mod config;
pub mod context;
pub mod environment;
mod error;
pub mod export;
pub mod filter;
pub mod settings;

pub use config::{ConfigError, ExportOptions};
pub use context::ConfigExport;
pub use environment::ImportEnvironment;
pub use error::Error;
pub use export::{ConfigEntry, ConfigKeyType, DumpFlags, DumpScope, EntryCollector, ExportCallback, ExportError, TomlSink};
pub use filter::{ModuleParser, ParsedConfig};
