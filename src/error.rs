use crate::config::ConfigError;
use crate::export::ExportError;
use thiserror::Error;

/// Top-level error type for the config-export library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("export options error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
