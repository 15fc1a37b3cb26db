use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// Error recorded when the module parser was built.
    #[error("{message}")]
    Deferred { parser: usize, message: String },

    #[error("no module parser at index {0}")]
    NoSuchParser(usize),
}
