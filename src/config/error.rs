use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to parse export options: {0}")]
    ParseError(#[source] toml::de::Error),

    #[error("failed to deserialize export options: {0}")]
    DeserializeError(#[source] toml::de::Error),

    #[error("invalid environment source: {0}")]
    InvalidEnvironment(String),
}
