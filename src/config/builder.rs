use serde::Deserialize;

use super::env::EnvSource;
use super::source::{merge_at_path, ConfigSource, TomlSource};
use super::ConfigError;
use crate::export::{DumpFlags, DumpScope};

/// Settings of one export request.
///
/// ```toml
/// scope = "all_without_hidden"
/// hide_list_defaults = true
/// deduplicate_keys = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    pub scope: DumpScope,
    pub hide_list_defaults: bool,
    pub deduplicate_keys: bool,
}

impl ExportOptions {
    pub fn builder() -> ExportOptionsBuilder {
        ExportOptionsBuilder::default()
    }

    pub fn flags(&self) -> DumpFlags {
        let mut flags = DumpFlags::empty();
        flags.set(DumpFlags::HIDE_LIST_DEFAULTS, self.hide_list_defaults);
        flags.set(DumpFlags::DEDUPLICATE_KEYS, self.deduplicate_keys);
        flags
    }
}

/// Builder layering [`ExportOptions`] from several sources.
///
/// Sources are applied in registration order, later ones overriding earlier
/// ones. Unset options keep their defaults.
///
/// ```
/// use config_export::{DumpScope, ExportOptions};
///
/// let options = ExportOptions::builder()
///     .with_toml("scope = \"set\"\ndeduplicate_keys = true")
///     .build()?;
/// assert_eq!(options.scope, DumpScope::Set);
/// # Ok::<(), config_export::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ExportOptionsBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ExportOptionsBuilder {
    pub fn with_toml(self, text: impl Into<String>) -> Self {
        self.with_source(TomlSource::new(text))
    }

    /// Environment overrides, e.g. `PREFIX__SCOPE=set` with separator `__`.
    ///
    /// Path segments are lowercased. Values are coerced to booleans
    /// (`true`/`yes`/`false`/`no`), integers, or left as strings.
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn build(self) -> Result<ExportOptions, ConfigError> {
        let mut merged = toml::Table::new();

        for source in &self.sources {
            for entry in source.entries()? {
                merge_at_path(&mut merged, &entry.path, entry.value);
            }
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(ConfigError::DeserializeError)
    }
}
