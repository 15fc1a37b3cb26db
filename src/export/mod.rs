//! Flattening of setting trees into an ordered key/value stream.

mod error;
mod format;
mod sink;
mod walk;

use bitflags::bitflags;
use serde::Deserialize;

pub use error::ExportError;
pub use format::{export_type, DefaultCheck};
pub use sink::{ConfigEntry, EntryCollector, TomlSink};
pub(crate) use walk::Exporter;

/// Which settings are exported even when they still hold their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DumpScope {
    /// Every setting, hidden ones included.
    AllWithHidden,
    /// Every setting, except hidden ones that were not explicitly set.
    AllWithoutHidden,
    /// Settings explicitly set, even if set to their default.
    Set,
    /// Only settings that differ from their default.
    #[default]
    Changed,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DumpFlags: u32 {
        /// Inside unique section lists, treat unchanged settings as defaults.
        const HIDE_LIST_DEFAULTS = 1 << 0;
        /// Never emit the same full key twice in one export pass.
        const DEDUPLICATE_KEYS = 1 << 1;
    }
}

/// Kind of an exported entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKeyType {
    Normal,
    /// Space-separated identifiers of a section list's elements.
    List,
    /// The name of a unique section list element.
    UniqueKey,
    /// Announces a string list; its pairs follow as normal entries.
    KeyList,
}

/// Receives every exported entry in order.
pub trait ExportCallback {
    fn entry(&mut self, key: &str, value: &str, kind: ConfigKeyType);
}

impl<F> ExportCallback for F
where
    F: FnMut(&str, &str, ConfigKeyType),
{
    fn entry(&mut self, key: &str, value: &str, kind: ConfigKeyType) {
        self(key, value, kind)
    }
}
