use toml::{Table, Value};
use tracing::debug;

use super::{ConfigKeyType, ExportCallback};
use crate::settings::SETTINGS_SEPARATOR;

/// One exported key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub kind: ConfigKeyType,
}

/// Keeps every exported entry, in order.
#[derive(Debug, Default)]
pub struct EntryCollector {
    pub entries: Vec<ConfigEntry>,
}

impl EntryCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// `key=value` lines, the way a config dump prints them.
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| format!("{}={}", entry.key, entry.value))
            .collect()
    }
}

impl ExportCallback for EntryCollector {
    fn entry(&mut self, key: &str, value: &str, kind: ConfigKeyType) {
        self.entries.push(ConfigEntry {
            key: key.to_string(),
            value: value.to_string(),
            kind,
        });
    }
}

/// Rebuilds nested tables from the flattened stream, for display.
///
/// Section lists are not stored as values since their elements already show
/// up as nested tables. A string list becomes a table of its pairs, and a
/// pair's key is kept whole even if it contains the separator.
///
/// The view is lossy: when a key would turn an earlier value into a table,
/// or a table into a value, the earlier one is kept and the later entry is
/// dropped. Use [`EntryCollector`] when every entry matters.
#[derive(Debug, Default)]
pub struct TomlSink {
    table: Table,
    strlists: Vec<String>,
}

impl TomlSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    fn split_key<'k>(&self, key: &'k str) -> Vec<&'k str> {
        for list in self.strlists.iter().rev() {
            let Some(subkey) = key
                .strip_prefix(list.as_str())
                .and_then(|rest| rest.strip_prefix(SETTINGS_SEPARATOR))
            else {
                continue;
            };
            let mut path: Vec<&str> = key[..list.len()].split(SETTINGS_SEPARATOR).collect();
            path.push(subkey);
            return path;
        }
        key.split(SETTINGS_SEPARATOR).collect()
    }
}

impl ExportCallback for TomlSink {
    fn entry(&mut self, key: &str, value: &str, kind: ConfigKeyType) {
        match kind {
            ConfigKeyType::List => {}
            ConfigKeyType::KeyList => {
                let path = self.split_key(key);
                if !insert_at_path(&mut self.table, &path, Value::Table(Table::new())) {
                    debug!(key, "string list hidden by an earlier entry");
                }
                self.strlists.push(key.to_string());
            }
            ConfigKeyType::Normal | ConfigKeyType::UniqueKey => {
                let path = self.split_key(key);
                if !insert_at_path(&mut self.table, &path, Value::String(value.to_string())) {
                    debug!(key, "entry dropped from table view");
                }
            }
        }
    }
}

/// Returns `false` if an earlier entry was in the way.
fn insert_at_path(table: &mut Table, path: &[&str], value: Value) -> bool {
    let Some((first, rest)) = path.split_first() else {
        return false;
    };

    if rest.is_empty() {
        return match table.get_mut(*first) {
            None => {
                table.insert(first.to_string(), value);
                true
            }
            Some(Value::Table(_)) => value.is_table(),
            Some(existing) if !value.is_table() => {
                *existing = value;
                true
            }
            Some(_) => false,
        };
    }

    match table
        .entry(first.to_string())
        .or_insert_with(|| Value::Table(Table::new()))
    {
        Value::Table(nested) => insert_at_path(nested, rest, value),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_keeps_order() {
        let mut collector = EntryCollector::new();
        collector.entry("b", "2", ConfigKeyType::Normal);
        collector.entry("a", "1", ConfigKeyType::Normal);
        assert_eq!(collector.lines(), vec!["b=2", "a=1"]);
        assert_eq!(collector.entries[0].kind, ConfigKeyType::Normal);
    }

    #[test]
    fn test_toml_sink_nests_sections() {
        let mut sink = TomlSink::new();
        sink.entry("verbose", "yes", ConfigKeyType::Normal);
        sink.entry("service", "imap", ConfigKeyType::List);
        sink.entry("service/imap/name", "imap", ConfigKeyType::UniqueKey);
        sink.entry("service/imap/plugin", "", ConfigKeyType::KeyList);
        sink.entry("service/imap/plugin/quota", "maildir", ConfigKeyType::Normal);

        let table = sink.into_table();
        assert_eq!(table["verbose"].as_str(), Some("yes"));
        assert_eq!(table["service"]["imap"]["name"].as_str(), Some("imap"));
        assert_eq!(table["service"]["imap"]["plugin"]["quota"].as_str(), Some("maildir"));
    }

    #[test]
    fn test_toml_sink_keeps_strlist_subkeys_whole() {
        let mut sink = TomlSink::new();
        sink.entry("plugin", "", ConfigKeyType::KeyList);
        sink.entry("plugin/mail/location", "maildir:~/Maildir", ConfigKeyType::Normal);
        sink.entry("empty", "", ConfigKeyType::KeyList);

        let table = sink.into_table();
        assert_eq!(table["plugin"]["mail/location"].as_str(), Some("maildir:~/Maildir"));
        assert!(table["plugin"].get("mail").is_none());
        assert_eq!(table["empty"].as_table().map(Table::len), Some(0));
    }

    #[test]
    fn test_toml_sink_keeps_earlier_entry_on_conflict() {
        let mut sink = TomlSink::new();
        sink.entry("auth", "plain", ConfigKeyType::Normal);
        sink.entry("auth/cache", "yes", ConfigKeyType::Normal);
        sink.entry("ssl/cert", "a.pem", ConfigKeyType::Normal);
        sink.entry("ssl", "yes", ConfigKeyType::Normal);
        sink.entry("verbose", "no", ConfigKeyType::Normal);
        sink.entry("verbose", "yes", ConfigKeyType::Normal);

        let table = sink.into_table();
        assert_eq!(table["auth"].as_str(), Some("plain"));
        assert_eq!(table["ssl"]["cert"].as_str(), Some("a.pem"));
        assert_eq!(table["verbose"].as_str(), Some("yes"));
    }
}
