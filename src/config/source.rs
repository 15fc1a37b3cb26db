use toml::{Table, Value};

use super::ConfigError;

#[derive(Debug, Clone)]
pub struct SourceEntry {
    pub path: Vec<String>,
    pub value: Value,
}

impl SourceEntry {
    pub fn root(table: Table) -> Self {
        Self {
            path: Vec::new(),
            value: Value::Table(table),
        }
    }

    pub fn at_path(path: Vec<String>, value: Value) -> Self {
        Self { path, value }
    }
}

pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    fn entries(&self) -> Result<Vec<SourceEntry>, ConfigError>;
}

/// Options given as inline TOML text.
#[derive(Debug, Clone)]
pub struct TomlSource {
    text: String,
}

impl TomlSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ConfigSource for TomlSource {
    fn entries(&self) -> Result<Vec<SourceEntry>, ConfigError> {
        let table = toml::from_str(&self.text).map_err(ConfigError::ParseError)?;
        Ok(vec![SourceEntry::root(table)])
    }
}

/// Merges `value` into `table` at `path`.
///
/// Tables merge key by key, anything else replaces what was there.
pub fn merge_at_path(table: &mut Table, path: &[String], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        if let Value::Table(overlay) = value {
            for (key, value) in overlay {
                merge_at_path(table, std::slice::from_ref(&key), value);
            }
        }
        return;
    };

    let slot = table
        .entry(first.clone())
        .or_insert_with(|| Value::Table(Table::new()));
    match (slot, value) {
        (Value::Table(nested), value) if !rest.is_empty() => merge_at_path(nested, rest, value),
        (Value::Table(nested), Value::Table(overlay)) => merge_at_path(nested, &[], Value::Table(overlay)),
        (slot, value) if rest.is_empty() => *slot = value,
        (slot, value) => {
            *slot = Value::Table(Table::new());
            if let Value::Table(nested) = slot {
                merge_at_path(nested, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_source_yields_root_table() {
        let entries = TomlSource::new("scope = \"set\"").entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].path.is_empty());
        assert_eq!(entries[0].value["scope"].as_str(), Some("set"));
    }

    #[test]
    fn test_toml_source_parse_error() {
        let result = TomlSource::new("scope = ").entries();
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_merge_at_path_overrides_leaf() {
        let mut table: Table = toml::from_str("a = 1\n[b]\nc = 2\nd = 3").unwrap();
        merge_at_path(&mut table, &["b".to_string(), "c".to_string()], Value::Integer(9));
        merge_at_path(&mut table, &["e".to_string(), "f".to_string()], Value::Boolean(true));
        merge_at_path(&mut table, &["a".to_string(), "g".to_string()], Value::Integer(4));
        merge_at_path(&mut table, &[], toml::from_str::<Value>("[b]\nd = 5").unwrap());

        assert_eq!(table["b"]["c"].as_integer(), Some(9));
        assert_eq!(table["b"]["d"].as_integer(), Some(5));
        assert_eq!(table["a"]["g"].as_integer(), Some(4));
        assert_eq!(table["e"]["f"].as_bool(), Some(true));
    }
}
