use toml::Value;

use super::source::{ConfigSource, SourceEntry};
use super::ConfigError;

/// Options read from environment variables such as `CONFDUMP__SCOPE=set`.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
    vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
            vars: None,
        }
    }

    /// Reads from `vars` instead of the process environment.
    pub fn with_vars(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.vars = Some(vars.into_iter().collect());
        self
    }
}

impl ConfigSource for EnvSource {
    fn entries(&self) -> Result<Vec<SourceEntry>, ConfigError> {
        if self.separator.is_empty() {
            return Err(ConfigError::InvalidEnvironment(format!(
                "empty separator for prefix '{}'",
                self.prefix
            )));
        }

        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);
        let vars = match &self.vars {
            Some(vars) => vars.clone(),
            None => std::env::vars().collect(),
        };
        let mut entries = Vec::new();

        for (key, value) in vars {
            if let Some(path_str) = key.strip_prefix(&prefix_with_sep) {
                if path_str.is_empty() {
                    continue;
                }

                let path: Vec<String> = path_str
                    .split(&self.separator)
                    .map(|s| s.to_lowercase())
                    .collect();

                entries.push(SourceEntry::at_path(path, coerce_value(&value)));
            }
        }

        Ok(entries)
    }
}

/// Booleans accept `true`/`yes` and `false`/`no`, integers are plain
/// decimal, everything else stays a string.
fn coerce_value(raw: &str) -> Value {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" => return Value::Boolean(true),
        "false" | "no" => return Value::Boolean(false),
        _ => {}
    }
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(number) = raw.parse() {
            return Value::Integer(number);
        }
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_prefixed_vars_become_paths() {
        let source = EnvSource::new("CONFDUMP", "__").with_vars(vars(&[
            ("CONFDUMP__SCOPE", "set"),
            ("CONFDUMP__DEDUPLICATE_KEYS", "yes"),
            ("OTHER__SCOPE", "changed"),
            ("CONFDUMP__", "ignored"),
        ]));
        let entries = source.entries().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, vec!["scope"]);
        assert_eq!(entries[0].value, Value::String("set".into()));
        assert_eq!(entries[1].path, vec!["deduplicate_keys"]);
        assert_eq!(entries[1].value, Value::Boolean(true));
    }

    #[test]
    fn test_coercion() {
        assert_eq!(coerce_value("FALSE"), Value::Boolean(false));
        assert_eq!(coerce_value("-12"), Value::Integer(-12));
        assert_eq!(coerce_value("12a"), Value::String("12a".into()));
        assert_eq!(coerce_value("No"), Value::Boolean(false));
        assert_eq!(coerce_value("-"), Value::String("-".into()));
        assert_eq!(coerce_value(""), Value::String(String::new()));
        assert_eq!(coerce_value("99999999999999999999"), Value::String("99999999999999999999".into()));
    }

    #[test]
    fn test_empty_separator_rejected() {
        let source = EnvSource::new("CONFDUMP", "").with_vars(Vec::new());
        assert!(matches!(source.entries(), Err(ConfigError::InvalidEnvironment(_))));
    }
}
