//! Environment handed down to subordinate processes.
//!
//! The master service's `import_environment` setting is a whitespace separated
//! list of `NAME` or `NAME=VALUE` items. Bare names are copied from the
//! current environment, explicit values are used as given.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEnvironment {
    items: Vec<(String, Option<String>)>,
}

impl ImportEnvironment {
    pub fn parse(list: &str) -> Self {
        let items = list
            .split_whitespace()
            .filter_map(|item| match item.split_once('=') {
                Some(("", _)) => None,
                Some((name, value)) => Some((name.to_string(), Some(value.to_string()))),
                None => Some((item.to_string(), None)),
            })
            .collect();
        Self { items }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(name, _)| name.as_str())
    }

    /// Variables to set, in listed order. Bare names missing from `lookup` are skipped.
    pub fn resolve(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<(String, String)> {
        self.items
            .iter()
            .filter_map(|(name, value)| {
                let value = match value {
                    Some(value) => value.clone(),
                    None => lookup(name)?,
                };
                Some((name.clone(), value))
            })
            .collect()
    }

    /// Like [`resolve`](Self::resolve), reading the current process environment.
    pub fn from_process(&self) -> Vec<(String, String)> {
        self.resolve(|name| std::env::var(name).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_values() {
        let env = ImportEnvironment::parse("TZ  LISTEN_PID=12\tCORE_ERROR =ignored");
        assert_eq!(env.names().collect::<Vec<_>>(), vec!["TZ", "LISTEN_PID", "CORE_ERROR"]);
    }

    #[test]
    fn test_resolve_prefers_explicit_values() {
        let env = ImportEnvironment::parse("TZ HOME=/srv MISSING EMPTY=");
        let resolved = env.resolve(|name| match name {
            "TZ" => Some("UTC".to_string()),
            "HOME" => Some("/root".to_string()),
            _ => None,
        });
        assert_eq!(
            resolved,
            vec![
                ("TZ".to_string(), "UTC".to_string()),
                ("HOME".to_string(), "/srv".to_string()),
                ("EMPTY".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_empty_list() {
        assert!(ImportEnvironment::parse("   ").resolve(|_| None).is_empty());
    }
}
