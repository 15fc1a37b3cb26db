use std::sync::Arc;

use super::value::{SettingValue, Settings};

/// The kind of a single setting, and for section lists the schema of
/// their elements.
#[derive(Debug, Clone)]
pub enum SettingType {
    Bool,
    Size,
    Uint,
    UintOct,
    Time,
    TimeMsecs,
    InPort,
    StrVars,
    Str,
    Enum,
    DefList(Arc<SettingParserInfo>),
    DefListUnique(Arc<SettingParserInfo>),
    StrList,
    Alias,
}

impl SettingType {
    pub fn is_deflist(&self) -> bool {
        matches!(self, SettingType::DefList(_) | SettingType::DefListUnique(_))
    }

    /// Value a freshly created setting of this type holds when the schema
    /// carries no defaults.
    pub fn empty_value(&self) -> SettingValue {
        match self {
            SettingType::Bool => SettingValue::Bool(false),
            SettingType::Size => SettingValue::Size(0),
            SettingType::Uint | SettingType::UintOct | SettingType::Time | SettingType::TimeMsecs => {
                SettingValue::Uint(0)
            }
            SettingType::InPort => SettingValue::Port(0),
            SettingType::StrVars | SettingType::Str | SettingType::Enum => SettingValue::Str(None),
            SettingType::DefList(_) | SettingType::DefListUnique(_) => SettingValue::List(Vec::new()),
            SettingType::StrList => SettingValue::StrList(None),
            SettingType::Alias => SettingValue::None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingDefine {
    pub key: String,
    pub ty: SettingType,
    pub hidden: bool,
}

/// Static description of one configuration section.
#[derive(Debug)]
pub struct SettingParserInfo {
    pub name: String,
    pub defines: Vec<SettingDefine>,
    pub defaults: Option<Settings>,
    /// Index of the define naming an element when this schema is used as a
    /// unique section list.
    pub name_field: Option<usize>,
}

impl SettingParserInfo {
    pub fn builder(name: impl Into<String>) -> SettingParserInfoBuilder {
        SettingParserInfoBuilder {
            name: name.into(),
            defines: Vec::new(),
            defaults: Vec::new(),
            has_defaults: false,
            name_key: None,
        }
    }

    pub fn find(&self, key: &str) -> Option<usize> {
        self.defines.iter().position(|def| def.key == key)
    }

    pub fn is_name_field(&self, index: usize) -> bool {
        self.name_field == Some(index)
    }

    /// Values a new instance of this schema starts with.
    pub fn initial_values(&self) -> Settings {
        match &self.defaults {
            Some(defaults) => defaults.clone(),
            None => Settings::new(self.defines.iter().map(|def| def.ty.empty_value()).collect()),
        }
    }
}

/// Builder for [`SettingParserInfo`].
///
/// Defines are kept in registration order. Supplying a default for any define
/// gives the schema a defaults record; defines added without one fall back to
/// the empty value of their type.
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct SettingParserInfoBuilder {
    name: String,
    defines: Vec<SettingDefine>,
    defaults: Vec<SettingValue>,
    has_defaults: bool,
    name_key: Option<String>,
}

impl SettingParserInfoBuilder {
    pub fn define(self, key: impl Into<String>, ty: SettingType) -> Self {
        self.push(key.into(), ty, false, None)
    }

    pub fn define_default(self, key: impl Into<String>, ty: SettingType, default: SettingValue) -> Self {
        self.push(key.into(), ty, false, Some(default))
    }

    pub fn hidden(self, key: impl Into<String>, ty: SettingType, default: SettingValue) -> Self {
        self.push(key.into(), ty, true, Some(default))
    }

    /// Marks `key` as the field naming elements of a unique section list.
    pub fn name_field(mut self, key: impl Into<String>) -> Self {
        self.name_key = Some(key.into());
        self
    }

    fn push(mut self, key: String, ty: SettingType, hidden: bool, default: Option<SettingValue>) -> Self {
        assert!(
            !self.defines.iter().any(|def| def.key == key),
            "duplicate setting '{}' in '{}'",
            key,
            self.name
        );
        self.has_defaults |= default.is_some();
        self.defaults.push(default.unwrap_or_else(|| ty.empty_value()));
        self.defines.push(SettingDefine { key, ty, hidden });
        self
    }

    pub fn build(self) -> Arc<SettingParserInfo> {
        let name_field = self.name_key.as_deref().map(|key| {
            self.defines
                .iter()
                .position(|def| def.key == key)
                .unwrap_or_else(|| panic!("name field '{}' not defined in '{}'", key, self.name))
        });
        Arc::new(SettingParserInfo {
            defaults: self.has_defaults.then(|| Settings::new(self.defaults)),
            name: self.name,
            defines: self.defines,
            name_field,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order_and_name_field() {
        let info = SettingParserInfo::builder("service")
            .define("name", SettingType::Str)
            .define_default("process_limit", SettingType::Uint, SettingValue::Uint(100))
            .name_field("name")
            .build();

        assert_eq!(info.find("name"), Some(0));
        assert_eq!(info.find("process_limit"), Some(1));
        assert!(info.is_name_field(0));
        let defaults = info.defaults.as_ref().unwrap();
        assert!(matches!(defaults.get(0), SettingValue::Str(None)));
        assert!(matches!(defaults.get(1), SettingValue::Uint(100)));
    }

    #[test]
    fn test_no_defaults_record_without_defaults() {
        let info = SettingParserInfo::builder("plain")
            .define("flag", SettingType::Bool)
            .build();
        assert!(info.defaults.is_none());
        assert!(matches!(info.initial_values().get(0), SettingValue::Bool(false)));
    }

    #[test]
    #[should_panic(expected = "duplicate setting")]
    fn test_duplicate_key_rejected() {
        let _ = SettingParserInfo::builder("dup")
            .define("a", SettingType::Bool)
            .define("a", SettingType::Str)
            .build();
    }
}
