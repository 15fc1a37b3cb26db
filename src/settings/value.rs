/// Tag prefixed to string-var values whose `%variables` are not expanded yet.
pub const SETTING_STRVAR_UNEXPANDED: char = '0';
/// Tag prefixed to string-var values that have been expanded.
pub const SETTING_STRVAR_EXPANDED: char = '1';

/// A single current or default setting value.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Size(u64),
    /// Plain, octal and duration settings.
    Uint(u32),
    Port(u16),
    /// Strings, string-vars and enums. `None` means unset.
    Str(Option<String>),
    List(Vec<Settings>),
    /// Ordered (key, value) pairs. `None` means the list was never created.
    StrList(Option<Vec<(String, String)>>),
    None,
}

impl SettingValue {
    pub fn str(value: impl Into<String>) -> Self {
        SettingValue::Str(Some(value.into()))
    }

    pub fn strvar(value: &str) -> Self {
        SettingValue::Str(Some(strvar_unexpanded(value)))
    }

    pub fn strlist<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        SettingValue::StrList(Some(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Str(value) => value.as_deref(),
            _ => None,
        }
    }
}

/// Current values of one schema, in definition order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    values: Vec<SettingValue>,
}

impl Settings {
    pub fn new(values: Vec<SettingValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> &SettingValue {
        &self.values[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut SettingValue {
        &mut self.values[index]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Whether a field was explicitly set. Section lists carry one mask per element.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Flag(bool),
    List(Vec<ChangeMask>),
}

impl FieldChange {
    pub fn is_changed(&self) -> bool {
        match self {
            FieldChange::Flag(changed) => *changed,
            FieldChange::List(children) => !children.is_empty(),
        }
    }
}

/// Change-tracking flags parallel to a [`Settings`] record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChangeMask {
    fields: Vec<FieldChange>,
}

impl ChangeMask {
    pub fn new(fields: Vec<FieldChange>) -> Self {
        Self { fields }
    }

    pub fn get(&self, index: usize) -> &FieldChange {
        &self.fields[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut FieldChange {
        &mut self.fields[index]
    }

    pub fn is_changed(&self, index: usize) -> bool {
        self.fields[index].is_changed()
    }

    pub fn children(&self, index: usize) -> &[ChangeMask] {
        match &self.fields[index] {
            FieldChange::List(children) => children,
            FieldChange::Flag(_) => &[],
        }
    }
}

pub fn strvar_unexpanded(value: &str) -> String {
    let mut tagged = String::with_capacity(value.len() + 1);
    tagged.push(SETTING_STRVAR_UNEXPANDED);
    tagged.push_str(value);
    tagged
}

/// Strips the expansion tag from a stored string-var value.
///
/// # Panics
///
/// Panics if the value carries no tag, which means it was stored bypassing
/// the string-var convention.
pub fn strvar_strip(value: &str) -> &str {
    match value.strip_prefix(&[SETTING_STRVAR_UNEXPANDED, SETTING_STRVAR_EXPANDED][..]) {
        Some(stripped) => stripped,
        None => panic!("string-var value {:?} is missing its expansion tag", value),
    }
}
