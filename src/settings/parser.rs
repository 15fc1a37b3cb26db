use std::mem;
use std::sync::Arc;

use super::types::{SettingParserInfo, SettingType};
use super::value::{ChangeMask, FieldChange, SettingValue, Settings};

/// Current values of one schema root together with their change mask.
///
/// Values start out as the schema defaults with nothing marked changed.
/// Section-list elements are appended together with their own change masks,
/// keeping both sides the same length.
#[derive(Debug, Clone)]
pub struct SettingParser {
    root: Arc<SettingParserInfo>,
    set: Settings,
    changes: ChangeMask,
}

impl SettingParser {
    pub fn new(root: Arc<SettingParserInfo>) -> Self {
        let set = root.initial_values();
        let changes = ChangeMask::new(
            root.defines
                .iter()
                .map(|def| match def.ty {
                    SettingType::DefList(_) | SettingType::DefListUnique(_) => FieldChange::List(Vec::new()),
                    _ => FieldChange::Flag(false),
                })
                .collect(),
        );
        Self { root, set, changes }
    }

    pub fn root(&self) -> &Arc<SettingParserInfo> {
        &self.root
    }

    pub fn set(&self) -> &Settings {
        &self.set
    }

    pub fn changes(&self) -> &ChangeMask {
        &self.changes
    }

    /// Stores `value` for `key` and marks it explicitly set.
    ///
    /// Returns `false` if the schema has no such key, or the value does not
    /// fit its type. Section lists and aliases are never set here; sections are
    /// appended with [`add_section`](Self::add_section).
    pub fn set_value(&mut self, key: &str, value: SettingValue) -> bool {
        let Some(index) = self.root.find(key) else {
            return false;
        };
        let ty = &self.root.defines[index].ty;
        if ty.is_deflist()
            || matches!(ty, SettingType::Alias)
            || mem::discriminant(&value) != mem::discriminant(&ty.empty_value())
        {
            return false;
        }
        *self.set.get_mut(index) = value;
        *self.changes.get_mut(index) = FieldChange::Flag(true);
        true
    }

    /// Appends `section` as a new element of the section list `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not a section list of the section's schema.
    pub fn add_section(&mut self, key: &str, section: SettingParser) {
        let index = self
            .root
            .find(key)
            .unwrap_or_else(|| panic!("'{}' has no setting '{}'", self.root.name, key));
        match &self.root.defines[index].ty {
            SettingType::DefList(child) | SettingType::DefListUnique(child)
                if Arc::ptr_eq(child, &section.root) => {}
            _ => panic!("'{}' is not a section list of '{}'", key, section.root.name),
        }
        match (self.set.get_mut(index), self.changes.get_mut(index)) {
            (SettingValue::List(values), FieldChange::List(changes)) => {
                values.push(section.set);
                changes.push(section.changes);
            }
            _ => panic!("section list '{}' holds a non-list value", key),
        }
    }

    pub fn get_value(&self, key: &str) -> Option<(&SettingValue, &SettingType)> {
        let index = self.root.find(key)?;
        Some((self.set.get(index), &self.root.defines[index].ty))
    }

    /// Independent copy of the values and change mask. The schema is shared.
    pub fn dup(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            set: self.set.clone(),
            changes: self.changes.clone(),
        }
    }
}
