use std::collections::HashSet;
use std::fmt::Write;

use super::format::{export_type, DefaultCheck};
use super::{ConfigKeyType, DumpFlags, DumpScope, ExportCallback};
use crate::settings::{
    settings_section_escape, strvar_strip, ChangeMask, SettingDefine, SettingParserInfo, SettingType,
    SettingValue, Settings, SETTINGS_SEPARATOR,
};

/// Walks setting trees and streams their entries to a callback.
///
/// Keys are built as `<prefix><key>`, where the prefix grows by
/// `<list key>/<section id>/` for every section list entered.
pub(crate) struct Exporter<'a> {
    value: String,
    prefix: String,
    keys: HashSet<String>,
    scope: DumpScope,
    flags: DumpFlags,
    callback: &'a mut dyn ExportCallback,
}

impl<'a> Exporter<'a> {
    pub fn new(scope: DumpScope, flags: DumpFlags, callback: &'a mut dyn ExportCallback) -> Self {
        Self {
            value: String::with_capacity(256),
            prefix: String::with_capacity(64),
            keys: HashSet::new(),
            scope,
            flags,
            callback,
        }
    }

    /// Exports one settings record of schema `info`.
    ///
    /// `section_idx` is the next free section index. Every element of a
    /// non-unique section list consumes one, and it is never handed out twice.
    ///
    /// # Panics
    ///
    /// Panics if the values do not match the schema, or a section list has a
    /// different number of values and change masks.
    pub fn export(
        &mut self,
        info: &SettingParserInfo,
        parent_unique_deflist: bool,
        set: &Settings,
        changes: &ChangeMask,
        section_idx: &mut u32,
    ) {
        for (i, def) in info.defines.iter().enumerate() {
            let value = set.get(i);
            let check = self.default_check(info, i, def, parent_unique_deflist, changes.is_changed(i));

            let mut dump = false;
            let mut children: &[Settings] = &[];
            let mut change_children: &[ChangeMask] = &[];
            self.value.clear();
            match &def.ty {
                SettingType::DefList(child) | SettingType::DefListUnique(child) => {
                    let SettingValue::List(list) = value else {
                        panic!("section list '{}' holds {:?}", def.key, value);
                    };
                    for (n, element) in list.iter().enumerate() {
                        if n > 0 {
                            self.value.push(' ');
                        }
                        push_section_name(&mut self.value, def, child, element, *section_idx + n as u32);
                    }
                    change_children = changes.children(i);
                    assert_eq!(
                        list.len(),
                        change_children.len(),
                        "section list '{}' has {} values but {} change masks",
                        def.key,
                        list.len(),
                        change_children.len()
                    );
                    children = list;
                }
                SettingType::StrList => {
                    self.export_strlist(&def.key, value);
                    continue;
                }
                SettingType::Alias => continue,
                ty => dump = export_type(&mut self.value, value, ty, check),
            }

            if !self.value.is_empty() || dump {
                let key = format!("{}{}", self.prefix, def.key);
                if !self.keys.contains(&key) {
                    let kind = if parent_unique_deflist && info.is_name_field(i) {
                        ConfigKeyType::UniqueKey
                    } else if def.ty.is_deflist() {
                        ConfigKeyType::List
                    } else {
                        ConfigKeyType::Normal
                    };
                    self.callback.entry(&key, &self.value, kind);
                    if self.flags.contains(DumpFlags::DEDUPLICATE_KEYS) {
                        self.keys.insert(key);
                    }
                }
            }

            let (SettingType::DefList(child) | SettingType::DefListUnique(child)) = &def.ty else {
                continue;
            };
            let unique = matches!(def.ty, SettingType::DefListUnique(_));
            let prefix_len = self.prefix.len();
            let section_start_idx = *section_idx;
            *section_idx += children.len() as u32;
            for (n, (element, element_changes)) in children.iter().zip(change_children).enumerate() {
                self.prefix.push_str(&def.key);
                self.prefix.push(SETTINGS_SEPARATOR);
                push_section_name(&mut self.prefix, def, child, element, section_start_idx + n as u32);
                self.prefix.push(SETTINGS_SEPARATOR);
                self.export(child, unique, element, element_changes, section_idx);
                self.prefix.truncate(prefix_len);
            }
        }
    }

    fn default_check<'i>(
        &self,
        info: &'i SettingParserInfo,
        index: usize,
        def: &SettingDefine,
        parent_unique_deflist: bool,
        changed: bool,
    ) -> DefaultCheck<'i> {
        let dump_default = match self.scope {
            DumpScope::AllWithHidden => true,
            // hidden settings only when explicitly set
            DumpScope::AllWithoutHidden => !def.hidden || changed,
            DumpScope::Set => changed,
            DumpScope::Changed => false,
        };

        if parent_unique_deflist && self.flags.contains(DumpFlags::HIDE_LIST_DEFAULTS) {
            // The real default of a repeated section (e.g. a service block)
            // isn't known here: unchanged counts as default, changed does not.
            // The name is always kept so the section can be told apart.
            return if info.is_name_field(index) || changed || dump_default {
                DefaultCheck::ForceEmit
            } else {
                DefaultCheck::ForceSuppress
            };
        }

        if dump_default {
            DefaultCheck::ForceEmit
        } else {
            DefaultCheck::CompareTo(info.defaults.as_ref().map(|defaults| defaults.get(index)))
        }
    }

    fn export_strlist(&mut self, key: &str, value: &SettingValue) {
        let SettingValue::StrList(pairs) = value else {
            panic!("string list '{}' holds {:?}", key, value);
        };
        let Some(pairs) = pairs else {
            return;
        };

        let key = format!("{}{}", self.prefix, key);
        if self.keys.contains(&key) {
            // already added all of these
            return;
        }
        self.callback.entry(&key, "", ConfigKeyType::KeyList);
        for (subkey, subvalue) in pairs {
            let entry_key = format!("{}{}{}", key, SETTINGS_SEPARATOR, subkey);
            self.callback.entry(&entry_key, subvalue, ConfigKeyType::Normal);
        }
        if self.flags.contains(DumpFlags::DEDUPLICATE_KEYS) {
            self.keys.insert(key);
        }
    }
}

/// Appends the identifier of one section list element: its escaped name for
/// named elements of unique lists, otherwise its section index.
fn push_section_name(out: &mut String, def: &SettingDefine, child: &SettingParserInfo, element: &Settings, idx: u32) {
    if !matches!(def.ty, SettingType::DefListUnique(_)) {
        let _ = write!(out, "{}", idx);
        return;
    }
    let name_field = child
        .name_field
        .unwrap_or_else(|| panic!("unique section list '{}' has no name field", def.key));
    let name = match (&child.defines[name_field].ty, element.get(name_field).as_str()) {
        (SettingType::StrVars, Some(name)) => strvar_strip(name),
        (_, name) => name.unwrap_or(""),
    };
    if name.is_empty() {
        // unnamed, so not unique. use the index.
        let _ = write!(out, "{}", idx);
    } else {
        out.push_str(&settings_section_escape(name));
    }
}
