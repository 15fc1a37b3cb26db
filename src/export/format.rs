//! Canonical text rendering of scalar setting values.

use std::fmt::Write;

use crate::settings::{strvar_strip, SettingType, SettingValue};

/// How a value is weighed against its default before it is rendered.
#[derive(Debug, Clone, Copy)]
pub enum DefaultCheck<'a> {
    /// Render regardless of the default.
    ForceEmit,
    /// Treat the value as the default and render nothing.
    ForceSuppress,
    /// Render only if the value differs. A missing default always differs.
    CompareTo(Option<&'a SettingValue>),
}

impl DefaultCheck<'_> {
    fn dumps(self, is_default: impl FnOnce(&SettingValue) -> bool) -> bool {
        match self {
            DefaultCheck::ForceEmit => true,
            DefaultCheck::ForceSuppress => false,
            DefaultCheck::CompareTo(None) => true,
            DefaultCheck::CompareTo(Some(default)) => !is_default(default),
        }
    }
}

/// Appends the canonical text of `value` to `out`.
///
/// Returns `true` if anything was rendered, which may be an empty string.
///
/// # Panics
///
/// Panics if `ty` is not a scalar type or `value` does not hold a value of
/// that type. Either means the schema itself is broken.
pub fn export_type(out: &mut String, value: &SettingValue, ty: &SettingType, check: DefaultCheck<'_>) -> bool {
    match (ty, value) {
        (SettingType::Bool, SettingValue::Bool(val)) => {
            if !check.dumps(|default| default == value) {
                return false;
            }
            out.push_str(if *val { "yes" } else { "no" });
        }
        (SettingType::Size, SettingValue::Size(val)) => {
            if !check.dumps(|default| default == value) {
                return false;
            }
            export_size(out, *val);
        }
        (SettingType::Uint | SettingType::UintOct | SettingType::Time | SettingType::TimeMsecs, SettingValue::Uint(val)) => {
            if !check.dumps(|default| default == value) {
                return false;
            }
            match ty {
                SettingType::UintOct => {
                    let _ = write!(out, "0{:o}", val);
                }
                SettingType::Time => export_time(out, *val),
                SettingType::TimeMsecs => export_time_msecs(out, *val),
                _ => {
                    let _ = write!(out, "{}", val);
                }
            }
        }
        (SettingType::InPort, SettingValue::Port(val)) => {
            if !check.dumps(|default| default == value) {
                return false;
            }
            let _ = write!(out, "{}", val);
        }
        (SettingType::StrVars, SettingValue::Str(val)) => {
            let Some(val) = val.as_deref().map(strvar_strip) else {
                return false;
            };
            if !check.dumps(|default| default.as_str().map(strvar_strip) == Some(val)) {
                return false;
            }
            out.push_str(val);
        }
        (SettingType::Str, SettingValue::Str(val)) => {
            let Some(val) = val.as_deref() else {
                return false;
            };
            if !check.dumps(|default| default.as_str() == Some(val)) {
                return false;
            }
            out.push_str(val);
        }
        (SettingType::Enum, SettingValue::Str(val)) => {
            let Some(val) = val.as_deref() else {
                return false;
            };
            let chosen = enum_chosen(val);
            if !check.dumps(|default| default.as_str().map(enum_chosen) == Some(chosen)) {
                return false;
            }
            out.push_str(chosen);
        }
        (ty, value) => panic!("cannot export {:?} as setting type {:?}", value, ty),
    }
    true
}

/// The selected alternative of an enum value such as `"first:second:third"`.
fn enum_chosen(value: &str) -> &str {
    value.split_once(':').map_or(value, |(chosen, _)| chosen)
}

fn export_size(out: &mut String, mut size: u64) {
    const SUFFIXES: [char; 5] = ['B', 'k', 'M', 'G', 'T'];

    if size == 0 {
        out.push('0');
        return;
    }
    let mut suffix = SUFFIXES[0];
    for next in &SUFFIXES[1..] {
        if size % 1024 != 0 {
            break;
        }
        suffix = *next;
        size /= 1024;
    }
    let _ = write!(out, "{} {}", size, suffix);
}

fn export_time(out: &mut String, mut stamp: u32) {
    const UNITS: [(u32, &str); 4] = [(60, "mins"), (60, "hours"), (24, "days"), (7, "weeks")];

    if stamp == 0 {
        out.push('0');
        return;
    }
    let mut suffix = "secs";
    for (divisor, unit) in UNITS {
        if stamp % divisor != 0 {
            break;
        }
        stamp /= divisor;
        suffix = unit;
    }
    let _ = write!(out, "{} {}", stamp, suffix);
}

fn export_time_msecs(out: &mut String, msecs: u32) {
    if msecs % 1000 == 0 {
        export_time(out, msecs / 1000);
    } else {
        let _ = write!(out, "{} ms", msecs);
    }
}
