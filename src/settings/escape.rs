/// Separator between key path segments, and between a string list key and its subkey.
pub const SETTINGS_SEPARATOR: char = '/';

/// Escapes a section name so it can be embedded as a single key path segment.
pub fn settings_section_escape(name: &str) -> String {
    if !name.chars().any(needs_escape) {
        return name.to_string();
    }

    let mut escaped = String::with_capacity(name.len() + 8);
    for ch in name.chars() {
        match ch {
            '=' => escaped.push_str("\\e"),
            SETTINGS_SEPARATOR => escaped.push_str("\\s"),
            '\\' => escaped.push_str("\\\\"),
            ' ' => escaped.push_str("\\_"),
            ',' => escaped.push_str("\\+"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn needs_escape(ch: char) -> bool {
    matches!(ch, '=' | SETTINGS_SEPARATOR | '\\' | ' ' | ',')
}
