//! Array names for generated declarations
//!
//! `off.sub` becomes `signalOff`, `garage door-2.sub` becomes
//! `signalGarageDoor2`. Explicit names are only sanitized.

use std::path::Path;

const NAME_PREFIX: &str = "signal";

/// Derive an array name from a capture file name
pub fn array_name_for(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut name = String::from(NAME_PREFIX);
    for word in stem
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.push(first.to_ascii_uppercase());
            name.extend(chars);
        }
    }
    name
}

/// Make `name` a valid C identifier
pub fn sanitize_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if ident.is_empty() {
        return NAME_PREFIX.to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Suffix repeated names (`signalOn`, `signalOn_2`, ...) so every array is unique
pub fn dedupe_names(names: &mut [String]) {
    let mut seen = std::collections::HashSet::new();
    for name in names.iter_mut() {
        if seen.insert(name.clone()) {
            continue;
        }
        let mut n = 2;
        while seen.contains(&format!("{}_{}", name, n)) {
            n += 1;
        }
        *name = format!("{}_{}", name, n);
        seen.insert(name.clone());
    }
}
