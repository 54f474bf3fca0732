//! Identifier and module-name derivation.
//!
//! - Asset identifiers are UpperCamelCase: `door-open_01.wav` → `DoorOpen01`
//! - Group names are snake_case module names: `Sfx Play` → `sfx_play`
//! - Module paths are `::`-separated identifier paths: `my_game::audio`

/// Rust keywords that cannot be used as plain module names.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Derives an asset identifier from a file stem.
///
/// Splits on every character that is not ASCII alphanumeric and upper-cases
/// the first letter of each piece. Returns `None` if nothing usable remains.
#[must_use]
pub fn asset_identifier(stem: &str) -> Option<String> {
    let mut ident = String::with_capacity(stem.len());
    for piece in stem
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|p| !p.is_empty())
    {
        let mut chars = piece.chars();
        if let Some(first) = chars.next() {
            ident.push(first.to_ascii_uppercase());
            ident.extend(chars);
        }
    }

    if ident.is_empty() {
        return None;
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    // `ALL` would shadow `SoundId::ALL` inside the generated impl.
    if ident == "Self" || ident == "ALL" {
        ident.push('_');
    }
    Some(ident)
}

/// Derives a module name from a group directory name.
#[must_use]
pub fn group_name(dir_name: &str) -> String {
    let mut name: String = dir_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if name == "_" || KEYWORDS.contains(&name.as_str()) {
        name.push('_');
    }
    name
}

/// Returns true if `s` is a plain (non-keyword) Rust identifier.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && s != "_"
        && s != "Self"
        && !KEYWORDS.contains(&s)
}

/// Returns true if `path` is a `::`-separated path of identifiers.
///
/// A leading `::` and the `crate` root are accepted.
#[must_use]
pub fn is_module_path(path: &str) -> bool {
    let path = path.strip_prefix("::").unwrap_or(path);
    let mut segments = path.split("::");
    let Some(first) = segments.next() else {
        return false;
    };
    (first == "crate" || is_identifier(first)) && segments.all(is_identifier)
}
