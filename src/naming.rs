//! Identifier transformation
//!
//! Turns schema identifiers into generated Rust names. Every function here is
//! pure: the same input always yields the same output.

/// Convert an identifier to lowercase words joined by `_`.
///
/// A delimiter goes between a lowercase letter or digit and a following
/// uppercase letter, and before an uppercase letter that starts a capitalized
/// word (`HTTPStatus` -> `http_status`). No delimiter is inserted after a
/// character that is not ASCII alphanumeric, so existing delimiters pass
/// through. Case folding is ASCII only.
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = (prev.is_ascii_lowercase() || prev.is_ascii_digit())
                || (prev.is_ascii_alphanumeric() && next_is_lower);
            if boundary {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }

    out
}

/// Convert a view name to a Rust type name (PascalCase)
pub fn to_type_name(s: &str) -> String {
    let pascal = to_pascal_case(&to_snake_case(s));
    if pascal.is_empty() || pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("View{}", pascal)
    } else {
        pascal
    }
}

/// Capitalize each word of a delimited identifier and join the words.
///
/// Any character that is not ASCII alphanumeric separates words.
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => {
                    let first_upper = first.to_ascii_uppercase().to_string();
                    first_upper + chars.as_str()
                }
            }
        })
        .collect()
}

/// Convert a column name to a Rust field name
pub fn to_field_name(column: &str) -> String {
    let mut name: String = to_snake_case(column)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if !name.chars().any(|c| c.is_ascii_alphanumeric()) {
        name.push_str("field");
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }

    escape_keyword(name)
}

fn escape_keyword(name: String) -> String {
    match name.as_str() {
        // These cannot be raw identifiers
        "self" | "Self" | "super" | "crate" => format!("{}_", name),
        _ if is_rust_keyword(&name) => format!("r#{}", name),
        _ => name,
    }
}

/// Check if a name is a Rust reserved keyword
pub fn is_rust_keyword(name: &str) -> bool {
    matches!(
        name,
        "as" | "async"
            | "await"
            | "break"
            | "const"
            | "continue"
            | "crate"
            | "dyn"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "gen"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "self"
            | "Self"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "macro"
            | "override"
            | "priv"
            | "try"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
    )
}

/// Check that a name can be used verbatim as a module name
pub fn is_valid_module_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = match chars.next() {
        Some(first) => first.is_ascii_alphabetic() || first == '_',
        None => false,
    };

    starts_ok
        && name != "_"
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !is_rust_keyword(name)
}
