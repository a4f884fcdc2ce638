//! String transformation utilities for code generation
//!
//! These utilities belong in the generation domain as they are used
//! for deriving identifiers and file names from specification names.

use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid identifier regex"));

/// Converts a string to snake_case.
///
/// Handles camelCase, PascalCase, kebab-case and space-separated input.
/// Characters other than alphanumerics and separators are dropped.
///
/// # Examples
/// ```
/// use swagger2angular::generation::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("findPetsByStatus"), "find_pets_by_status");
/// assert_eq!(to_snake_case("find-pets-by-status"), "find_pets_by_status");
/// assert_eq!(to_snake_case("get HTTP Response"), "get_http_response");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_uppercase() {
            // Word boundary on a lower-to-upper transition
            if prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else if (ch == '-' || ch == '_' || ch == ' ' || ch == '.') && !result.ends_with('_') {
            result.push('_');
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Converts a string to PascalCase, used for class and type names.
///
/// # Examples
/// ```
/// use swagger2angular::generation::utils::to_proper_case;
///
/// assert_eq!(to_proper_case("find_pets_by_status"), "FindPetsByStatus");
/// assert_eq!(to_proper_case("store order"), "StoreOrder");
/// ```
pub fn to_proper_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Converts a string to camelCase, used for method and variable names.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_proper_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Converts a string to kebab-case, used for resource file names.
pub fn to_kebab_case(s: &str) -> String {
    to_snake_case(s).replace('_', "-")
}

/// Whether `s` can be used verbatim as a TypeScript identifier
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER_RE.is_match(s)
}

/// Property key as it must be written in an interface declaration
pub fn property_key(s: &str) -> String {
    if is_identifier(s) {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

/// Whether `s` is a reserved word in TypeScript
pub fn is_reserved_word(s: &str) -> bool {
    matches!(
        s,
        "break" | "case" | "catch" | "class" | "const" | "continue" | "debugger" | "default"
            | "delete" | "do" | "else" | "enum" | "export" | "extends" | "false" | "finally"
            | "for" | "function" | "if" | "import" | "in" | "instanceof" | "new" | "null"
            | "return" | "super" | "switch" | "this" | "throw" | "true" | "try" | "typeof"
            | "var" | "void" | "while" | "with" | "let" | "static" | "yield" | "await"
            | "implements" | "interface" | "package" | "private" | "protected" | "public"
    )
}

/// Sanitizes a name for use as a TypeScript function argument.
///
/// Non-identifiers are camelCased; reserved words get a trailing underscore.
pub fn sanitize_variable_name(s: &str) -> String {
    let name = if is_identifier(s) {
        s.to_string()
    } else {
        to_camel_case(s)
    };

    match name.as_str() {
        "" => "value".to_string(),
        _ if is_reserved_word(&name) => format!("{name}_"),
        _ if name.starts_with(|c: char| c.is_ascii_digit()) => format!("_{name}"),
        _ => name,
    }
}

/// Type name for a schema definition, also used as its file stem.
///
/// Valid identifiers are kept as declared. Anything else is PascalCased,
/// which drops path separators, dots and other punctuation. The result is
/// empty when nothing usable remains.
///
/// # Examples
/// ```
/// use swagger2angular::generation::utils::to_type_identifier;
///
/// assert_eq!(to_type_identifier("Pet"), "Pet");
/// assert_eq!(to_type_identifier("Page«Pet»"), "PagePet");
/// assert_eq!(to_type_identifier("../../escape"), "Escape");
/// ```
pub fn to_type_identifier(s: &str) -> String {
    if is_identifier(s) && !is_reserved_word(s) {
        return s.to_string();
    }
    let name = to_proper_case(s);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}
