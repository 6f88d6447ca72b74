//! Identifier derivation for components and styles.

use convert_case::{Case, Casing};

/// Base style name for the root and for nodes whose name yields no identifier.
pub const ROOT_STYLE_NAME: &str = "container";

/// Prepended to names that would not start with an uppercase letter, appended to reserved ones.
pub const COMPONENT_NAME_PREFIX: &str = "Component";

/// Identifiers the generated file imports or references itself.
pub const RESERVED_COMPONENT_NAMES: &[&str] =
    &["React", "View", "Text", "StyleSheet", "ViewStyle", "TextStyle"];

/// Split on anything that is not an ASCII letter or digit.
fn words(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn alphanumeric(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// camelCase identifier for a style, or `None` if the name has nothing usable.
///
/// `"Login Button"` becomes `loginButton`; names that are empty or would
/// start with a digit yield `None`.
pub fn style_base_name(name: &str) -> Option<String> {
    let camel = alphanumeric(&words(name).to_case(Case::Camel));
    match camel.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => {
            let mut out = first.to_ascii_lowercase().to_string();
            out.push_str(&camel[first.len_utf8()..]);
            Some(out)
        }
        _ => None,
    }
}

/// PascalCase component identifier that always starts with an uppercase letter.
///
/// Names that collide with an imported identifier get a `Component` suffix.
pub fn component_name(name: &str) -> String {
    let pascal = alphanumeric(&words(name).to_case(Case::Pascal));
    let name = match pascal.chars().next() {
        Some(first) if first.is_ascii_uppercase() => pascal,
        _ => format!("{}{}", COMPONENT_NAME_PREFIX, pascal),
    };
    if RESERVED_COMPONENT_NAMES.contains(&name.as_str()) {
        format!("{}{}", name, COMPONENT_NAME_PREFIX)
    } else {
        name
    }
}

/// Caller-supplied name wins; otherwise derive from the root node name.
pub fn resolve_component_name(explicit: Option<&str>, root_name: &str) -> String {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => component_name(name),
        None => component_name(root_name),
    }
}
