//! Receiver binding names
//!
//! Every dispatch function binds its receiver to a name derived from the
//! composite type's name. The derived name must not shadow anything the
//! function body refers to, so collisions are resolved by appending a
//! suffix.

use log::debug;

/// Name given to the sole parameter of every dispatch function
pub const CONSUMER_PARAM: &str = "consumer";

/// Go's reserved words
pub const GO_KEYWORDS: [&str; 25] = [
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough", "for",
    "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var",
];

/// How the base receiver name is derived from the composite's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingStyle {
    /// `OptionType` -> `optiontype`
    #[default]
    Lowercase,
    /// `OptionType` -> `optionType`
    LowercaseFirst,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingStrategy {
    pub style: BindingStyle,
    /// Appended until the name no longer collides
    pub suffix: String,
}

impl Default for BindingStrategy {
    fn default() -> Self {
        Self {
            style: BindingStyle::default(),
            suffix: "_".to_string(),
        }
    }
}

impl BindingStrategy {
    /// An empty suffix falls back to `_`.
    pub fn new(style: BindingStyle, suffix: &str) -> Self {
        let suffix = if suffix.is_empty() { "_" } else { suffix };
        Self {
            style,
            suffix: suffix.to_string(),
        }
    }

    /// The name before collision handling
    pub fn base_name(&self, composite: &str) -> String {
        match self.style {
            BindingStyle::Lowercase => composite.to_lowercase(),
            BindingStyle::LowercaseFirst => {
                let mut chars = composite.chars();
                match chars.next() {
                    Some(first) => first.to_lowercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }

    /// Receiver name for a dispatch function on a record with `fields`
    pub fn binding_name(&self, composite: &str, fields: &[&str]) -> String {
        let base = self.base_name(composite);
        let mut name = base.clone();
        while collides(&name, fields) {
            name.push_str(&self.suffix);
        }
        if name != base {
            debug!("receiver name {base:?} for {composite} collides, using {name:?}");
        }
        name
    }
}

fn collides(name: &str, fields: &[&str]) -> bool {
    name == "_"
        || name == CONSUMER_PARAM
        || !is_identifier(name)
        || GO_KEYWORDS.contains(&name)
        || fields.contains(&name)
}

/// Whether `name` is a valid Go identifier
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|ch| ch == '_' || ch.is_alphanumeric())
        }
        _ => false,
    }
}

/// Go's export rule: the first character is an upper-case letter
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
