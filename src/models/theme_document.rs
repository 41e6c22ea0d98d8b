// Theme Document Model
// Normalized in-memory form of a VS Code color theme

use std::collections::HashMap;

/// Foreground and font style attached to a scope rule. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSettings {
    pub foreground: Option<String>,
    pub font_style: Option<String>,
}

/// A `tokenColors` entry with its selector already split into plain scopes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeRule {
    /// Scopes in selector order; the position is the rule's priority index
    pub scopes: Vec<String>,
    pub settings: TokenSettings,
}

impl ScopeRule {
    pub fn new<S: Into<String>>(
        scopes: impl IntoIterator<Item = S>,
        foreground: Option<&str>,
        font_style: Option<&str>,
    ) -> Self {
        Self {
            scopes: scopes.into_iter().map(Into::into).collect(),
            settings: TokenSettings {
                foreground: foreground.map(str::to_string),
                font_style: font_style.map(str::to_string),
            },
        }
    }

    /// Positions at which `key` appears in this rule's selector
    pub fn positions_of<'a>(&'a self, key: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.scopes
            .iter()
            .enumerate()
            .filter(move |(_, scope)| scope.as_str() == key)
            .map(|(index, _)| index)
    }
}

/// Parsed theme: the flat UI color map plus scope rules in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeDocument {
    pub colors: HashMap<String, String>,
    pub rules: Vec<ScopeRule>,
}

impl ThemeDocument {
    pub fn color(&self, key: &str) -> Option<&str> {
        self.colors.get(key).map(String::as_str)
    }
}
