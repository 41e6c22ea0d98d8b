// Style Model
// Semantic roles and their resolved styles

use std::collections::BTreeMap;
use std::fmt;

use super::ThemeMode;

/// Fixed style slots the CodeMirror theme needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SemanticRole {
    // Editor
    Background,
    Foreground,
    Selection,
    Cursor,
    DropdownBackground,
    DropdownBorder,
    ActiveLine,
    MatchingBracket,
    // Syntax
    Keyword,
    Variable,
    Function,
    String,
    Constant,
    Type,
    Class,
    Number,
    Comment,
    Heading,
    Invalid,
    Regexp,
}

impl SemanticRole {
    pub const ALL: [SemanticRole; 20] = [
        SemanticRole::Background,
        SemanticRole::Foreground,
        SemanticRole::Selection,
        SemanticRole::Cursor,
        SemanticRole::DropdownBackground,
        SemanticRole::DropdownBorder,
        SemanticRole::ActiveLine,
        SemanticRole::MatchingBracket,
        SemanticRole::Keyword,
        SemanticRole::Variable,
        SemanticRole::Function,
        SemanticRole::String,
        SemanticRole::Constant,
        SemanticRole::Type,
        SemanticRole::Class,
        SemanticRole::Number,
        SemanticRole::Comment,
        SemanticRole::Heading,
        SemanticRole::Invalid,
        SemanticRole::Regexp,
    ];

    /// Template key for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticRole::Background => "background",
            SemanticRole::Foreground => "foreground",
            SemanticRole::Selection => "selection",
            SemanticRole::Cursor => "cursor",
            SemanticRole::DropdownBackground => "dropdownBackground",
            SemanticRole::DropdownBorder => "dropdownBorder",
            SemanticRole::ActiveLine => "activeLine",
            SemanticRole::MatchingBracket => "matchingBracket",
            SemanticRole::Keyword => "keyword",
            SemanticRole::Variable => "variable",
            SemanticRole::Function => "function",
            SemanticRole::String => "string",
            SemanticRole::Constant => "constant",
            SemanticRole::Type => "type",
            SemanticRole::Class => "class",
            SemanticRole::Number => "number",
            SemanticRole::Comment => "comment",
            SemanticRole::Heading => "heading",
            SemanticRole::Invalid => "invalid",
            SemanticRole::Regexp => "regexp",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == key)
    }

    /// Theme keys tried in order, most specific first.
    ///
    /// Different theme authors name the same concept differently, so each
    /// chain degrades from the precise key to more generic ones.
    pub fn candidate_keys(&self) -> &'static [&'static str] {
        match self {
            SemanticRole::Background => &["editor.background"],
            SemanticRole::Foreground => &["foreground", "input.foreground"],
            SemanticRole::Selection => &["editor.selectionBackground"],
            SemanticRole::Cursor => &["editorCursor.foreground", "foreground"],
            SemanticRole::DropdownBackground => &["editor.background"],
            SemanticRole::DropdownBorder => &["dropdown.border", "foreground"],
            SemanticRole::ActiveLine => &[
                "editor.lineHighlightBackground",
                "editor.selectionBackground",
            ],
            SemanticRole::MatchingBracket => &[
                "editorBracketMatch.background",
                "editor.lineHighlightBackground",
                "editor.selectionBackground",
            ],
            SemanticRole::Keyword => &["keyword"],
            SemanticRole::Variable => &[
                "variable.parameter",
                "variable.other",
                "variable.language",
                "variable",
                "foreground",
            ],
            SemanticRole::Function => &[
                "support.function",
                "support",
                "entity.name.function",
                "entity.name",
            ],
            SemanticRole::String => &["string"],
            SemanticRole::Constant => &["constant", "constant.character", "constant.keyword"],
            SemanticRole::Type => &["support.type", "support", "entity.name.class"],
            SemanticRole::Class => &["entity.name.class", "entity.name"],
            SemanticRole::Number => &["constant.numeric", "constant"],
            SemanticRole::Comment => &["comment"],
            SemanticRole::Heading => &["markup.heading", "markup.heading.setext"],
            SemanticRole::Invalid => &[
                "invalid",
                "editorError.foreground",
                "errorForeground",
                "foreground",
                "input.foreground",
            ],
            SemanticRole::Regexp => &["string.regexp", "string"],
        }
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved style: a concrete color and an optional font style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub color: String,
    pub font_style: Option<String>,
}

impl Style {
    pub fn color(color: &str) -> Self {
        Self {
            color: color.to_string(),
            font_style: None,
        }
    }
}

/// Where a resolved color came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOrigin {
    /// Exact hit in the flat `colors` map
    ColorMap { key: String },
    /// Scope rule match; `priority` is the scope's position inside the rule
    ScopeRule {
        key: String,
        rule_index: usize,
        priority: usize,
    },
}

impl MatchOrigin {
    pub fn key(&self) -> &str {
        match self {
            MatchOrigin::ColorMap { key } | MatchOrigin::ScopeRule { key, .. } => key,
        }
    }

    pub fn priority(&self) -> Option<usize> {
        match self {
            MatchOrigin::ColorMap { .. } => None,
            MatchOrigin::ScopeRule { priority, .. } => Some(*priority),
        }
    }
}

impl fmt::Display for MatchOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOrigin::ColorMap { key } => write!(f, "colors[{key}]"),
            MatchOrigin::ScopeRule {
                key,
                rule_index,
                priority,
            } => write!(f, "tokenColors[{rule_index}] scope '{key}' at position {priority}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub style: Style,
    pub origin: MatchOrigin,
}

/// Every role of one theme resolved to a concrete style
#[derive(Debug, Clone)]
pub struct ResolvedTheme {
    pub name: String,
    pub mode: ThemeMode,
    pub styles: BTreeMap<SemanticRole, Style>,
}

impl ResolvedTheme {
    pub fn style(&self, role: SemanticRole) -> Option<&Style> {
        self.styles.get(&role)
    }
}
