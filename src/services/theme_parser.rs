// Theme Document Parser
// Parses VS Code theme JSON (comments allowed) into a ThemeDocument

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use super::jsonc::to_strict_json;
use crate::error::{ConvertError, Result};
use crate::models::{ScopeRule, ThemeDocument, TokenSettings};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeJson {
    #[serde(default)]
    colors: HashMap<String, String>,
    #[serde(default)]
    token_colors: Vec<TokenColorJson>,
}

#[derive(Deserialize)]
struct TokenColorJson {
    #[serde(default)]
    scope: Value,
    #[serde(default)]
    settings: TokenSettingsJson,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TokenSettingsJson {
    foreground: Option<String>,
    font_style: Option<String>,
}

/// Parse raw theme bytes
pub fn parse_theme_document(bytes: &[u8]) -> Result<ThemeDocument> {
    let content = String::from_utf8(bytes.to_vec())?;
    parse_theme_str(&content)
}

pub fn parse_theme_str(content: &str) -> Result<ThemeDocument> {
    let sanitized = to_strict_json(content);
    let theme: ThemeJson = serde_json::from_str(&sanitized)?;

    let rules = theme
        .token_colors
        .into_iter()
        .enumerate()
        .map(|(rule_index, token_color)| {
            Ok(ScopeRule {
                scopes: normalize_scope(rule_index, token_color.scope)?,
                settings: TokenSettings {
                    foreground: token_color.settings.foreground,
                    font_style: token_color.settings.font_style,
                },
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ThemeDocument {
        colors: theme.colors,
        rules,
    })
}

/// Normalize a scope selector into scopes in selector order.
///
/// `"a, b"` becomes `["a", "b"]`, a list is taken as-is, and a missing or
/// null selector yields no scopes (the rule can never match).
fn normalize_scope(rule_index: usize, scope: Value) -> Result<Vec<String>> {
    match scope {
        Value::Null => Ok(Vec::new()),
        Value::String(selector) => Ok(selector
            .split(',')
            .map(|part| part.trim().to_string())
            .collect()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(scope) => Ok(scope),
                other => Err(malformed(rule_index, &other)),
            })
            .collect(),
        other => Err(malformed(rule_index, &other)),
    }
}

fn malformed(rule_index: usize, value: &Value) -> ConvertError {
    let found = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    ConvertError::MalformedScopeShape {
        rule_index,
        found: found.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_colors_only() {
        let doc = parse_theme_str(r##"{"colors":{"editor.background":"#111"}}"##).unwrap();
        assert_eq!(doc.color("editor.background"), Some("#111"));
        assert!(doc.rules.is_empty());
    }

    #[test]
    fn test_parses_jsonc_with_comments_and_trailing_commas() {
        let content = r##"{
            // Dracula
            "name": "Dracula",
            "type": "dark",
            "colors": {
                "editor.background": "#282a36", /* base */
                "foreground": "#f8f8f2",
            },
            "tokenColors": [
                {
                    "name": "Comment",
                    "scope": "comment",
                    "settings": { "foreground": "#6272a4", "fontStyle": "italic" },
                },
            ],
        }"##;

        let doc = parse_theme_document(content.as_bytes()).unwrap();
        assert_eq!(doc.colors.len(), 2);
        assert_eq!(doc.rules.len(), 1);
        assert_eq!(doc.rules[0].scopes, vec!["comment"]);
        assert_eq!(doc.rules[0].settings.foreground.as_deref(), Some("#6272a4"));
        assert_eq!(doc.rules[0].settings.font_style.as_deref(), Some("italic"));
    }

    #[test]
    fn test_splits_comma_scope_and_trims() {
        let content = r##"{"tokenColors":[
            {"scope":"constant.numeric, constant.language","settings":{"foreground":"#F00"}}
        ]}"##;
        let doc = parse_theme_str(content).unwrap();
        assert_eq!(doc.rules[0].scopes, vec!["constant.numeric", "constant.language"]);
    }

    #[test]
    fn test_keeps_list_scope_in_order() {
        let content = r##"{"tokenColors":[
            {"scope":["keyword.control","keyword.operator"],"settings":{"foreground":"#F00"}}
        ]}"##;
        let doc = parse_theme_str(content).unwrap();
        assert_eq!(doc.rules[0].scopes, vec!["keyword.control", "keyword.operator"]);
    }

    #[test]
    fn test_missing_scope_and_settings() {
        let content = r##"{"tokenColors":[
            {"settings":{"foreground":"#000","background":"#fff"}},
            {"scope":"comment"}
        ]}"##;
        let doc = parse_theme_str(content).unwrap();
        assert!(doc.rules[0].scopes.is_empty());
        assert_eq!(doc.rules[1].settings, TokenSettings::default());
    }

    #[test]
    fn test_rejects_malformed_scope() {
        let content = r##"{"tokenColors":[
            {"scope":"comment","settings":{}},
            {"scope":{"not":"valid"},"settings":{"foreground":"#F00"}}
        ]}"##;
        let err = parse_theme_str(content).unwrap_err();
        match err {
            ConvertError::MalformedScopeShape { rule_index, found } => {
                assert_eq!(rule_index, 1);
                assert_eq!(found, "object");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_non_string_list_item() {
        let content = r##"{"tokenColors":[{"scope":["comment", 3],"settings":{}}]}"##;
        assert!(matches!(
            parse_theme_str(content),
            Err(ConvertError::MalformedScopeShape { rule_index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(parse_theme_str("{\"colors\": "), Err(ConvertError::Parse(_))));
        assert!(matches!(
            parse_theme_document(&[0xff, 0xfe, 0x00]),
            Err(ConvertError::Parse(_))
        ));
    }
}
