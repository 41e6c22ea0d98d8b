// Scope Resolution Engine
// Resolves semantic roles against a theme's color map and scope rules

use std::collections::BTreeMap;

use crate::error::{ConvertError, Result};
use crate::models::{
    MatchOrigin, ResolvedStyle, ResolvedTheme, SemanticRole, Style, ThemeDocument, ThemeSource,
};

/// Color picked from a scope rule, kept together with its priority
struct ColorMatch<'a> {
    color: &'a str,
    rule_index: usize,
    priority: usize,
}

/// What the rule scan has adopted so far for one candidate key
#[derive(Default)]
struct ScopeMatch<'a> {
    color: Option<ColorMatch<'a>>,
    font_style: Option<&'a str>,
}

impl<'a> ScopeMatch<'a> {
    fn offer_color(&mut self, color: &'a str, rule_index: usize, priority: usize) {
        let wins = match &self.color {
            None => true,
            Some(current) => priority < current.priority,
        };
        if wins {
            self.color = Some(ColorMatch {
                color,
                rule_index,
                priority,
            });
        }
    }

    fn offer_font_style(&mut self, font_style: &'a str) {
        if self.font_style.is_none() {
            self.font_style = Some(font_style);
        }
    }

    fn into_resolved(self, key: &str) -> Option<ResolvedStyle> {
        let color = self.color?;
        Some(ResolvedStyle {
            style: Style {
                color: color.color.to_string(),
                font_style: self.font_style.map(str::to_string),
            },
            origin: MatchOrigin::ScopeRule {
                key: key.to_string(),
                rule_index: color.rule_index,
                priority: color.priority,
            },
        })
    }
}

/// Scan every rule in declaration order for exact matches of `key`.
///
/// A lower position inside a rule's selector beats a higher one, and a later
/// rule may replace an earlier rule's color only with a strictly lower
/// position. The first font style found sticks.
fn match_scope_rules<'a>(document: &'a ThemeDocument, key: &str) -> ScopeMatch<'a> {
    let mut found = ScopeMatch::default();

    for (rule_index, rule) in document.rules.iter().enumerate() {
        for position in rule.positions_of(key) {
            if let Some(foreground) = rule.settings.foreground.as_deref() {
                found.offer_color(foreground, rule_index, position);
            }
            if let Some(font_style) = rule.settings.font_style.as_deref() {
                found.offer_font_style(font_style);
            }
        }
    }

    found
}

/// Resolve one style from an ordered list of candidate keys.
///
/// Each key is tried against the flat color map first (a hit ends the
/// search with no font style), then against the scope rules. The first key
/// that yields a color wins.
pub fn resolve<S: AsRef<str>>(document: &ThemeDocument, keys: &[S]) -> Result<ResolvedStyle> {
    for key in keys {
        let key = key.as_ref();

        if let Some(color) = document.color(key) {
            return Ok(ResolvedStyle {
                style: Style::color(color),
                origin: MatchOrigin::ColorMap {
                    key: key.to_string(),
                },
            });
        }

        if let Some(resolved) = match_scope_rules(document, key).into_resolved(key) {
            return Ok(resolved);
        }
    }

    Err(ConvertError::MissingResolution {
        role: "style".to_string(),
        keys: keys.iter().map(|key| key.as_ref().to_string()).collect(),
    })
}

pub fn resolve_role(document: &ThemeDocument, role: SemanticRole) -> Result<ResolvedStyle> {
    resolve(document, role.candidate_keys()).map_err(|error| match error {
        ConvertError::MissingResolution { keys, .. } => ConvertError::MissingResolution {
            role: role.as_str().to_string(),
            keys,
        },
        other => other,
    })
}

/// Resolve every semantic role, stopping at the first one that cannot be resolved
pub fn resolve_theme(source: &ThemeSource, document: &ThemeDocument) -> Result<ResolvedTheme> {
    let mut styles = BTreeMap::new();

    for role in SemanticRole::ALL {
        let resolved = resolve_role(document, role)?;
        log::debug!(
            "[{}] {role} = {} from {}",
            source.name,
            resolved.style.color,
            resolved.origin
        );
        styles.insert(role, resolved.style);
    }

    Ok(ResolvedTheme {
        name: source.name.clone(),
        mode: source.mode,
        styles,
    })
}
