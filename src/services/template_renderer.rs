// Template Renderer
// Renders resolved themes into the CSS and TypeScript artifacts

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ConvertError, IoContext, Result};
use crate::models::{ResolvedTheme, SemanticRole};

pub const CSS_TEMPLATE_NAME: &str = "theme-template.css";
pub const TS_TEMPLATE_NAME: &str = "theme-template.ts";

const CSS_TEMPLATE: &str = include_str!("../../templates/theme-template.css");
const TS_TEMPLATE: &str = include_str!("../../templates/theme-template.ts");

const PLACEHOLDER_PATTERN: &str = r"\{\{\s*[A-Za-z][A-Za-z0-9_.]*\s*\}\}";

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Paths written for one theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub css: PathBuf,
    pub ts: PathBuf,
}

#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    css_template: String,
    ts_template: String,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::embedded()
    }
}

impl TemplateRenderer {
    /// Templates compiled into the binary
    pub fn embedded() -> Self {
        Self {
            css_template: CSS_TEMPLATE.to_string(),
            ts_template: TS_TEMPLATE.to_string(),
        }
    }

    pub fn new(css_template: impl Into<String>, ts_template: impl Into<String>) -> Self {
        Self {
            css_template: css_template.into(),
            ts_template: ts_template.into(),
        }
    }

    /// Load templates from `dir`, falling back to the embedded copy for any file it lacks
    pub fn from_dir(dir: Option<&Path>) -> Result<Self> {
        let Some(dir) = dir else {
            return Ok(Self::embedded());
        };

        let load = |name: &str, embedded: &str| -> Result<String> {
            let path = dir.join(name);
            if path.exists() {
                log::info!("Using template override {:?}", path);
                fs::read_to_string(&path).with_path(&path)
            } else {
                Ok(embedded.to_string())
            }
        };

        Ok(Self {
            css_template: load(CSS_TEMPLATE_NAME, CSS_TEMPLATE)?,
            ts_template: load(TS_TEMPLATE_NAME, TS_TEMPLATE)?,
        })
    }

    pub fn render_css(&self, theme: &ResolvedTheme) -> Result<String> {
        render(CSS_TEMPLATE_NAME, &self.css_template, theme)
    }

    pub fn render_ts(&self, theme: &ResolvedTheme) -> Result<String> {
        render(TS_TEMPLATE_NAME, &self.ts_template, theme)
    }

    /// Write `<name>.css` and `<name>.ts` into `output_dir`
    pub fn write_theme(&self, theme: &ResolvedTheme, output_dir: &Path) -> Result<GeneratedFiles> {
        let css = self.render_css(theme)?;
        let ts = self.render_ts(theme)?;

        fs::create_dir_all(output_dir).with_path(output_dir)?;

        let files = GeneratedFiles {
            css: output_dir.join(format!("{}.css", theme.name)),
            ts: output_dir.join(format!("{}.ts", theme.name)),
        };
        fs::write(&files.css, css).with_path(&files.css)?;
        fs::write(&files.ts, ts).with_path(&files.ts)?;

        Ok(files)
    }
}

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).unwrap())
}

/// Substitute every `{{ key }}` placeholder; an unknown key is an error
pub fn render(template_name: &str, template: &str, theme: &ResolvedTheme) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut last = 0;

    for found in placeholder_regex().find_iter(template) {
        let key = found
            .as_str()
            .trim_start_matches("{{")
            .trim_end_matches("}}")
            .trim();
        let value = placeholder_value(theme, key).ok_or_else(|| ConvertError::Template {
            template: template_name.to_string(),
            placeholder: key.to_string(),
        })?;

        output.push_str(&template[last..found.start()]);
        output.push_str(&value);
        last = found.end();
    }

    output.push_str(&template[last..]);
    Ok(output)
}

fn placeholder_value(theme: &ResolvedTheme, key: &str) -> Option<String> {
    match key {
        "name" => return Some(theme.name.clone()),
        "exportPrefix" => return Some(kebab_to_camel_case(&theme.name)),
        "dark" => return Some(theme.mode.is_dark().to_string()),
        "mode" => return Some(theme.mode.as_str().to_string()),
        _ => {}
    }

    let (role_key, field) = key.split_once('.').unwrap_or((key, "color"));
    let style = theme.style(SemanticRole::from_key(role_key)?)?;
    match field {
        "color" => Some(style.color.clone()),
        "fontStyle" => Some(style.font_style.clone().unwrap_or_default()),
        _ => None,
    }
}

/// `solarized-dark` -> `solarizedDark`
pub fn kebab_to_camel_case(kebab: &str) -> String {
    let mut camel = String::with_capacity(kebab.len());
    let mut upper_next = false;

    for ch in kebab.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            camel.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            camel.push(ch);
        }
    }

    camel
}
