// Theme Catalog
// The list of themes to convert: embedded default or a user-supplied file

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::jsonc::to_strict_json;
use crate::error::{ConvertError, IoContext, Result};
use crate::models::{ThemeLocation, ThemeSource};

const DEFAULT_CATALOG_JSON: &str = include_str!("../../data/themes.json");
const THEME_NAME_PATTERN: &str = r"^[a-z0-9][a-z0-9-_]{0,63}$";

static THEME_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

/// Load the catalog at `path`, or the embedded default catalog when `None`
pub fn load_catalog(path: Option<&Path>) -> Result<Vec<ThemeSource>> {
    match path {
        Some(path) => {
            log::info!("Loading theme catalog from {:?}", path);
            let content = fs::read_to_string(path).with_path(path)?;
            parse_catalog(&content)
        }
        None => default_catalog(),
    }
}

pub fn default_catalog() -> Result<Vec<ThemeSource>> {
    parse_catalog(DEFAULT_CATALOG_JSON)
}

pub fn parse_catalog(content: &str) -> Result<Vec<ThemeSource>> {
    let sources: Vec<ThemeSource> = serde_json::from_str(&to_strict_json(content))?;
    validate_catalog(&sources)?;
    Ok(sources)
}

/// Names become output file names, so they must be safe and unique
pub fn validate_catalog(sources: &[ThemeSource]) -> Result<()> {
    let name_regex = THEME_NAME_REGEX.get_or_init(|| Regex::new(THEME_NAME_PATTERN).unwrap());
    let mut seen = HashSet::new();

    for source in sources {
        if !name_regex.is_match(&source.name) {
            return Err(ConvertError::InvalidCatalog(format!(
                "theme name '{}' must be lowercase alphanumeric with dashes or underscores",
                source.name
            )));
        }
        if !seen.insert(source.name.as_str()) {
            return Err(ConvertError::InvalidCatalog(format!(
                "duplicate theme name '{}'",
                source.name
            )));
        }
        if source.file.trim().is_empty() {
            return Err(ConvertError::InvalidCatalog(format!(
                "theme '{}' has an empty file path",
                source.name
            )));
        }
        if let ThemeLocation::Url(url) = &source.location {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConvertError::InvalidCatalog(format!(
                    "theme '{}' has a non-HTTP url '{url}'",
                    source.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThemeMode;
    use tempfile::tempdir;

    #[test]
    fn test_default_catalog() {
        let catalog = default_catalog().unwrap();
        let names: Vec<&str> = catalog.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "dracula",
                "solarized-light",
                "solarized-dark",
                "material-light",
                "material-dark",
                "github-light",
                "github-dark",
            ]
        );
        assert_eq!(catalog[1].mode, ThemeMode::Light);
        assert_eq!(catalog[1].location, catalog[2].location);
    }

    #[test]
    fn test_load_catalog_from_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("catalog.json");
        fs::write(
            &path,
            r#"[
                // remote theme
                {"name": "nord", "location": {"url": "https://example.com/nord.vsix"},
                 "file": "extension/themes/nord.json", "dark": true},
            ]"#,
        )
        .unwrap();

        let catalog = load_catalog(Some(path.as_path())).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].location, ThemeLocation::Url("https://example.com/nord.vsix".to_string()));
    }

    #[test]
    fn test_rejects_unsafe_name() {
        let sources = vec![ThemeSource::archive("../evil", "x.vsix", "x.json", ThemeMode::Dark)];
        assert!(matches!(validate_catalog(&sources), Err(ConvertError::InvalidCatalog(_))));
    }

    #[test]
    fn test_rejects_duplicate_name() {
        let sources = vec![
            ThemeSource::archive("nord", "a.vsix", "a.json", ThemeMode::Dark),
            ThemeSource::archive("nord", "b.vsix", "b.json", ThemeMode::Light),
        ];
        let err = validate_catalog(&sources).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rejects_empty_file_and_bad_url() {
        let sources = vec![ThemeSource::archive("nord", "a.vsix", " ", ThemeMode::Dark)];
        assert!(validate_catalog(&sources).is_err());

        let sources = vec![ThemeSource::url("nord", "ftp://example.com/a.vsix", "a.json", ThemeMode::Dark)];
        assert!(validate_catalog(&sources).is_err());
    }

    #[test]
    fn test_missing_catalog_file() {
        let temp = tempdir().unwrap();
        let result = load_catalog(Some(temp.path().join("missing.json").as_path()));
        assert!(matches!(result, Err(ConvertError::Io { .. })));
    }
}
