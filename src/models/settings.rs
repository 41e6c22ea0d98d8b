// Settings Model
// Generator configuration read from THEMEGEN_* environment variables

use std::path::PathBuf;

use log::LevelFilter;

pub const ENV_EXTENSIONS_DIR: &str = "THEMEGEN_EXTENSIONS_DIR";
pub const ENV_CACHE_DIR: &str = "THEMEGEN_CACHE_DIR";
pub const ENV_OUTPUT_DIR: &str = "THEMEGEN_OUTPUT_DIR";
pub const ENV_TEMPLATES_DIR: &str = "THEMEGEN_TEMPLATES_DIR";
pub const ENV_CATALOG: &str = "THEMEGEN_CATALOG";
pub const ENV_LOG_DIR: &str = "THEMEGEN_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "THEMEGEN_LOG_LEVEL";

const APP_DIR_NAME: &str = "codemirror-theme-gen";

fn default_extensions_dir() -> PathBuf {
    PathBuf::from("extensions")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("themes")
}

fn default_cache_dir() -> PathBuf {
    dirs_next::cache_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".cache").join(APP_DIR_NAME))
}

/// Generator settings
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSettings {
    /// Base directory for catalog entries with a local archive
    pub extensions_dir: PathBuf,
    /// Where downloaded archives are cached, one `<name>.vsix` per theme
    pub cache_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Overrides for the embedded templates
    pub templates_dir: Option<PathBuf>,
    /// Theme catalog; the embedded default catalog is used when absent
    pub catalog_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            extensions_dir: default_extensions_dir(),
            cache_dir: default_cache_dir(),
            output_dir: default_output_dir(),
            templates_dir: None,
            catalog_path: None,
            log_dir: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl GeneratorSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let log_level = match var(ENV_LOG_LEVEL) {
            Some(level) => level.parse().unwrap_or(defaults.log_level),
            None => defaults.log_level,
        };

        Self {
            extensions_dir: var(ENV_EXTENSIONS_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.extensions_dir),
            cache_dir: var(ENV_CACHE_DIR).map(PathBuf::from).unwrap_or(defaults.cache_dir),
            output_dir: var(ENV_OUTPUT_DIR).map(PathBuf::from).unwrap_or(defaults.output_dir),
            templates_dir: var(ENV_TEMPLATES_DIR).map(PathBuf::from),
            catalog_path: var(ENV_CATALOG).map(PathBuf::from),
            log_dir: var(ENV_LOG_DIR).map(PathBuf::from),
            log_level,
        }
    }
}
