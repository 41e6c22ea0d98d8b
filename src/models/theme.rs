use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Theme mode: light or dark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}

impl From<bool> for ThemeMode {
    fn from(dark: bool) -> Self {
        if dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }
}

// Catalogs carry the mode as a plain `"dark": true|false` flag
impl Serialize for ThemeMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.is_dark())
    }
}

impl<'de> Deserialize<'de> for ThemeMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bool::deserialize(deserializer).map(ThemeMode::from)
    }
}

/// Where the packaged theme archive comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeLocation {
    /// Archive already on disk, relative to the extensions directory unless absolute
    Archive(PathBuf),
    /// Remote archive, downloaded on demand and cached by theme name
    Url(String),
}

/// One theme variant to convert
///
/// A single package may ship several variants; each gets its own source
/// pointing at the same archive with a different `file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSource {
    /// Output identifier (kebab-case), also used as the file stem
    pub name: String,
    pub location: ThemeLocation,
    /// Path of the theme definition inside the archive
    pub file: String,
    #[serde(rename = "dark")]
    pub mode: ThemeMode,
    /// Optional pinned SHA-256 (hex) of a remote archive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl ThemeSource {
    pub fn archive(name: &str, archive: impl Into<PathBuf>, file: &str, mode: ThemeMode) -> Self {
        Self {
            name: name.to_string(),
            location: ThemeLocation::Archive(archive.into()),
            file: file.to_string(),
            mode,
            sha256: None,
        }
    }

    pub fn url(name: &str, url: &str, file: &str, mode: ThemeMode) -> Self {
        Self {
            name: name.to_string(),
            location: ThemeLocation::Url(url.to_string()),
            file: file.to_string(),
            mode,
            sha256: None,
        }
    }
}
