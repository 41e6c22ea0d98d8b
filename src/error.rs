use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors raised while converting a theme. None of them are recovered locally.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Could not resolve {role} from any of: {}", keys.join(", "))]
    MissingResolution { role: String, keys: Vec<String> },

    #[error("Unexpected scope type in tokenColors[{rule_index}]: expected string or list of strings, found {found}")]
    MalformedScopeShape { rule_index: usize, found: String },

    #[error("Could not find file {entry} in archive {}", archive.display())]
    MissingArchiveEntry { archive: PathBuf, entry: String },

    #[error("Download of {url} failed: {reason}")]
    DownloadFailure { url: String, reason: String },

    #[error("Checksum mismatch for {url}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template {template}: unknown placeholder '{placeholder}'")]
    Template { template: String, placeholder: String },

    #[error("Invalid theme catalog: {0}")]
    InvalidCatalog(String),

    #[error("Theme '{theme}': {source}")]
    ThemeFailed {
        theme: String,
        #[source]
        source: Box<ConvertError>,
    },
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn download(url: &str, reason: impl ToString) -> Self {
        Self::DownloadFailure {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn for_theme(theme: &str, source: ConvertError) -> Self {
        Self::ThemeFailed {
            theme: theme.to_string(),
            source: Box::new(source),
        }
    }

    /// Innermost error, looking through per-theme wrapping
    pub fn root(&self) -> &ConvertError {
        match self {
            Self::ThemeFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<FromUtf8Error> for ConvertError {
    fn from(e: FromUtf8Error) -> Self {
        Self::Parse(format!("theme file is not valid UTF-8: {e}"))
    }
}

/// Attach a path to a bare `std::io::Error`
pub trait IoContext<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| ConvertError::io(path, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_and_utf8_failures_are_parse_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(ConvertError::from(json_err), ConvertError::Parse(_)));

        let utf8_err = String::from_utf8(vec![0xff]).unwrap_err();
        let err = ConvertError::from(utf8_err);
        assert!(matches!(err, ConvertError::Parse(_)));
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_root_looks_through_theme_wrapping() {
        let err = ConvertError::for_theme("nord", ConvertError::download("http://x", "HTTP 500"));
        assert!(matches!(err.root(), ConvertError::DownloadFailure { .. }));
        assert_eq!(err.to_string(), "Theme 'nord': Download of http://x failed: HTTP 500");
    }
}
