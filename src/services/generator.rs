// Theme Generator
// Runs load -> parse -> resolve -> render for each catalog entry, in order

use std::path::PathBuf;

use crate::error::{ConvertError, Result};
use crate::models::{GeneratorSettings, ThemeSource};
use crate::services::{
    parse_theme_document, resolve_theme, EventSink, GeneratedFiles, TemplateRenderer, ThemeLoader,
};

/// Output of a successful run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub themes: Vec<(String, GeneratedFiles)>,
}

pub struct ThemeGenerator {
    loader: ThemeLoader,
    renderer: TemplateRenderer,
    output_dir: PathBuf,
}

impl ThemeGenerator {
    pub fn new(loader: ThemeLoader, renderer: TemplateRenderer, output_dir: PathBuf) -> Self {
        Self {
            loader,
            renderer,
            output_dir,
        }
    }

    pub fn from_settings(settings: &GeneratorSettings) -> Result<Self> {
        Ok(Self::new(
            ThemeLoader::from_settings(settings),
            TemplateRenderer::from_dir(settings.templates_dir.as_deref())?,
            settings.output_dir.clone(),
        ))
    }

    /// Convert a single theme
    pub async fn generate(&self, source: &ThemeSource, event_sink: &dyn EventSink) -> Result<GeneratedFiles> {
        log::info!("Process theme: {}", source.name);

        log::info!("  Extract theme");
        let content = self.loader.load(source, event_sink).await?;

        let document = parse_theme_document(&content)?;
        log::info!(
            "  Parsed {} colors and {} scope rules",
            document.colors.len(),
            document.rules.len()
        );

        let theme = resolve_theme(source, &document)?;

        log::info!("  Generate template");
        let files = self.renderer.write_theme(&theme, &self.output_dir)?;
        log::info!("  Wrote {:?} and {:?}", files.css, files.ts);

        Ok(files)
    }

    /// Convert every theme sequentially, aborting on the first failure
    pub async fn generate_all(
        &self,
        sources: &[ThemeSource],
        event_sink: &dyn EventSink,
    ) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();

        for source in sources {
            let files = self
                .generate(source, event_sink)
                .await
                .map_err(|e| ConvertError::for_theme(&source.name, e))?;
            report.themes.push((source.name.clone(), files));
        }

        log::info!("Generated {} theme(s) into {:?}", report.themes.len(), self.output_dir);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThemeMode;
    use crate::services::NoopEventSink;
    use std::io::{Cursor, Write};
    use std::path::Path;
    use tempfile::tempdir;
    use zip::write::FileOptions;

    const DRACULA: &str = r##"{
        // trimmed-down Dracula
        "colors": {
            "editor.background": "#282a36",
            "editor.foreground": "#f8f8f2",
            "foreground": "#f8f8f2",
            "editor.selectionBackground": "#44475a",
            "editor.lineHighlightBackground": "#44475a75",
            "editorError.foreground": "#ff5555",
        },
        "tokenColors": [
            { "scope": "comment", "settings": { "foreground": "#6272a4", "fontStyle": "italic" } },
            { "scope": ["string", "string.quoted"], "settings": { "foreground": "#f1fa8c" } },
            { "scope": "keyword, storage.type", "settings": { "foreground": "#ff79c6" } },
            { "scope": ["constant.numeric", "constant"], "settings": { "foreground": "#bd93f9" } },
            { "scope": "entity.name.function", "settings": { "foreground": "#50fa7b" } },
            { "scope": "entity.name.class", "settings": { "foreground": "#8be9fd", "fontStyle": "italic" } },
            { "scope": "markup.heading", "settings": { "foreground": "#bd93f9", "fontStyle": "bold" } },
            { "scope": "string.regexp", "settings": { "foreground": "#ff5555" } },
        ],
    }"##;

    fn write_archive(path: &Path, entries: &[(&str, &str)]) {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        std::fs::write(path, writer.finish().unwrap().into_inner()).unwrap();
    }

    fn generator(root: &Path) -> ThemeGenerator {
        ThemeGenerator::new(
            ThemeLoader::new(root.join("extensions"), root.join("cache")),
            TemplateRenderer::embedded(),
            root.join("themes"),
        )
    }

    #[tokio::test]
    async fn test_generate_all_writes_every_theme() {
        let temp = tempdir().unwrap();
        std::fs::create_dir_all(temp.path().join("extensions")).unwrap();
        write_archive(
            &temp.path().join("extensions").join("dracula.vsix"),
            &[
                ("extension/theme/dracula.json", DRACULA),
                ("extension/theme/dracula-soft.json", DRACULA),
            ],
        );

        let sources = vec![
            ThemeSource::archive("dracula", "dracula.vsix", "extension/theme/dracula.json", ThemeMode::Dark),
            ThemeSource::archive(
                "dracula-soft",
                "dracula.vsix",
                "extension/theme/dracula-soft.json",
                ThemeMode::Dark,
            ),
        ];

        let report = generator(temp.path())
            .generate_all(&sources, &NoopEventSink)
            .await
            .unwrap();
        assert_eq!(report.themes.len(), 2);

        let ts = std::fs::read_to_string(temp.path().join("themes").join("dracula-soft.ts")).unwrap();
        assert!(ts.contains("name: 'draculaSoft'"));
        assert!(ts.contains("background: '#282a36'"));
        assert!(ts.contains("activeLine: '#44475a75'"));
        assert!(ts.contains("matchingBracket: '#44475a75'"));
        assert!(ts.contains("function: '#50fa7b'"));
        assert!(ts.contains("regexp: '#ff5555'"));
        assert!(ts.contains("fontStyle: 'italic' }"));

        let css = std::fs::read_to_string(temp.path().join("themes").join("dracula.css")).unwrap();
        assert!(css.contains("--cm-number: #bd93f9;"));
        assert!(css.contains("--cm-type: #8be9fd;"));
        assert!(css.contains("color-scheme: dark;"));
    }

    #[tokio::test]
    async fn test_generate_all_stops_at_first_failure() {
        let temp = tempdir().unwrap();
        std::fs::create_dir_all(temp.path().join("extensions")).unwrap();
        write_archive(
            &temp.path().join("extensions").join("pack.vsix"),
            &[
                ("incomplete.json", r##"{"colors":{"editor.background":"#000"}}"##),
                ("full.json", DRACULA),
            ],
        );

        let sources = vec![
            ThemeSource::archive("incomplete", "pack.vsix", "incomplete.json", ThemeMode::Light),
            ThemeSource::archive("full", "pack.vsix", "full.json", ThemeMode::Dark),
        ];

        let err = generator(temp.path())
            .generate_all(&sources, &NoopEventSink)
            .await
            .unwrap_err();

        match &err {
            ConvertError::ThemeFailed { theme, .. } => assert_eq!(theme, "incomplete"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(err.root(), ConvertError::MissingResolution { .. }));
        assert!(!temp.path().join("themes").join("full.css").exists());
        assert!(!temp.path().join("themes").join("incomplete.css").exists());
    }

    #[tokio::test]
    async fn test_generate_reports_missing_entry() {
        let temp = tempdir().unwrap();
        std::fs::create_dir_all(temp.path().join("extensions")).unwrap();
        write_archive(&temp.path().join("extensions").join("pack.vsix"), &[("a.json", "{}")]);

        let source = ThemeSource::archive("missing", "pack.vsix", "extension/themes/b.json", ThemeMode::Dark);
        let err = generator(temp.path())
            .generate(&source, &NoopEventSink)
            .await
            .unwrap_err();

        assert!(matches!(err, ConvertError::MissingArchiveEntry { .. }));
        assert!(err.to_string().contains("extension/themes/b.json"));
    }
}
