use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};

use codemirror_theme_gen::models::{GeneratorSettings, ENV_LOG_LEVEL};
use codemirror_theme_gen::services::{load_catalog, LogEventSink, ThemeGenerator};
use codemirror_theme_gen::ConvertError;

// ============================================================================
// Logging
// ============================================================================

const LOG_FILE_NAME: &str = "codemirror-theme-gen.log";

struct GeneratorLogger {
    file: Option<Mutex<std::fs::File>>,
    level: LevelFilter,
}

impl GeneratorLogger {
    fn new(log_dir: Option<&Path>, level: LevelFilter) -> std::io::Result<Self> {
        let file = match log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(dir.join(LOG_FILE_NAME))?;
                Some(Mutex::new(file))
            }
            None => None,
        };
        Ok(Self { file, level })
    }
}

impl Log for GeneratorLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Local::now();
        let date = timestamp.format("%Y-%m-%d");
        let time = timestamp.format("%H:%M:%S");
        let line = format!(
            "[{date}][{time}][{}][{}] {}",
            record.target(),
            record.level(),
            record.args()
        );

        eprintln!("{line}");

        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{line}");
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

fn init_logger(settings: &GeneratorSettings) -> Result<(), Box<dyn std::error::Error>> {
    let logger = GeneratorLogger::new(settings.log_dir.as_deref(), settings.log_level)?;
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(settings.log_level);
    Ok(())
}

// ============================================================================
// Entry point
// ============================================================================

async fn run(settings: &GeneratorSettings) -> Result<(), ConvertError> {
    let catalog = load_catalog(settings.catalog_path.as_deref())?;
    log::info!("Converting {} theme(s)", catalog.len());

    let generator = ThemeGenerator::from_settings(settings)?;
    generator.generate_all(&catalog, &LogEventSink).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let settings = GeneratorSettings::from_env();

    if let Err(e) = init_logger(&settings) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
        if !level.trim().is_empty() && level.trim().parse::<LevelFilter>().is_err() {
            log::warn!("Ignoring invalid {ENV_LOG_LEVEL} value '{level}'");
        }
    }

    log::info!(
        "Settings: extensions={:?} cache={:?} output={:?}",
        settings.extensions_dir,
        settings.cache_dir,
        settings.output_dir
    );

    match run(&settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            log::logger().flush();
            ExitCode::FAILURE
        }
    }
}
