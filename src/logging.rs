// src/logging.rs

use color_eyre::eyre::Result;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_error::ErrorLayer;
use tracing_subscriber::{self, EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Directory the log file lands in. Falls back to a local `.data`
/// directory when the platform yields no project directory.
fn log_directory() -> PathBuf {
    ProjectDirs::from("io", "mailvet", env!("CARGO_PKG_NAME"))
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join(".data"))
}

/// Resolves the filter directive: an explicit `RUST_LOG` or
/// `MAILVET_LOGLEVEL` value wins, otherwise the crate logs at info.
fn level_directive(explicit: Option<String>) -> String {
    explicit.unwrap_or_else(|| format!("{}=info", env!("CARGO_CRATE_NAME")))
}

/// Initializes file-based logging so the console stays reserved for the
/// report itself.
pub fn initialize_logging() -> Result<()> {
    let directory = log_directory();
    std::fs::create_dir_all(&directory)?;
    let log_path = directory.join(concat!(env!("CARGO_PKG_NAME"), ".log"));
    let log_file = std::fs::File::create(log_path)?;

    let explicit = std::env::var("RUST_LOG")
        .or_else(|_| std::env::var("MAILVET_LOGLEVEL"))
        .ok();

    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new(level_directive(explicit)));

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directive_overrides_the_default() {
        assert_eq!(level_directive(Some("debug".into())), "debug");
        assert_eq!(level_directive(None), "mailvet=info");
    }
}
