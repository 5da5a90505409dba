use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use radiograb_core::{
    load_config, load_config_or_default, validate_config, Config, Dispatcher, GetIplayer,
    StatusLog,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming an explicit config file
const CONFIG_ENV: &str = "RADIOGRAB_CONFIG";

/// Config file looked up in the working directory when none is named
const DEFAULT_CONFIG_FILE: &str = "radiograb.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging; stdout is reserved for status lines
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("radiograb {}", VERSION);

    let config = load(std::env::var(CONFIG_ENV).ok().map(PathBuf::from))?;

    validate_config(&config).context("Configuration validation failed")?;

    info!("Keywords: {:?}", config.paths.keywords_file);
    info!("History: {:?}", config.paths.history_file);
    info!("Downloads: {:?}", config.paths.output_dir);

    let tool = GetIplayer::from_config(&config.tool, &config.paths);
    let mut dispatcher = Dispatcher::new(config, tool, StatusLog::stdout());

    // Download failures are reported in status lines only; they do not
    // change the exit status.
    dispatcher.run().await.context("Run failed")?;

    Ok(())
}

/// Loads config from an explicit path (must exist) or the default file (optional).
fn load(explicit: Option<PathBuf>) -> Result<Config> {
    match explicit {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            load_config_or_default(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let result = load(Some(PathBuf::from("/nonexistent/radiograb.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[paths]
output_dir = "/srv/radio"
"#
        )
        .unwrap();

        let config = load(Some(temp_file.path().to_path_buf())).unwrap();
        assert_eq!(config.paths.output_dir.to_str().unwrap(), "/srv/radio");
    }
}
