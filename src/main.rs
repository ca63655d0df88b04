use anyhow::Result;
use poem_probe::{api::HttpPoemApi, config, probe::Probe};
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG overrides the configured level
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // stdout carries the probe report, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .with_writer(std::io::stderr)
        .init();

    info!("Probing poem API at {}", config.base_url);

    let client = HttpPoemApi::new(&config)?;
    let probe = Probe::new(client, &config);

    let mut stdout = std::io::stdout();
    let report = probe.run(&mut stdout).await?;

    if config.fail_on_error && !report.all_passed() {
        std::process::exit(1);
    }

    Ok(())
}
