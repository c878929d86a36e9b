use anyhow::Context;
use tracing::{error, info};
use trainconf::{
    shared::{AppError, LoggingUtils},
    ConfigStore, OverrideSources,
};

const USAGE: &str = "usage: trainconf [--json] [FILE]

Loads the training configuration from defaults, an optional TOML FILE and
TRAINCONF_* environment variables, validates it and prints the snapshot.";

enum Format {
    Toml,
    Json,
}

fn main() {
    // Initialize logging
    if let Err(e) = LoggingUtils::initialize("info") {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let mut format = Format::Toml;
    let mut sources = OverrideSources::new();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => format = Format::Json,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            flag if flag.starts_with('-') => anyhow::bail!("unknown flag {}\n{}", flag, USAGE),
            path => sources = sources.with_file(path),
        }
    }

    let overrides = sources
        .collect()
        .context("Failed to read configuration sources")?;
    info!(overrides = overrides.len(), "Configuration sources collected");

    let config = match ConfigStore::new().load(Some(&overrides)) {
        Ok(config) => config,
        Err(e) => {
            LoggingUtils::log_rejection(&e);
            return Err(AppError::from(e)).context("Failed to load configuration");
        }
    };
    LoggingUtils::log_snapshot(&config);

    let rendered = match format {
        Format::Toml => toml::to_string_pretty(&config).map_err(AppError::from)?,
        Format::Json => serde_json::to_string_pretty(&config).map_err(AppError::from)?,
    };
    println!("{}", rendered);

    Ok(())
}
