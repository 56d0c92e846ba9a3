//! Typeahead - a keyboard-driven autocomplete over JSON records.

use tracing::{error, info};
use typeahead::cli::Cli;
use typeahead::config::Config;
use typeahead::error::Result;
use typeahead::{logging, tui};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let headless = cli.is_headless();

    if let Some(path) = logging::init(&logging::LogTarget::for_mode(headless)) {
        info!(path = %path.display(), "logging to file");
    }

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            // Interactive logs go to a file
            if !headless {
                eprintln!("{}: {}", e.category(), e);
            }
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let settings = cli.resolve(config)?;
    let source = settings.source.into_source(settings.http)?;
    info!(source = %source.location(), label = %settings.widget.label, "starting");

    if cli.is_headless() {
        return tui::headless::run_headless(&cli, &settings.widget, source).await;
    }

    tui::run(&settings.widget, source).await?;
    Ok(0)
}
