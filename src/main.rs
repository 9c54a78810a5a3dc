use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use weatherdash_core::{App, AppError};
use weatherdash_ui::help::setup_instructions;
use weatherdash_ui::{detect_locale, resolve_units, DashboardModel, DashboardRunner};
use weatherdash_weather::WeatherProvider;

/// Terminal weather dashboard
#[derive(Parser, Debug)]
#[command(name = "weatherdash", version, about)]
struct Cli {
    /// Location to show instead of the configured default
    #[arg(short, long)]
    location: Option<String>,

    /// Locale used to pick units, e.g. "en-US" (detected from the environment by default)
    #[arg(long)]
    locale: Option<String>,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fetch once, print the dashboard and exit
    #[arg(long)]
    once: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show how to get and configure a WeatherAPI.com key
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Setup) = cli.command {
        print!("{}", setup_instructions());
        return Ok(());
    }

    // Create and initialize application
    let mut app = match App::new(cli.config.as_deref()) {
        Ok(app) => app,
        Err(e) => {
            if let Some(app_err) = e.downcast_ref::<AppError>() {
                eprintln!("{}", app_err.user_message());
            }
            return Err(e);
        }
    };
    weatherdash_core::init(&app.config().logging.level)?;
    app.initialize()?;

    let config = app.shared_config();

    let locale = cli
        .locale
        .or_else(|| config.display.locale.clone())
        .or_else(detect_locale);
    let units = resolve_units(config.display.units, locale.as_deref());
    tracing::info!("Locale {:?}, units {:?}", locale, units);

    let provider = WeatherProvider::new(
        config.weather.resolve_api_key(),
        config.weather.timeout_secs.map(Duration::from_secs),
    )?
    .with_base_url(config.weather.base_url.as_str());
    if !provider.has_api_key() {
        tracing::warn!("No weather API key found; run `weatherdash setup` for instructions");
    }

    let location = cli
        .location
        .unwrap_or_else(|| config.weather.default_location.clone());
    let model = DashboardModel::new(location, units);
    let mut runner = DashboardRunner::new(model, Arc::new(provider), config.weather.refresh_minutes);

    let mut stdout = std::io::stdout().lock();
    if cli.once {
        runner.run_once(&mut stdout).await?;
    } else {
        runner
            .run(BufReader::new(tokio::io::stdin()), &mut stdout)
            .await?;
    }

    // Graceful shutdown
    app.shutdown()?;

    Ok(())
}
