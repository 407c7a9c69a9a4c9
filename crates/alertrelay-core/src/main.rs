//! AlertRelay CLI
//!
//! Starts the webhook relay between Alertmanager and Discord.

use std::process::ExitCode;
use std::sync::Arc;

use alertrelay::api::{AppState, HttpServer};
use alertrelay::config::{Config, DisplayTimezone, DEFAULT_LISTEN_ADDRESS};
use alertrelay::delivery::WebhookClient;
use alertrelay::pipeline::Pipeline;
use clap::Parser;
use tracing::{error, info};

/// AlertRelay - Alertmanager to Discord webhook relay
#[derive(Parser)]
#[command(name = "alertrelay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Discord webhook URL
    #[arg(long = "webhook-url", env = "DISCORD_WEBHOOK", hide_env_values = true)]
    webhook_url: Option<String>,

    /// Address:port to listen on
    #[arg(long, env = "LISTEN_ADDRESS", default_value = DEFAULT_LISTEN_ADDRESS)]
    listen_address: String,

    /// Echo inbound and outbound payloads to the log
    #[arg(long, env = "DEBUG", value_parser = clap::builder::FalseyValueParser::new())]
    debug: bool,

    /// Timezone for displayed timestamps (system local time if unset)
    #[arg(long, env = "TZ")]
    timezone: Option<String>,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_format);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, format: LogFormat) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    match format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::new(cli.webhook_url.as_deref().unwrap_or_default())?
        .with_listen_address(cli.listen_address)
        .with_debug(cli.debug)
        .with_timezone(DisplayTimezone::resolve(
            cli.timezone.as_deref().unwrap_or_default(),
        ));
    let config = Arc::new(config);

    info!(
        listen_address = %config.listen_address,
        debug = config.debug,
        timezone = ?config.timezone,
        "Starting AlertRelay"
    );

    let client = WebhookClient::from_config(&config)?;
    let pipeline = Arc::new(Pipeline::new(&config, client));
    let server = HttpServer::new(AppState::new(Arc::clone(&config), pipeline));

    server.serve(&config.listen_address).await?;

    Ok(())
}
