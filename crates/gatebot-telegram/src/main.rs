//! Gatebot binary.
//!
//! Start the bot with:
//! ```bash
//! TELEGRAM_BOT_TOKEN=xxx cargo run -p gatebot-telegram
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gatebot_core::config::Settings;
use gatebot_fhome::Client;
use gatebot_telegram::GateBot;

/// Telegram bot that drives the home gate and reads the lights
#[derive(Parser, Debug)]
#[command(name = "gatebot")]
#[command(about = "Telegram bridge to the F&Home gate and lights")]
struct Args {
    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Local .env is optional; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    let filter = match args.verbose {
        0 => "gatebot_telegram=info,gatebot_fhome=info,gatebot_core=info,teloxide=warn",
        1 => "gatebot_telegram=debug,gatebot_fhome=debug,gatebot_core=debug,teloxide=info",
        2 => "gatebot_telegram=trace,gatebot_fhome=trace,gatebot_core=trace,teloxide=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            return Err(e.into());
        }
    };

    let client = match Client::connect(&settings.fhome).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to open the F&Home session");
            return Err(e.into());
        }
    };
    tracing::info!(resource = %client.resource().friendly_name, "F&Home session ready");

    let bot = GateBot::new(settings, client);
    match bot.username().await {
        Ok(username) => tracing::info!(username = %username, "bot initialized"),
        Err(e) => {
            tracing::error!(error = %e, "failed to reach the Telegram API");
            return Err(e.into());
        }
    }

    bot.run().await;

    Ok(())
}
