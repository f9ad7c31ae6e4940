use clap::Parser;
use std::path::PathBuf;
use std::process;
use telegram_updater::config::Config;
use tracing_subscriber::EnvFilter;

/// Relays Telegram channel updates into a WordPress site.
#[derive(Parser)]
struct Cli {
    /// Path to the YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Incomplete configuration is fatal; nothing binds before this passes.
    let config = match Config::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Could not start: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = telegram_updater::run(config).await {
        eprintln!("Server error: {e}");
        process::exit(1);
    }
}
