use clap::Parser;
use tracing_subscriber::EnvFilter;

use cipherform::cli::{self, Cli};

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = cli::run(cli).await {
        eprintln!("cipherform error: {err}");
        std::process::exit(1);
    }
}
