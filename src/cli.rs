use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio::signal;

use crate::config::{ApiConfig, DevServerConfig};
use crate::{proxy, rsa};

#[derive(Parser)]
#[command(name = "cipherform", version, about = "Cipher API, form client, and dev server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the cipher API server.
    Serve,
    /// Run the development server (static files + API proxy).
    Dev,
    /// Generate a public/private key pair.
    Keygen {
        num_bits: u64,
        /// Write the keys to two comma-separated paths instead of stdout.
        #[arg(short, long, value_name = "PUBLIC,PRIVATE")]
        output: Option<String>,
    },
    /// Encrypt a message with a key.
    Encrypt {
        message: String,
        key: String,
        /// Write the ciphertext to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decrypt a ciphertext with a key.
    Decrypt {
        ciphertext: String,
        key: String,
        /// Write the message to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Serve => serve().await,
        Command::Dev => dev().await,
        Command::Keygen { num_bits, output } => keygen(num_bits, output),
        Command::Encrypt {
            message,
            key,
            output,
        } => emit(rsa::base64_encrypt(&message, &key)?, output),
        Command::Decrypt {
            ciphertext,
            key,
            output,
        } => emit(rsa::base64_decrypt(&ciphertext, &key)?, output),
    }
}

fn keygen(num_bits: u64, output: Option<String>) -> Result<(), String> {
    if num_bits < 2 {
        return Err("num_bits should be a positive integer greater or equal to 2".to_string());
    }

    let (public_key, private_key) = rsa::keygen(num_bits);

    match output {
        None => {
            println!("{public_key}");
            println!("{private_key}");
            Ok(())
        }
        Some(paths) => {
            let parts: Vec<&str> = paths.split(',').collect();
            if parts.len() != 2 {
                return Err(
                    "Please provide a pair of paths to save public and private key to.".to_string(),
                );
            }
            write_output(parts[0], &public_key)?;
            write_output(parts[1], &private_key)
        }
    }
}

fn emit(result: String, output: Option<PathBuf>) -> Result<(), String> {
    match output {
        None => {
            println!("{result}");
            Ok(())
        }
        Some(path) => write_output(path, &result),
    }
}

fn write_output(path: impl AsRef<Path>, contents: &str) -> Result<(), String> {
    std::fs::write(path.as_ref(), contents)
        .map_err(|e| format!("Failed to write {}: {e}", path.as_ref().display()))
}

async fn serve() -> Result<(), String> {
    let config = ApiConfig::from_env()?;
    let addr = SocketAddr::new(config.host, config.port);
    let app = crate::build_app();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind {addr}: {e}"))?;
    tracing::info!("Cipher API listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))
}

async fn dev() -> Result<(), String> {
    let config = DevServerConfig::from_env();
    let addr = SocketAddr::new(config.host, config.port);
    let app = proxy::build_dev_app(&config)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind {addr}: {e}"))?;
    tracing::info!(
        upstream = %config.upstream,
        root = %config.root.display(),
        "Dev server listening on {addr}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
