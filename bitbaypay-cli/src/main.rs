//! BitBayPay gateway command-line client.
//!
//! # Usage
//!
//! ```bash
//! # Keys from the environment or a .env file
//! BITBAYPAY_PUBLIC_KEY=... BITBAYPAY_PRIVATE_KEY=... bitbaypay markets
//!
//! # Create a payment
//! bitbaypay create-payment --destination-currency PLN --price 100 --order-id order-1
//!
//! # Search with filters
//! bitbaypay search-payments --param status=PAID --param pageSize=10
//!
//! # Configure logging level
//! RUST_LOG=debug bitbaypay markets
//! ```

use bitbaypay_cli::Cli;
use bitbaypay_cli::commands::execute;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout carries only the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = cli.client_config().build();
    tracing::debug!(base_url = client.base_url(), "Configured gateway client");

    let data = execute(&client, cli.command).await?;

    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
