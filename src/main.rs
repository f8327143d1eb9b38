//! # VSR Client
//!
//! Command line entry point for the voter stake registry client.
//!
//! ## Commands
//! - `info` (default): bind the program and log its address, payer and IDL
//! - `decode`: read base64 account dumps from stdin, write JSON lines to stdout
//!
//! ## Environment Setup
//! Settings are read from the environment or a `.env` file:
//! `VSR_CLUSTER`, `VSR_PAYER_KEYPAIR`, `VSR_COMMITMENT`, `VSR_DEVNET`.

use std::io;

use anyhow::{ bail, Context, Result };
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt, EnvFilter };

use vsr_client::{ config::Config, decode, onchain_instance::connect_anchor, VsrIdl };

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber
        ::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt
                ::layer()
                .with_target(false)
                .with_writer(io::stderr)
                .compact()
        )
        .init();

    tracing::debug!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let command = std::env::args().nth(1).unwrap_or_else(|| "info".to_string());
    match command.as_str() {
        "info" => info().await,
        "decode" => {
            let idl = VsrIdl::embedded().context("Failed to load embedded IDL")?;
            let count = decode::decode_accounts(idl, io::stdin().lock(), io::stdout().lock())?;
            tracing::info!("decoded {} accounts", count);
            Ok(())
        }
        other => bail!("unknown command '{}', expected 'info' or 'decode'", other),
    }
}

async fn info() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration from environment")?;
    let client = connect_anchor(config.provider(), config.devnet).await.context(
        "Failed to bind voter stake registry program"
    )?;

    let idl = client.program.idl();
    tracing::info!("program: {}", client.program.id());
    tracing::info!("payer: {}", client.program.payer());
    tracing::info!("cluster: {} (devnet flag: {:?})", config.cluster, client.devnet);
    tracing::info!("idl: {} v{}", idl.metadata.name, idl.metadata.version);
    tracing::info!("instructions: {}", idl.instruction_names().collect::<Vec<_>>().join(", "));
    Ok(())
}
