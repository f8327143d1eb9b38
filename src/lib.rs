//! # VSR Client
//!
//! Client handle for the voter stake registry governance program on Solana.
//!
//! ## Features
//! - Fixed program address and embedded IDL
//! - [`VsrClient::connect`] factory over a pluggable [`ProgramBinder`]
//! - Anchor-backed binder in [`onchain_instance`]
//! - Environment driven configuration
//! - Typed voter and registrar account layouts, decoded from raw base64 dumps
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use anchor_client::Cluster;
//! use solana_sdk::signature::Keypair;
//! use vsr_client::onchain_instance::{connect_anchor, AnchorProvider};
//!
//! # async fn run() -> vsr_client::VsrResult<()> {
//! let provider = AnchorProvider::new(Cluster::Devnet, Arc::new(Keypair::new()));
//! let client = connect_anchor(provider, Some(true)).await?;
//! println!("{}", client.program.id());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod decode;
pub mod error;
pub mod idl;
pub mod onchain_instance;
pub mod state;

pub use client::{ ProgramBinder, VsrClient };
pub use constants::{ VSR_PROGRAM_ID, VSR_PROGRAM_ID_STR };
pub use error::{ VsrClientError, VsrResult };
pub use idl::VsrIdl;
