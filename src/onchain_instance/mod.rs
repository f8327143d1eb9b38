//! # Onchain Program Instance Module
//!
//! Anchor-backed binding for the voter stake registry program.
//!
//! ## Features
//! - Provider bundling cluster, payer and commitment
//! - [`crate::client::ProgramBinder`] implementation over `anchor_client`
//! - Program handle carrying the embedded IDL alongside the Anchor program

/// Anchor provider, binder and program handle
pub mod instance;

pub use instance::{ connect_anchor, AnchorBinder, AnchorProvider, VsrProgram };
