//! # Client Factory
//!
//! [`VsrClient`] pairs a program binding for the voter stake registry with an
//! optional network-flavor flag. The binding itself is produced by a
//! [`ProgramBinder`], which keeps the factory independent of any particular
//! RPC stack. The Anchor-backed binder lives in [`crate::onchain_instance`].

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

use crate::constants::VSR_PROGRAM_ID;
use crate::error::VsrClientError;
use crate::idl::VsrIdl;

/// Constructs a program binding from an interface schema, a program address
/// and a caller-supplied provider.
#[async_trait]
pub trait ProgramBinder: Send + Sync {
    /// Connection plus signing identity.
    type Provider: Send;
    /// The bound program handle.
    type Program: Send;
    type Error: From<VsrClientError> + Send;

    async fn bind(
        &self,
        idl: &'static VsrIdl,
        program_id: Pubkey,
        provider: Self::Provider,
    ) -> Result<Self::Program, Self::Error>;
}

/// Handle to the voter stake registry program.
#[derive(Debug, Clone)]
pub struct VsrClient<P> {
    pub program: P,
    /// Whether the caller targets the devnet flavor of the program.
    /// Stored as given; nothing here reads it.
    pub devnet: Option<bool>,
}

impl<P> VsrClient<P> {
    pub fn new(program: P, devnet: Option<bool>) -> Self {
        Self { program, devnet }
    }

    /// Bind the program at [`VSR_PROGRAM_ID`] using the embedded IDL.
    ///
    /// Errors from the binder are returned as-is.
    pub async fn connect<B>(
        binder: &B,
        provider: B::Provider,
        devnet: Option<bool>,
    ) -> Result<Self, B::Error>
    where
        B: ProgramBinder<Program = P>,
    {
        // The IDL could also be fetched from the program's on-chain IDL account.
        let idl = VsrIdl::embedded()?;

        tracing::debug!(program_id = %VSR_PROGRAM_ID, ?devnet, "binding voter stake registry");
        let program = binder.bind(idl, VSR_PROGRAM_ID, provider).await?;

        Ok(Self::new(program, devnet))
    }
}
