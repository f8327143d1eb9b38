use anchor_client::{ Client, Cluster, Program };
use async_trait::async_trait;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
};
use std::sync::Arc;

use crate::client::{ ProgramBinder, VsrClient };
use crate::error::{ VsrClientError, VsrResult };
use crate::idl::VsrIdl;

/// Network connection settings plus the fee payer used to sign transactions
#[derive(Debug, Clone)]
pub struct AnchorProvider {
    pub cluster: Cluster,
    pub payer: Arc<Keypair>,
    pub commitment: CommitmentConfig,
}

impl AnchorProvider {
    pub fn new(cluster: Cluster, payer: Arc<Keypair>) -> Self {
        Self {
            cluster,
            payer,
            commitment: CommitmentConfig::confirmed(),
        }
    }

    pub fn with_commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = commitment;
        self
    }
}

/// Bound voter stake registry program
pub struct VsrProgram {
    program: Program<Arc<Keypair>>,
    idl: &'static VsrIdl,
}

impl VsrProgram {
    pub fn id(&self) -> Pubkey {
        self.program.id()
    }

    pub fn payer(&self) -> Pubkey {
        self.program.payer()
    }

    pub fn idl(&self) -> &'static VsrIdl {
        self.idl
    }

    /// Underlying Anchor program, for building requests and reading accounts
    pub fn inner(&self) -> &Program<Arc<Keypair>> {
        &self.program
    }
}

/// Builds program handles through `anchor_client`
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorBinder;

#[async_trait]
impl ProgramBinder for AnchorBinder {
    type Provider = AnchorProvider;
    type Program = VsrProgram;
    type Error = VsrClientError;

    async fn bind(
        &self,
        idl: &'static VsrIdl,
        program_id: Pubkey,
        provider: AnchorProvider
    ) -> VsrResult<VsrProgram> {
        tracing::debug!(
            cluster = %provider.cluster,
            payer = %provider.payer.pubkey(),
            "creating anchor client"
        );
        let client = Client::new_with_options(
            provider.cluster,
            provider.payer,
            provider.commitment
        );
        let program = client.program(program_id)?;

        Ok(VsrProgram { program, idl })
    }
}

/// Connect to the voter stake registry through Anchor
pub async fn connect_anchor(
    provider: AnchorProvider,
    devnet: Option<bool>
) -> VsrResult<VsrClient<VsrProgram>> {
    VsrClient::connect(&AnchorBinder, provider, devnet).await
}
