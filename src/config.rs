//! Configuration module for environment variables and client settings

use std::{ env, str::FromStr, sync::Arc };

use anchor_client::Cluster;
use solana_sdk::{ commitment_config::CommitmentConfig, signature::Keypair };

use crate::error::{ VsrClientError, VsrResult };
use crate::onchain_instance::AnchorProvider;

#[derive(Debug, Clone)]
pub struct Config {
    /// Cluster name (`devnet`, `mainnet`, `localnet`, ...) or RPC URL
    pub cluster: Cluster,

    /// Fee payer; ephemeral when `VSR_PAYER_KEYPAIR` is unset
    pub payer: Arc<Keypair>,

    pub commitment: CommitmentConfig,

    /// Network-flavor flag handed to the client as-is
    pub devnet: Option<bool>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> VsrResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> VsrResult<Self> where F: Fn(&str) -> Option<String> {
        // Empty values count as unset
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let cluster_str = lookup("VSR_CLUSTER").unwrap_or_else(|| "devnet".to_string());
        let cluster = Cluster::from_str(&cluster_str).map_err(|e|
            VsrClientError::Config(format!("VSR_CLUSTER '{}': {}", cluster_str, e))
        )?;

        let payer = match lookup("VSR_PAYER_KEYPAIR") {
            Some(encoded) => parse_keypair(&encoded)?,
            None => {
                tracing::warn!("VSR_PAYER_KEYPAIR not set, using an ephemeral payer");
                Keypair::new()
            }
        };

        let commitment = match lookup("VSR_COMMITMENT") {
            Some(level) => parse_commitment(&level)?,
            None => CommitmentConfig::confirmed(),
        };

        let devnet = match lookup("VSR_DEVNET") {
            Some(flag) =>
                Some(
                    flag
                        .trim()
                        .parse::<bool>()
                        .map_err(|_| VsrClientError::Config(format!("VSR_DEVNET '{}' is not a bool", flag)))?
                ),
            None => None,
        };

        Ok(Self {
            cluster,
            payer: Arc::new(payer),
            commitment,
            devnet,
        })
    }

    pub fn provider(&self) -> AnchorProvider {
        AnchorProvider::new(self.cluster.clone(), self.payer.clone()).with_commitment(self.commitment)
    }
}

fn parse_keypair(encoded: &str) -> VsrResult<Keypair> {
    let bytes = bs58
        ::decode(encoded.trim())
        .into_vec()
        .map_err(|_| VsrClientError::Config("VSR_PAYER_KEYPAIR is not valid base58".to_string()))?;
    Keypair::try_from(bytes.as_slice()).map_err(|e|
        VsrClientError::Config(format!("VSR_PAYER_KEYPAIR has invalid bytes: {}", e))
    )
}

fn parse_commitment(level: &str) -> VsrResult<CommitmentConfig> {
    match level.trim().to_ascii_lowercase().as_str() {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(VsrClientError::Config(format!("VSR_COMMITMENT '{}' is unknown", other))),
    }
}
