// --- On-chain account layouts of the voter stake registry program ---
//
// Mirrors the `types` section of the embedded IDL. The program stores these
// as zero-copy structs without padding, so the borsh encoding below is
// byte-identical to the account data after the 8-byte discriminator.
use anchor_lang::prelude::*;

pub const MAX_VOTING_MINTS: usize = 4;
pub const MAX_DEPOSIT_ENTRIES: usize = 32;

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockupKind {
    None,
    Daily,
    Monthly,
    Cliff,
    Constant,
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lockup {
    pub start_ts: i64,
    pub end_ts: i64,
    pub kind: LockupKind,
    pub reserved: [u8; 15],
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositEntry {
    pub lockup: Lockup,
    pub amount_deposited_native: u64,
    pub amount_initially_locked_native: u64,
    pub is_used: bool,
    pub allow_clawback: bool,
    pub voting_mint_config_idx: u8,
    pub reserved: [u8; 29],
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotingMintConfig {
    pub mint: Pubkey,
    pub grant_authority: Pubkey,
    pub baseline_vote_weight_scaled_factor: u64,
    pub max_extra_lockup_vote_weight_scaled_factor: u64,
    pub lockup_saturation_secs: u64,
    pub digit_shift: i8,
    pub reserved1: [u8; 7],
    pub reserved2: [u64; 7],
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registrar {
    pub governance_program_id: Pubkey,
    pub realm: Pubkey,
    pub realm_governing_token_mint: Pubkey,
    pub realm_authority: Pubkey,
    pub reserved1: [u8; 32],
    pub voting_mints: [VotingMintConfig; MAX_VOTING_MINTS],
    pub time_offset: i64,
    pub bump: u8,
    pub reserved2: [u8; 7],
    pub reserved3: [u64; 11],
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voter {
    pub voter_authority: Pubkey,
    pub registrar: Pubkey,
    pub deposits: [DepositEntry; MAX_DEPOSIT_ENTRIES],
    pub voter_bump: u8,
    pub voter_weight_record_bump: u8,
    pub reserved: [u8; 94],
}

/// Account types that can be read from raw account data.
pub trait VsrAccount: AnchorDeserialize {
    /// Account name in the IDL, used to look up the discriminator.
    const NAME: &'static str;
    /// Serialized size without the discriminator.
    const SIZE: usize;
}

impl VsrAccount for Voter {
    const NAME: &'static str = "Voter";
    const SIZE: usize = 2 * 32 + MAX_DEPOSIT_ENTRIES * 80 + 2 + 94;
}

impl VsrAccount for Registrar {
    const NAME: &'static str = "Registrar";
    const SIZE: usize = 4 * 32 + 32 + MAX_VOTING_MINTS * 152 + 8 + 1 + 7 + 11 * 8;
}

impl VotingMintConfig {
    /// Unconfigured slots hold the default mint.
    pub fn in_use(&self) -> bool {
        self.mint != Pubkey::default()
    }
}
