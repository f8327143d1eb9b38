//! Fixed identifiers of the deployed voter stake registry program.

use solana_sdk::pubkey::Pubkey;

/// Base58 address of the voter stake registry program.
pub const VSR_PROGRAM_ID_STR: &str = "VoteMBhDCqGLRgYpp9o7DGyq81KNmwjXQRAHStjtJsS";

/// Program ID as a [`Pubkey`]. Must stay in sync with [`VSR_PROGRAM_ID_STR`].
pub const VSR_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("VoteMBhDCqGLRgYpp9o7DGyq81KNmwjXQRAHStjtJsS");
