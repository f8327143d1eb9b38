//! # Embedded Interface Schema
//!
//! The voter stake registry IDL is compiled into the crate and parsed once
//! into a typed view. Only the parts a client needs to inspect are typed;
//! field and type layouts are kept as raw JSON for the program binding.

use once_cell::sync::OnceCell;
use ring::digest::{ digest, SHA256 };
use serde::{ Deserialize, Serialize };
use serde_json::Value;

use crate::error::VsrResult;

/// Raw IDL document, in Anchor's 0.30+ layout.
pub const EMBEDDED_IDL_JSON: &str = include_str!("../idls/voter_stake_registry.json");

static EMBEDDED_IDL: OnceCell<VsrIdl> = OnceCell::new();

pub const DISCRIMINATOR_LEN: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VsrIdl {
    pub address: String,
    pub metadata: IdlMetadata,
    pub instructions: Vec<IdlInstruction>,
    #[serde(default)]
    pub accounts: Vec<IdlAccountDef>,
    #[serde(default)]
    pub types: Vec<IdlTypeDef>,
    #[serde(default)]
    pub errors: Vec<IdlErrorCode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdlMetadata {
    pub name: String,
    pub version: String,
    pub spec: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdlInstruction {
    pub name: String,
    pub discriminator: Vec<u8>,
    #[serde(default)]
    pub accounts: Vec<IdlInstructionAccount>,
    #[serde(default)]
    pub args: Vec<IdlField>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdlInstructionAccount {
    pub name: String,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub signer: bool,
    /// Fixed address, for sysvars and well-known programs.
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdlAccountDef {
    pub name: String,
    pub discriminator: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdlTypeDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdlErrorCode {
    pub code: u32,
    pub name: String,
    #[serde(default)]
    pub msg: Option<String>,
}

impl VsrIdl {
    /// Parse an IDL document.
    pub fn from_json(json: &str) -> VsrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The IDL compiled into this crate. Parsed on first use, shared afterwards.
    pub fn embedded() -> VsrResult<&'static VsrIdl> {
        EMBEDDED_IDL.get_or_try_init(|| {
            let idl = Self::from_json(EMBEDDED_IDL_JSON)?;
            tracing::debug!(
                name = %idl.metadata.name,
                version = %idl.metadata.version,
                instructions = idl.instructions.len(),
                "parsed embedded IDL"
            );
            Ok(idl)
        })
    }

    pub fn instruction(&self, name: &str) -> Option<&IdlInstruction> {
        self.instructions.iter().find(|ix| ix.name == name)
    }

    pub fn account(&self, name: &str) -> Option<&IdlAccountDef> {
        self.accounts.iter().find(|acc| acc.name == name)
    }

    /// Match the leading bytes of raw account data against known account types.
    pub fn account_by_discriminator(&self, data: &[u8]) -> Option<&IdlAccountDef> {
        let prefix = data.get(..DISCRIMINATOR_LEN)?;
        self.accounts.iter().find(|acc| acc.discriminator == prefix)
    }

    pub fn error(&self, code: u32) -> Option<&IdlErrorCode> {
        self.errors.iter().find(|err| err.code == code)
    }

    pub fn instruction_names(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().map(|ix| ix.name.as_str())
    }
}

/// Anchor discriminator: the first 8 bytes of `sha256("<namespace>:<name>")`.
pub fn discriminator(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let preimage = format!("{namespace}:{name}");
    let hash = digest(&SHA256, preimage.as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&hash.as_ref()[..DISCRIMINATOR_LEN]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::VSR_PROGRAM_ID_STR;

    #[test]
    fn embedded_idl_targets_program_address() {
        let idl = VsrIdl::embedded().unwrap();
        assert_eq!(idl.address, VSR_PROGRAM_ID_STR);
        assert_eq!(idl.metadata.name, "voter_stake_registry");
    }

    #[test]
    fn embedded_idl_is_parsed_once() {
        let a = VsrIdl::embedded().unwrap();
        let b = VsrIdl::embedded().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn instruction_discriminators_match_anchor_hash() {
        let idl = VsrIdl::embedded().unwrap();
        assert!(!idl.instructions.is_empty());
        for ix in &idl.instructions {
            assert_eq!(ix.discriminator, discriminator("global", &ix.name), "{}", ix.name);
        }
    }

    #[test]
    fn account_discriminators_match_anchor_hash() {
        let idl = VsrIdl::embedded().unwrap();
        for acc in &idl.accounts {
            assert_eq!(acc.discriminator, discriminator("account", &acc.name), "{}", acc.name);
        }
    }

    #[test]
    fn known_discriminator_values() {
        assert_eq!(discriminator("account", "Voter"), [241, 93, 35, 191, 254, 147, 17, 202]);
        assert_eq!(discriminator("global", "deposit"), [242, 35, 198, 137, 82, 225, 242, 182]);
    }

    #[test]
    fn lookups() {
        let idl = VsrIdl::embedded().unwrap();

        let deposit = idl.instruction("deposit").unwrap();
        let arg_names: Vec<_> = deposit.args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(arg_names, ["deposit_entry_index", "amount"]);
        assert!(deposit.accounts.iter().any(|a| a.name == "deposit_authority" && a.signer));

        let registrar = idl.account("Registrar").unwrap();
        let mut data = registrar.discriminator.clone();
        data.extend_from_slice(&[0u8; 16]);
        assert_eq!(idl.account_by_discriminator(&data).unwrap().name, "Registrar");
        assert!(idl.account_by_discriminator(&[1, 2, 3]).is_none());

        assert_eq!(idl.error(6000).unwrap().name, "InvalidRate");
        assert!(idl.instruction("swap").is_none());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(VsrIdl::from_json("{\"address\": 1}").is_err());
    }
}
