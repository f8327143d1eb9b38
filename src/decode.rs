//! Decode raw voter stake registry accounts.
//!
//! Input is a stream of base64-encoded account data, one account per line.
//! Blank lines and lines starting with `#` are ignored. Every account is
//! identified by its IDL discriminator, deserialized into its typed layout
//! and reported as one JSON line.

use std::io::{ BufRead, Write };

use base64::{ engine::general_purpose::STANDARD, Engine as _ };
use serde::Serialize;

use crate::error::{ VsrClientError, VsrResult };
use crate::idl::{ VsrIdl, DISCRIMINATOR_LEN };
use crate::state::{ Registrar, Voter, VsrAccount };

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayDepositEntry {
    pub index: usize,
    pub allow_clawback: bool,
    pub mint_index: u8,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayVoter {
    pub voter_authority: String,
    pub registrar: String,
    /// Used entries only
    pub deposit_entries: Vec<DisplayDepositEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayRegistrar {
    pub governance_program_id: String,
    pub realm: String,
    pub realm_governing_token_mint: String,
    pub realm_authority: String,
    /// Configured voting mints, by slot order
    pub voting_mints: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "account")]
pub enum DecodedAccount {
    Voter(DisplayVoter),
    Registrar(DisplayRegistrar),
}

impl From<&Voter> for DisplayVoter {
    fn from(voter: &Voter) -> Self {
        Self {
            voter_authority: voter.voter_authority.to_string(),
            registrar: voter.registrar.to_string(),
            deposit_entries: voter.deposits
                .iter()
                .enumerate()
                .filter(|(_, d)| d.is_used)
                .map(|(index, d)| DisplayDepositEntry {
                    index,
                    allow_clawback: d.allow_clawback,
                    mint_index: d.voting_mint_config_idx,
                })
                .collect(),
        }
    }
}

impl From<&Registrar> for DisplayRegistrar {
    fn from(registrar: &Registrar) -> Self {
        Self {
            governance_program_id: registrar.governance_program_id.to_string(),
            realm: registrar.realm.to_string(),
            realm_governing_token_mint: registrar.realm_governing_token_mint.to_string(),
            realm_authority: registrar.realm_authority.to_string(),
            voting_mints: registrar.voting_mints
                .iter()
                .filter(|m| m.in_use())
                .map(|m| m.mint.to_string())
                .collect(),
        }
    }
}

/// Deserialize account data of a known type, discriminator included.
///
/// The data must be exactly the discriminator followed by the account layout.
pub fn read_account<T: VsrAccount>(idl: &VsrIdl, data: &[u8]) -> VsrResult<T> {
    let def = idl
        .account(T::NAME)
        .ok_or_else(|| VsrClientError::Decode(format!("IDL has no account {}", T::NAME)))?;

    let expected = DISCRIMINATOR_LEN + T::SIZE;
    if data.len() != expected {
        return Err(
            VsrClientError::Decode(
                format!("{} data length {} does not match expected {}", T::NAME, data.len(), expected)
            )
        );
    }
    if def.discriminator != data[..DISCRIMINATOR_LEN] {
        return Err(VsrClientError::Decode(format!("data is not a {} account", T::NAME)));
    }

    T::try_from_slice(&data[DISCRIMINATOR_LEN..]).map_err(|e|
        VsrClientError::Decode(format!("{} layout: {}", T::NAME, e))
    )
}

pub fn decode_account(idl: &VsrIdl, data: &[u8]) -> VsrResult<DecodedAccount> {
    if data.len() < DISCRIMINATOR_LEN {
        return Err(
            VsrClientError::Decode(format!("data length {} too small for discriminator", data.len()))
        );
    }
    let def = idl
        .account_by_discriminator(data)
        .ok_or_else(||
            VsrClientError::Decode(
                format!("discriminator {:?} not recognized", &data[..DISCRIMINATOR_LEN])
            )
        )?;

    match def.name.as_str() {
        Voter::NAME => {
            let voter: Voter = read_account(idl, data)?;
            Ok(DecodedAccount::Voter(DisplayVoter::from(&voter)))
        }
        Registrar::NAME => {
            let registrar: Registrar = read_account(idl, data)?;
            Ok(DecodedAccount::Registrar(DisplayRegistrar::from(&registrar)))
        }
        other => Err(VsrClientError::Decode(format!("no layout for account {}", other))),
    }
}

/// Decode every account on `input`, writing one JSON object per line to
/// `output`. Returns the number of accounts written.
pub fn decode_accounts<R: BufRead, W: Write>(
    idl: &VsrIdl,
    input: R,
    mut output: W
) -> VsrResult<usize> {
    let mut count = 0;
    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let data = STANDARD.decode(trimmed).map_err(|e|
            VsrClientError::Decode(format!("line {}: invalid base64: {}", lineno + 1, e))
        )?;
        let decoded = decode_account(idl, &data).map_err(|e| match e {
            VsrClientError::Decode(msg) => VsrClientError::Decode(format!("line {}: {}", lineno + 1, msg)),
            other => other,
        })?;
        tracing::debug!(line = lineno + 1, len = data.len(), "decoded account");

        serde_json::to_writer(&mut output, &decoded)?;
        writeln!(output)?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures;
    use anchor_lang::prelude::Pubkey;

    fn account_data<T: anchor_lang::AnchorSerialize>(name: &str, account: &T) -> Vec<u8> {
        let idl = VsrIdl::embedded().unwrap();
        let mut data = idl.account(name).unwrap().discriminator.clone();
        data.extend(fixtures::encode(account));
        data
    }

    fn sample_voter(authority: Pubkey, registrar: Pubkey) -> Voter {
        let mut voter = fixtures::voter(authority, registrar);
        voter.deposits[3].is_used = true;
        voter.deposits[3].allow_clawback = true;
        voter.deposits[3].voting_mint_config_idx = 1;
        voter
    }

    #[test]
    fn decodes_voter_fields() {
        let idl = VsrIdl::embedded().unwrap();
        let authority = Pubkey::new_unique();
        let registrar = Pubkey::new_unique();
        let data = account_data("Voter", &sample_voter(authority, registrar));
        assert_eq!(data.len(), 8 + Voter::SIZE);

        let decoded = decode_account(idl, &data).unwrap();

        assert_eq!(
            decoded,
            DecodedAccount::Voter(DisplayVoter {
                voter_authority: authority.to_string(),
                registrar: registrar.to_string(),
                deposit_entries: vec![DisplayDepositEntry { index: 3, allow_clawback: true, mint_index: 1 }],
            })
        );
    }

    #[test]
    fn decodes_stream_of_voter_and_registrar() {
        let idl = VsrIdl::embedded().unwrap();
        let authority = Pubkey::new_unique();
        let realm = Pubkey::new_unique();
        let mut registrar = fixtures::registrar(realm, Pubkey::new_unique());
        let mint = Pubkey::new_unique();
        registrar.voting_mints[0].mint = mint;

        let input = format!(
            "# voter\n{}\n\n# registrar\n{}\n",
            STANDARD.encode(account_data("Voter", &sample_voter(authority, Pubkey::new_unique()))),
            STANDARD.encode(account_data("Registrar", &registrar))
        );
        let mut out = Vec::new();

        let count = decode_accounts(idl, input.as_bytes(), &mut out).unwrap();

        assert_eq!(count, 2);
        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines[0]["account"], "Voter");
        assert_eq!(lines[0]["voter_authority"], authority.to_string());
        assert_eq!(lines[0]["deposit_entries"][0]["mint_index"], 1);
        assert_eq!(lines[1]["account"], "Registrar");
        assert_eq!(lines[1]["realm"], realm.to_string());
        assert_eq!(lines[1]["voting_mints"], serde_json::json!([mint.to_string()]));
    }

    #[test]
    fn rejects_truncated_voter() {
        let idl = VsrIdl::embedded().unwrap();
        let mut data = account_data("Voter", &sample_voter(Pubkey::new_unique(), Pubkey::new_unique()));
        data.truncate(40);

        let err = decode_account(idl, &data).unwrap_err();
        assert!(err.to_string().contains("does not match expected 2728"), "{}", err);
    }

    #[test]
    fn rejects_trailing_bytes() {
        let idl = VsrIdl::embedded().unwrap();
        let mut data = account_data("Voter", &sample_voter(Pubkey::new_unique(), Pubkey::new_unique()));
        data.push(0);

        assert!(matches!(decode_account(idl, &data), Err(VsrClientError::Decode(_))));
    }

    #[test]
    fn read_account_rejects_other_type() {
        let idl = VsrIdl::embedded().unwrap();
        let registrar = fixtures::registrar(Pubkey::new_unique(), Pubkey::new_unique());
        let data = account_data("Registrar", &registrar);

        assert!(read_account::<Voter>(idl, &data).is_err());
        assert_eq!(read_account::<Registrar>(idl, &data).unwrap(), registrar);
    }

    #[test]
    fn rejects_short_data() {
        let idl = VsrIdl::embedded().unwrap();
        let err = decode_account(idl, &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, VsrClientError::Decode(_)));
    }

    #[test]
    fn rejects_unknown_discriminator() {
        let idl = VsrIdl::embedded().unwrap();
        let err = decode_account(idl, &[0u8; 16]).unwrap_err();
        assert!(err.to_string().contains("not recognized"));
    }

    #[test]
    fn errors_carry_line_numbers() {
        let idl = VsrIdl::embedded().unwrap();
        let voter = STANDARD.encode(
            account_data("Voter", &sample_voter(Pubkey::new_unique(), Pubkey::new_unique()))
        );

        let bad_base64 = decode_accounts(idl, "not base64!!\n".as_bytes(), Vec::new()).unwrap_err();
        assert!(bad_base64.to_string().contains("line 1"));

        let short = format!("{}\n# comment\n{}\n", voter, STANDARD.encode([1u8, 2, 3]));
        let err = decode_accounts(idl, short.as_bytes(), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("line 3: data length 3"), "{}", err);

        let unknown = format!("{}\n{}\n", voter, STANDARD.encode([0u8; 16]));
        let err = decode_accounts(idl, unknown.as_bytes(), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("line 2: discriminator"), "{}", err);
    }
}
