//! Governance program accounts
//!
//! Only the account type tag and the owning realm are read; both sit at the
//! same offsets in every governance account version.

use crate::error::StateError;
use solana_program::pubkey::Pubkey;

/// Seed prefix for governance program addresses
pub const PROGRAM_AUTHORITY_SEED: &[u8] = b"governance";

/// Account type tags of governance accounts (V1 and V2 of account, program,
/// mint and token governances)
pub const GOVERNANCE_ACCOUNT_TYPES: [u8; 8] = [3, 4, 9, 10, 18, 19, 20, 21];

const REALM_OFFSET: usize = 1;

/// Leading fields of a governance account
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GovernanceHeader {
    pub account_type: u8,
    pub realm: Pubkey,
}

pub fn is_governance_account_type(account_type: u8) -> bool {
    GOVERNANCE_ACCOUNT_TYPES.contains(&account_type)
}

/// Parse a governance account, rejecting any other governance program account
pub fn parse_governance_header(data: &[u8]) -> Result<GovernanceHeader, StateError> {
    let expected = REALM_OFFSET + 32;
    if data.len() < expected {
        return Err(StateError::AccountDataTooSmall {
            expected,
            actual: data.len(),
        });
    }

    let account_type = data[0];
    if !is_governance_account_type(account_type) {
        return Err(StateError::NotGovernanceAccount(account_type));
    }

    let mut realm = [0u8; 32];
    realm.copy_from_slice(&data[REALM_OFFSET..expected]);

    Ok(GovernanceHeader {
        account_type,
        realm: Pubkey::new_from_array(realm),
    })
}
