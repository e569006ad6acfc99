//! Token program accounts, read at fixed offsets.

use crate::error::StateError;
use solana_program::pubkey::Pubkey;

/// Size of a token account
pub const TOKEN_ACCOUNT_LEN: usize = 165;
/// Size of a mint account
pub const MINT_LEN: usize = 82;

pub const TOKEN_ACCOUNT_MINT_OFFSET: usize = 0;
pub const TOKEN_ACCOUNT_OWNER_OFFSET: usize = 32;
pub const TOKEN_ACCOUNT_AMOUNT_OFFSET: usize = 64;
pub const MINT_DECIMALS_OFFSET: usize = 44;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenAccountInfo {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

pub fn parse_token_account(data: &[u8]) -> Result<TokenAccountInfo, StateError> {
    if data.len() < TOKEN_ACCOUNT_LEN {
        return Err(StateError::AccountDataTooSmall {
            expected: TOKEN_ACCOUNT_LEN,
            actual: data.len(),
        });
    }

    Ok(TokenAccountInfo {
        mint: read_pubkey(data, TOKEN_ACCOUNT_MINT_OFFSET),
        owner: read_pubkey(data, TOKEN_ACCOUNT_OWNER_OFFSET),
        amount: read_u64(data, TOKEN_ACCOUNT_AMOUNT_OFFSET),
    })
}

pub fn parse_mint_decimals(data: &[u8]) -> Result<u8, StateError> {
    if data.len() < MINT_LEN {
        return Err(StateError::AccountDataTooSmall {
            expected: MINT_LEN,
            actual: data.len(),
        });
    }
    Ok(data[MINT_DECIMALS_OFFSET])
}

fn read_pubkey(data: &[u8], offset: usize) -> Pubkey {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&data[offset..offset + 32]);
    Pubkey::new_from_array(bytes)
}

fn read_u64(data: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}
