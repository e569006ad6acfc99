//! Token staking program accounts

use crate::discriminator::{AnchorAccount, DISCRIMINATOR_LEN};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

/// Leading field of a stake account's positions record
#[derive(Clone, Debug, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct PositionData {
    pub owner: Pubkey,
}

impl AnchorAccount for PositionData {
    const NAME: &'static str = "PositionData";
}

impl PositionData {
    /// Offset of `owner` used for program account filters
    pub const OWNER_OFFSET: usize = DISCRIMINATOR_LEN;
}
