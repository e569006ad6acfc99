//! Oracle network and oracle voting addin accounts
//!
//! Oracle program accounts are packed `repr(C)` structs whose leading
//! fixed-size fields share the borsh encoding, so the same decoder is used.

use crate::discriminator::AnchorAccount;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

/// Leading fields of an oracle account
#[derive(Clone, Debug, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct OracleAccountData {
    pub name: [u8; 32],
    pub metadata: [u8; 128],
    /// Authority allowed to heartbeat and withdraw for the oracle
    pub oracle_authority: Pubkey,
    pub last_heartbeat: i64,
    pub num_in_use: u32,
    /// Staking wallet of the oracle
    pub token_account: Pubkey,
    /// Queue the oracle is assigned to
    pub queue_pubkey: Pubkey,
}

impl AnchorAccount for OracleAccountData {
    const NAME: &'static str = "OracleAccountData";
}

/// Leading fields of an oracle queue account
#[derive(Clone, Debug, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct OracleQueueAccountData {
    pub name: [u8; 32],
    pub metadata: [u8; 64],
    /// Authority granting permissions on the queue
    pub authority: Pubkey,
}

impl AnchorAccount for OracleQueueAccountData {
    const NAME: &'static str = "OracleQueueAccountData";
}

/// Global state of the oracle voting addin
///
/// PDA Seeds: ["state"]
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct AddinState {
    /// Account that grants oracle voting rights; a governance of the realm
    pub grant_authority: Pubkey,
    pub revoke_authority: Pubkey,
    pub bump: u8,
}

impl AnchorAccount for AddinState {
    const NAME: &'static str = "State";
}
