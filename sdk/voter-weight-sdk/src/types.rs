use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use voter_weight_state::metadata::Collection;

pub use voter_weight_state::VoterWeightAction;

/// Addresses the governance program reads voting power from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramAddresses {
    pub voter_weight_address: Pubkey,
    pub max_voter_weight_address: Option<Pubkey>,
}

/// Realm (DAO) the session votes in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Realm {
    pub address: Pubkey,
    /// Governance program owning the realm
    pub governance_program_id: Pubkey,
    pub community_mint: Pubkey,
}

/// Plugin configuration of a realm
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RealmConfig {
    pub community_voter_weight_addin: Option<Pubkey>,
    pub max_community_voter_weight_addin: Option<Pubkey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub address: Pubkey,
    pub governance: Pubkey,
    pub governing_token_mint: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOwnerRecord {
    pub address: Pubkey,
    pub governing_token_mint: Pubkey,
    pub governing_token_owner: Pubkey,
}

/// An NFT held by the wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftHolding {
    pub mint: Pubkey,
    pub token_account: Pubkey,
    pub metadata_address: Pubkey,
    pub collection: Option<Collection>,
}

impl NftHolding {
    /// Verified member of one of the given collections
    pub fn qualifies(&self, collections: &[Pubkey]) -> bool {
        self.collection
            .as_ref()
            .and_then(Collection::verified_key)
            .is_some_and(|key| collections.contains(&key))
    }
}

/// An oracle together with the accounts that grant it voting rights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleGrant {
    pub oracle: Pubkey,
    pub oracle_authority: Pubkey,
    pub queue: Pubkey,
    pub queue_authority: Pubkey,
    pub grant_authority: Pubkey,
}

/// Outcome of one oracle discovery run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OracleDiscovery {
    /// Oracles operated by the wallet and granted in the realm, in enumeration order
    pub owned_oracles: Vec<Pubkey>,
    /// Oracle whose voter weight record is used; default address when none is owned
    pub current_oracle: Pubkey,
    /// First set-voter-weight instruction of each owned oracle
    pub pending_instructions: Vec<Instruction>,
    /// Weight reported by the current oracle's voter weight record
    pub voting_power: u64,
}
