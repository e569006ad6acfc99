//! Collection-gated voter registry accounts

use crate::discriminator::{AnchorAccount, DISCRIMINATOR_LEN};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

/// Configuration of an NFT collection usable for voting
#[derive(Clone, Debug, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct CollectionConfig {
    /// The NFT collection used for governance
    pub collection: Pubkey,

    /// The size of the NFT collection used to calculate max voter weight
    pub size: u32,

    /// Governance power weight of the collection
    /// Each NFT in the collection has governance power = 1 * weight
    pub weight: u64,

    pub reserved: [u8; 8],
}

/// Registrar which stores NFT voting configuration for the given Realm
///
/// PDA Seeds: ["registrar", realm, governing_token_mint]
#[derive(Clone, Debug, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct Registrar {
    pub governance_program_id: Pubkey,
    pub realm: Pubkey,
    pub governing_token_mint: Pubkey,
    pub collection_configs: Vec<CollectionConfig>,
}

impl AnchorAccount for Registrar {
    const NAME: &'static str = "Registrar";
}

impl Registrar {
    pub fn collections(&self) -> Vec<Pubkey> {
        self.collection_configs.iter().map(|c| c.collection).collect()
    }

    pub fn collection_weight(&self, collection: &Pubkey) -> Option<u64> {
        self.collection_configs
            .iter()
            .find(|c| c.collection == *collection)
            .map(|c| c.weight)
    }
}

/// Record of an NFT already used to vote on a proposal
///
/// PDA Seeds: ["nft-vote-record", proposal, nft_mint]
#[derive(Clone, Debug, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct NftVoteRecord {
    pub proposal: Pubkey,
    pub nft_mint: Pubkey,
    pub governing_token_owner: Pubkey,
}

impl AnchorAccount for NftVoteRecord {
    const NAME: &'static str = "NftVoteRecord";
}

impl NftVoteRecord {
    /// Offset of `proposal` used for program account filters
    pub const PROPOSAL_OFFSET: usize = DISCRIMINATOR_LEN;
}
