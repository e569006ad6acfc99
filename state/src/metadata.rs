//! Token metadata accounts
//!
//! Decoded up to and including the `collection` field; everything after it
//! is ignored.

use crate::error::StateError;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

/// Seed prefix for metadata addresses
pub const METADATA_SEED: &[u8] = b"metadata";

#[derive(Clone, Debug, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct Creator {
    pub address: Pubkey,
    pub verified: bool,
    pub share: u8,
}

#[derive(Clone, Debug, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct MetadataData {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
}

/// Collection membership declared by an NFT
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct Collection {
    pub verified: bool,
    pub key: Pubkey,
}

impl Collection {
    /// Collection key, only when membership is verified
    pub fn verified_key(&self) -> Option<Pubkey> {
        self.verified.then_some(self.key)
    }
}

#[derive(Clone, Debug, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct Metadata {
    pub key: u8,
    pub update_authority: Pubkey,
    pub mint: Pubkey,
    pub data: MetadataData,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
    pub edition_nonce: Option<u8>,
    pub token_standard: Option<u8>,
    pub collection: Option<Collection>,
}

impl Metadata {
    pub fn from_account_data(data: &[u8]) -> Result<Self, StateError> {
        let mut body = data;
        Ok(Self::deserialize(&mut body)?)
    }

    /// Collection key if the metadata declares a verified collection
    pub fn verified_collection(&self) -> Option<Pubkey> {
        self.collection.as_ref().and_then(Collection::verified_key)
    }
}
