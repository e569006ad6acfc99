//! Program derived addresses used by the voter weight plugins.

use crate::core::constants::*;
use crate::error::{Result, VoterWeightSdkError};
use solana_sdk::pubkey::Pubkey;
use voter_weight_state::governance::PROGRAM_AUTHORITY_SEED;
use voter_weight_state::metadata::METADATA_SEED;

/// Derive a program address, searching bumps from 255 down to 0.
pub fn derive_address(program_id: &Pubkey, seeds: &[&[u8]]) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(seeds, program_id)
        .ok_or(VoterWeightSdkError::NoValidBump(*program_id))
}

fn address(program_id: &Pubkey, seeds: &[&[u8]]) -> Result<Pubkey> {
    derive_address(program_id, seeds).map(|(address, _)| address)
}

//=============================================================================
// Lock registry
//=============================================================================

pub fn derive_lock_registrar(program_id: &Pubkey, realm: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
    address(
        program_id,
        &[realm.as_ref(), REGISTRAR_SEED, mint.as_ref()],
    )
}

pub fn derive_lock_voter(program_id: &Pubkey, registrar: &Pubkey, wallet: &Pubkey) -> Result<Pubkey> {
    address(
        program_id,
        &[registrar.as_ref(), VOTER_SEED, wallet.as_ref()],
    )
}

pub fn derive_lock_voter_weight_record(
    program_id: &Pubkey,
    registrar: &Pubkey,
    wallet: &Pubkey,
) -> Result<Pubkey> {
    address(
        program_id,
        &[registrar.as_ref(), VOTER_WEIGHT_RECORD_SEED, wallet.as_ref()],
    )
}

//=============================================================================
// Collection registry
//=============================================================================

pub fn derive_nft_registrar(program_id: &Pubkey, realm: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
    address(
        program_id,
        &[REGISTRAR_SEED, realm.as_ref(), mint.as_ref()],
    )
}

pub fn derive_nft_voter_weight_record(
    program_id: &Pubkey,
    realm: &Pubkey,
    mint: &Pubkey,
    wallet: &Pubkey,
) -> Result<Pubkey> {
    address(
        program_id,
        &[
            VOTER_WEIGHT_RECORD_SEED,
            realm.as_ref(),
            mint.as_ref(),
            wallet.as_ref(),
        ],
    )
}

pub fn derive_nft_max_voter_weight_record(
    program_id: &Pubkey,
    realm: &Pubkey,
    mint: &Pubkey,
) -> Result<Pubkey> {
    address(
        program_id,
        &[MAX_VOTER_WEIGHT_RECORD_SEED, realm.as_ref(), mint.as_ref()],
    )
}

pub fn derive_nft_vote_record(
    program_id: &Pubkey,
    proposal: &Pubkey,
    nft_mint: &Pubkey,
) -> Result<Pubkey> {
    address(
        program_id,
        &[NFT_VOTE_RECORD_SEED, proposal.as_ref(), nft_mint.as_ref()],
    )
}

//=============================================================================
// Oracle staking
//=============================================================================

pub fn derive_oracle_voter_weight_record(addin_program_id: &Pubkey, oracle: &Pubkey) -> Result<Pubkey> {
    address(
        addin_program_id,
        &[ORACLE_VOTER_WEIGHT_RECORD_SEED, oracle.as_ref()],
    )
}

pub fn derive_addin_state(addin_program_id: &Pubkey) -> Result<Pubkey> {
    address(addin_program_id, &[ADDIN_STATE_SEED])
}

pub fn derive_oracle_address(
    oracle_program_id: &Pubkey,
    queue: &Pubkey,
    token_wallet: &Pubkey,
) -> Result<Pubkey> {
    address(
        oracle_program_id,
        &[ORACLE_ACCOUNT_SEED, queue.as_ref(), token_wallet.as_ref()],
    )
}

pub fn derive_oracle_permission(
    oracle_program_id: &Pubkey,
    queue_authority: &Pubkey,
    queue: &Pubkey,
    oracle: &Pubkey,
) -> Result<Pubkey> {
    address(
        oracle_program_id,
        &[
            ORACLE_PERMISSION_SEED,
            queue_authority.as_ref(),
            queue.as_ref(),
            oracle.as_ref(),
        ],
    )
}

//=============================================================================
// Token staking
//=============================================================================

pub fn derive_staking_config(program_id: &Pubkey) -> Result<Pubkey> {
    address(program_id, &[STAKING_CONFIG_SEED])
}

pub fn derive_stake_metadata(program_id: &Pubkey, positions: &Pubkey) -> Result<Pubkey> {
    address(program_id, &[STAKE_METADATA_SEED, positions.as_ref()])
}

pub fn derive_stake_custody(program_id: &Pubkey, positions: &Pubkey) -> Result<Pubkey> {
    address(program_id, &[STAKE_CUSTODY_SEED, positions.as_ref()])
}

pub fn derive_staking_voter_weight_record(program_id: &Pubkey, positions: &Pubkey) -> Result<Pubkey> {
    address(program_id, &[STAKING_VOTER_WEIGHT_SEED, positions.as_ref()])
}

//=============================================================================
// Shared programs
//=============================================================================

pub fn derive_metadata_address(mint: &Pubkey) -> Result<Pubkey> {
    address(
        &TOKEN_METADATA_PROGRAM_ID,
        &[
            METADATA_SEED,
            TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
        ],
    )
}

pub fn derive_associated_token_address(wallet: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
    address(
        &ASSOCIATED_TOKEN_PROGRAM_ID,
        &[wallet.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
    )
}

pub fn derive_token_owner_record_address(
    governance_program_id: &Pubkey,
    realm: &Pubkey,
    governing_token_mint: &Pubkey,
    governing_token_owner: &Pubkey,
) -> Result<Pubkey> {
    address(
        governance_program_id,
        &[
            PROGRAM_AUTHORITY_SEED,
            realm.as_ref(),
            governing_token_mint.as_ref(),
            governing_token_owner.as_ref(),
        ],
    )
}
