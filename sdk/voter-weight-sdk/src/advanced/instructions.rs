//! Raw instruction builders for the voter weight plugin programs.
//!
//! Instruction data is `[anchor discriminator][borsh arguments]`. Remaining
//! accounts are appended after the fixed account list in the order given.

use crate::error::Result;
use borsh::BorshSerialize;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;
use voter_weight_state::{instruction_discriminator, VoterWeightAction};

fn instruction_data<A: BorshSerialize>(name: &str, args: &A) -> Result<Vec<u8>> {
    let mut data = instruction_discriminator(name).to_vec();
    args.serialize(&mut data)?;
    Ok(data)
}

//=============================================================================
// Lock registry
//=============================================================================

pub fn lock_registry_update_voter_weight_record(
    program_id: &Pubkey,
    registrar: &Pubkey,
    voter: &Pubkey,
    voter_weight_record: &Pubkey,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new_readonly(*registrar, false),
        AccountMeta::new_readonly(*voter, false),
        AccountMeta::new(*voter_weight_record, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: instruction_data("update_voter_weight_record", &())?,
    })
}

//=============================================================================
// Collection registry
//=============================================================================

pub fn nft_update_voter_weight_record(
    program_id: &Pubkey,
    registrar: &Pubkey,
    voter_weight_record: &Pubkey,
    action: VoterWeightAction,
    remaining_accounts: Vec<AccountMeta>,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new_readonly(*registrar, false),
        AccountMeta::new(*voter_weight_record, false),
    ];
    accounts.extend(remaining_accounts);

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: instruction_data("update_voter_weight_record", &action)?,
    })
}

pub fn cast_nft_vote(
    program_id: &Pubkey,
    registrar: &Pubkey,
    voter_weight_record: &Pubkey,
    governing_token_owner: &Pubkey,
    proposal: &Pubkey,
    remaining_accounts: Vec<AccountMeta>,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new_readonly(*registrar, false),
        AccountMeta::new(*voter_weight_record, false),
        AccountMeta::new_readonly(*governing_token_owner, true),
        AccountMeta::new(*governing_token_owner, true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    accounts.extend(remaining_accounts);

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: instruction_data("cast_nft_vote", proposal)?,
    })
}

/// Fixed accounts of `relinquish_nft_vote`
#[derive(Debug, Clone, Copy)]
pub struct RelinquishNftVoteAccounts {
    pub registrar: Pubkey,
    pub voter_weight_record: Pubkey,
    pub governance: Pubkey,
    pub proposal: Pubkey,
    pub governing_token_owner: Pubkey,
    pub vote_record: Pubkey,
    pub beneficiary: Pubkey,
}

pub fn relinquish_nft_vote(
    program_id: &Pubkey,
    fixed: &RelinquishNftVoteAccounts,
    remaining_accounts: Vec<AccountMeta>,
) -> Result<Instruction> {
    let mut accounts = vec![
        AccountMeta::new_readonly(fixed.registrar, false),
        AccountMeta::new(fixed.voter_weight_record, false),
        AccountMeta::new_readonly(fixed.governance, false),
        AccountMeta::new_readonly(fixed.proposal, false),
        AccountMeta::new_readonly(fixed.governing_token_owner, true),
        AccountMeta::new_readonly(fixed.vote_record, false),
        AccountMeta::new(fixed.beneficiary, false),
    ];
    accounts.extend(remaining_accounts);

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: instruction_data("relinquish_nft_vote", &())?,
    })
}

//=============================================================================
// Oracle staking addin
//=============================================================================

/// Accounts of the addin's `set_voter_weight`
#[derive(Debug, Clone, Copy)]
pub struct SetOracleVoterWeightAccounts {
    pub addin_state: Pubkey,
    pub oracle: Pubkey,
    pub oracle_authority: Pubkey,
    pub queue: Pubkey,
    pub queue_authority: Pubkey,
    pub permission: Pubkey,
    pub grant_authority: Pubkey,
    pub voter_weight_record: Pubkey,
    pub payer: Pubkey,
}

pub fn set_oracle_voter_weight(
    addin_program_id: &Pubkey,
    oracle_program_id: &Pubkey,
    fixed: &SetOracleVoterWeightAccounts,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new_readonly(fixed.addin_state, false),
        AccountMeta::new_readonly(fixed.oracle, false),
        AccountMeta::new_readonly(fixed.oracle_authority, true),
        AccountMeta::new_readonly(fixed.queue, false),
        AccountMeta::new_readonly(fixed.queue_authority, false),
        AccountMeta::new_readonly(fixed.permission, false),
        AccountMeta::new_readonly(fixed.grant_authority, false),
        AccountMeta::new(fixed.voter_weight_record, false),
        AccountMeta::new(fixed.payer, true),
        AccountMeta::new_readonly(*oracle_program_id, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Ok(Instruction {
        program_id: *addin_program_id,
        accounts,
        data: instruction_data("set_voter_weight", &())?,
    })
}

//=============================================================================
// Token staking
//=============================================================================

/// Accounts of the staking program's `update_voter_weight`
#[derive(Debug, Clone, Copy)]
pub struct StakingVoterWeightAccounts {
    pub owner: Pubkey,
    pub stake_account_positions: Pubkey,
    pub stake_account_metadata: Pubkey,
    pub stake_account_custody: Pubkey,
    pub voter_record: Pubkey,
    pub config: Pubkey,
}

#[derive(BorshSerialize)]
struct UpdateVoterWeightArgs {
    action: VoterWeightAction,
    target: Option<Pubkey>,
}

pub fn staking_update_voter_weight(
    program_id: &Pubkey,
    fixed: &StakingVoterWeightAccounts,
    action: VoterWeightAction,
    target: Option<Pubkey>,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new_readonly(fixed.owner, true),
        AccountMeta::new(fixed.stake_account_positions, false),
        AccountMeta::new(fixed.stake_account_metadata, false),
        AccountMeta::new_readonly(fixed.stake_account_custody, false),
        AccountMeta::new(fixed.voter_record, false),
        AccountMeta::new_readonly(fixed.config, false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: instruction_data("update_voter_weight", &UpdateVoterWeightArgs { action, target })?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nft_update_encodes_action_after_discriminator() {
        let program_id = Pubkey::new_unique();
        let ix = nft_update_voter_weight_record(
            &program_id,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            VoterWeightAction::CreateProposal,
            vec![],
        )
        .unwrap();

        assert_eq!(&ix.data[..8], &instruction_discriminator("update_voter_weight_record"));
        assert_eq!(&ix.data[8..], &[3u8]);
        assert_eq!(ix.accounts.len(), 2);
    }

    #[test]
    fn test_cast_nft_vote_appends_remaining_accounts() {
        let owner = Pubkey::new_unique();
        let proposal = Pubkey::new_unique();
        let extra = AccountMeta::new(Pubkey::new_unique(), false);
        let ix = cast_nft_vote(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &owner,
            &proposal,
            vec![extra.clone()],
        )
        .unwrap();

        assert_eq!(ix.accounts.len(), 6);
        assert_eq!(ix.accounts[5], extra);
        assert!(ix.accounts[2].is_signer);
        assert_eq!(&ix.data[8..], proposal.as_ref());
    }
}
