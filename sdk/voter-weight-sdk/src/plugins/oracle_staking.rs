use crate::advanced::instructions::{self, SetOracleVoterWeightAccounts};
use crate::core::pda::{
    derive_addin_state, derive_associated_token_address, derive_oracle_address,
    derive_oracle_permission, derive_oracle_voter_weight_record,
};
use crate::error::Result;
use crate::types::{OracleGrant, ProgramAddresses};
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;

/// Client for the oracle staking addin.
///
/// An oracle's voter weight record is keyed by the oracle, not the wallet.
/// The instruction refreshing it is prepared during oracle discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleStakingClient {
    /// Addin program id
    pub program_id: Pubkey,
    /// Oracle program the queues and oracles live under
    pub oracle_program_id: Pubkey,
}

impl OracleStakingClient {
    pub fn new(program_id: Pubkey, oracle_program_id: Pubkey) -> Self {
        Self {
            program_id,
            oracle_program_id,
        }
    }

    pub fn addin_state(&self) -> Result<Pubkey> {
        derive_addin_state(&self.program_id)
    }

    pub fn voter_weight_record(&self, oracle: &Pubkey) -> Result<Pubkey> {
        derive_oracle_voter_weight_record(&self.program_id, oracle)
    }

    /// Oracle account a wallet operates on `queue`, staked from its
    /// associated token wallet for `queue_mint`
    pub fn wallet_oracle_address(
        &self,
        queue: &Pubkey,
        queue_mint: &Pubkey,
        wallet: &Pubkey,
    ) -> Result<Pubkey> {
        let token_wallet = derive_associated_token_address(wallet, queue_mint)?;
        derive_oracle_address(&self.oracle_program_id, queue, &token_wallet)
    }

    /// Instructions setting the voter weight of `grant.oracle`
    pub fn set_voter_weight_instructions(
        &self,
        grant: &OracleGrant,
        payer: &Pubkey,
    ) -> Result<Vec<Instruction>> {
        let permission = derive_oracle_permission(
            &self.oracle_program_id,
            &grant.queue_authority,
            &grant.queue,
            &grant.oracle,
        )?;

        let fixed = SetOracleVoterWeightAccounts {
            addin_state: self.addin_state()?,
            oracle: grant.oracle,
            oracle_authority: grant.oracle_authority,
            queue: grant.queue,
            queue_authority: grant.queue_authority,
            permission,
            grant_authority: grant.grant_authority,
            voter_weight_record: self.voter_weight_record(&grant.oracle)?,
            payer: *payer,
        };

        Ok(vec![instructions::set_oracle_voter_weight(
            &self.program_id,
            &self.oracle_program_id,
            &fixed,
        )?])
    }

    /// Addresses for `current_oracle`, plus the first prepared instruction
    pub fn update_voter_weight_record(
        &self,
        current_oracle: &Pubkey,
        pending_instructions: &[Instruction],
    ) -> Result<(Option<Instruction>, ProgramAddresses)> {
        let voter_weight_address = self.voter_weight_record(current_oracle)?;
        Ok((
            pending_instructions.first().cloned(),
            ProgramAddresses {
                voter_weight_address,
                max_voter_weight_address: None,
            },
        ))
    }
}
