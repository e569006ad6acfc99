use super::VoterContext;
use crate::advanced::instructions;
use crate::core::pda::{derive_lock_registrar, derive_lock_voter, derive_lock_voter_weight_record};
use crate::error::Result;
use crate::types::ProgramAddresses;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;

/// Client for token lockup registries.
///
/// Voting power is computed on chain from the voter's deposits, so refreshing
/// it needs no discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockRegistryClient {
    pub program_id: Pubkey,
}

impl LockRegistryClient {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn registrar(&self, ctx: &VoterContext) -> Result<Pubkey> {
        derive_lock_registrar(&self.program_id, &ctx.realm, &ctx.governing_token_mint)
    }

    /// Build the `update_voter_weight_record` instruction
    pub fn update_voter_weight_record(
        &self,
        ctx: &VoterContext,
    ) -> Result<(Instruction, ProgramAddresses)> {
        let registrar = self.registrar(ctx)?;
        let voter = derive_lock_voter(&self.program_id, &registrar, &ctx.wallet)?;
        let voter_weight_record =
            derive_lock_voter_weight_record(&self.program_id, &registrar, &ctx.wallet)?;

        let ix = instructions::lock_registry_update_voter_weight_record(
            &self.program_id,
            &registrar,
            &voter,
            &voter_weight_record,
        )?;

        Ok((
            ix,
            ProgramAddresses {
                voter_weight_address: voter_weight_record,
                max_voter_weight_address: None,
            },
        ))
    }
}
