use super::VoterContext;
use crate::advanced::instructions::{self, StakingVoterWeightAccounts};
use crate::core::connection::{AccountFilter, SolConnection};
use crate::core::pda::{
    derive_stake_custody, derive_stake_metadata, derive_staking_config,
    derive_staking_voter_weight_record,
};
use crate::error::{Result, VoterWeightSdkError};
use crate::types::{ProgramAddresses, VoterWeightAction};
use crate::utils::{fetch_anchor_accounts, fetch_optional_account_data};
use log::debug;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use voter_weight_state::token::parse_token_account;
use voter_weight_state::PositionData;

/// Client for the token staking program.
///
/// A wallet may own several stake accounts; the one with the largest custody
/// balance is its main account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenStakingClient {
    pub program_id: Pubkey,
}

impl TokenStakingClient {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    /// Resolve the wallet's main stake account (its positions account)
    pub async fn fetch_main_stake_account(
        &self,
        connection: &impl SolConnection,
        wallet: &Pubkey,
    ) -> Result<Pubkey> {
        let positions = fetch_anchor_accounts::<PositionData>(
            connection,
            &self.program_id,
            &[AccountFilter::memcmp_pubkey(PositionData::OWNER_OFFSET, wallet)],
        )
        .await?;

        let mut main: Option<(Pubkey, u64)> = None;
        for (address, _) in positions {
            let custody = derive_stake_custody(&self.program_id, &address)?;
            let balance = match fetch_optional_account_data(connection, &custody).await? {
                Some(data) => parse_token_account(&data)?.amount,
                None => 0,
            };
            debug!("Stake account {} holds {}", address, balance);

            if main.map_or(true, |(_, best)| balance > best) {
                main = Some((address, balance));
            }
        }

        main.map(|(address, _)| address)
            .ok_or_else(|| VoterWeightSdkError::Other(format!("No stake account for {}", wallet)))
    }

    /// Build `update_voter_weight` for the given stake account
    pub fn update_voter_weight(
        &self,
        ctx: &VoterContext,
        stake_account_positions: &Pubkey,
        action: VoterWeightAction,
        target: Option<Pubkey>,
    ) -> Result<(Instruction, ProgramAddresses)> {
        let voter_record =
            derive_staking_voter_weight_record(&self.program_id, stake_account_positions)?;
        let fixed = StakingVoterWeightAccounts {
            owner: ctx.wallet,
            stake_account_positions: *stake_account_positions,
            stake_account_metadata: derive_stake_metadata(&self.program_id, stake_account_positions)?,
            stake_account_custody: derive_stake_custody(&self.program_id, stake_account_positions)?,
            voter_record,
            config: derive_staking_config(&self.program_id)?,
        };

        let ix = instructions::staking_update_voter_weight(&self.program_id, &fixed, action, target)?;
        Ok((
            ix,
            ProgramAddresses {
                voter_weight_address: voter_record,
                max_voter_weight_address: None,
            },
        ))
    }
}
