use super::VoterContext;
use crate::advanced::instructions::{self, RelinquishNftVoteAccounts};
use crate::core::chunk::{chunk_accounts, ChunkLayout};
use crate::core::connection::{AccountFilter, SolConnection};
use crate::core::constants::*;
use crate::core::pda::{
    derive_nft_max_voter_weight_record, derive_nft_registrar, derive_nft_vote_record,
    derive_nft_voter_weight_record,
};
use crate::error::Result;
use crate::types::{NftHolding, ProgramAddresses, Proposal, VoterWeightAction};
use crate::utils::{fetch_anchor_account, fetch_anchor_accounts};
use log::debug;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use std::collections::HashSet;
use voter_weight_state::{MaxVoterWeightRecord, NftVoteRecord, Registrar};

const CAST_LAYOUT: ChunkLayout =
    ChunkLayout::new(ACCOUNTS_PER_NFT_VOTE, CAST_PRIMARY_MAX_ACCOUNTS, CAST_OVERFLOW_MAX_ACCOUNTS);

const RELINQUISH_LAYOUT: ChunkLayout = ChunkLayout::new(
    1,
    RELINQUISH_PRIMARY_MAX_ACCOUNTS,
    RELINQUISH_OVERFLOW_MAX_ACCOUNTS,
);

/// Client for NFT collection registries.
///
/// Voting power comes from verified NFTs of the collections configured on
/// the realm's registrar. Each NFT is passed to the program as remaining
/// accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionRegistryClient {
    pub program_id: Pubkey,
}

impl CollectionRegistryClient {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn registrar(&self, realm: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
        derive_nft_registrar(&self.program_id, realm, mint)
    }

    /// Voter weight and max voter weight records of `ctx`
    pub fn voter_weight_addresses(&self, ctx: &VoterContext) -> Result<ProgramAddresses> {
        let voter_weight_address = derive_nft_voter_weight_record(
            &self.program_id,
            &ctx.realm,
            &ctx.governing_token_mint,
            &ctx.wallet,
        )?;
        let max_voter_weight_address =
            derive_nft_max_voter_weight_record(&self.program_id, &ctx.realm, &ctx.governing_token_mint)?;

        Ok(ProgramAddresses {
            voter_weight_address,
            max_voter_weight_address: Some(max_voter_weight_address),
        })
    }

    pub async fn load_registrar(
        &self,
        connection: &impl SolConnection,
        realm: &Pubkey,
        mint: &Pubkey,
    ) -> Result<Registrar> {
        let registrar = self.registrar(realm, mint)?;
        fetch_anchor_account(connection, &registrar).await
    }

    pub async fn fetch_max_voter_weight(
        &self,
        connection: &impl SolConnection,
        realm: &Pubkey,
        mint: &Pubkey,
    ) -> Result<MaxVoterWeightRecord> {
        let address = derive_nft_max_voter_weight_record(&self.program_id, realm, mint)?;
        fetch_anchor_account(connection, &address).await
    }

    /// Vote records already stored for `proposal`, across all voters
    pub async fn fetch_vote_records(
        &self,
        connection: &impl SolConnection,
        proposal: &Pubkey,
    ) -> Result<Vec<(Pubkey, NftVoteRecord)>> {
        fetch_anchor_accounts::<NftVoteRecord>(
            connection,
            &self.program_id,
            &[AccountFilter::memcmp_pubkey(NftVoteRecord::PROPOSAL_OFFSET, proposal)],
        )
        .await
    }

    /// Build `update_voter_weight_record` for `action`.
    ///
    /// Only the first [`UPDATE_WEIGHT_MAX_ACCOUNTS`] remaining accounts are
    /// passed.
    pub fn update_voter_weight_record(
        &self,
        ctx: &VoterContext,
        action: VoterWeightAction,
        nfts: &[NftHolding],
    ) -> Result<(Instruction, ProgramAddresses)> {
        let registrar = self.registrar(&ctx.realm, &ctx.governing_token_mint)?;
        let addresses = self.voter_weight_addresses(ctx)?;

        let mut remaining_accounts = Vec::with_capacity(
            (nfts.len() * ACCOUNTS_PER_NFT_WEIGHT).min(UPDATE_WEIGHT_MAX_ACCOUNTS),
        );
        remaining_accounts.extend(
            nfts.iter()
                .flat_map(|nft| {
                    [
                        AccountMeta::new_readonly(nft.token_account, false),
                        AccountMeta::new_readonly(nft.metadata_address, false),
                    ]
                })
                .take(UPDATE_WEIGHT_MAX_ACCOUNTS),
        );

        let ix = instructions::nft_update_voter_weight_record(
            &self.program_id,
            &registrar,
            &addresses.voter_weight_address,
            action,
            remaining_accounts,
        )?;

        Ok((ix, addresses))
    }

    /// Build the `cast_nft_vote` instructions for `proposal`.
    ///
    /// NFTs that already have a vote record for the proposal are left out.
    /// Overflow instructions come first; the instruction carrying the first
    /// five NFTs is always last.
    pub async fn cast_vote(
        &self,
        connection: &impl SolConnection,
        ctx: &VoterContext,
        proposal: &Pubkey,
        nfts: &[NftHolding],
    ) -> Result<(Vec<Instruction>, ProgramAddresses)> {
        let registrar = self.registrar(&ctx.realm, &ctx.governing_token_mint)?;
        let addresses = self.voter_weight_addresses(ctx)?;

        let recorded: HashSet<Pubkey> = self
            .fetch_vote_records(connection, proposal)
            .await?
            .into_iter()
            .map(|(address, _)| address)
            .collect();

        let mut remaining_accounts = Vec::with_capacity(nfts.len() * ACCOUNTS_PER_NFT_VOTE);
        for nft in nfts {
            let vote_record = derive_nft_vote_record(&self.program_id, proposal, &nft.mint)?;
            if recorded.contains(&vote_record) {
                debug!("NFT {} already voted on {}", nft.mint, proposal);
                continue;
            }
            remaining_accounts.extend([
                AccountMeta::new_readonly(nft.token_account, false),
                AccountMeta::new_readonly(nft.metadata_address, false),
                AccountMeta::new(vote_record, false),
            ]);
        }

        let mut batches = chunk_accounts(&remaining_accounts, CAST_LAYOUT).into_iter();
        let primary = batches.next().unwrap_or_default();

        let build = |batch: Vec<AccountMeta>| {
            instructions::cast_nft_vote(
                &self.program_id,
                &registrar,
                &addresses.voter_weight_address,
                &ctx.wallet,
                proposal,
                batch,
            )
        };

        let mut ixs = batches.map(&build).collect::<Result<Vec<_>>>()?;
        ixs.push(build(primary)?);

        Ok((ixs, addresses))
    }

    /// Build the `relinquish_nft_vote` instructions for the wallet's vote
    /// records on `proposal`.
    ///
    /// The first instruction carries up to five vote records, each following
    /// one up to twelve.
    pub async fn relinquish_vote(
        &self,
        connection: &impl SolConnection,
        ctx: &VoterContext,
        proposal: &Proposal,
        vote_record: &Pubkey,
    ) -> Result<(Vec<Instruction>, ProgramAddresses)> {
        let registrar = self.registrar(&ctx.realm, &ctx.governing_token_mint)?;
        let addresses = self.voter_weight_addresses(ctx)?;

        let remaining_accounts: Vec<AccountMeta> = self
            .fetch_vote_records(connection, &proposal.address)
            .await?
            .into_iter()
            .filter(|(_, record)| record.governing_token_owner == ctx.wallet)
            .map(|(address, _)| AccountMeta::new(address, false))
            .collect();

        let fixed = RelinquishNftVoteAccounts {
            registrar,
            voter_weight_record: addresses.voter_weight_address,
            governance: proposal.governance,
            proposal: proposal.address,
            governing_token_owner: ctx.wallet,
            vote_record: *vote_record,
            beneficiary: ctx.wallet,
        };

        let ixs = chunk_accounts(&remaining_accounts, RELINQUISH_LAYOUT)
            .into_iter()
            .map(|batch| instructions::relinquish_nft_vote(&self.program_id, &fixed, batch))
            .collect::<Result<Vec<_>>>()?;

        Ok((ixs, addresses))
    }
}
