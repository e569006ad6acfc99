//! Voting client session.
//!
//! A session is bound to one realm, wallet and plugin variant. It caches what
//! discovery found for that triple and turns governance actions into the
//! plugin instructions that must precede them.
//!
//! The three operations never fail: errors are logged, reported once to the
//! [`Notifier`] and turned into `None`. The caller's instruction list is only
//! extended when an operation succeeds.

use crate::core::connection::SolConnection;
use crate::core::notify::{Notifier, Severity};
use crate::discovery::{discover_holdings, discover_oracles};
use crate::error::{Result, VoterWeightSdkError};
use crate::plugins::{
    CollectionRegistryClient, OracleStakingClient, PluginKind, PluginVariant, VoterContext,
};
use crate::types::{
    NftHolding, OracleDiscovery, ProgramAddresses, Proposal, Realm, TokenOwnerRecord,
    VoterWeightAction,
};
use log::{debug, warn};
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use voter_weight_state::Registrar;

pub const NFT_FETCH_FAILED: &str = "Something went wrong can't fetch nfts";
pub const ORACLE_FETCH_FAILED: &str = "Something went wrong can't fetch switchboard voting power";

/// What a session is valid for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub realm: Option<Pubkey>,
    pub wallet: Option<Pubkey>,
    pub variant: PluginVariant,
}

pub struct VotingClientSession {
    variant: PluginVariant,
    realm: Option<Realm>,
    wallet: Option<Pubkey>,
    notifier: Arc<dyn Notifier>,
    registrar: Option<Registrar>,
    owned_nfts: Vec<NftHolding>,
    oracles: OracleDiscovery,
    max_voter_weight: Option<u64>,
}

impl std::fmt::Debug for VotingClientSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VotingClientSession")
            .field("variant", &self.variant)
            .field("realm", &self.realm)
            .field("wallet", &self.wallet)
            .field("owned_nfts", &self.owned_nfts.len())
            .field("owned_oracles", &self.oracles.owned_oracles.len())
            .finish()
    }
}

impl VotingClientSession {
    pub fn new(
        variant: PluginVariant,
        realm: Option<Realm>,
        wallet: Option<Pubkey>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            variant,
            realm,
            wallet,
            notifier,
            registrar: None,
            owned_nfts: Vec::new(),
            oracles: OracleDiscovery::default(),
            max_voter_weight: None,
        }
    }

    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            realm: self.realm.as_ref().map(|realm| realm.address),
            wallet: self.wallet,
            variant: self.variant.clone(),
        }
    }

    pub fn variant(&self) -> &PluginVariant {
        &self.variant
    }

    pub fn kind(&self) -> PluginKind {
        self.variant.kind()
    }

    pub fn realm(&self) -> Option<&Realm> {
        self.realm.as_ref()
    }

    pub fn wallet(&self) -> Option<Pubkey> {
        self.wallet
    }

    pub fn is_plugin_active(&self) -> bool {
        self.variant.is_active()
    }

    /// Qualifying NFTs found by the last successful holdings discovery
    pub fn owned_nfts(&self) -> &[NftHolding] {
        &self.owned_nfts
    }

    pub fn owned_oracles(&self) -> &[Pubkey] {
        &self.oracles.owned_oracles
    }

    pub fn current_oracle(&self) -> Pubkey {
        self.oracles.current_oracle
    }

    pub fn pending_instructions(&self) -> &[Instruction] {
        &self.oracles.pending_instructions
    }

    pub fn max_voter_weight(&self) -> Option<u64> {
        self.max_voter_weight
    }

    /// Collections configured on the realm's registrar
    pub fn collections(&self) -> Vec<Pubkey> {
        self.registrar
            .as_ref()
            .map(Registrar::collections)
            .unwrap_or_default()
    }

    /// Current voting power as far as the session can tell
    pub fn voting_power(&self) -> u64 {
        match &self.variant {
            PluginVariant::OracleStaking(_) => self.oracles.voting_power,
            PluginVariant::CollectionRegistry(_) => {
                let Some(registrar) = &self.registrar else {
                    return 0;
                };
                self.owned_nfts
                    .iter()
                    .filter_map(|nft| nft.collection.as_ref())
                    .filter_map(|collection| registrar.collection_weight(&collection.key))
                    .fold(0u64, u64::saturating_add)
            },
            _ => 0,
        }
    }

    //=========================================================================
    // Discovery
    //=========================================================================

    /// Populate the discovery state for the session's variant
    pub async fn discover(&mut self, connection: &impl SolConnection) {
        match self.variant.clone() {
            PluginVariant::CollectionRegistry(client) => {
                if self.load_registrar(connection, &client).await {
                    self.refresh_holdings(connection, &client).await;
                }
            },
            PluginVariant::OracleStaking(client) => self.refresh_oracles(connection, &client).await,
            PluginVariant::None | PluginVariant::LockRegistry(_) | PluginVariant::TokenStaking(_) => {},
        }
    }

    /// Re-read the registrar and re-run holdings discovery when its
    /// collection set changed.
    ///
    /// Returns whether the collection set changed.
    pub async fn sync_collections(&mut self, connection: &impl SolConnection) -> bool {
        let PluginVariant::CollectionRegistry(client) = self.variant.clone() else {
            return false;
        };

        let before = self.collections();
        if !self.load_registrar(connection, &client).await || self.collections() == before {
            return false;
        }
        self.refresh_holdings(connection, &client).await;
        true
    }

    /// Re-read the realm's registrar.
    ///
    /// A missing or undecodable registrar means the realm has no collections.
    /// Any other failure keeps the previous registrar, notifies once and
    /// returns `false` so the cached holdings stay in place.
    async fn load_registrar(
        &mut self,
        connection: &impl SolConnection,
        client: &CollectionRegistryClient,
    ) -> bool {
        let Some(realm) = &self.realm else {
            self.registrar = None;
            return true;
        };

        match client
            .load_registrar(connection, &realm.address, &realm.community_mint)
            .await
        {
            Ok(registrar) => {
                self.registrar = Some(registrar);
                true
            },
            Err(
                e @ (VoterWeightSdkError::AccountNotFound(_)
                | VoterWeightSdkError::InvalidAccountData(_)
                | VoterWeightSdkError::State(_)),
            ) => {
                debug!("No registrar for realm {}: {}", realm.address, e);
                self.registrar = None;
                true
            },
            Err(e) => {
                warn!("Failed to load registrar of realm {}: {}", realm.address, e);
                self.notifier.notify(NFT_FETCH_FAILED, Severity::Error);
                false
            },
        }
    }

    async fn refresh_holdings(
        &mut self,
        connection: &impl SolConnection,
        client: &CollectionRegistryClient,
    ) {
        let collections = self.collections();
        let Some(realm) = self.realm.clone() else {
            self.owned_nfts.clear();
            self.max_voter_weight = None;
            return;
        };
        if collections.is_empty() {
            self.owned_nfts.clear();
            self.max_voter_weight = None;
            return;
        }

        if let Some(wallet) = self.wallet {
            match discover_holdings(connection, &wallet, &collections).await {
                Ok(holdings) => {
                    debug!("Wallet {} holds {} voting NFTs", wallet, holdings.len());
                    self.owned_nfts = holdings;
                },
                Err(e) => {
                    warn!("NFT discovery failed for {}: {}", wallet, e);
                    self.notifier.notify(NFT_FETCH_FAILED, Severity::Error);
                },
            }
        }

        self.max_voter_weight = match client
            .fetch_max_voter_weight(connection, &realm.address, &realm.community_mint)
            .await
        {
            Ok(record) => Some(record.max_voter_weight),
            Err(e) => {
                debug!("No max voter weight for realm {}: {}", realm.address, e);
                None
            },
        };
    }

    async fn refresh_oracles(&mut self, connection: &impl SolConnection, client: &OracleStakingClient) {
        let (Some(realm), Some(wallet)) = (&self.realm, self.wallet) else {
            return;
        };

        match discover_oracles(connection, client, &realm.address, &wallet).await {
            Ok(discovery) => self.oracles = discovery,
            Err(e) => {
                warn!("Oracle discovery failed for {}: {}", wallet, e);
                self.oracles = OracleDiscovery::default();
                self.notifier.notify(ORACLE_FETCH_FAILED, Severity::Error);
            },
        }
    }

    //=========================================================================
    // Operations
    //=========================================================================

    /// Append the instructions refreshing the wallet's voter weight for
    /// `action`.
    ///
    /// `target` scopes the weight to one proposal where the plugin supports
    /// it.
    pub async fn refresh_weight(
        &mut self,
        connection: &impl SolConnection,
        instructions: &mut Vec<Instruction>,
        token_owner_record: &TokenOwnerRecord,
        action: VoterWeightAction,
        target: Option<Pubkey>,
    ) -> Option<ProgramAddresses> {
        let ctx = self.voter_context(&token_owner_record.governing_token_mint)?;
        let result = self.build_refresh_weight(connection, &ctx, action, target).await;
        self.settle("refresh voter weight", result, instructions)
    }

    /// Append the instructions that must precede a vote on `proposal`
    pub async fn cast_vote(
        &mut self,
        connection: &impl SolConnection,
        instructions: &mut Vec<Instruction>,
        proposal: &Proposal,
        token_owner_record: &TokenOwnerRecord,
    ) -> Option<ProgramAddresses> {
        let ctx = self.voter_context(&proposal.governing_token_mint)?;

        let result = match self.variant.clone() {
            PluginVariant::None => return None,
            PluginVariant::CollectionRegistry(client) => {
                client
                    .cast_vote(connection, &ctx, &proposal.address, &self.owned_nfts)
                    .await
            },
            PluginVariant::LockRegistry(_) | PluginVariant::OracleStaking(_) => {
                let ctx = self.voter_context(&token_owner_record.governing_token_mint)?;
                self.build_refresh_weight(connection, &ctx, VoterWeightAction::CastVote, None)
                    .await
            },
            PluginVariant::TokenStaking(_) => {
                let ctx = self.voter_context(&token_owner_record.governing_token_mint)?;
                self.build_refresh_weight(
                    connection,
                    &ctx,
                    VoterWeightAction::CastVote,
                    Some(proposal.address),
                )
                .await
            },
        };

        self.settle("cast vote", result, instructions)
    }

    /// Append the instructions releasing the wallet's NFT vote records on
    /// `proposal`. Only collection registries need this.
    pub async fn relinquish_vote(
        &mut self,
        connection: &impl SolConnection,
        instructions: &mut Vec<Instruction>,
        proposal: &Proposal,
        vote_record: &Pubkey,
    ) -> Option<ProgramAddresses> {
        let PluginVariant::CollectionRegistry(client) = self.variant.clone() else {
            return None;
        };
        let ctx = self.voter_context(&proposal.governing_token_mint)?;

        let result = client
            .relinquish_vote(connection, &ctx, proposal, vote_record)
            .await;
        self.settle("relinquish vote", result, instructions)
    }

    async fn build_refresh_weight(
        &mut self,
        connection: &impl SolConnection,
        ctx: &VoterContext,
        action: VoterWeightAction,
        target: Option<Pubkey>,
    ) -> Result<(Vec<Instruction>, ProgramAddresses)> {
        match self.variant.clone() {
            PluginVariant::None => Err(VoterWeightSdkError::Other("No voter weight plugin".into())),
            PluginVariant::LockRegistry(client) => {
                let (ix, addresses) = client.update_voter_weight_record(ctx)?;
                Ok((vec![ix], addresses))
            },
            PluginVariant::CollectionRegistry(client) => {
                let (ix, addresses) =
                    client.update_voter_weight_record(ctx, action, &self.owned_nfts)?;
                Ok((vec![ix], addresses))
            },
            PluginVariant::OracleStaking(client) => {
                self.refresh_oracles(connection, &client).await;
                let (ix, addresses) = client.update_voter_weight_record(
                    &self.oracles.current_oracle,
                    &self.oracles.pending_instructions,
                )?;
                Ok((ix.into_iter().collect(), addresses))
            },
            PluginVariant::TokenStaking(client) => {
                let stake_account = client.fetch_main_stake_account(connection, &ctx.wallet).await?;
                let (ix, addresses) = client.update_voter_weight(ctx, &stake_account, action, target)?;
                Ok((vec![ix], addresses))
            },
        }
    }

    /// Context for an operation on `mint`, `None` when the session has no
    /// plugin, realm or wallet, or the mint is not the realm's community mint
    fn voter_context(&self, mint: &Pubkey) -> Option<VoterContext> {
        if !self.variant.is_active() {
            return None;
        }
        let realm = self.realm.as_ref()?;
        let wallet = self.wallet?;
        if realm.community_mint != *mint {
            debug!("Mint {} is not the community mint of {}", mint, realm.address);
            return None;
        }

        Some(VoterContext {
            realm: realm.address,
            governing_token_mint: realm.community_mint,
            wallet,
        })
    }

    fn settle(
        &self,
        operation: &str,
        result: Result<(Vec<Instruction>, ProgramAddresses)>,
        instructions: &mut Vec<Instruction>,
    ) -> Option<ProgramAddresses> {
        match result {
            Ok((ixs, addresses)) => {
                debug!("{}: {} instructions", operation, ixs.len());
                instructions.extend(ixs);
                Some(addresses)
            },
            Err(e) => {
                warn!("Failed to {}: {}", operation, e);
                self.notifier
                    .notify(&format!("Failed to {}", operation), Severity::Error);
                None
            },
        }
    }
}
