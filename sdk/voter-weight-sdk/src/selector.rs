//! Plugin selection.
//!
//! [`select_plugin`] maps a realm's configured voter weight addin to a
//! [`PluginVariant`] using the [`PluginRegistry`]. [`rebuild_session`] keeps a
//! session only while realm, wallet and variant are unchanged.

use crate::core::connection::SolConnection;
use crate::core::constants::*;
use crate::core::notify::{LogNotifier, Notifier};
use crate::error::{Result, VoterWeightSdkError};
use crate::plugins::{
    CollectionRegistryClient, LockRegistryClient, OracleStakingClient, PluginVariant,
    TokenStakingClient,
};
use crate::session::{SessionIdentity, VotingClientSession};
use crate::types::{Realm, RealmConfig};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

//=============================================================================
// Registry
//=============================================================================

/// Known plugin program ids per variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPluginRegistry", into = "RawPluginRegistry")]
pub struct PluginRegistry {
    pub lock_registry: Vec<Pubkey>,
    pub collection_registry: Vec<Pubkey>,
    pub oracle_staking: Vec<Pubkey>,
    pub token_staking: Vec<Pubkey>,
    /// Program owning the oracles and queues of the oracle staking addin
    pub oracle_program_id: Pubkey,
}

/// Base58 form of [`PluginRegistry`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPluginRegistry {
    #[serde(default)]
    lock_registry: Vec<String>,
    #[serde(default)]
    collection_registry: Vec<String>,
    #[serde(default)]
    oracle_staking: Vec<String>,
    #[serde(default)]
    token_staking: Vec<String>,
    #[serde(default)]
    oracle_program_id: Option<String>,
}

fn parse_pubkey(value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value)
        .map_err(|e| VoterWeightSdkError::Config(format!("Invalid program id {}: {}", value, e)))
}

fn parse_pubkeys(values: &[String]) -> Result<Vec<Pubkey>> {
    values.iter().map(|value| parse_pubkey(value)).collect()
}

impl TryFrom<RawPluginRegistry> for PluginRegistry {
    type Error = VoterWeightSdkError;

    fn try_from(raw: RawPluginRegistry) -> Result<Self> {
        Ok(Self {
            lock_registry: parse_pubkeys(&raw.lock_registry)?,
            collection_registry: parse_pubkeys(&raw.collection_registry)?,
            oracle_staking: parse_pubkeys(&raw.oracle_staking)?,
            token_staking: parse_pubkeys(&raw.token_staking)?,
            oracle_program_id: match raw.oracle_program_id {
                Some(value) => parse_pubkey(&value)?,
                None => ORACLE_PROGRAM_ID,
            },
        })
    }
}

impl From<PluginRegistry> for RawPluginRegistry {
    fn from(registry: PluginRegistry) -> Self {
        let encode =
            |keys: Vec<Pubkey>| -> Vec<String> { keys.iter().map(Pubkey::to_string).collect() };
        Self {
            lock_registry: encode(registry.lock_registry),
            collection_registry: encode(registry.collection_registry),
            oracle_staking: encode(registry.oracle_staking),
            token_staking: encode(registry.token_staking),
            oracle_program_id: Some(registry.oracle_program_id.to_string()),
        }
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self {
            lock_registry: LOCK_REGISTRY_PROGRAM_IDS.to_vec(),
            collection_registry: COLLECTION_REGISTRY_PROGRAM_IDS.to_vec(),
            oracle_staking: ORACLE_STAKING_PROGRAM_IDS.to_vec(),
            token_staking: TOKEN_STAKING_PROGRAM_IDS.to_vec(),
            oracle_program_id: ORACLE_PROGRAM_ID,
        }
    }
}

impl PluginRegistry {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| VoterWeightSdkError::Config(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            VoterWeightSdkError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Variant for a voter weight addin, `None` when the program is unknown
    pub fn variant_for(&self, program_id: &Pubkey) -> PluginVariant {
        if self.lock_registry.contains(program_id) {
            PluginVariant::LockRegistry(LockRegistryClient::new(*program_id))
        } else if self.collection_registry.contains(program_id) {
            PluginVariant::CollectionRegistry(CollectionRegistryClient::new(*program_id))
        } else if self.oracle_staking.contains(program_id) {
            PluginVariant::OracleStaking(OracleStakingClient::new(*program_id, self.oracle_program_id))
        } else if self.token_staking.contains(program_id) {
            PluginVariant::TokenStaking(TokenStakingClient::new(*program_id))
        } else {
            PluginVariant::None
        }
    }
}

//=============================================================================
// Selection
//=============================================================================

/// Variant for a realm's configuration.
///
/// Without a connected wallet no plugin is active.
pub fn select_plugin(
    config: &RealmConfig,
    wallet: Option<&Pubkey>,
    registry: &PluginRegistry,
) -> PluginVariant {
    if wallet.is_none() {
        return PluginVariant::None;
    }
    match &config.community_voter_weight_addin {
        Some(addin) => registry.variant_for(addin),
        None => PluginVariant::None,
    }
}

/// Inputs a session is built from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInputs {
    pub realm: Option<Realm>,
    pub wallet: Option<Pubkey>,
}

/// Keep `old` if it was built for the same realm, wallet and variant,
/// otherwise start a fresh session with empty discovery state
pub fn rebuild_session(
    variant: PluginVariant,
    old: Option<VotingClientSession>,
    inputs: SessionInputs,
    notifier: Arc<dyn Notifier>,
) -> VotingClientSession {
    let identity = SessionIdentity {
        realm: inputs.realm.as_ref().map(|realm| realm.address),
        wallet: inputs.wallet,
        variant: variant.clone(),
    };

    match old {
        Some(session) if session.identity() == identity => session,
        _ => VotingClientSession::new(variant, inputs.realm, inputs.wallet, notifier),
    }
}

/// Owns the current session and rebuilds it when its inputs change
pub struct PluginSelector {
    registry: PluginRegistry,
    notifier: Arc<dyn Notifier>,
    session: Option<VotingClientSession>,
}

impl PluginSelector {
    pub fn new(registry: PluginRegistry, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            registry,
            notifier,
            session: None,
        }
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn session(&self) -> Option<&VotingClientSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut VotingClientSession> {
        self.session.as_mut()
    }

    /// Bring the session in line with the current realm, configuration and
    /// wallet.
    ///
    /// A rebuilt session runs full discovery. A reused collection registry
    /// session re-runs holdings discovery when its collection set changed.
    pub async fn sync(
        &mut self,
        connection: &impl SolConnection,
        realm: Option<Realm>,
        config: &RealmConfig,
        wallet: Option<Pubkey>,
    ) -> &mut VotingClientSession {
        let variant = select_plugin(config, wallet.as_ref(), &self.registry);
        let previous = self.session.as_ref().map(VotingClientSession::identity);

        let mut session = rebuild_session(
            variant,
            self.session.take(),
            SessionInputs { realm, wallet },
            self.notifier.clone(),
        );

        if previous.as_ref() == Some(&session.identity()) {
            if session.sync_collections(connection).await {
                debug!("Collection set changed, holdings refreshed");
            }
        } else {
            info!("Voting client switched to {:?}", session.kind());
            session.discover(connection).await;
        }

        self.session.insert(session)
    }
}

impl Default for PluginSelector {
    fn default() -> Self {
        Self::new(PluginRegistry::default(), Arc::new(LogNotifier))
    }
}
