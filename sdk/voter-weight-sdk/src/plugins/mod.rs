//! Voter weight plugin clients.
//!
//! One client per supported plugin program. [`PluginVariant`] is the closed
//! set a session dispatches over.

pub mod collection_registry;
pub mod lock_registry;
pub mod oracle_staking;
pub mod token_staking;

pub use collection_registry::CollectionRegistryClient;
pub use lock_registry::LockRegistryClient;
pub use oracle_staking::OracleStakingClient;
pub use token_staking::TokenStakingClient;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

/// Realm, mint and wallet an instruction is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoterContext {
    pub realm: Pubkey,
    pub governing_token_mint: Pubkey,
    pub wallet: Pubkey,
}

/// Tag of a [`PluginVariant`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    None,
    LockRegistry,
    CollectionRegistry,
    OracleStaking,
    TokenStaking,
}

/// The weight source a session votes through
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PluginVariant {
    /// Plain token voting, no plugin
    #[default]
    None,
    LockRegistry(LockRegistryClient),
    CollectionRegistry(CollectionRegistryClient),
    OracleStaking(OracleStakingClient),
    TokenStaking(TokenStakingClient),
}

impl PluginVariant {
    pub fn kind(&self) -> PluginKind {
        match self {
            Self::None => PluginKind::None,
            Self::LockRegistry(_) => PluginKind::LockRegistry,
            Self::CollectionRegistry(_) => PluginKind::CollectionRegistry,
            Self::OracleStaking(_) => PluginKind::OracleStaking,
            Self::TokenStaking(_) => PluginKind::TokenStaking,
        }
    }

    /// Program id of the plugin, `None` for plain token voting
    pub fn program_id(&self) -> Option<Pubkey> {
        match self {
            Self::None => None,
            Self::LockRegistry(client) => Some(client.program_id),
            Self::CollectionRegistry(client) => Some(client.program_id),
            Self::OracleStaking(client) => Some(client.program_id),
            Self::TokenStaking(client) => Some(client.program_id),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }
}
