pub mod advanced;
pub mod core;
pub mod discovery;
pub mod error;
pub mod plugins;
pub mod selector;
pub mod session;
pub mod types;
pub mod utils;

pub use crate::core::connection::{AccountFilter, RpcConnection, SolConnection};
pub use crate::core::notify::{LogNotifier, Notifier, Severity};
pub use crate::error::{Result, VoterWeightSdkError};
pub use crate::plugins::{PluginKind, PluginVariant, VoterContext};
pub use crate::selector::{
    rebuild_session, select_plugin, PluginRegistry, PluginSelector, SessionInputs,
};
pub use crate::session::{SessionIdentity, VotingClientSession};
pub use crate::types::{
    NftHolding, OracleDiscovery, OracleGrant, ProgramAddresses, Proposal, Realm, RealmConfig,
    TokenOwnerRecord, VoterWeightAction,
};

pub mod state {
    pub use voter_weight_state::{
        Collection, CollectionConfig, MaxVoterWeightRecord, Metadata, NftVoteRecord, Registrar,
        VoterWeightRecord,
    };
}
