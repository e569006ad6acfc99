//! Voter Weight State
//!
//! Account layouts of the external programs consulted when computing a
//! wallet's voting power. Each layout declares only the fields the client
//! reads.

pub mod addin;
pub mod discriminator;
pub mod error;
pub mod governance;
pub mod metadata;
pub mod nft_voter;
pub mod staking;
pub mod switchboard;
pub mod token;

pub use addin::{MaxVoterWeightRecord, VoterWeightAction, VoterWeightRecord};
pub use discriminator::{
    account_discriminator, instruction_discriminator, AnchorAccount, DISCRIMINATOR_LEN,
};
pub use error::StateError;
pub use governance::{parse_governance_header, GovernanceHeader};
pub use metadata::{Collection, Metadata};
pub use nft_voter::{CollectionConfig, NftVoteRecord, Registrar};
pub use staking::PositionData;
pub use switchboard::{AddinState, OracleAccountData, OracleQueueAccountData};
pub use token::TokenAccountInfo;
