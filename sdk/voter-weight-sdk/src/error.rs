use solana_sdk::pubkey::Pubkey;
use thiserror::Error;
use voter_weight_state::StateError;

/// SDK-specific error types for voter weight operations
#[derive(Debug, Error)]
pub enum VoterWeightSdkError {
    /// Connection or RPC error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Account not found on-chain
    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    /// Invalid account data or deserialization error
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    /// No bump seed produced an off-curve address
    #[error("Unable to find a viable program address bump seed for program {0}")]
    NoValidBump(Pubkey),

    /// Plugin registry configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Borsh serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] std::io::Error),

    /// External account layout could not be decoded
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, VoterWeightSdkError>;
