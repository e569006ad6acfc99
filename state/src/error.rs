use thiserror::Error;

/// Errors raised while decoding external program accounts.
#[derive(Debug, Error)]
pub enum StateError {
    /// Account data is shorter than the layout requires
    #[error("Account data too small: expected at least {expected} bytes, got {actual}")]
    AccountDataTooSmall { expected: usize, actual: usize },

    /// Anchor discriminator does not match the expected account type
    #[error("Discriminator mismatch for {0}")]
    DiscriminatorMismatch(&'static str),

    /// Account type tag is not one of the governance account types
    #[error("Account type {0} is not a governance account")]
    NotGovernanceAccount(u8),

    /// Borsh deserialization failure
    #[error("Deserialization error: {0}")]
    Deserialize(#[from] std::io::Error),
}
