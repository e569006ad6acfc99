//! Anchor discriminators.
//!
//! Anchor programs prefix every account with `sha256("account:<Name>")[..8]`
//! and every instruction with `sha256("global:<name>")[..8]`.

use crate::error::StateError;
use borsh::BorshDeserialize;
use sha2::{Digest, Sha256};

pub const DISCRIMINATOR_LEN: usize = 8;

pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    hashed("account", name)
}

pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    hashed("global", name)
}

fn hashed(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(format!("{}:{}", namespace, name).as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

/// An account owned by an anchor program, stored as `[discriminator][borsh body]`.
///
/// Only the leading fields the client reads are declared on each layout;
/// trailing bytes are ignored when decoding.
pub trait AnchorAccount: BorshDeserialize {
    /// Account struct name as declared in the owning program
    const NAME: &'static str;

    fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
        account_discriminator(Self::NAME)
    }

    /// Decode after checking the discriminator
    fn from_account_data(data: &[u8]) -> Result<Self, StateError> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(StateError::AccountDataTooSmall {
                expected: DISCRIMINATOR_LEN,
                actual: data.len(),
            });
        }
        if data[..DISCRIMINATOR_LEN] != Self::discriminator() {
            return Err(StateError::DiscriminatorMismatch(Self::NAME));
        }
        Self::from_account_data_unchecked(data)
    }

    /// Decode without checking the discriminator
    fn from_account_data_unchecked(data: &[u8]) -> Result<Self, StateError> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(StateError::AccountDataTooSmall {
                expected: DISCRIMINATOR_LEN,
                actual: data.len(),
            });
        }
        let mut body = &data[DISCRIMINATOR_LEN..];
        Ok(Self::deserialize(&mut body)?)
    }
}
