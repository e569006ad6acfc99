//! Voter weight addin interface
//!
//! Layouts shared by every addin program the governance program consults
//! for voting power. The first 8 bytes are the owning program's account
//! discriminator and are not interpreted here.

use crate::discriminator::AnchorAccount;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{clock::Slot, pubkey::Pubkey};

/// The governance action a voter weight is evaluated for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
pub enum VoterWeightAction {
    /// Cast vote for a proposal. Target: Proposal
    CastVote,

    /// Comment a proposal. Target: Proposal
    CommentProposal,

    /// Create Governance within a realm. Target: Realm
    CreateGovernance,

    /// Create a proposal for a governance. Target: Governance
    CreateProposal,

    /// Signs off a draft proposal. Target: Proposal
    SignOffProposal,
}

/// VoterWeightRecord account
/// Reports a wallet's voting power for a realm to the governance program
#[derive(Clone, Debug, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct VoterWeightRecord {
    /// The Realm the VoterWeightRecord belongs to
    pub realm: Pubkey,

    /// Governing Token Mint the VoterWeightRecord is associated with
    pub governing_token_mint: Pubkey,

    /// The owner of the governing token and voter
    pub governing_token_owner: Pubkey,

    /// Voter's weight
    pub voter_weight: u64,

    /// The slot when the voting weight expires
    pub voter_weight_expiry: Option<Slot>,

    /// The governance action the voter's weight pertains to
    pub weight_action: Option<VoterWeightAction>,

    /// The target the voter's weight action pertains to
    pub weight_action_target: Option<Pubkey>,
}

impl AnchorAccount for VoterWeightRecord {
    const NAME: &'static str = "VoterWeightRecord";
}

/// MaxVoterWeightRecord account
/// Reports the total possible voting power, used to normalise quorum
#[derive(Clone, Debug, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct MaxVoterWeightRecord {
    /// The Realm the MaxVoterWeightRecord belongs to
    pub realm: Pubkey,

    /// Governing Token Mint the MaxVoterWeightRecord is associated with
    pub governing_token_mint: Pubkey,

    /// Max voter weight
    pub max_voter_weight: u64,

    /// The slot when the max voting weight expires
    pub max_voter_weight_expiry: Option<Slot>,
}

impl AnchorAccount for MaxVoterWeightRecord {
    const NAME: &'static str = "MaxVoterWeightRecord";
}
