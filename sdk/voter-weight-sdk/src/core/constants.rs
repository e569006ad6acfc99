use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

//=============================================================================
// Known voter weight plugin programs
//=============================================================================

/// Token-lock registry programs
pub const LOCK_REGISTRY_PROGRAM_IDS: &[Pubkey] =
    &[pubkey!("4Q6WW2ouZ6V3iaNm56MTd5n2tnTm4C5fiH8miFHnAFHo")];

/// NFT collection-gated registry programs
pub const COLLECTION_REGISTRY_PROGRAM_IDS: &[Pubkey] =
    &[pubkey!("GnftV5kLjd67tvHpNGyodwWveEKivz3ZWvvE3Z4xi2iw")];

/// Oracle-node staking addin programs
pub const ORACLE_STAKING_PROGRAM_IDS: &[Pubkey] =
    &[pubkey!("HFdD2QauAai5W6n36xkt9MUcsNRn1L2WYEMvi5WbnyVJ")];

/// Token staking programs
pub const TOKEN_STAKING_PROGRAM_IDS: &[Pubkey] =
    &[pubkey!("pytS9TjG1qyAZypk7n8rw8gfW9sUaqqYyMhJQ4E7JCQ")];

//=============================================================================
// Collaborating programs
//=============================================================================

/// Oracle network program owning oracle and queue accounts
pub const ORACLE_PROGRAM_ID: Pubkey = pubkey!("SW1TCH7qEPTdLsDHRgPuMQjbQxKdH2aBStViMFnt64f");

pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

pub const TOKEN_METADATA_PROGRAM_ID: Pubkey =
    pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

pub const NATIVE_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

//=============================================================================
// Seeds
//=============================================================================

pub const REGISTRAR_SEED: &[u8] = b"registrar";
pub const VOTER_SEED: &[u8] = b"voter";
pub const VOTER_WEIGHT_RECORD_SEED: &[u8] = b"voter-weight-record";
pub const MAX_VOTER_WEIGHT_RECORD_SEED: &[u8] = b"max-voter-weight-record";
pub const NFT_VOTE_RECORD_SEED: &[u8] = b"nft-vote-record";
pub const ORACLE_VOTER_WEIGHT_RECORD_SEED: &[u8] = b"VoterWeightRecord";
pub const ORACLE_ACCOUNT_SEED: &[u8] = b"OracleAccountData";
pub const ORACLE_PERMISSION_SEED: &[u8] = b"PermissionAccountData";
pub const ADDIN_STATE_SEED: &[u8] = b"state";
pub const STAKING_CONFIG_SEED: &[u8] = b"config";
pub const STAKE_METADATA_SEED: &[u8] = b"stake_metadata";
pub const STAKE_CUSTODY_SEED: &[u8] = b"custody";
pub const STAKING_VOTER_WEIGHT_SEED: &[u8] = b"voter_weight";

//=============================================================================
// Remaining account ceilings
//=============================================================================

/// Token account and metadata per NFT when refreshing weight
pub const ACCOUNTS_PER_NFT_WEIGHT: usize = 2;
/// The registry reads at most this many remaining accounts per refresh
pub const UPDATE_WEIGHT_MAX_ACCOUNTS: usize = 10;

/// Token account, metadata and vote record per NFT when casting
pub const ACCOUNTS_PER_NFT_VOTE: usize = 3;
/// Remaining accounts in the canonical cast instruction (5 NFTs)
pub const CAST_PRIMARY_MAX_ACCOUNTS: usize = 15;
/// Remaining accounts in each overflow cast instruction (4 NFTs)
pub const CAST_OVERFLOW_MAX_ACCOUNTS: usize = 12;

/// Vote records in the first relinquish instruction
pub const RELINQUISH_PRIMARY_MAX_ACCOUNTS: usize = 5;
/// Vote records in each further relinquish instruction
pub const RELINQUISH_OVERFLOW_MAX_ACCOUNTS: usize = 12;
