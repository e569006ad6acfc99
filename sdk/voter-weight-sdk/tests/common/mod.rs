#![allow(dead_code)]

use async_trait::async_trait;
use borsh::BorshSerialize;
use solana_sdk::{account::Account, pubkey::Pubkey};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use voter_weight_sdk::core::connection::{AccountFilter, SolConnection};
use voter_weight_sdk::core::constants::{TOKEN_METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID};
use voter_weight_sdk::core::notify::{Notifier, Severity};
use voter_weight_sdk::core::pda::derive_metadata_address;
use voter_weight_sdk::types::{NftHolding, Proposal, Realm, TokenOwnerRecord};
use voter_weight_state::metadata::{Collection, Metadata, MetadataData};
use voter_weight_state::token::{MINT_DECIMALS_OFFSET, MINT_LEN, TOKEN_ACCOUNT_LEN};
use voter_weight_state::AnchorAccount;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

//=============================================================================
// In-memory connection
//=============================================================================

#[derive(Default)]
struct Ledger {
    accounts: Vec<(Pubkey, Account)>,
    failing_accounts: HashSet<Pubkey>,
    failing_programs: HashSet<Pubkey>,
    program_account_calls: Vec<Pubkey>,
}

/// `SolConnection` over an in-memory account set.
///
/// Program enumeration returns accounts in insertion order.
#[derive(Default, Clone)]
pub struct MockConnection {
    ledger: Arc<Mutex<Ledger>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_account(&self, address: Pubkey, owner: Pubkey, data: Vec<u8>) {
        let account = Account {
            lamports: 1_000_000,
            data,
            owner,
            executable: false,
            rent_epoch: 0,
        };
        let mut ledger = self.ledger.lock().unwrap();
        match ledger.accounts.iter_mut().find(|(key, _)| *key == address) {
            Some((_, existing)) => *existing = account,
            None => ledger.accounts.push((address, account)),
        }
    }

    pub fn remove_account(&self, address: &Pubkey) {
        self.ledger.lock().unwrap().accounts.retain(|(key, _)| key != address);
    }

    /// Make every fetch of `address` fail
    pub fn fail_account(&self, address: Pubkey) {
        self.ledger.lock().unwrap().failing_accounts.insert(address);
    }

    /// Make every enumeration of `program_id` fail
    pub fn fail_program(&self, program_id: Pubkey) {
        self.ledger.lock().unwrap().failing_programs.insert(program_id);
    }

    pub fn heal(&self) {
        let mut ledger = self.ledger.lock().unwrap();
        ledger.failing_accounts.clear();
        ledger.failing_programs.clear();
    }

    pub fn program_account_calls(&self) -> Vec<Pubkey> {
        self.ledger.lock().unwrap().program_account_calls.clone()
    }
}

#[async_trait]
impl SolConnection for MockConnection {
    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn std::error::Error + Send + Sync>> {
        let ledger = self.ledger.lock().unwrap();
        if ledger.failing_accounts.contains(pubkey) {
            return Err(format!("RPC timeout fetching {}", pubkey).into());
        }
        Ok(ledger
            .accounts
            .iter()
            .find(|(key, _)| key == pubkey)
            .map(|(_, account)| account.clone()))
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: &[AccountFilter],
    ) -> Result<Vec<(Pubkey, Account)>, Box<dyn std::error::Error + Send + Sync>> {
        let mut ledger = self.ledger.lock().unwrap();
        ledger.program_account_calls.push(*program_id);
        if ledger.failing_programs.contains(program_id) {
            return Err(format!("RPC timeout enumerating {}", program_id).into());
        }
        Ok(ledger
            .accounts
            .iter()
            .filter(|(_, account)| account.owner == *program_id)
            .filter(|(_, account)| filters.iter().all(|filter| filter.matches(&account.data)))
            .cloned()
            .collect())
    }
}

//=============================================================================
// Notifier
//=============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(String, Severity)> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.messages.lock().unwrap().push((message.to_string(), severity));
    }
}

//=============================================================================
// Account fixtures
//=============================================================================

pub fn anchor_data<T: AnchorAccount + BorshSerialize>(value: &T) -> Vec<u8> {
    let mut data = T::discriminator().to_vec();
    value.serialize(&mut data).unwrap();
    // Layouts only declare leading fields
    data.extend_from_slice(&[0u8; 16]);
    data
}

pub fn token_account_data(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
    let mut data = vec![0u8; TOKEN_ACCOUNT_LEN];
    data[0..32].copy_from_slice(mint.as_ref());
    data[32..64].copy_from_slice(owner.as_ref());
    data[64..72].copy_from_slice(&amount.to_le_bytes());
    data
}

pub fn mint_data(decimals: u8) -> Vec<u8> {
    let mut data = vec![0u8; MINT_LEN];
    data[MINT_DECIMALS_OFFSET] = decimals;
    data
}

pub fn metadata_data(mint: &Pubkey, collection: Option<Collection>) -> Vec<u8> {
    let metadata = Metadata {
        key: 4,
        update_authority: Pubkey::new_unique(),
        mint: *mint,
        data: MetadataData {
            name: "Voter".to_string(),
            symbol: "VOTE".to_string(),
            uri: "https://example.com/voter.json".to_string(),
            seller_fee_basis_points: 0,
            creators: None,
        },
        primary_sale_happened: false,
        is_mutable: true,
        edition_nonce: None,
        token_standard: None,
        collection,
    };
    let mut data = borsh::to_vec(&metadata).unwrap();
    data.extend_from_slice(&[0u8; 64]);
    data
}

pub fn governance_data(account_type: u8, realm: &Pubkey) -> Vec<u8> {
    let mut data = vec![account_type];
    data.extend_from_slice(realm.as_ref());
    data.extend_from_slice(&[0u8; 64]);
    data
}

/// Place an NFT of `collection` in `wallet` and return the holding the
/// discovery is expected to find
pub fn add_nft(
    connection: &MockConnection,
    wallet: &Pubkey,
    collection: Option<Collection>,
) -> NftHolding {
    let mint = Pubkey::new_unique();
    let token_account = Pubkey::new_unique();
    let metadata_address = derive_metadata_address(&mint).unwrap();

    connection.set_account(
        token_account,
        TOKEN_PROGRAM_ID,
        token_account_data(&mint, wallet, 1),
    );
    connection.set_account(mint, TOKEN_PROGRAM_ID, mint_data(0));
    connection.set_account(
        metadata_address,
        TOKEN_METADATA_PROGRAM_ID,
        metadata_data(&mint, collection),
    );

    NftHolding {
        mint,
        token_account,
        metadata_address,
        collection,
    }
}

pub fn verified(key: Pubkey) -> Option<Collection> {
    Some(Collection { verified: true, key })
}

//=============================================================================
// Governance fixtures
//=============================================================================

pub struct Dao {
    pub realm: Realm,
    pub wallet: Pubkey,
}

impl Dao {
    pub fn new() -> Self {
        Self {
            realm: Realm {
                address: Pubkey::new_unique(),
                governance_program_id: Pubkey::new_unique(),
                community_mint: Pubkey::new_unique(),
            },
            wallet: Pubkey::new_unique(),
        }
    }

    pub fn token_owner_record(&self) -> TokenOwnerRecord {
        TokenOwnerRecord {
            address: Pubkey::new_unique(),
            governing_token_mint: self.realm.community_mint,
            governing_token_owner: self.wallet,
        }
    }

    pub fn proposal(&self) -> Proposal {
        Proposal {
            address: Pubkey::new_unique(),
            governance: Pubkey::new_unique(),
            governing_token_mint: self.realm.community_mint,
        }
    }
}
