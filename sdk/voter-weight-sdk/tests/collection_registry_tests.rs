mod common;

use common::*;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use voter_weight_sdk::core::constants::{COLLECTION_REGISTRY_PROGRAM_IDS, TOKEN_PROGRAM_ID};
use voter_weight_sdk::core::pda::{
    derive_nft_max_voter_weight_record, derive_nft_registrar, derive_nft_vote_record,
};
use voter_weight_sdk::discovery::discover_holdings;
use voter_weight_sdk::plugins::CollectionRegistryClient;
use voter_weight_sdk::session::NFT_FETCH_FAILED;
use voter_weight_sdk::{
    NftHolding, PluginVariant, Severity, VoterWeightAction, VotingClientSession,
};
use voter_weight_state::metadata::Collection;
use voter_weight_state::{CollectionConfig, MaxVoterWeightRecord, NftVoteRecord, Registrar};

const CAST_FIXED_ACCOUNTS: usize = 5;
const RELINQUISH_FIXED_ACCOUNTS: usize = 7;
const COLLECTION_WEIGHT: u64 = 3;

struct Fixture {
    connection: MockConnection,
    notifier: Arc<RecordingNotifier>,
    dao: Dao,
    program_id: Pubkey,
    collection: Pubkey,
}

impl Fixture {
    fn new() -> Self {
        init_logger();
        let fixture = Self {
            connection: MockConnection::new(),
            notifier: Arc::new(RecordingNotifier::default()),
            dao: Dao::new(),
            program_id: COLLECTION_REGISTRY_PROGRAM_IDS[0],
            collection: Pubkey::new_unique(),
        };
        fixture.set_collections(&[fixture.collection]);
        fixture
    }

    fn set_collections(&self, collections: &[Pubkey]) {
        let registrar = Registrar {
            governance_program_id: self.dao.realm.governance_program_id,
            realm: self.dao.realm.address,
            governing_token_mint: self.dao.realm.community_mint,
            collection_configs: collections
                .iter()
                .map(|collection| CollectionConfig {
                    collection: *collection,
                    size: 100,
                    weight: COLLECTION_WEIGHT,
                    reserved: [0; 8],
                })
                .collect(),
        };
        self.connection
            .set_account(self.registrar_address(), self.program_id, anchor_data(&registrar));
    }

    fn registrar_address(&self) -> Pubkey {
        derive_nft_registrar(
            &self.program_id,
            &self.dao.realm.address,
            &self.dao.realm.community_mint,
        )
        .unwrap()
    }

    fn set_max_voter_weight(&self, max_voter_weight: u64) {
        let address = derive_nft_max_voter_weight_record(
            &self.program_id,
            &self.dao.realm.address,
            &self.dao.realm.community_mint,
        )
        .unwrap();
        let record = MaxVoterWeightRecord {
            realm: self.dao.realm.address,
            governing_token_mint: self.dao.realm.community_mint,
            max_voter_weight,
            max_voter_weight_expiry: None,
        };
        self.connection
            .set_account(address, self.program_id, anchor_data(&record));
    }

    fn add_nfts(&self, count: usize) -> Vec<NftHolding> {
        (0..count)
            .map(|_| add_nft(&self.connection, &self.dao.wallet, verified(self.collection)))
            .collect()
    }

    fn add_vote_record(&self, proposal: &Pubkey, mint: &Pubkey, owner: &Pubkey) -> Pubkey {
        let address = derive_nft_vote_record(&self.program_id, proposal, mint).unwrap();
        let record = NftVoteRecord {
            proposal: *proposal,
            nft_mint: *mint,
            governing_token_owner: *owner,
        };
        self.connection
            .set_account(address, self.program_id, anchor_data(&record));
        address
    }

    async fn session(&self) -> VotingClientSession {
        let mut session = VotingClientSession::new(
            PluginVariant::CollectionRegistry(CollectionRegistryClient::new(self.program_id)),
            Some(self.dao.realm.clone()),
            Some(self.dao.wallet),
            self.notifier.clone(),
        );
        session.discover(&self.connection).await;
        session
    }
}

fn remaining(ix: &Instruction, fixed: usize) -> Vec<Pubkey> {
    ix.accounts[fixed..].iter().map(|meta| meta.pubkey).collect()
}

//=============================================================================
// Cast vote
//=============================================================================

#[tokio::test]
async fn test_cast_vote_without_nfts_emits_single_empty_instruction() {
    let fixture = Fixture::new();
    let mut session = fixture.session().await;
    let proposal = fixture.dao.proposal();
    let mut instructions = Vec::new();

    let addresses = session
        .cast_vote(
            &fixture.connection,
            &mut instructions,
            &proposal,
            &fixture.dao.token_owner_record(),
        )
        .await
        .expect("cast vote addresses");

    assert_eq!(instructions.len(), 1);
    assert_eq!(instructions[0].accounts.len(), CAST_FIXED_ACCOUNTS);
    assert_eq!(instructions[0].accounts[1].pubkey, addresses.voter_weight_address);
    assert!(addresses.max_voter_weight_address.is_some());
}

#[tokio::test]
async fn test_cast_vote_five_nfts_fit_one_instruction() {
    let fixture = Fixture::new();
    let nfts = fixture.add_nfts(5);
    let mut session = fixture.session().await;
    let mut instructions = Vec::new();

    session
        .cast_vote(
            &fixture.connection,
            &mut instructions,
            &fixture.dao.proposal(),
            &fixture.dao.token_owner_record(),
        )
        .await
        .unwrap();

    assert_eq!(instructions.len(), 1);
    let accounts = remaining(&instructions[0], CAST_FIXED_ACCOUNTS);
    assert_eq!(accounts.len(), 15);
    assert_eq!(accounts[0], nfts[0].token_account);
    assert_eq!(accounts[1], nfts[0].metadata_address);
    assert!(instructions[0].accounts[CAST_FIXED_ACCOUNTS + 2].is_writable);
}

#[tokio::test]
async fn test_cast_vote_overflow_precedes_primary() {
    let fixture = Fixture::new();
    let nfts = fixture.add_nfts(6);
    let mut session = fixture.session().await;
    let proposal = fixture.dao.proposal();
    let mut instructions = Vec::new();

    session
        .cast_vote(
            &fixture.connection,
            &mut instructions,
            &proposal,
            &fixture.dao.token_owner_record(),
        )
        .await
        .unwrap();

    assert_eq!(instructions.len(), 2);

    let overflow = remaining(&instructions[0], CAST_FIXED_ACCOUNTS);
    assert_eq!(
        overflow,
        vec![
            nfts[5].token_account,
            nfts[5].metadata_address,
            derive_nft_vote_record(&fixture.program_id, &proposal.address, &nfts[5].mint).unwrap(),
        ]
    );

    let primary = remaining(&instructions[1], CAST_FIXED_ACCOUNTS);
    assert_eq!(primary.len(), 15);
    assert_eq!(primary[0], nfts[0].token_account);
}

#[tokio::test]
async fn test_cast_vote_fourteen_nfts_keeps_overflow_order() {
    let fixture = Fixture::new();
    let nfts = fixture.add_nfts(14);
    let mut session = fixture.session().await;
    let proposal = fixture.dao.proposal();
    let mut instructions = Vec::new();

    session
        .cast_vote(
            &fixture.connection,
            &mut instructions,
            &proposal,
            &fixture.dao.token_owner_record(),
        )
        .await
        .unwrap();

    let cast_accounts = |batch: &[NftHolding]| -> Vec<Pubkey> {
        batch
            .iter()
            .flat_map(|nft| {
                [
                    nft.token_account,
                    nft.metadata_address,
                    derive_nft_vote_record(&fixture.program_id, &proposal.address, &nft.mint)
                        .unwrap(),
                ]
            })
            .collect()
    };

    assert_eq!(instructions.len(), 4);
    assert_eq!(remaining(&instructions[0], CAST_FIXED_ACCOUNTS), cast_accounts(&nfts[5..9]));
    assert_eq!(remaining(&instructions[1], CAST_FIXED_ACCOUNTS), cast_accounts(&nfts[9..13]));
    assert_eq!(remaining(&instructions[2], CAST_FIXED_ACCOUNTS), cast_accounts(&nfts[13..]));
    assert_eq!(remaining(&instructions[3], CAST_FIXED_ACCOUNTS), cast_accounts(&nfts[..5]));
}

#[tokio::test]
async fn test_cast_vote_skips_recorded_nfts() {
    let fixture = Fixture::new();
    let nfts = fixture.add_nfts(2);
    let proposal = fixture.dao.proposal();
    fixture.add_vote_record(&proposal.address, &nfts[0].mint, &fixture.dao.wallet);
    let mut session = fixture.session().await;
    let mut instructions = Vec::new();

    session
        .cast_vote(
            &fixture.connection,
            &mut instructions,
            &proposal,
            &fixture.dao.token_owner_record(),
        )
        .await
        .unwrap();

    assert_eq!(instructions.len(), 1);
    let accounts = remaining(&instructions[0], CAST_FIXED_ACCOUNTS);
    assert_eq!(accounts.len(), 3);
    assert_eq!(accounts[0], nfts[1].token_account);
}

#[tokio::test]
async fn test_mint_mismatch_leaves_instructions_untouched() {
    let fixture = Fixture::new();
    fixture.add_nfts(2);
    let mut session = fixture.session().await;

    let mut proposal = fixture.dao.proposal();
    proposal.governing_token_mint = Pubkey::new_unique();
    let mut record = fixture.dao.token_owner_record();
    record.governing_token_mint = proposal.governing_token_mint;

    let existing = Instruction::new_with_bytes(Pubkey::new_unique(), &[1], vec![]);
    let mut instructions = vec![existing.clone()];

    assert!(session
        .cast_vote(&fixture.connection, &mut instructions, &proposal, &record)
        .await
        .is_none());
    assert!(session
        .refresh_weight(
            &fixture.connection,
            &mut instructions,
            &record,
            VoterWeightAction::CreateProposal,
            None,
        )
        .await
        .is_none());
    assert!(session
        .relinquish_vote(&fixture.connection, &mut instructions, &proposal, &Pubkey::new_unique())
        .await
        .is_none());

    assert_eq!(instructions, vec![existing]);
    assert!(fixture.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_cast_vote_failure_adds_nothing() {
    let fixture = Fixture::new();
    fixture.add_nfts(6);
    let mut session = fixture.session().await;
    fixture.connection.fail_program(fixture.program_id);
    let mut instructions = Vec::new();

    let result = session
        .cast_vote(
            &fixture.connection,
            &mut instructions,
            &fixture.dao.proposal(),
            &fixture.dao.token_owner_record(),
        )
        .await;

    assert!(result.is_none());
    assert!(instructions.is_empty());
    let messages = fixture.notifier.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].1, Severity::Error);
}

//=============================================================================
// Refresh weight
//=============================================================================

#[tokio::test]
async fn test_refresh_weight_passes_first_five_pairs() {
    let fixture = Fixture::new();
    let nfts = fixture.add_nfts(6);
    let mut session = fixture.session().await;
    let mut instructions = Vec::new();

    session
        .refresh_weight(
            &fixture.connection,
            &mut instructions,
            &fixture.dao.token_owner_record(),
            VoterWeightAction::CreateProposal,
            None,
        )
        .await
        .unwrap();

    assert_eq!(instructions.len(), 1);
    let accounts = remaining(&instructions[0], 2);
    assert_eq!(accounts.len(), 10);
    assert_eq!(accounts[8], nfts[4].token_account);
    assert_eq!(accounts[9], nfts[4].metadata_address);
    assert_eq!(instructions[0].data[8], VoterWeightAction::CreateProposal as u8);
}

//=============================================================================
// Relinquish vote
//=============================================================================

#[tokio::test]
async fn test_relinquish_thirteen_records_in_two_instructions() {
    let fixture = Fixture::new();
    let proposal = fixture.dao.proposal();
    let records: Vec<Pubkey> = (0..13)
        .map(|_| {
            fixture.add_vote_record(&proposal.address, &Pubkey::new_unique(), &fixture.dao.wallet)
        })
        .collect();
    fixture.add_vote_record(&proposal.address, &Pubkey::new_unique(), &Pubkey::new_unique());
    fixture.add_vote_record(&Pubkey::new_unique(), &Pubkey::new_unique(), &fixture.dao.wallet);

    let mut session = fixture.session().await;
    let vote_record = Pubkey::new_unique();
    let mut instructions = Vec::new();

    session
        .relinquish_vote(&fixture.connection, &mut instructions, &proposal, &vote_record)
        .await
        .unwrap();

    assert_eq!(instructions.len(), 2);
    assert_eq!(remaining(&instructions[0], RELINQUISH_FIXED_ACCOUNTS), records[..5].to_vec());
    assert_eq!(remaining(&instructions[1], RELINQUISH_FIXED_ACCOUNTS), records[5..].to_vec());

    for ix in &instructions {
        assert_eq!(ix.accounts[2].pubkey, proposal.governance);
        assert_eq!(ix.accounts[3].pubkey, proposal.address);
        assert_eq!(ix.accounts[4].pubkey, fixture.dao.wallet);
        assert_eq!(ix.accounts[5].pubkey, vote_record);
        assert_eq!(ix.accounts[6].pubkey, fixture.dao.wallet);
        assert!(ix.accounts[RELINQUISH_FIXED_ACCOUNTS..].iter().all(|meta| meta.is_writable));
    }
}

//=============================================================================
// Holdings discovery
//=============================================================================

#[tokio::test]
async fn test_no_collections_skips_enumeration() {
    init_logger();
    let connection = MockConnection::new();
    let wallet = Pubkey::new_unique();
    add_nft(&connection, &wallet, verified(Pubkey::new_unique()));

    let holdings = discover_holdings(&connection, &wallet, &[]).await.unwrap();

    assert!(holdings.is_empty());
    assert!(connection.program_account_calls().is_empty());
}

#[tokio::test]
async fn test_only_verified_members_qualify() {
    init_logger();
    let connection = MockConnection::new();
    let wallet = Pubkey::new_unique();
    let collection = Pubkey::new_unique();

    let member = add_nft(&connection, &wallet, verified(collection));
    add_nft(
        &connection,
        &wallet,
        Some(Collection {
            verified: false,
            key: collection,
        }),
    );
    add_nft(&connection, &wallet, verified(Pubkey::new_unique()));
    add_nft(&connection, &wallet, None);
    add_nft(&connection, &Pubkey::new_unique(), verified(collection));

    let fungible = add_nft(&connection, &wallet, verified(collection));
    connection.set_account(fungible.mint, TOKEN_PROGRAM_ID, mint_data(6));

    let holdings = discover_holdings(&connection, &wallet, &[collection]).await.unwrap();

    assert_eq!(holdings, vec![member]);
}

#[tokio::test]
async fn test_unreadable_nft_is_dropped() {
    init_logger();
    let connection = MockConnection::new();
    let wallet = Pubkey::new_unique();
    let collection = Pubkey::new_unique();

    let first = add_nft(&connection, &wallet, verified(collection));
    let broken = add_nft(&connection, &wallet, verified(collection));
    let last = add_nft(&connection, &wallet, verified(collection));
    connection.fail_account(broken.metadata_address);

    let holdings = discover_holdings(&connection, &wallet, &[collection]).await.unwrap();

    assert_eq!(holdings, vec![first, last]);
}

#[tokio::test]
async fn test_failed_enumeration_keeps_cached_holdings() {
    let fixture = Fixture::new();
    let nfts = fixture.add_nfts(2);
    let mut session = fixture.session().await;
    assert_eq!(session.owned_nfts(), nfts.as_slice());

    fixture.connection.fail_program(TOKEN_PROGRAM_ID);
    session.discover(&fixture.connection).await;

    assert_eq!(session.owned_nfts(), nfts.as_slice());
    assert_eq!(
        fixture.notifier.messages(),
        vec![(NFT_FETCH_FAILED.to_string(), Severity::Error)]
    );
}

#[tokio::test]
async fn test_voting_power_and_max_voter_weight() {
    let fixture = Fixture::new();
    fixture.add_nfts(4);
    fixture.set_max_voter_weight(300);

    let session = fixture.session().await;

    assert_eq!(session.voting_power(), 4 * COLLECTION_WEIGHT);
    assert_eq!(session.max_voter_weight(), Some(300));
    assert_eq!(session.collections(), vec![fixture.collection]);
}

#[tokio::test]
async fn test_missing_max_voter_weight_is_none() {
    let fixture = Fixture::new();
    let session = fixture.session().await;

    assert_eq!(session.max_voter_weight(), None);
    assert!(fixture.notifier.messages().is_empty());
}

//=============================================================================
// Registrar reload
//=============================================================================

#[tokio::test]
async fn test_registrar_fetch_failure_keeps_holdings() {
    let fixture = Fixture::new();
    let nfts = fixture.add_nfts(3);
    fixture.set_max_voter_weight(300);
    let mut session = fixture.session().await;
    assert_eq!(session.voting_power(), 3 * COLLECTION_WEIGHT);

    fixture.connection.fail_account(fixture.registrar_address());

    assert!(!session.sync_collections(&fixture.connection).await);
    assert_eq!(session.owned_nfts(), nfts.as_slice());
    assert_eq!(session.collections(), vec![fixture.collection]);
    assert_eq!(session.voting_power(), 3 * COLLECTION_WEIGHT);
    assert_eq!(session.max_voter_weight(), Some(300));
    assert_eq!(
        fixture.notifier.messages(),
        vec![(NFT_FETCH_FAILED.to_string(), Severity::Error)]
    );

    fixture.connection.heal();
    assert!(!session.sync_collections(&fixture.connection).await);
    assert_eq!(session.owned_nfts(), nfts.as_slice());
    assert_eq!(fixture.notifier.messages().len(), 1);
}

#[tokio::test]
async fn test_registrar_fetch_failure_on_discover_keeps_holdings() {
    let fixture = Fixture::new();
    let nfts = fixture.add_nfts(2);
    let mut session = fixture.session().await;

    fixture.connection.fail_account(fixture.registrar_address());
    session.discover(&fixture.connection).await;

    assert_eq!(session.owned_nfts(), nfts.as_slice());
    assert_eq!(
        fixture.notifier.messages(),
        vec![(NFT_FETCH_FAILED.to_string(), Severity::Error)]
    );
}

#[tokio::test]
async fn test_removed_registrar_clears_holdings() {
    let fixture = Fixture::new();
    fixture.add_nfts(2);
    fixture.set_max_voter_weight(300);
    let mut session = fixture.session().await;

    fixture.connection.remove_account(&fixture.registrar_address());

    assert!(session.sync_collections(&fixture.connection).await);
    assert!(session.collections().is_empty());
    assert!(session.owned_nfts().is_empty());
    assert_eq!(session.voting_power(), 0);
    assert_eq!(session.max_voter_weight(), None);
    assert!(fixture.notifier.messages().is_empty());
}
