// Example: Preparing a vote through the realm's voter weight plugin
//
// This example demonstrates how to:
// 1. Load the plugin registry
// 2. Select the plugin for a realm and run discovery
// 3. Prepend the plugin instructions to a cast vote

use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use voter_weight_sdk::{
    LogNotifier, PluginRegistry, PluginSelector, Proposal, Realm, RealmConfig, RpcConnection,
    TokenOwnerRecord,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // 1. Registry of known plugin programs (mainnet defaults)
    let registry = match std::env::var("PLUGIN_REGISTRY") {
        Ok(path) => PluginRegistry::from_json_file(path)?,
        Err(_) => PluginRegistry::default(),
    };

    let connection = RpcConnection::new("https://api.mainnet-beta.solana.com");

    // Replace with the realm, its config and the connected wallet
    let realm = Realm {
        address: Pubkey::new_unique(),
        governance_program_id: Pubkey::new_unique(),
        community_mint: Pubkey::new_unique(),
    };
    let config = RealmConfig {
        community_voter_weight_addin: registry.collection_registry.first().copied(),
        max_community_voter_weight_addin: None,
    };
    let wallet = Pubkey::new_unique();

    // 2. Select the plugin and discover the wallet's voting assets
    let mut selector = PluginSelector::new(registry, Arc::new(LogNotifier));
    let session = selector
        .sync(&connection, Some(realm.clone()), &config, Some(wallet))
        .await;
    println!("Plugin: {:?}", session.kind());
    println!("Voting power: {}", session.voting_power());

    // 3. Plugin instructions for a vote
    let proposal = Proposal {
        address: Pubkey::new_unique(),
        governance: Pubkey::new_unique(),
        governing_token_mint: realm.community_mint,
    };
    let token_owner_record = TokenOwnerRecord {
        address: Pubkey::new_unique(),
        governing_token_mint: realm.community_mint,
        governing_token_owner: wallet,
    };

    let mut instructions = Vec::new();
    match session
        .cast_vote(&connection, &mut instructions, &proposal, &token_owner_record)
        .await
    {
        Some(addresses) => {
            println!("Voter weight record: {}", addresses.voter_weight_address);
            println!("{} plugin instructions precede the vote", instructions.len());
        },
        None => println!("No plugin instructions needed"),
    }

    Ok(())
}
