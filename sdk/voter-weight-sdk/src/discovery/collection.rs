//! NFT holdings that count toward a collection registry.

use crate::core::connection::{AccountFilter, SolConnection};
use crate::core::constants::TOKEN_PROGRAM_ID;
use crate::core::pda::derive_metadata_address;
use crate::error::{Result, VoterWeightSdkError};
use crate::types::NftHolding;
use crate::utils::{fetch_account_data, fetch_program_accounts};
use futures::future::join_all;
use log::{debug, trace};
use solana_sdk::pubkey::Pubkey;
use voter_weight_state::token::{
    parse_mint_decimals, parse_token_account, TOKEN_ACCOUNT_LEN, TOKEN_ACCOUNT_OWNER_OFFSET,
};
use voter_weight_state::Metadata;

/// Verified NFTs of `collections` held by `wallet`, in enumeration order.
///
/// Holdings whose mint or metadata cannot be read are dropped. Only the
/// token account enumeration itself fails the call.
pub async fn discover_holdings(
    connection: &impl SolConnection,
    wallet: &Pubkey,
    collections: &[Pubkey],
) -> Result<Vec<NftHolding>> {
    if collections.is_empty() {
        return Ok(Vec::new());
    }

    let filters = [
        AccountFilter::DataSize(TOKEN_ACCOUNT_LEN as u64),
        AccountFilter::memcmp_pubkey(TOKEN_ACCOUNT_OWNER_OFFSET, wallet),
    ];
    let token_accounts = fetch_program_accounts(connection, &TOKEN_PROGRAM_ID, &filters).await?;

    let candidates: Vec<(Pubkey, Pubkey)> = token_accounts
        .into_iter()
        .filter_map(|(address, account)| match parse_token_account(&account.data) {
            Ok(token) if token.amount == 1 => Some((address, token.mint)),
            Ok(_) => None,
            Err(e) => {
                trace!("Skipping token account {}: {}", address, e);
                None
            },
        })
        .collect();
    debug!("Wallet {} holds {} single-unit tokens", wallet, candidates.len());

    let lookups = candidates
        .iter()
        .map(|(token_account, mint)| load_holding(connection, *token_account, *mint));

    let holdings = join_all(lookups)
        .await
        .into_iter()
        .zip(&candidates)
        .filter_map(|(result, (token_account, _))| match result {
            Ok(holding) => Some(holding),
            Err(e) => {
                trace!("Dropping token account {}: {}", token_account, e);
                None
            },
        })
        .filter(|holding| holding.qualifies(collections))
        .collect();

    Ok(holdings)
}

async fn load_holding(
    connection: &impl SolConnection,
    token_account: Pubkey,
    mint: Pubkey,
) -> Result<NftHolding> {
    let decimals = parse_mint_decimals(&fetch_account_data(connection, &mint).await?)?;
    if decimals != 0 {
        return Err(VoterWeightSdkError::InvalidAccountData(format!(
            "Mint {} has {} decimals",
            mint, decimals
        )));
    }

    let metadata_address = derive_metadata_address(&mint)?;
    let metadata = Metadata::from_account_data(&fetch_account_data(connection, &metadata_address).await?)?;

    Ok(NftHolding {
        mint,
        token_account,
        metadata_address,
        collection: metadata.collection,
    })
}
