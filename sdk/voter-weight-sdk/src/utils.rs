use crate::core::connection::{AccountFilter, SolConnection};
use crate::error::{Result, VoterWeightSdkError};
use solana_sdk::account::Account;
use solana_sdk::pubkey::Pubkey;
use voter_weight_state::AnchorAccount;

//=============================================================================
// Account Fetching
//=============================================================================

/// Fetch account data, failing when the account does not exist
pub async fn fetch_account_data(connection: &impl SolConnection, address: &Pubkey) -> Result<Vec<u8>> {
    fetch_optional_account_data(connection, address)
        .await?
        .ok_or(VoterWeightSdkError::AccountNotFound(*address))
}

/// Fetch account data, `None` when the account does not exist
pub async fn fetch_optional_account_data(
    connection: &impl SolConnection,
    address: &Pubkey,
) -> Result<Option<Vec<u8>>> {
    let account = connection
        .get_account(address)
        .await
        .map_err(|e| VoterWeightSdkError::Connection(e.to_string()))?;
    Ok(account.map(|account| account.data))
}

/// Enumerate a program's accounts matching every filter
pub async fn fetch_program_accounts(
    connection: &impl SolConnection,
    program_id: &Pubkey,
    filters: &[AccountFilter],
) -> Result<Vec<(Pubkey, Account)>> {
    connection
        .get_program_accounts(program_id, filters)
        .await
        .map_err(|e| VoterWeightSdkError::Connection(e.to_string()))
}

/// Fetch and decode an anchor account, checking its discriminator
pub async fn fetch_anchor_account<T: AnchorAccount>(
    connection: &impl SolConnection,
    address: &Pubkey,
) -> Result<T> {
    let data = fetch_account_data(connection, address).await?;
    Ok(T::from_account_data(&data)?)
}

/// Enumerate and decode every account of type `T` owned by `program_id`.
///
/// Accounts failing to decode are dropped.
pub async fn fetch_anchor_accounts<T: AnchorAccount>(
    connection: &impl SolConnection,
    program_id: &Pubkey,
    extra_filters: &[AccountFilter],
) -> Result<Vec<(Pubkey, T)>> {
    let mut filters = vec![AccountFilter::memcmp(0, &T::discriminator())];
    filters.extend_from_slice(extra_filters);

    let accounts = fetch_program_accounts(connection, program_id, &filters).await?;
    Ok(accounts
        .into_iter()
        .filter_map(|(address, account)| match T::from_account_data(&account.data) {
            Ok(decoded) => Some((address, decoded)),
            Err(e) => {
                log::trace!("Skipping undecodable {} {}: {}", T::NAME, address, e);
                None
            },
        })
        .collect())
}
