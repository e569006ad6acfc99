//! Oracle discovery for the oracle staking addin.
//!
//! An oracle counts for the wallet when the wallet is its authority and the
//! addin's grant authority is a governance account of the realm.

use crate::core::connection::SolConnection;
use crate::error::{Result, VoterWeightSdkError};
use crate::plugins::OracleStakingClient;
use crate::types::{OracleDiscovery, OracleGrant};
use crate::utils::{fetch_anchor_account, fetch_anchor_accounts, fetch_optional_account_data};
use log::{debug, trace, warn};
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use voter_weight_state::{
    parse_governance_header, AddinState, AnchorAccount, OracleAccountData,
    OracleQueueAccountData, VoterWeightRecord,
};

/// Find the oracles the wallet may vote with in `realm`.
///
/// Oracles are checked one at a time in enumeration order. Grant authorities
/// that are not governance accounts are skipped. Enumeration and addin state
/// failures are returned as errors.
pub async fn discover_oracles(
    connection: &impl SolConnection,
    client: &OracleStakingClient,
    realm: &Pubkey,
    wallet: &Pubkey,
) -> Result<OracleDiscovery> {
    let oracles =
        fetch_anchor_accounts::<OracleAccountData>(connection, &client.oracle_program_id, &[]).await?;
    debug!("Checking {} oracles for {}", oracles.len(), wallet);

    let mut addin_state: Option<AddinState> = None;
    let mut queue_authorities: HashMap<Pubkey, Option<Pubkey>> = HashMap::new();
    let mut grant_realms: HashMap<Pubkey, Option<Pubkey>> = HashMap::new();
    let mut discovery = OracleDiscovery::default();

    for (oracle, data) in oracles {
        if data.oracle_authority != *wallet {
            continue;
        }

        let queue_authority = match queue_authorities.get(&data.queue_pubkey) {
            Some(cached) => *cached,
            None => {
                let resolved = fetch_queue_authority(connection, &data.queue_pubkey).await?;
                queue_authorities.insert(data.queue_pubkey, resolved);
                resolved
            },
        };
        let Some(queue_authority) = queue_authority else {
            trace!("Oracle {} queue {} unavailable", oracle, data.queue_pubkey);
            continue;
        };

        let state = match addin_state {
            Some(state) => state,
            None => {
                let address = client.addin_state()?;
                let state = fetch_anchor_account::<AddinState>(connection, &address).await?;
                addin_state = Some(state);
                state
            },
        };

        let grant_realm = match grant_realms.get(&state.grant_authority) {
            Some(cached) => *cached,
            None => {
                let resolved = resolve_governance_realm(connection, &state.grant_authority).await;
                grant_realms.insert(state.grant_authority, resolved);
                resolved
            },
        };
        if grant_realm != Some(*realm) {
            trace!("Oracle {} not granted in realm {}", oracle, realm);
            continue;
        }

        let grant = OracleGrant {
            oracle,
            oracle_authority: data.oracle_authority,
            queue: data.queue_pubkey,
            queue_authority,
            grant_authority: state.grant_authority,
        };
        let mut ixs = client.set_voter_weight_instructions(&grant, wallet)?;

        discovery.owned_oracles.push(oracle);
        if !ixs.is_empty() {
            discovery.pending_instructions.push(ixs.swap_remove(0));
        }
    }

    if let Some(first) = discovery.owned_oracles.first() {
        discovery.current_oracle = *first;
        discovery.voting_power = fetch_oracle_weight(connection, client, first, realm).await;
    }
    debug!(
        "Wallet {} owns {} oracles in realm {}",
        wallet,
        discovery.owned_oracles.len(),
        realm
    );

    Ok(discovery)
}

/// Queue authority, `None` when the queue is missing or undecodable
async fn fetch_queue_authority(
    connection: &impl SolConnection,
    queue: &Pubkey,
) -> Result<Option<Pubkey>> {
    let Some(data) = fetch_optional_account_data(connection, queue).await? else {
        return Ok(None);
    };
    Ok(OracleQueueAccountData::from_account_data(&data)
        .ok()
        .map(|queue| queue.authority))
}

/// Realm of a governance account, `None` when `address` is not one
async fn resolve_governance_realm(connection: &impl SolConnection, address: &Pubkey) -> Option<Pubkey> {
    let data = match fetch_optional_account_data(connection, address).await {
        Ok(Some(data)) => data,
        Ok(None) => {
            trace!("Grant authority {} does not exist", address);
            return None;
        },
        Err(e) => {
            trace!("Grant authority {} unavailable: {}", address, e);
            return None;
        },
    };

    match parse_governance_header(&data) {
        Ok(header) => Some(header.realm),
        Err(e) => {
            trace!("Grant authority {} is not a governance: {}", address, e);
            None
        },
    }
}

/// Weight reported by the oracle's voter weight record, zero when it is
/// missing, unreadable or belongs to another realm
async fn fetch_oracle_weight(
    connection: &impl SolConnection,
    client: &OracleStakingClient,
    oracle: &Pubkey,
    realm: &Pubkey,
) -> u64 {
    let record = match client.voter_weight_record(oracle) {
        Ok(address) => fetch_anchor_account::<VoterWeightRecord>(connection, &address).await,
        Err(e) => Err(e),
    };

    match record {
        Ok(record) if record.realm == *realm => record.voter_weight,
        Ok(record) => {
            warn!("Voter weight record of {} belongs to realm {}", oracle, record.realm);
            0
        },
        Err(VoterWeightSdkError::AccountNotFound(_)) => 0,
        Err(e) => {
            warn!("Failed to read voter weight of oracle {}: {}", oracle, e);
            0
        },
    }
}
