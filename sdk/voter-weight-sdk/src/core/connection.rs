use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_account_decoder::UiAccountEncoding;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::error::Error;

/// Filter applied when enumerating a program's accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountFilter {
    /// Account data length must equal the given size
    DataSize(u64),
    /// Account data must contain `bytes` at `offset`
    Memcmp { offset: usize, bytes: Vec<u8> },
}

impl AccountFilter {
    pub fn memcmp(offset: usize, bytes: &[u8]) -> Self {
        AccountFilter::Memcmp {
            offset,
            bytes: bytes.to_vec(),
        }
    }

    pub fn memcmp_pubkey(offset: usize, pubkey: &Pubkey) -> Self {
        Self::memcmp(offset, pubkey.as_ref())
    }

    /// Evaluate the filter locally against raw account data
    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            AccountFilter::DataSize(size) => data.len() as u64 == *size,
            AccountFilter::Memcmp { offset, bytes } => data
                .get(*offset..offset + bytes.len())
                .map(|window| window == bytes.as_slice())
                .unwrap_or(false),
        }
    }
}

impl From<&AccountFilter> for RpcFilterType {
    fn from(filter: &AccountFilter) -> Self {
        match filter {
            AccountFilter::DataSize(size) => RpcFilterType::DataSize(*size),
            AccountFilter::Memcmp { offset, bytes } => {
                RpcFilterType::Memcmp(Memcmp::new_raw_bytes(*offset, bytes.clone()))
            },
        }
    }
}

/// Chain read primitives the SDK relies on.
///
/// Timeouts and retries are the implementation's concern; any error is
/// treated by callers as the data being unavailable.
#[async_trait]
pub trait SolConnection: Send + Sync {
    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>>;
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: &[AccountFilter],
    ) -> Result<Vec<(Pubkey, Account)>, Box<dyn Error + Send + Sync>>;
}

/// `SolConnection` backed by a JSON-RPC node
pub struct RpcConnection {
    client: RpcClient,
}

impl RpcConnection {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: RpcClient::new(url.into()),
        }
    }

    pub fn new_with_commitment(url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(url.into(), commitment),
        }
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }
}

#[async_trait]
impl SolConnection for RpcConnection {
    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .get_account_with_commitment(pubkey, self.client.commitment())
            .await?;
        Ok(response.value)
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: &[AccountFilter],
    ) -> Result<Vec<(Pubkey, Account)>, Box<dyn Error + Send + Sync>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(filters.iter().map(RpcFilterType::from).collect()),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.client.commitment()),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };
        let accounts = self
            .client
            .get_program_accounts_with_config(program_id, config)
            .await?;
        Ok(accounts)
    }
}
