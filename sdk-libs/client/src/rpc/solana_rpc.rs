use std::{
    fmt::{Debug, Display, Formatter},
    time::Duration,
};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::json;
use solana_client::{
    nonblocking::rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig,
    rpc_request::RpcRequest, rpc_response::RpcVoteAccountStatus,
};
use solana_sdk::{
    account::Account,
    address_lookup_table::{state::AddressLookupTable, AddressLookupTableAccount},
    commitment_config::CommitmentConfig,
    epoch_info::EpochInfo,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
};
use solana_transaction_status::UiTransactionEncoding;
use tokio::time::sleep;
use tracing::debug;

use crate::rpc::{errors::RpcError, rpc_connection::Rpc};

/// Interval between signature-status polls during confirmation.
const CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cluster {
    Mainnet,
    Devnet,
    Localnet,
    Custom(String),
}

impl Display for Cluster {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let url = match self {
            Cluster::Mainnet => "https://api.mainnet-beta.solana.com",
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Localnet => "http://localhost:8899",
            Cluster::Custom(url) => url.as_str(),
        };
        write!(f, "{}", url)
    }
}

pub struct SolanaRpc {
    client: RpcClient,
    commitment: CommitmentConfig,
}

impl Debug for SolanaRpc {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolanaRpc {{ url: {:?} }}", self.client.url())
    }
}

impl SolanaRpc {
    pub fn new(cluster: Cluster) -> Self {
        Self::new_with_commitment(cluster, CommitmentConfig::confirmed())
    }

    pub fn new_with_commitment(cluster: Cluster, commitment: CommitmentConfig) -> Self {
        let client = RpcClient::new_with_commitment(cluster.to_string(), commitment);
        Self { client, commitment }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

#[async_trait]
impl Rpc for SolanaRpc {
    fn commitment(&self) -> CommitmentConfig {
        self.commitment
    }

    async fn get_account(&self, address: Pubkey) -> Result<Option<Account>, RpcError> {
        self.client
            .get_account_with_commitment(&address, self.commitment)
            .await
            .map(|response| response.value)
            .map_err(RpcError::from)
    }

    async fn get_latest_blockhash(&self) -> Result<(Hash, u64), RpcError> {
        // Confirmed blockhashes land more reliably than finalized ones.
        self.client
            .get_latest_blockhash_with_commitment(CommitmentConfig::confirmed())
            .await
            .map_err(RpcError::from)
    }

    async fn get_block_height(&self) -> Result<u64, RpcError> {
        self.client.get_block_height().await.map_err(RpcError::from)
    }

    async fn get_slot(&self) -> Result<u64, RpcError> {
        self.client.get_slot().await.map_err(RpcError::from)
    }

    async fn get_epoch_info(&self) -> Result<EpochInfo, RpcError> {
        self.client.get_epoch_info().await.map_err(RpcError::from)
    }

    async fn get_vote_accounts(&self) -> Result<RpcVoteAccountStatus, RpcError> {
        self.client
            .get_vote_accounts()
            .await
            .map_err(RpcError::from)
    }

    async fn get_address_lookup_table_with_commitment(
        &self,
        address: Pubkey,
        commitment: CommitmentConfig,
    ) -> Result<Option<AddressLookupTableAccount>, RpcError> {
        let Some(account) = self
            .client
            .get_account_with_commitment(&address, commitment)
            .await
            .map_err(RpcError::from)?
            .value
        else {
            return Ok(None);
        };
        let table = AddressLookupTable::deserialize(&account.data)
            .map_err(|e| RpcError::CustomError(format!("invalid lookup table data: {e:?}")))?;
        Ok(Some(AddressLookupTableAccount {
            key: address,
            addresses: table.addresses.to_vec(),
        }))
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, RpcError> {
        self.client
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(RpcError::from)
    }

    async fn send_raw_transaction(&self, bytes: &[u8]) -> Result<Signature, RpcError> {
        let config = RpcSendTransactionConfig {
            encoding: Some(UiTransactionEncoding::Base64),
            preflight_commitment: Some(self.commitment.commitment),
            ..Default::default()
        };
        let signature: String = self
            .client
            .send(
                RpcRequest::SendTransaction,
                json!([STANDARD.encode(bytes), config]),
            )
            .await
            .map_err(RpcError::from)?;
        signature
            .parse()
            .map_err(|e| RpcError::CustomError(format!("invalid signature in response: {e}")))
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        _blockhash: &Hash,
        last_valid_block_height: u64,
    ) -> Result<(), RpcError> {
        loop {
            let statuses = self
                .client
                .get_signature_statuses(&[*signature])
                .await
                .map_err(RpcError::from)?;
            if let Some(Some(status)) = statuses.value.first() {
                if let Some(err) = &status.err {
                    return Err(RpcError::from(err.clone()));
                }
                if status.satisfies_commitment(self.commitment) {
                    debug!(%signature, "transaction confirmed");
                    return Ok(());
                }
            }

            if self.get_block_height().await? > last_valid_block_height {
                return Err(RpcError::BlockhashExpired);
            }
            sleep(CONFIRMATION_POLL_INTERVAL).await;
        }
    }
}
