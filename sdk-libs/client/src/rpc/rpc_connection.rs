use std::fmt::Debug;

use async_trait::async_trait;
use ingl_state::AccountDeserialize;
use solana_client::rpc_response::RpcVoteAccountStatus;
use solana_sdk::{
    account::Account, address_lookup_table::AddressLookupTableAccount,
    commitment_config::CommitmentConfig, epoch_info::EpochInfo, hash::Hash, pubkey::Pubkey,
    signature::Signature,
};

use crate::rpc::errors::RpcError;

/// Chain RPC boundary consumed by the transaction-assembly layer.
///
/// Implementations must not retry: submission and confirmation failures are
/// surfaced to the caller, which owns the retry policy.
#[async_trait]
pub trait Rpc: Send + Sync + Debug + 'static {
    fn commitment(&self) -> CommitmentConfig;

    async fn get_account(&self, address: Pubkey) -> Result<Option<Account>, RpcError>;

    /// Latest blockhash plus the last block height at which it is valid.
    async fn get_latest_blockhash(&self) -> Result<(Hash, u64), RpcError>;

    async fn get_block_height(&self) -> Result<u64, RpcError>;

    async fn get_slot(&self) -> Result<u64, RpcError>;

    async fn get_epoch_info(&self) -> Result<EpochInfo, RpcError>;

    async fn get_vote_accounts(&self) -> Result<RpcVoteAccountStatus, RpcError>;

    /// Resolves a lookup table to its current on-chain address list.
    async fn get_address_lookup_table(
        &self,
        address: Pubkey,
    ) -> Result<Option<AddressLookupTableAccount>, RpcError> {
        self.get_address_lookup_table_with_commitment(address, self.commitment())
            .await
    }

    /// Resolves a lookup table at an explicit commitment level. Fresh
    /// tables are only treated as usable once visible at `finalized`.
    async fn get_address_lookup_table_with_commitment(
        &self,
        address: Pubkey,
        commitment: CommitmentConfig,
    ) -> Result<Option<AddressLookupTableAccount>, RpcError>;

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, RpcError>;

    /// Submits already-signed transaction bytes.
    async fn send_raw_transaction(&self, bytes: &[u8]) -> Result<Signature, RpcError>;

    /// Waits until `signature` reaches this connection's commitment, or
    /// until the chain passes `last_valid_block_height`.
    async fn confirm_transaction(
        &self,
        signature: &Signature,
        blockhash: &Hash,
        last_valid_block_height: u64,
    ) -> Result<(), RpcError>;

    /// Fetches and prefix-decodes a program account. Trailing padding in
    /// the on-chain blob is ignored.
    async fn get_program_account<T: AccountDeserialize + Send>(
        &self,
        address: Pubkey,
    ) -> Result<Option<T>, RpcError> {
        match self.get_account(address).await? {
            Some(account) => {
                let value = T::deserialize_unchecked(&account.data)
                    .map_err(|e| RpcError::CustomError(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}
