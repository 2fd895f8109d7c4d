//! In-memory RPC double for unit tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use solana_client::rpc_response::RpcVoteAccountStatus;
use solana_sdk::{
    account::Account, address_lookup_table::AddressLookupTableAccount,
    commitment_config::CommitmentConfig, epoch_info::EpochInfo, hash::Hash, pubkey::Pubkey,
    signature::Signature,
};

use crate::rpc::{Rpc, RpcError};

#[derive(Debug, Default)]
pub struct MockRpc {
    accounts: Mutex<HashMap<Pubkey, Account>>,
    lookup_tables: Mutex<HashMap<Pubkey, AddressLookupTableAccount>>,
    lookup_table_commitments: Mutex<Vec<CommitmentConfig>>,
    sent: Mutex<Vec<Vec<u8>>>,
    requests: AtomicU64,
    epoch: u64,
    slots_in_epoch: u64,
}

impl MockRpc {
    pub fn new() -> Self {
        Self {
            epoch: 512,
            slots_in_epoch: 432_000,
            ..Self::default()
        }
    }

    pub fn set_account_data(&self, address: Pubkey, data: Vec<u8>) {
        let account = Account {
            lamports: 1_000_000,
            data,
            owner: Pubkey::new_unique(),
            executable: false,
            rent_epoch: 0,
        };
        self.accounts.lock().unwrap().insert(address, account);
    }

    pub fn set_lookup_table(&self, address: Pubkey, addresses: &[Pubkey]) {
        self.lookup_tables.lock().unwrap().insert(
            address,
            AddressLookupTableAccount {
                key: address,
                addresses: addresses.to_vec(),
            },
        );
    }

    pub fn sent_transactions(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    /// Commitment level of every lookup-table read, in call order.
    pub fn lookup_table_commitments(&self) -> Vec<CommitmentConfig> {
        self.lookup_table_commitments.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }

    fn track(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Rpc for MockRpc {
    fn commitment(&self) -> CommitmentConfig {
        CommitmentConfig::confirmed()
    }

    async fn get_account(&self, address: Pubkey) -> Result<Option<Account>, RpcError> {
        self.track();
        Ok(self.accounts.lock().unwrap().get(&address).cloned())
    }

    async fn get_latest_blockhash(&self) -> Result<(Hash, u64), RpcError> {
        self.track();
        Ok((Hash::new_unique(), 10_000))
    }

    async fn get_block_height(&self) -> Result<u64, RpcError> {
        self.track();
        Ok(100)
    }

    async fn get_slot(&self) -> Result<u64, RpcError> {
        self.track();
        Ok(1_000)
    }

    async fn get_epoch_info(&self) -> Result<EpochInfo, RpcError> {
        self.track();
        Ok(EpochInfo {
            epoch: self.epoch,
            slot_index: 0,
            slots_in_epoch: self.slots_in_epoch,
            absolute_slot: self.epoch * self.slots_in_epoch,
            block_height: 100,
            transaction_count: None,
        })
    }

    async fn get_vote_accounts(&self) -> Result<RpcVoteAccountStatus, RpcError> {
        self.track();
        Ok(RpcVoteAccountStatus {
            current: vec![],
            delinquent: vec![],
        })
    }

    async fn get_address_lookup_table_with_commitment(
        &self,
        address: Pubkey,
        commitment: CommitmentConfig,
    ) -> Result<Option<AddressLookupTableAccount>, RpcError> {
        self.track();
        self.lookup_table_commitments.lock().unwrap().push(commitment);
        Ok(self.lookup_tables.lock().unwrap().get(&address).cloned())
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        _data_len: usize,
    ) -> Result<u64, RpcError> {
        self.track();
        Ok(890_880)
    }

    async fn send_raw_transaction(&self, bytes: &[u8]) -> Result<Signature, RpcError> {
        self.track();
        self.sent.lock().unwrap().push(bytes.to_vec());
        Ok(Signature::new_unique())
    }

    async fn confirm_transaction(
        &self,
        _signature: &Signature,
        _blockhash: &Hash,
        _last_valid_block_height: u64,
    ) -> Result<(), RpcError> {
        self.track();
        Ok(())
    }
}
