//! Transaction assembly and delivery.
//!
//! Builds legacy or versioned (v0) transactions from instruction lists,
//! obtains signatures from the wallet and any extra local keypairs, submits
//! the raw bytes and confirms against the blockhash window used to build
//! the transaction. No retries happen here.

use std::time::Duration;

use solana_sdk::{
    address_lookup_table::{
        instruction::{create_lookup_table, extend_lookup_table},
        AddressLookupTableAccount,
    },
    commitment_config::CommitmentConfig,
    compute_budget::ComputeBudgetInstruction,
    instruction::Instruction,
    message::{v0, VersionedMessage},
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::{Transaction, VersionedTransaction},
};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::{
    errors::ClientError,
    rpc::Rpc,
    wallet::{place_signature, Wallet},
};

/// Protocol-imposed maximum number of addresses per extend-table
/// instruction.
pub const LOOKUP_TABLE_EXTEND_CHUNK: usize = 20;

#[derive(Clone, Copy, Debug, Default)]
pub struct TransactionOptions {
    /// Prepends a compute-unit-limit instruction when set.
    pub compute_unit_limit: Option<u32>,
}

/// Polling bounds for lookup-table visibility after creation.
///
/// A fresh table only counts as usable once it resolves at `finalized`;
/// tables visible at a weaker commitment can still be rejected by
/// consumers reading at `finalized`.
#[derive(Clone, Copy, Debug)]
pub struct LookupTableWait {
    pub poll_interval: Duration,
    pub timeout: Duration,
    pub commitment: CommitmentConfig,
}

impl Default for LookupTableWait {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            timeout: Duration::from_secs(30),
            commitment: CommitmentConfig::finalized(),
        }
    }
}

fn with_compute_budget(
    instructions: &[Instruction],
    options: &TransactionOptions,
) -> Vec<Instruction> {
    let mut all = Vec::with_capacity(instructions.len() + 1);
    if let Some(limit) = options.compute_unit_limit {
        all.push(ComputeBudgetInstruction::set_compute_unit_limit(limit));
    }
    all.extend_from_slice(instructions);
    all
}

async fn submit_and_confirm<R: Rpc>(
    rpc: &R,
    bytes: &[u8],
    blockhash: &solana_sdk::hash::Hash,
    last_valid_block_height: u64,
) -> Result<Signature, ClientError> {
    let signature = rpc.send_raw_transaction(bytes).await?;
    debug!(%signature, "transaction submitted");
    rpc.confirm_transaction(&signature, blockhash, last_valid_block_height)
        .await?;
    Ok(signature)
}

/// Signs and submits `instructions` as a legacy transaction.
///
/// The wallet signs first; `extra_signers` (e.g. a freshly generated mint
/// keypair) are applied afterwards.
pub async fn forward_legacy_transaction<R: Rpc, W: Wallet>(
    rpc: &R,
    wallet: &W,
    instructions: &[Instruction],
    extra_signers: &[&Keypair],
    options: TransactionOptions,
) -> Result<Signature, ClientError> {
    let payer = wallet.pubkey().ok_or(ClientError::WalletNotConnected)?;
    let all = with_compute_budget(instructions, &options);

    let (blockhash, last_valid_block_height) = rpc.get_latest_blockhash().await?;
    let mut transaction = Transaction::new_with_payer(&all, Some(&payer));
    transaction.message.recent_blockhash = blockhash;

    let mut transaction = wallet.sign_transaction(transaction).await?;
    if !extra_signers.is_empty() {
        transaction.try_partial_sign(extra_signers, blockhash)?;
    }

    let bytes =
        bincode::serialize(&transaction).map_err(|e| ClientError::Serialize(e.to_string()))?;
    submit_and_confirm(rpc, &bytes, &blockhash, last_valid_block_height).await
}

/// Signs and submits `instructions` as a v0 transaction referencing
/// `lookup_tables`.
///
/// Every referenced table is resolved to its on-chain address list before
/// the message is compiled; an unresolvable table fails the build.
pub async fn forward_v0_transaction<R: Rpc, W: Wallet>(
    rpc: &R,
    wallet: &W,
    instructions: &[Instruction],
    lookup_tables: &[Pubkey],
    extra_signers: &[&Keypair],
    options: TransactionOptions,
) -> Result<Signature, ClientError> {
    let payer = wallet.pubkey().ok_or(ClientError::WalletNotConnected)?;
    let all = with_compute_budget(instructions, &options);

    let mut resolved: Vec<AddressLookupTableAccount> = Vec::with_capacity(lookup_tables.len());
    for table_address in lookup_tables {
        let table = rpc
            .get_address_lookup_table(*table_address)
            .await?
            .ok_or(ClientError::LookupTableNotFound(*table_address))?;
        resolved.push(table);
    }

    let (blockhash, last_valid_block_height) = rpc.get_latest_blockhash().await?;
    let message = v0::Message::try_compile(&payer, &all, &resolved, blockhash)?;
    let transaction = VersionedTransaction {
        signatures: vec![],
        message: VersionedMessage::V0(message),
    };

    let mut transaction = wallet.sign_versioned_transaction(transaction).await?;
    for keypair in extra_signers {
        place_signature(&mut transaction, keypair)?;
    }

    let bytes =
        bincode::serialize(&transaction).map_err(|e| ClientError::Serialize(e.to_string()))?;
    submit_and_confirm(rpc, &bytes, &blockhash, last_valid_block_height).await
}

/// Extend instructions for `addresses`, chunked to the protocol limit.
pub fn extend_lookup_table_instructions(
    lookup_table: Pubkey,
    authority: Pubkey,
    payer: Pubkey,
    addresses: &[Pubkey],
) -> Vec<Instruction> {
    addresses
        .chunks(LOOKUP_TABLE_EXTEND_CHUNK)
        .map(|chunk| extend_lookup_table(lookup_table, authority, Some(payer), chunk.to_vec()))
        .collect()
}

/// Creates a lookup table holding `addresses` and waits until it is
/// resolvable with the full address list.
///
/// Creation and each extend chunk are separate transactions, so a failure
/// mid-way leaves a partially populated table; callers should treat that as
/// retryable. Waiting replaces the fixed propagation sleep the network
/// otherwise requires before a fresh table is referenced.
pub async fn create_lookup_table_for<R: Rpc, W: Wallet>(
    rpc: &R,
    wallet: &W,
    addresses: &[Pubkey],
    wait: LookupTableWait,
) -> Result<Pubkey, ClientError> {
    let payer = wallet.pubkey().ok_or(ClientError::WalletNotConnected)?;

    let recent_slot = rpc.get_slot().await?;
    let (create_instruction, table_address) = create_lookup_table(payer, payer, recent_slot);
    debug!(%table_address, addresses = addresses.len(), "creating lookup table");

    forward_v0_transaction(
        rpc,
        wallet,
        &[create_instruction],
        &[],
        &[],
        TransactionOptions::default(),
    )
    .await?;

    for instruction in extend_lookup_table_instructions(table_address, payer, payer, addresses) {
        forward_v0_transaction(
            rpc,
            wallet,
            &[instruction],
            &[],
            &[],
            TransactionOptions::default(),
        )
        .await?;
    }

    wait_for_lookup_table(rpc, table_address, addresses.len(), wait).await?;
    Ok(table_address)
}

/// Polls at `wait.commitment` until the table resolves with at least
/// `expected_len` addresses.
pub async fn wait_for_lookup_table<R: Rpc>(
    rpc: &R,
    table_address: Pubkey,
    expected_len: usize,
    wait: LookupTableWait,
) -> Result<(), ClientError> {
    let start = Instant::now();
    loop {
        if let Some(table) = rpc
            .get_address_lookup_table_with_commitment(table_address, wait.commitment)
            .await?
        {
            if table.addresses.len() >= expected_len {
                return Ok(());
            }
        }
        if start.elapsed() >= wait.timeout {
            return Err(ClientError::LookupTableNotReady(table_address));
        }
        sleep(wait.poll_interval).await;
    }
}

#[cfg(test)]
mod test {
    use solana_sdk::signer::Signer;

    use super::*;
    use crate::{test_support::MockRpc, wallet::KeypairWallet};

    #[test]
    fn forty_five_addresses_extend_in_three_chunks() {
        let addresses: Vec<Pubkey> = (0..45).map(|_| Pubkey::new_unique()).collect();
        let instructions = extend_lookup_table_instructions(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            &addresses,
        );
        assert_eq!(instructions.len(), 3);
    }

    #[test]
    fn chunk_sizes_are_twenty_twenty_five() {
        use solana_sdk::address_lookup_table::instruction::ProgramInstruction;

        let addresses: Vec<Pubkey> = (0..45).map(|_| Pubkey::new_unique()).collect();
        let instructions = extend_lookup_table_instructions(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            &addresses,
        );

        let mut extended = Vec::new();
        let mut sizes = Vec::new();
        for instruction in &instructions {
            let decoded: ProgramInstruction = bincode::deserialize(&instruction.data).unwrap();
            match decoded {
                ProgramInstruction::ExtendLookupTable { new_addresses } => {
                    sizes.push(new_addresses.len());
                    extended.extend(new_addresses);
                }
                other => panic!("unexpected instruction: {other:?}"),
            }
        }
        assert_eq!(sizes, vec![20, 20, 5]);
        assert_eq!(extended, addresses);
    }

    #[tokio::test]
    async fn disconnected_wallet_fails_before_any_rpc_call() {
        struct Disconnected;
        #[async_trait::async_trait]
        impl Wallet for Disconnected {
            fn pubkey(&self) -> Option<Pubkey> {
                None
            }
            async fn sign_transaction(
                &self,
                _transaction: Transaction,
            ) -> Result<Transaction, ClientError> {
                unreachable!()
            }
            async fn sign_versioned_transaction(
                &self,
                _transaction: VersionedTransaction,
            ) -> Result<VersionedTransaction, ClientError> {
                unreachable!()
            }
            async fn sign_message(&self, _message: &[u8]) -> Result<Signature, ClientError> {
                unreachable!()
            }
        }

        let rpc = MockRpc::new();
        let err = forward_legacy_transaction(
            &rpc,
            &Disconnected,
            &[],
            &[],
            TransactionOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ClientError::WalletNotConnected));
        assert_eq!(rpc.request_count(), 0);
    }

    #[tokio::test]
    async fn legacy_transaction_is_signed_and_submitted() {
        let rpc = MockRpc::new();
        let keypair = solana_sdk::signature::Keypair::new();
        let payer = keypair.pubkey();
        let wallet = KeypairWallet::new(keypair);

        let instruction =
            solana_sdk::system_instruction::transfer(&payer, &Pubkey::new_unique(), 1);
        forward_legacy_transaction(
            &rpc,
            &wallet,
            &[instruction],
            &[],
            TransactionOptions {
                compute_unit_limit: Some(400_000),
            },
        )
        .await
        .unwrap();

        let sent = rpc.sent_transactions();
        assert_eq!(sent.len(), 1);
        let transaction: Transaction = bincode::deserialize(&sent[0]).unwrap();
        transaction.verify().unwrap();
        // Compute-budget instruction is prepended.
        assert_eq!(transaction.message.instructions.len(), 2);
    }

    #[tokio::test]
    async fn missing_lookup_table_is_fatal() {
        let rpc = MockRpc::new();
        let keypair = solana_sdk::signature::Keypair::new();
        let wallet = KeypairWallet::new(keypair);
        let missing = Pubkey::new_unique();

        let err = forward_v0_transaction(
            &rpc,
            &wallet,
            &[],
            &[missing],
            &[],
            TransactionOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ClientError::LookupTableNotFound(table) if table == missing));
    }

    #[tokio::test]
    async fn lookup_table_wait_times_out() {
        let rpc = MockRpc::new();
        let table = Pubkey::new_unique();
        let wait = LookupTableWait {
            poll_interval: Duration::from_millis(1),
            timeout: Duration::from_millis(5),
            ..LookupTableWait::default()
        };
        let err = wait_for_lookup_table(&rpc, table, 4, wait).await.unwrap_err();
        assert!(matches!(err, ClientError::LookupTableNotReady(t) if t == table));
    }

    #[tokio::test]
    async fn lookup_table_wait_resolves_once_visible() {
        let rpc = MockRpc::new();
        let table = Pubkey::new_unique();
        let addresses: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        rpc.set_lookup_table(table, &addresses);

        wait_for_lookup_table(&rpc, table, 4, LookupTableWait::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn lookup_table_readiness_is_checked_at_finalized() {
        let rpc = MockRpc::new();
        let table = Pubkey::new_unique();
        let addresses: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        rpc.set_lookup_table(table, &addresses);

        wait_for_lookup_table(&rpc, table, 4, LookupTableWait::default())
            .await
            .unwrap();

        let commitments = rpc.lookup_table_commitments();
        assert!(!commitments.is_empty());
        assert!(commitments
            .iter()
            .all(|c| *c == CommitmentConfig::finalized()));
    }
}
