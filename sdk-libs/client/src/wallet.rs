use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::{Signer, SignerError},
    transaction::{Transaction, VersionedTransaction},
};

use crate::errors::ClientError;

/// Wallet boundary. The SDK never touches private keys: it hands fully
/// built transactions to the wallet and gets signed ones back.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// `None` while no wallet is connected.
    fn pubkey(&self) -> Option<Pubkey>;

    async fn sign_transaction(&self, transaction: Transaction)
        -> Result<Transaction, ClientError>;

    async fn sign_versioned_transaction(
        &self,
        transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction, ClientError>;

    async fn sign_message(&self, message: &[u8]) -> Result<Signature, ClientError>;
}

/// Local-keypair wallet, used in tests and command-line tooling.
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }
}

#[async_trait]
impl Wallet for KeypairWallet {
    fn pubkey(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    async fn sign_transaction(
        &self,
        mut transaction: Transaction,
    ) -> Result<Transaction, ClientError> {
        let blockhash = transaction.message.recent_blockhash;
        transaction.try_partial_sign(&[&self.keypair], blockhash)?;
        Ok(transaction)
    }

    async fn sign_versioned_transaction(
        &self,
        mut transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction, ClientError> {
        place_signature(&mut transaction, &self.keypair)?;
        Ok(transaction)
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature, ClientError> {
        Ok(self.keypair.sign_message(message))
    }
}

/// Signs the message with `keypair` and stores the signature at the
/// position the message assigns to that key.
pub fn place_signature(
    transaction: &mut VersionedTransaction,
    keypair: &Keypair,
) -> Result<(), ClientError> {
    let num_required = transaction.message.header().num_required_signatures as usize;
    if transaction.signatures.len() != num_required {
        transaction
            .signatures
            .resize(num_required, Signature::default());
    }

    let position = transaction
        .message
        .static_account_keys()
        .iter()
        .take(num_required)
        .position(|key| *key == keypair.pubkey())
        .ok_or(ClientError::Signer(SignerError::KeypairPubkeyMismatch))?;

    let serialized = transaction.message.serialize();
    transaction.signatures[position] = keypair.sign_message(&serialized);
    Ok(())
}

#[cfg(test)]
mod test {
    use solana_sdk::{
        hash::Hash,
        message::{v0, VersionedMessage},
        system_instruction,
    };

    use super::*;

    #[tokio::test]
    async fn keypair_wallet_signs_a_legacy_transaction() {
        let keypair = Keypair::new();
        let payer = keypair.pubkey();
        let wallet = KeypairWallet::new(keypair);

        let instruction = system_instruction::transfer(&payer, &Pubkey::new_unique(), 1);
        let mut transaction = Transaction::new_with_payer(&[instruction], Some(&payer));
        transaction.message.recent_blockhash = Hash::new_unique();

        let signed = wallet.sign_transaction(transaction).await.unwrap();
        assert!(signed.is_signed());
        signed.verify().unwrap();
    }

    #[tokio::test]
    async fn keypair_wallet_signs_a_versioned_transaction() {
        let keypair = Keypair::new();
        let payer = keypair.pubkey();

        let instruction = system_instruction::transfer(&payer, &Pubkey::new_unique(), 1);
        let message =
            v0::Message::try_compile(&payer, &[instruction], &[], Hash::new_unique()).unwrap();
        let transaction = VersionedTransaction {
            signatures: vec![],
            message: VersionedMessage::V0(message),
        };

        let wallet = KeypairWallet::new(keypair);
        let signed = wallet.sign_versioned_transaction(transaction).await.unwrap();
        assert_eq!(signed.signatures.len(), 1);
        assert!(signed.verify_with_results().into_iter().all(|ok| ok));
    }

    #[tokio::test]
    async fn foreign_fee_payer_is_rejected() {
        let keypair = Keypair::new();
        let other = Keypair::new();

        let instruction =
            system_instruction::transfer(&other.pubkey(), &Pubkey::new_unique(), 1);
        let message =
            v0::Message::try_compile(&other.pubkey(), &[instruction], &[], Hash::new_unique())
                .unwrap();
        let transaction = VersionedTransaction {
            signatures: vec![],
            message: VersionedMessage::V0(message),
        };

        let wallet = KeypairWallet::new(keypair);
        let err = wallet
            .sign_versioned_transaction(transaction)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Signer(_)));
    }
}
