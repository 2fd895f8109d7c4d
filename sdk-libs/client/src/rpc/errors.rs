use std::io;

use solana_sdk::transaction::TransactionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("ClientError: {0}")]
    ClientError(#[from] Box<solana_client::client_error::ClientError>),

    #[error("TransactionError: {0}")]
    TransactionError(#[from] Box<TransactionError>),

    #[error("IoError: {0}")]
    IoError(#[from] Box<io::Error>),

    #[error("Error: `{0}`")]
    CustomError(String),

    /// The blockhash's valid-block-height window passed before the
    /// signature was confirmed. The caller must rebuild the transaction
    /// with a fresh blockhash.
    #[error("blockhash expired before the transaction was confirmed")]
    BlockhashExpired,
}

impl From<solana_client::client_error::ClientError> for RpcError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        RpcError::ClientError(Box::new(err))
    }
}

impl From<TransactionError> for RpcError {
    fn from(err: TransactionError) -> Self {
        RpcError::TransactionError(Box::new(err))
    }
}

impl From<io::Error> for RpcError {
    fn from(err: io::Error) -> Self {
        RpcError::IoError(Box::new(err))
    }
}
