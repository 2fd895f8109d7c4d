use ingl_state::StateError;
use solana_sdk::{message::CompileError, pubkey::Pubkey, signer::SignerError};
use thiserror::Error;

use crate::rpc::RpcError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Raised before any network call when a signing operation is attempted
    /// without an active wallet public key.
    #[error("wallet not connected")]
    WalletNotConnected,

    /// Client-side validation that never reaches the network.
    #[error("{0}")]
    Validation(String),

    #[error("account {0} does not exist on chain")]
    AccountNotFound(Pubkey),

    #[error("lookup table {0} could not be resolved")]
    LookupTableNotFound(Pubkey),

    #[error("lookup table {0} did not become visible before the timeout")]
    LookupTableNotReady(Pubkey),

    #[error("authorized withdrawer {withdrawer} does not match payer {payer}")]
    AuthorizedWithdrawerMismatch { withdrawer: Pubkey, payer: Pubkey },

    #[error("rpc error: {0}")]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("failed to compile transaction message: {0}")]
    Compile(#[from] CompileError),

    #[error("signing failed: {0}")]
    Signer(#[from] SignerError),

    #[error("failed to serialize transaction: {0}")]
    Serialize(String),

    #[error("malformed transaction bytes: {0}")]
    Wire(String),

    #[error("failed to {operation}: {source}")]
    Operation {
        operation: String,
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// Tags the error with the user-facing operation that failed. Already
    /// tagged errors keep their original operation.
    pub fn for_operation(self, operation: &str) -> Self {
        match self {
            ClientError::Operation { .. } => self,
            other => ClientError::Operation {
                operation: operation.to_string(),
                source: Box::new(other),
            },
        }
    }
}
