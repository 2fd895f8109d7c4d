//! Client SDK for the ingl fractionalized-validator program.
//!
//! Wraps the wire-format layer from `ingl-state` with instruction
//! builders, transaction assembly (legacy and v0 with address lookup
//! tables) and high-level operations on [`ValidatorClient`].

pub mod client;
pub mod errors;
pub mod instructions;
pub mod rpc;
pub mod transaction;
pub mod wallet;
pub mod wire;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::ValidatorClient;
pub use errors::ClientError;
pub use rpc::{Cluster, Rpc, RpcError, SolanaRpc};
pub use wallet::{KeypairWallet, Wallet};
