//! Account layouts, instruction encodings, PDA derivation and derived read
//! models for the ingl fractionalized-validator program.
//!
//! Everything here is a client-side mirror of an external on-chain
//! program's wire format: field order, enum discriminants and seed strings
//! are compatibility contracts, not style choices.

pub mod accounts;
pub mod constants;
pub mod error;
pub mod governance;
pub mod instruction;
pub mod pda;
pub mod rewards;

pub use accounts::{
    AccountDeserialize, FundsLocation, GeneralData, NftData, ProgramStorage, RebalancingData,
    UrisAccount, ValidatorConfig, VoteReward,
};
pub use error::StateError;
pub use governance::{ConfigAccountType, GovernanceData, GovernanceType, VoteAccountGovernance};
pub use instruction::InstructionData;
pub use rewards::{claimable_rewards, compute_apy, rarity_spread, RarityShare};
