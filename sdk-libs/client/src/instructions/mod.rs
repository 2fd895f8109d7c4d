//! Instruction builders.
//!
//! Each builder produces the borsh-encoded payload and the exact ordered
//! account-meta list the on-chain program expects. The program indexes
//! accounts positionally, so order, count and flags are wire contracts.

pub mod delegation;
pub mod governance;
pub mod mint;
pub mod rarity;
pub mod redeem;
pub mod registration;
pub mod rewards;

pub use delegation::{delegate_nft_instruction, undelegate_nft_instruction};
pub use governance::{
    execute_governance_instruction, finalize_governance_instruction, init_governance_instruction,
    vote_governance_instruction, ConfigChange, GovernanceRequest, ProgramUpgradeRequest,
    VoteAccountChange,
};
pub use mint::mint_nft_instruction;
pub use rarity::{imprint_rarity_instruction, oracle_feeds};
pub use redeem::redeem_nft_instruction;
pub use registration::{
    authorized_withdrawer_from_vote_account, register_validator_instruction, InitValidatorArgs,
    ListingRequest, ProgramVersionStatus, RegistrationBackend,
};
pub use rewards::{nft_withdraw_instruction, process_rewards_instruction};
