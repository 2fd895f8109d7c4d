use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::{constants::NFT_DATA_VALIDATION_PHRASE, error::StateError};

/// Prefix deserialization for on-chain accounts.
///
/// Program accounts are pre-allocated to a fixed byte length, so the blob is
/// usually longer than the encoded value. Decoding reads only the borsh
/// prefix and ignores trailing padding. A buffer shorter than the schema is
/// always an error.
pub trait AccountDeserialize: BorshDeserialize {
    fn deserialize_unchecked(data: &[u8]) -> Result<Self, StateError> {
        let mut slice = data;
        Self::deserialize(&mut slice).map_err(StateError::Decode)
    }
}

/// Where an NFT's backing lamports currently live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum FundsLocation {
    /// Backing the validator's primary stake and accruing rewards.
    Delegated,
    Undelegated,
}

/// Per-NFT on-chain record, created at mint and mutated by
/// delegate/undelegate/vote/reveal-rarity/withdraw instructions.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct NftData {
    pub validation_phrase: u32,
    /// Unset until the imprint-rarity instruction has run.
    pub rarity: Option<u8>,
    pub rarity_seed_time: Option<u32>,
    pub funds_location: FundsLocation,
    /// Ordinal mint index assigned by the program.
    pub numeration: u32,
    pub date_created: u32,
    pub last_withdrawal_epoch: Option<u64>,
    pub last_delegation_epoch: Option<u64>,
    pub all_withdraws: Vec<u64>,
    /// Proposal numeration -> vote cast with this NFT.
    pub all_votes: BTreeMap<u32, bool>,
}

impl AccountDeserialize for NftData {}

impl NftData {
    /// Decodes and checks the account type tag.
    pub fn parse(data: &[u8]) -> Result<Self, StateError> {
        let parsed = Self::deserialize_unchecked(data)?;
        if parsed.validation_phrase != NFT_DATA_VALIDATION_PHRASE {
            return Err(StateError::InvalidValidationPhrase {
                expected: NFT_DATA_VALIDATION_PHRASE,
                found: parsed.validation_phrase,
            });
        }
        Ok(parsed)
    }

    pub fn is_delegated(&self) -> bool {
        self.funds_location == FundsLocation::Delegated
    }
}

/// One entry is appended per epoch in which the vote account earned rewards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct VoteReward {
    pub epoch_number: u64,
    pub total_reward: u64,
    /// Stake backing the vote account during that epoch.
    pub total_stake: u64,
    /// Share of `total_reward` distributed to NFT holders.
    pub nft_holders_reward: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct RebalancingData {
    pub pending_validator_rewards: u64,
    pub unclaimed_validator_rewards: u64,
    pub is_rebalancing_active: bool,
}

/// Singleton per validator-program instance.
///
/// `vote_rewards` is append-only and ordered by increasing epoch; reward
/// lookups rely on that ordering.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct GeneralData {
    pub mint_numeration: u32,
    /// Lamports currently backing the primary stake.
    pub total_delegated: u64,
    pub proposal_numeration: u32,
    pub rebalancing_data: RebalancingData,
    pub vote_rewards: Vec<VoteReward>,
}

impl AccountDeserialize for GeneralData {}

/// Validator identity and economic parameters, singleton.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ValidatorConfig {
    pub is_validator_id_switchable: bool,
    pub max_primary_stake: u64,
    /// Percentage of epoch rewards distributed to NFT holders.
    pub nft_holders_share: u8,
    pub initial_redemption_fee: u8,
    /// Lamports backing a single NFT.
    pub unit_backing: u64,
    pub redemption_fee_duration: u32,
    pub commission: u8,
    pub validator_id: Pubkey,
    pub vote_account_id: Pubkey,
    pub validator_name: String,
    pub twitter_handle: String,
    pub discord_invite: String,
    pub website: String,
}

impl AccountDeserialize for ValidatorConfig {}

/// Metadata URI pools and rarity table for the collection.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct UrisAccount {
    /// Per-rarity mint counts, parallel to `rarity_names`.
    pub rarities: Vec<u16>,
    pub rarity_names: Vec<String>,
    /// Per-rarity pools of metadata URIs.
    pub uris: Vec<Vec<String>>,
}

impl AccountDeserialize for UrisAccount {}

/// Registry of deployed validator-program instances, read by the
/// marketplace listing flow.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ProgramStorage {
    pub programs: Vec<Pubkey>,
}

impl AccountDeserialize for ProgramStorage {}
