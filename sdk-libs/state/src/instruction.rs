use borsh::{BorshDeserialize, BorshSerialize};

use crate::{error::StateError, governance::GovernanceType};

/// Instruction payloads accepted by the validator program.
///
/// The first byte on the wire is the variant discriminant (declaration
/// order, starting at 0), the second is the log level, then the
/// variant-specific fields in declared order. The field order here is the
/// program's wire format, not a stylistic choice.
#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize)]
pub enum InstructionData {
    MintNft {
        log_level: u8,
    },
    ImprintRarity {
        log_level: u8,
    },
    Init {
        log_level: u8,
        init_commission: u8,
        max_primary_stake: u64,
        nft_holders_share: u8,
        initial_redemption_fee: u8,
        is_validator_id_switchable: bool,
        unit_backing: u64,
        redemption_fee_duration: u32,
        validator_name: String,
        collection_uri: String,
        website: String,
        default_uri: String,
    },
    Redeem {
        log_level: u8,
    },
    NftWithdraw {
        log_level: u8,
        cnt: u32,
    },
    ProcessRewards {
        log_level: u8,
        cnt: u32,
    },
    InitRebalance {
        log_level: u8,
    },
    FinalizeRebalance {
        log_level: u8,
    },
    UploadUris {
        log_level: u8,
        uris: Vec<String>,
        rarity: u16,
    },
    ResetUris {
        log_level: u8,
    },
    UnDelegateNft {
        log_level: u8,
    },
    DelegateNft {
        log_level: u8,
    },
    CreateVoteAccount {
        log_level: u8,
    },
    InitGovernance {
        log_level: u8,
        governance_type: GovernanceType,
        title: String,
        description: String,
    },
    VoteGovernance {
        log_level: u8,
        numeration: u32,
        vote: bool,
        cnt: u8,
    },
    FinalizeGovernance {
        log_level: u8,
        numeration: u32,
    },
    ExecuteGovernance {
        log_level: u8,
        numeration: u32,
    },
}

impl InstructionData {
    pub fn encode(&self) -> Result<Vec<u8>, StateError> {
        borsh::to_vec(self).map_err(StateError::Encode)
    }
}
