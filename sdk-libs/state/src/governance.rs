use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::accounts::AccountDeserialize;

/// Governance payloads are nested tagged unions. Discriminants are assigned
/// by declaration order at every nesting level and are the wire contract
/// with the on-chain program: reordering a variant changes the protocol.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum GovernanceType {
    ConfigAccount(ConfigAccountType),
    ProgramUpgrade {
        buffer_account: Pubkey,
        code_link: String,
    },
    VoteAccount(VoteAccountGovernance),
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum ConfigAccountType {
    MaxPrimaryStake(u64),
    NftHolderShare(u8),
    InitialRedemptionFee(u8),
    RedemptionFeeDuration(u32),
    ValidatorName(String),
    TwitterHandle(String),
    DiscordInvite(String),
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum VoteAccountGovernance {
    ValidatorId(Pubkey),
    Commission(u8),
}

/// One proposal account, keyed by its numeration.
///
/// Created by InitGovernance, mutated by VoteGovernance and
/// FinalizeGovernance, terminal once executed or expired without quorum.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct GovernanceData {
    pub expiration_time: u32,
    pub is_still_ongoing: bool,
    pub date_finalized: Option<u32>,
    pub did_proposal_pass: Option<bool>,
    pub is_proposal_executed: bool,
    pub title: String,
    pub description: String,
    /// NFT numeration -> vote.
    pub votes: BTreeMap<u32, bool>,
    pub governance_type: GovernanceType,
}

impl AccountDeserialize for GovernanceData {}

#[cfg(test)]
mod test {
    use borsh::to_vec;

    use super::*;
    use crate::error::StateError;

    fn leaf_variants() -> Vec<GovernanceType> {
        vec![
            GovernanceType::ConfigAccount(ConfigAccountType::MaxPrimaryStake(5_000_000_000_000)),
            GovernanceType::ConfigAccount(ConfigAccountType::NftHolderShare(55)),
            GovernanceType::ConfigAccount(ConfigAccountType::InitialRedemptionFee(3)),
            GovernanceType::ConfigAccount(ConfigAccountType::RedemptionFeeDuration(86_400)),
            GovernanceType::ConfigAccount(ConfigAccountType::ValidatorName("ingl".into())),
            GovernanceType::ConfigAccount(ConfigAccountType::TwitterHandle("@ingl".into())),
            GovernanceType::ConfigAccount(ConfigAccountType::DiscordInvite("discord.gg/x".into())),
            GovernanceType::ProgramUpgrade {
                buffer_account: Pubkey::new_unique(),
                code_link: "https://github.com/ingl-DAO/program".into(),
            },
            GovernanceType::VoteAccount(VoteAccountGovernance::ValidatorId(Pubkey::new_unique())),
            GovernanceType::VoteAccount(VoteAccountGovernance::Commission(8)),
        ]
    }

    #[test]
    fn every_leaf_variant_round_trips() {
        for variant in leaf_variants() {
            let bytes = to_vec(&variant).unwrap();
            let decoded = GovernanceType::try_from_slice(&bytes).unwrap();
            assert_eq!(decoded, variant);
        }
    }

    #[test]
    fn discriminants_are_positional_per_level() {
        let bytes = to_vec(&GovernanceType::ConfigAccount(
            ConfigAccountType::MaxPrimaryStake(1),
        ))
        .unwrap();
        assert_eq!(&bytes[..2], &[0, 0]);

        let bytes = to_vec(&GovernanceType::ConfigAccount(
            ConfigAccountType::DiscordInvite(String::new()),
        ))
        .unwrap();
        assert_eq!(&bytes[..2], &[0, 6]);

        let bytes = to_vec(&GovernanceType::ProgramUpgrade {
            buffer_account: Pubkey::new_unique(),
            code_link: String::new(),
        })
        .unwrap();
        assert_eq!(bytes[0], 1);

        let bytes = to_vec(&GovernanceType::VoteAccount(
            VoteAccountGovernance::Commission(10),
        ))
        .unwrap();
        assert_eq!(&bytes[..2], &[2, 1]);
    }

    #[test]
    fn unknown_discriminant_is_a_decode_error() {
        assert!(GovernanceType::try_from_slice(&[3]).is_err());
        assert!(GovernanceType::try_from_slice(&[0, 7]).is_err());
        assert!(GovernanceType::try_from_slice(&[2, 2]).is_err());
    }

    #[test]
    fn governance_data_round_trips() {
        let proposal = GovernanceData {
            expiration_time: 1_700_000_000,
            is_still_ongoing: true,
            date_finalized: None,
            did_proposal_pass: None,
            is_proposal_executed: false,
            title: "Lower commission".into(),
            description: "Reduce validator commission from 10% to 8%".into(),
            votes: BTreeMap::from([(0, true), (7, false), (12, true)]),
            governance_type: GovernanceType::VoteAccount(VoteAccountGovernance::Commission(8)),
        };
        let bytes = to_vec(&proposal).unwrap();
        assert_eq!(
            GovernanceData::deserialize_unchecked(&bytes).unwrap(),
            proposal
        );
    }

    #[test]
    fn finalized_proposal_round_trips_with_padding() {
        let proposal = GovernanceData {
            expiration_time: 1_700_000_000,
            is_still_ongoing: false,
            date_finalized: Some(1_700_100_000),
            did_proposal_pass: Some(true),
            is_proposal_executed: true,
            title: "t".into(),
            description: "d".into(),
            votes: BTreeMap::new(),
            governance_type: GovernanceType::ConfigAccount(ConfigAccountType::NftHolderShare(60)),
        };
        let mut bytes = to_vec(&proposal).unwrap();
        bytes.extend_from_slice(&[0u8; 64]);
        assert_eq!(
            GovernanceData::deserialize_unchecked(&bytes).unwrap(),
            proposal
        );
    }

    #[test]
    fn short_proposal_buffer_fails() {
        let proposal = GovernanceData {
            expiration_time: 1_700_000_000,
            is_still_ongoing: true,
            date_finalized: None,
            did_proposal_pass: None,
            is_proposal_executed: false,
            title: "t".into(),
            description: "d".into(),
            votes: BTreeMap::new(),
            governance_type: GovernanceType::VoteAccount(VoteAccountGovernance::ValidatorId(
                Pubkey::new_unique(),
            )),
        };
        let bytes = to_vec(&proposal).unwrap();
        let err = GovernanceData::deserialize_unchecked(&bytes[..bytes.len() - 8]).unwrap_err();
        assert!(matches!(err, StateError::Decode(_)));
    }
}
