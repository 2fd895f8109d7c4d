use ingl_state::{
    pda, ConfigAccountType, GovernanceType, InstructionData, VoteAccountGovernance,
};
use solana_sdk::{
    bpf_loader_upgradeable,
    instruction::{AccountMeta, Instruction},
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    system_program,
};
use spl_associated_token_account::get_associated_token_address;

use crate::errors::ClientError;

/// A config-account change as entered by the user. Stake values arrive in
/// SOL and are converted to lamports here.
#[derive(Clone, Debug)]
pub enum ConfigChange {
    MaxPrimaryStakeSol(f64),
    NftHolderShare(u8),
    InitialRedemptionFee(u8),
    RedemptionFeeDuration(u32),
    ValidatorName(String),
    TwitterHandle(String),
    DiscordInvite(String),
}

#[derive(Clone, Debug)]
pub struct ProgramUpgradeRequest {
    pub buffer_account: Pubkey,
    pub code_link: String,
}

#[derive(Clone, Debug)]
pub enum VoteAccountChange {
    ValidatorId(Pubkey),
    Commission(u8),
}

/// Raw governance proposal input. Exactly one of the three change kinds
/// must be populated.
#[derive(Clone, Debug, Default)]
pub struct GovernanceRequest {
    pub config_account: Option<ConfigChange>,
    pub program_upgrade: Option<ProgramUpgradeRequest>,
    pub vote_account: Option<VoteAccountChange>,
}

impl GovernanceRequest {
    /// Validates the request and converts it into the wire-level
    /// governance type. Runs before any network call.
    pub fn into_governance_type(self) -> Result<GovernanceType, ClientError> {
        match (self.config_account, self.program_upgrade, self.vote_account) {
            (Some(change), None, None) => {
                let inner = match change {
                    ConfigChange::MaxPrimaryStakeSol(sol) => {
                        if !sol.is_finite() || sol < 0.0 {
                            return Err(ClientError::Validation(
                                "max primary stake must be a non-negative number of SOL"
                                    .to_string(),
                            ));
                        }
                        ConfigAccountType::MaxPrimaryStake((sol * LAMPORTS_PER_SOL as f64) as u64)
                    }
                    ConfigChange::NftHolderShare(share) => ConfigAccountType::NftHolderShare(share),
                    ConfigChange::InitialRedemptionFee(fee) => {
                        ConfigAccountType::InitialRedemptionFee(fee)
                    }
                    ConfigChange::RedemptionFeeDuration(duration) => {
                        ConfigAccountType::RedemptionFeeDuration(duration)
                    }
                    ConfigChange::ValidatorName(name) => ConfigAccountType::ValidatorName(name),
                    ConfigChange::TwitterHandle(handle) => ConfigAccountType::TwitterHandle(handle),
                    ConfigChange::DiscordInvite(invite) => ConfigAccountType::DiscordInvite(invite),
                };
                Ok(GovernanceType::ConfigAccount(inner))
            }
            (None, Some(upgrade), None) => Ok(GovernanceType::ProgramUpgrade {
                buffer_account: upgrade.buffer_account,
                code_link: upgrade.code_link,
            }),
            (None, None, Some(change)) => Ok(GovernanceType::VoteAccount(match change {
                VoteAccountChange::ValidatorId(id) => VoteAccountGovernance::ValidatorId(id),
                VoteAccountChange::Commission(pct) => VoteAccountGovernance::Commission(pct),
            })),
            _ => Err(ClientError::Validation(
                "exactly one of config-account change, program upgrade or vote-account change \
                 must be specified"
                    .to_string(),
            )),
        }
    }
}

/// Creates the proposal account at the PDA derived from the general
/// account's current proposal numeration.
pub fn init_governance_instruction(
    program_id: &Pubkey,
    payer: &Pubkey,
    nft_mint: &Pubkey,
    proposal_numeration: u32,
    governance_type: GovernanceType,
    title: String,
    description: String,
    log_level: u8,
) -> Result<Instruction, ClientError> {
    let (config_account, _) = pda::config_account(program_id);
    let (general_account, _) = pda::general_account(program_id);
    let (proposal_account, _) = pda::proposal_account(program_id, proposal_numeration);
    let (nft_account, _) = pda::nft_account(program_id, nft_mint);

    let accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(*nft_mint, false),
        AccountMeta::new_readonly(get_associated_token_address(payer, nft_mint), false),
        AccountMeta::new_readonly(nft_account, false),
        AccountMeta::new(proposal_account, false),
        AccountMeta::new(general_account, false),
        AccountMeta::new_readonly(config_account, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: InstructionData::InitGovernance {
            log_level,
            governance_type,
            title,
            description,
        }
        .encode()?,
    })
}

/// Casts one boolean vote per NFT held by the voter.
pub fn vote_governance_instruction(
    program_id: &Pubkey,
    payer: &Pubkey,
    numeration: u32,
    vote: bool,
    nft_mints: &[Pubkey],
    log_level: u8,
) -> Result<Instruction, ClientError> {
    if nft_mints.is_empty() {
        return Err(ClientError::Validation(
            "at least one NFT is required to vote".to_string(),
        ));
    }

    let (proposal_account, _) = pda::proposal_account(program_id, numeration);
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new(proposal_account, false),
    ];
    for mint in nft_mints {
        let (nft_account, _) = pda::nft_account(program_id, mint);
        accounts.push(AccountMeta::new_readonly(*mint, false));
        accounts.push(AccountMeta::new(nft_account, false));
    }

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: InstructionData::VoteGovernance {
            log_level,
            numeration,
            vote,
            cnt: nft_mints.len() as u8,
        }
        .encode()?,
    })
}

/// Seals the proposal outcome once expiration or quorum is reached.
pub fn finalize_governance_instruction(
    program_id: &Pubkey,
    payer: &Pubkey,
    numeration: u32,
    log_level: u8,
) -> Result<Instruction, ClientError> {
    let (proposal_account, _) = pda::proposal_account(program_id, numeration);
    let (general_account, _) = pda::general_account(program_id);
    let (config_account, _) = pda::config_account(program_id);

    let accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new(proposal_account, false),
        AccountMeta::new_readonly(general_account, false),
        AccountMeta::new_readonly(config_account, false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: InstructionData::FinalizeGovernance {
            log_level,
            numeration,
        }
        .encode()?,
    })
}

/// Applies an approved change. The account tail depends on what the
/// proposal modifies.
pub fn execute_governance_instruction(
    program_id: &Pubkey,
    payer: &Pubkey,
    numeration: u32,
    governance_type: &GovernanceType,
    log_level: u8,
) -> Result<Instruction, ClientError> {
    let (proposal_account, _) = pda::proposal_account(program_id, numeration);
    let (general_account, _) = pda::general_account(program_id);
    let (config_account, _) = pda::config_account(program_id);

    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new(proposal_account, false),
        AccountMeta::new(general_account, false),
        AccountMeta::new(config_account, false),
    ];

    match governance_type {
        GovernanceType::ConfigAccount(_) => {}
        GovernanceType::ProgramUpgrade { buffer_account, .. } => {
            let (program_data, _) = pda::program_data_account(program_id);
            let (program_authority, _) = pda::program_authority(program_id);
            accounts.push(AccountMeta::new(*program_id, false));
            accounts.push(AccountMeta::new(program_data, false));
            accounts.push(AccountMeta::new(*buffer_account, false));
            accounts.push(AccountMeta::new_readonly(program_authority, false));
            accounts.push(AccountMeta::new_readonly(bpf_loader_upgradeable::id(), false));
        }
        GovernanceType::VoteAccount(_) => {
            let (vote_account, _) = pda::vote_account(program_id);
            let (authorized_withdrawer, _) = pda::authorized_withdrawer(program_id);
            accounts.push(AccountMeta::new(vote_account, false));
            accounts.push(AccountMeta::new_readonly(authorized_withdrawer, false));
        }
    }

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: InstructionData::ExecuteGovernance {
            log_level,
            numeration,
        }
        .encode()?,
    })
}
