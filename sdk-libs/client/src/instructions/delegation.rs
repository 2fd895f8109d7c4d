use ingl_state::{pda, InstructionData};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::errors::ClientError;

/// Moves the NFT's backing lamports into the validator's primary stake.
pub fn delegate_nft_instruction(
    program_id: &Pubkey,
    payer: &Pubkey,
    mint: &Pubkey,
    log_level: u8,
) -> Result<Instruction, ClientError> {
    let (config_account, _) = pda::config_account(program_id);
    let (general_account, _) = pda::general_account(program_id);
    let (nft_account, _) = pda::nft_account(program_id, mint);

    let accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(config_account, false),
        AccountMeta::new_readonly(*mint, false),
        AccountMeta::new(nft_account, false),
        AccountMeta::new(general_account, false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: InstructionData::DelegateNft { log_level }.encode()?,
    })
}

/// Pulls the NFT's backing out of the primary stake.
///
/// Undelegation can trigger a stake withdrawal, so the vote account, stake
/// account and authorized withdrawer follow the delegate layout.
pub fn undelegate_nft_instruction(
    program_id: &Pubkey,
    payer: &Pubkey,
    mint: &Pubkey,
    log_level: u8,
) -> Result<Instruction, ClientError> {
    let (config_account, _) = pda::config_account(program_id);
    let (general_account, _) = pda::general_account(program_id);
    let (nft_account, _) = pda::nft_account(program_id, mint);
    let (vote_account, _) = pda::vote_account(program_id);
    let (stake_account, _) = pda::stake_account(program_id);
    let (authorized_withdrawer, _) = pda::authorized_withdrawer(program_id);

    let accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(config_account, false),
        AccountMeta::new_readonly(*mint, false),
        AccountMeta::new(nft_account, false),
        AccountMeta::new(general_account, false),
        AccountMeta::new(vote_account, false),
        AccountMeta::new(stake_account, false),
        AccountMeta::new(authorized_withdrawer, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: InstructionData::UnDelegateNft { log_level }.encode()?,
    })
}
