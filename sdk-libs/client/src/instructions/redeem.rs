use ingl_state::{constants::SPL_TOKEN_PROGRAM_ID, pda, InstructionData};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};
use spl_associated_token_account::get_associated_token_address;

use crate::errors::ClientError;

/// Closes out an NFT's backing value and burns the token.
pub fn redeem_nft_instruction(
    program_id: &Pubkey,
    payer: &Pubkey,
    mint: &Pubkey,
    log_level: u8,
) -> Result<Instruction, ClientError> {
    let (mint_authority, _) = pda::mint_authority(program_id);
    let (general_account, _) = pda::general_account(program_id);
    let (config_account, _) = pda::config_account(program_id);
    let (nft_account, _) = pda::nft_account(program_id, mint);
    let (metadata_account, _) = pda::metadata_account(mint);
    let (edition_account, _) = pda::edition_account(mint);
    let associated_token_account = get_associated_token_address(payer, mint);

    let accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new(*mint, false),
        AccountMeta::new(associated_token_account, false),
        AccountMeta::new(nft_account, false),
        AccountMeta::new(general_account, false),
        AccountMeta::new_readonly(config_account, false),
        AccountMeta::new_readonly(mint_authority, false),
        AccountMeta::new(metadata_account, false),
        AccountMeta::new(edition_account, false),
        AccountMeta::new_readonly(SPL_TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: InstructionData::Redeem { log_level }.encode()?,
    })
}
