use ingl_state::{constants::*, pda, InstructionData};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};
use spl_associated_token_account::get_associated_token_address;

use crate::errors::ClientError;

/// Builds the mint instruction for a freshly generated `mint` keypair.
///
/// The program walks this account list positionally; the order below is
/// its expected layout.
pub fn mint_nft_instruction(
    program_id: &Pubkey,
    payer: &Pubkey,
    mint: &Pubkey,
    log_level: u8,
) -> Result<Instruction, ClientError> {
    let (mint_authority, _) = pda::mint_authority(program_id);
    let (general_account, _) = pda::general_account(program_id);
    let (uris_account, _) = pda::uris_account(program_id);
    let (config_account, _) = pda::config_account(program_id);
    let (collection_mint, _) = pda::collection_mint(program_id);
    let (collection_holder, _) = pda::collection_holder(program_id);
    let (nft_account, _) = pda::nft_account(program_id, mint);
    let (metadata_account, _) = pda::metadata_account(mint);
    let (edition_account, _) = pda::edition_account(mint);
    let (collection_metadata, _) = pda::metadata_account(&collection_mint);
    let (collection_edition, _) = pda::edition_account(&collection_mint);

    let associated_token_account = get_associated_token_address(payer, mint);
    let collection_associated_token =
        get_associated_token_address(&collection_holder, &collection_mint);

    let accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new(*mint, true),
        AccountMeta::new(mint_authority, false),
        AccountMeta::new(associated_token_account, false),
        AccountMeta::new_readonly(SPL_TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(sysvar::rent::id(), false),
        AccountMeta::new(metadata_account, false),
        AccountMeta::new(general_account, false),
        AccountMeta::new(uris_account, false),
        AccountMeta::new_readonly(config_account, false),
        AccountMeta::new(collection_mint, false),
        AccountMeta::new(collection_metadata, false),
        AccountMeta::new_readonly(collection_edition, false),
        AccountMeta::new(edition_account, false),
        AccountMeta::new(nft_account, false),
        AccountMeta::new_readonly(collection_holder, false),
        AccountMeta::new(collection_associated_token, false),
        AccountMeta::new_readonly(METAPLEX_PROGRAM_ID, false),
        AccountMeta::new_readonly(spl_associated_token_account::id(), false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: InstructionData::MintNft { log_level }.encode()?,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn account_list_matches_the_program_layout() {
        let program_id = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let instruction = mint_nft_instruction(&program_id, &payer, &mint, 0).unwrap();

        assert_eq!(instruction.accounts.len(), 20);
        assert_eq!(instruction.data, vec![0, 0]);

        // Payer and the fresh mint are the only signers.
        assert_eq!(instruction.accounts[0].pubkey, payer);
        assert!(instruction.accounts[0].is_signer);
        assert!(instruction.accounts[0].is_writable);
        assert_eq!(instruction.accounts[1].pubkey, mint);
        assert!(instruction.accounts[1].is_signer);
        assert_eq!(
            instruction
                .accounts
                .iter()
                .filter(|meta| meta.is_signer)
                .count(),
            2
        );

        assert_eq!(
            instruction.accounts[15].pubkey,
            pda::nft_account(&program_id, &mint).0
        );
    }
}
