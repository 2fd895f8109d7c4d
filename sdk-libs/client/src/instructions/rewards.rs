use ingl_state::{pda, InstructionData};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use spl_associated_token_account::get_associated_token_address;

use crate::errors::ClientError;

/// Appends the (associated token, mint, nft record) triple for every mint
/// being claimed. The payload carries the mint count so the program knows
/// where the shared prefix ends.
fn per_mint_metas(program_id: &Pubkey, payer: &Pubkey, mints: &[Pubkey]) -> Vec<AccountMeta> {
    let mut metas = Vec::with_capacity(mints.len() * 3);
    for mint in mints {
        let (nft_account, _) = pda::nft_account(program_id, mint);
        metas.push(AccountMeta::new(
            get_associated_token_address(payer, mint),
            false,
        ));
        metas.push(AccountMeta::new_readonly(*mint, false));
        metas.push(AccountMeta::new(nft_account, false));
    }
    metas
}

/// Claims the accumulated NFT-holder rewards for `mints`.
pub fn process_rewards_instruction(
    program_id: &Pubkey,
    payer: &Pubkey,
    mints: &[Pubkey],
    log_level: u8,
) -> Result<Instruction, ClientError> {
    if mints.is_empty() {
        return Err(ClientError::Validation(
            "at least one NFT is required to claim rewards".to_string(),
        ));
    }

    let (vote_account, _) = pda::vote_account(program_id);
    let (config_account, _) = pda::config_account(program_id);
    let (general_account, _) = pda::general_account(program_id);
    let (authorized_withdrawer, _) = pda::authorized_withdrawer(program_id);

    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new(vote_account, false),
        AccountMeta::new_readonly(config_account, false),
        AccountMeta::new(general_account, false),
        AccountMeta::new(authorized_withdrawer, false),
    ];
    accounts.extend(per_mint_metas(program_id, payer, mints));

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: InstructionData::ProcessRewards {
            log_level,
            cnt: mints.len() as u32,
        }
        .encode()?,
    })
}

/// Withdraws the funds a redeemed/undelegated NFT is still owed.
pub fn nft_withdraw_instruction(
    program_id: &Pubkey,
    payer: &Pubkey,
    mints: &[Pubkey],
    log_level: u8,
) -> Result<Instruction, ClientError> {
    if mints.is_empty() {
        return Err(ClientError::Validation(
            "at least one NFT is required to withdraw".to_string(),
        ));
    }

    let (vote_account, _) = pda::vote_account(program_id);
    let (config_account, _) = pda::config_account(program_id);
    let (general_account, _) = pda::general_account(program_id);

    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new(vote_account, false),
        AccountMeta::new_readonly(config_account, false),
        AccountMeta::new(general_account, false),
    ];
    accounts.extend(per_mint_metas(program_id, payer, mints));

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: InstructionData::NftWithdraw {
            log_level,
            cnt: mints.len() as u32,
        }
        .encode()?,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn three_metas_are_appended_per_mint() {
        let program_id = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        let mints = [Pubkey::new_unique(), Pubkey::new_unique()];

        let instruction =
            process_rewards_instruction(&program_id, &payer, &mints, 0).unwrap();
        assert_eq!(instruction.accounts.len(), 5 + 2 * 3);
        // discriminant, log_level, then cnt as u32 little-endian.
        assert_eq!(instruction.data, vec![5, 0, 2, 0, 0, 0]);

        let first_triple = &instruction.accounts[5..8];
        assert_eq!(
            first_triple[0].pubkey,
            get_associated_token_address(&payer, &mints[0])
        );
        assert_eq!(first_triple[1].pubkey, mints[0]);
        assert_eq!(
            first_triple[2].pubkey,
            pda::nft_account(&program_id, &mints[0]).0
        );
    }

    #[test]
    fn claiming_with_no_mints_is_a_validation_error() {
        let program_id = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        assert!(matches!(
            process_rewards_instruction(&program_id, &payer, &[], 0),
            Err(ClientError::Validation(_))
        ));
        assert!(matches!(
            nft_withdraw_instruction(&program_id, &payer, &[], 0),
            Err(ClientError::Validation(_))
        ));
    }
}
