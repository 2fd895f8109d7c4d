//! Program-derived addresses.
//!
//! Every function is pure: identical (program id, seeds) always yields the
//! identical address. Numeric seeds are encoded big-endian before hashing;
//! using little-endian derives a different, silently wrong address that only
//! surfaces when the program rejects the account.

use solana_sdk::{bpf_loader_upgradeable, pubkey::Pubkey};

use crate::constants::*;

pub fn config_account(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[INGL_CONFIG_SEED], program_id)
}

pub fn general_account(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GENERAL_ACCOUNT_SEED], program_id)
}

pub fn uris_account(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[URIS_ACCOUNT_SEED], program_id)
}

pub fn mint_authority(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[INGL_MINT_AUTHORITY_KEY], program_id)
}

pub fn collection_mint(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[INGL_NFT_COLLECTION_KEY], program_id)
}

pub fn collection_holder(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[COLLECTION_HOLDER_KEY], program_id)
}

pub fn vote_account(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VOTE_ACCOUNT_KEY], program_id)
}

pub fn authorized_withdrawer(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[AUTHORIZED_WITHDRAWER_KEY], program_id)
}

pub fn stake_account(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STAKE_ACCOUNT_KEY], program_id)
}

pub fn program_authority(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[INGL_PROGRAM_AUTHORITY_KEY], program_id)
}

pub fn nft_account(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[NFT_ACCOUNT_CONST, mint.as_ref()], program_id)
}

/// Proposal addresses are indexed by numeration, encoded as 4 bytes
/// big-endian.
pub fn proposal_account(program_id: &Pubkey, numeration: u32) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[INGL_PROPOSAL_KEY, &numeration.to_be_bytes()],
        program_id,
    )
}

/// Metaplex metadata account of `mint`.
pub fn metadata_account(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[METADATA_SEED, METAPLEX_PROGRAM_ID.as_ref(), mint.as_ref()],
        &METAPLEX_PROGRAM_ID,
    )
}

/// Metaplex master-edition account of `mint`.
pub fn edition_account(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            METAPLEX_PROGRAM_ID.as_ref(),
            mint.as_ref(),
            EDITION_SEED,
        ],
        &METAPLEX_PROGRAM_ID,
    )
}

/// Program-data account of an upgradeable program.
pub fn program_data_account(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[program_id.as_ref()], &bpf_loader_upgradeable::id())
}
