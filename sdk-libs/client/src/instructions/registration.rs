use async_trait::async_trait;
use ingl_state::{constants::SPL_TOKEN_PROGRAM_ID, pda, InstructionData};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};
use spl_associated_token_account::get_associated_token_address;

use crate::errors::ClientError;

/// Byte offset of the authorized withdrawer inside a vote account blob:
/// a 4-byte version prefix followed by the 32-byte node pubkey.
const AUTHORIZED_WITHDRAWER_OFFSET: usize = 36;

/// Safety classification the registration backend assigns to a deployed
/// program instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgramVersionStatus {
    Safe { version: u8 },
    Deprecated { version: u8 },
    Unverified,
}

impl ProgramVersionStatus {
    pub fn is_listable(&self) -> bool {
        matches!(self, ProgramVersionStatus::Safe { .. })
    }
}

/// Input to the backend's listing endpoint.
#[derive(Clone, Debug)]
pub struct ListingRequest {
    pub program_id: Pubkey,
    pub vote_account: Pubkey,
    pub payer: Pubkey,
}

/// Off-chain service that allocates pre-deployed program instances and
/// co-signs listing transactions. The transport behind it is not part of
/// this crate.
#[async_trait]
pub trait RegistrationBackend: Send + Sync {
    /// Reserves an available pre-deployed program id for a new validator.
    async fn allocate_program_id(&self) -> Result<Pubkey, ClientError>;

    /// Classifies the program deployed at `program_id`.
    async fn verify_program(&self, program_id: &Pubkey)
        -> Result<ProgramVersionStatus, ClientError>;

    /// Builds and co-signs the listing transaction, returning its wire
    /// bytes. The payer's signature slot is left empty.
    async fn build_listing_transaction(
        &self,
        request: &ListingRequest,
    ) -> Result<Vec<u8>, ClientError>;
}

/// Parameters of the one-time validator initialization, in the order the
/// payload encodes them.
#[derive(Clone, Debug)]
pub struct InitValidatorArgs {
    pub init_commission: u8,
    pub max_primary_stake: u64,
    pub nft_holders_share: u8,
    pub initial_redemption_fee: u8,
    pub is_validator_id_switchable: bool,
    pub unit_backing: u64,
    pub redemption_fee_duration: u32,
    pub validator_name: String,
    pub collection_uri: String,
    pub website: String,
    pub default_uri: String,
}

/// Reads the authorized withdrawer out of a raw vote account blob.
pub fn authorized_withdrawer_from_vote_account(data: &[u8]) -> Result<Pubkey, ClientError> {
    let end = AUTHORIZED_WITHDRAWER_OFFSET + 32;
    if data.len() < end {
        return Err(ClientError::Validation(format!(
            "vote account data is {} bytes, expected at least {end}",
            data.len()
        )));
    }
    Pubkey::try_from(&data[AUTHORIZED_WITHDRAWER_OFFSET..end])
        .map_err(|_| ClientError::Validation("malformed vote account data".to_string()))
}

/// Initializes a freshly allocated program instance.
///
/// With `existing_vote_account` set the program adopts that vote account
/// instead of creating one, and the caller must have verified that its
/// authorized withdrawer is the payer.
pub fn register_validator_instruction(
    program_id: &Pubkey,
    payer: &Pubkey,
    validator_id: &Pubkey,
    args: &InitValidatorArgs,
    existing_vote_account: Option<&Pubkey>,
    log_level: u8,
) -> Result<Instruction, ClientError> {
    let (config_account, _) = pda::config_account(program_id);
    let (general_account, _) = pda::general_account(program_id);
    let (uris_account, _) = pda::uris_account(program_id);
    let (collection_mint, _) = pda::collection_mint(program_id);
    let (mint_authority, _) = pda::mint_authority(program_id);
    let (collection_holder, _) = pda::collection_holder(program_id);
    let (collection_metadata, _) = pda::metadata_account(&collection_mint);
    let (collection_edition, _) = pda::edition_account(&collection_mint);
    let collection_ata = get_associated_token_address(&collection_holder, &collection_mint);

    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new(config_account, false),
        AccountMeta::new(general_account, false),
        AccountMeta::new(uris_account, false),
        AccountMeta::new(collection_mint, false),
        AccountMeta::new_readonly(mint_authority, false),
        AccountMeta::new_readonly(collection_holder, false),
        AccountMeta::new(collection_ata, false),
        AccountMeta::new(collection_metadata, false),
        AccountMeta::new(collection_edition, false),
        AccountMeta::new_readonly(*validator_id, false),
        AccountMeta::new_readonly(SPL_TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(sysvar::rent::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    match existing_vote_account {
        Some(vote_account) => {
            let (authorized_withdrawer, _) = pda::authorized_withdrawer(program_id);
            accounts.push(AccountMeta::new(*vote_account, false));
            accounts.push(AccountMeta::new(authorized_withdrawer, false));
        }
        None => {
            let (vote_account, _) = pda::vote_account(program_id);
            accounts.push(AccountMeta::new(vote_account, false));
        }
    }

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: InstructionData::Init {
            log_level,
            init_commission: args.init_commission,
            max_primary_stake: args.max_primary_stake,
            nft_holders_share: args.nft_holders_share,
            initial_redemption_fee: args.initial_redemption_fee,
            is_validator_id_switchable: args.is_validator_id_switchable,
            unit_backing: args.unit_backing,
            redemption_fee_duration: args.redemption_fee_duration,
            validator_name: args.validator_name.clone(),
            collection_uri: args.collection_uri.clone(),
            website: args.website.clone(),
            default_uri: args.default_uri.clone(),
        }
        .encode()?,
    })
}
