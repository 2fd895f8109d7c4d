use solana_sdk::{pubkey, pubkey::Pubkey};

/// PDA seed constants. These are verbatim wire contracts with the on-chain
/// program and must never change.
pub const INGL_CONFIG_SEED: &[u8] = b"ingl_config";
pub const URIS_ACCOUNT_SEED: &[u8] = b"uris_account";
pub const GENERAL_ACCOUNT_SEED: &[u8] = b"general_account";
pub const INGL_NFT_COLLECTION_KEY: &[u8] = b"ingl_nft_collection";
pub const INGL_MINT_AUTHORITY_KEY: &[u8] = b"ingl_mint_authority";
pub const COLLECTION_HOLDER_KEY: &[u8] = b"collection_holder";
pub const VOTE_ACCOUNT_KEY: &[u8] = b"vote_account";
pub const AUTHORIZED_WITHDRAWER_KEY: &[u8] = b"authorized_withdrawer";
pub const STAKE_ACCOUNT_KEY: &[u8] = b"stake_account";
pub const NFT_ACCOUNT_CONST: &[u8] = b"nft_account";
pub const INGL_PROGRAM_AUTHORITY_KEY: &[u8] = b"ingl_program_authority";
pub const INGL_PROPOSAL_KEY: &[u8] = b"ingl_proposal";

/// Seeds of the Metaplex token-metadata program.
pub const METADATA_SEED: &[u8] = b"metadata";
pub const EDITION_SEED: &[u8] = b"edition";

/// ID of the Metaplex token-metadata program.
pub const METAPLEX_PROGRAM_ID: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");
/// ID of the SPL token program.
pub const SPL_TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// Type tag stored in the first four bytes of every `NftData` account.
pub const NFT_DATA_VALIDATION_PHRASE: u32 = 271_186_913;

/// Reward entries older than `APY_WINDOW_EPOCHS + APY_WINDOW_MARGIN_EPOCHS`
/// epochs are excluded from the APY average.
pub const APY_WINDOW_EPOCHS: u64 = 20;
pub const APY_WINDOW_MARGIN_EPOCHS: u64 = 5;

/// Cluster slot time assumed by the APY projection.
pub const SECONDS_PER_SLOT: f64 = 0.4;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
