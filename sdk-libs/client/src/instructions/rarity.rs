use ingl_state::{pda, InstructionData};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey,
    pubkey::Pubkey,
    sysvar,
};

use crate::{errors::ClientError, rpc::Cluster};

/// Pyth price feeds consumed by the program as a pseudo-randomness source.
/// The list is fixed per network.
const MAINNET_ORACLE_FEEDS: [Pubkey; 4] = [
    pubkey!("H6ARHf6YXhGYeQfUzQNGk6rDNnLBQKrenN712K4AQJEG"),
    pubkey!("GVXRSBjFk6e6J3NbVPXohDJetcTjaeeuykUpbQF8UoMU"),
    pubkey!("JBu1AL4obBcCMqKBBxhpWCNUt136ijcuMZLFvTP7iWdB"),
    pubkey!("4CkQJBxhU8EZ2UjhigbtdaPbpTe6mqf811fipYBFbSYN"),
];

const DEVNET_ORACLE_FEEDS: [Pubkey; 4] = [
    pubkey!("J83w4HKfqxwcq3BEMMkPFSppX3gqekLyLJBexebFVkix"),
    pubkey!("HovQMDrbAgAYPCmHVSrezcSmkMtXSSUsLDFANExrZh2J"),
    pubkey!("EdVCmQ9FSPcVe5YySXDPCRmc8aDQLKJ9xvYBMZPie1Vw"),
    pubkey!("DR6PqK15tD21MEGSLmDpXwLA7Fw47kwtdZeUMdB7vpVR"),
];

pub fn oracle_feeds(cluster: &Cluster) -> &'static [Pubkey] {
    match cluster {
        Cluster::Mainnet => &MAINNET_ORACLE_FEEDS,
        _ => &DEVNET_ORACLE_FEEDS,
    }
}

/// Reveals the NFT's rarity.
///
/// The oracle tail pushes the account count past the legacy-transaction
/// limit, so this instruction is always submitted as a v0 transaction
/// referencing a lookup table over these accounts.
pub fn imprint_rarity_instruction(
    program_id: &Pubkey,
    payer: &Pubkey,
    mint: &Pubkey,
    cluster: &Cluster,
    log_level: u8,
) -> Result<Instruction, ClientError> {
    let (config_account, _) = pda::config_account(program_id);
    let (uris_account, _) = pda::uris_account(program_id);
    let (nft_account, _) = pda::nft_account(program_id, mint);
    let (metadata_account, _) = pda::metadata_account(mint);

    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(*mint, false),
        AccountMeta::new(nft_account, false),
        AccountMeta::new_readonly(config_account, false),
        AccountMeta::new_readonly(uris_account, false),
        AccountMeta::new(metadata_account, false),
        AccountMeta::new_readonly(sysvar::clock::id(), false),
    ];
    accounts.extend(
        oracle_feeds(cluster)
            .iter()
            .map(|feed| AccountMeta::new_readonly(*feed, false)),
    );

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: InstructionData::ImprintRarity { log_level }.encode()?,
    })
}
