//! High-level operations against one fractionalized-validator program
//! instance.

use ingl_state::{
    claimable_rewards, compute_apy, pda, rarity_spread, GeneralData, GovernanceData, NftData,
    RarityShare, UrisAccount, ValidatorConfig,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};
use tracing::{debug, info};

use crate::{
    errors::ClientError,
    instructions::{
        authorized_withdrawer_from_vote_account, delegate_nft_instruction,
        execute_governance_instruction, finalize_governance_instruction, imprint_rarity_instruction,
        init_governance_instruction, mint_nft_instruction, nft_withdraw_instruction,
        process_rewards_instruction, redeem_nft_instruction, register_validator_instruction,
        undelegate_nft_instruction, vote_governance_instruction, GovernanceRequest,
        InitValidatorArgs, ListingRequest, RegistrationBackend,
    },
    rpc::Cluster,
    rpc::Rpc,
    transaction::{
        create_lookup_table_for, forward_legacy_transaction, forward_v0_transaction,
        LookupTableWait, TransactionOptions,
    },
    wallet::Wallet,
    wire::deserialize_versioned_transaction,
};

/// Compute budget for the mint path, which creates the token, the metadata
/// and the NFT record in one transaction.
const MINT_COMPUTE_UNIT_LIMIT: u32 = 400_000;

pub struct ValidatorClient<R: Rpc, W: Wallet> {
    rpc: R,
    wallet: W,
    program_id: Pubkey,
    cluster: Cluster,
    log_level: u8,
}

impl<R: Rpc, W: Wallet> ValidatorClient<R, W> {
    pub fn new(rpc: R, wallet: W, program_id: Pubkey, cluster: Cluster) -> Self {
        Self {
            rpc,
            wallet,
            program_id,
            cluster,
            log_level: 0,
        }
    }

    pub fn with_log_level(mut self, log_level: u8) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    fn payer(&self) -> Result<Pubkey, ClientError> {
        self.wallet.pubkey().ok_or(ClientError::WalletNotConnected)
    }

    async fn read<T>(&self, address: Pubkey) -> Result<T, ClientError>
    where
        T: ingl_state::AccountDeserialize + Send,
    {
        self.rpc
            .get_program_account::<T>(address)
            .await?
            .ok_or(ClientError::AccountNotFound(address))
    }

    pub async fn general_data(&self) -> Result<GeneralData, ClientError> {
        let (address, _) = pda::general_account(&self.program_id);
        self.read(address).await
    }

    pub async fn validator_config(&self) -> Result<ValidatorConfig, ClientError> {
        let (address, _) = pda::config_account(&self.program_id);
        self.read(address).await
    }

    pub async fn uris_account(&self) -> Result<UrisAccount, ClientError> {
        let (address, _) = pda::uris_account(&self.program_id);
        self.read(address).await
    }

    pub async fn nft_data(&self, mint: &Pubkey) -> Result<NftData, ClientError> {
        let (address, _) = pda::nft_account(&self.program_id, mint);
        let account = self
            .rpc
            .get_account(address)
            .await?
            .ok_or(ClientError::AccountNotFound(address))?;
        Ok(NftData::parse(&account.data)?)
    }

    pub async fn governance_data(&self, numeration: u32) -> Result<GovernanceData, ClientError> {
        let (address, _) = pda::proposal_account(&self.program_id, numeration);
        self.read(address).await
    }

    /// Mints a new NFT backed by `unit_backing` lamports of stake. Returns
    /// the fresh mint address along with the transaction signature.
    pub async fn mint_nft(&self) -> Result<(Pubkey, Signature), ClientError> {
        let run = async {
            let payer = self.payer()?;
            let mint = Keypair::new();
            let instruction =
                mint_nft_instruction(&self.program_id, &payer, &mint.pubkey(), self.log_level)?;
            let signature = forward_legacy_transaction(
                &self.rpc,
                &self.wallet,
                &[instruction],
                &[&mint],
                TransactionOptions {
                    compute_unit_limit: Some(MINT_COMPUTE_UNIT_LIMIT),
                },
            )
            .await?;
            info!(mint = %mint.pubkey(), %signature, "nft minted");
            Ok((mint.pubkey(), signature))
        };
        run.await.map_err(|e: ClientError| e.for_operation("mint nft"))
    }

    pub async fn redeem_nft(&self, mint: &Pubkey) -> Result<Signature, ClientError> {
        let run = async {
            let payer = self.payer()?;
            let instruction =
                redeem_nft_instruction(&self.program_id, &payer, mint, self.log_level)?;
            forward_legacy_transaction(
                &self.rpc,
                &self.wallet,
                &[instruction],
                &[],
                TransactionOptions::default(),
            )
            .await
        };
        run.await.map_err(|e| e.for_operation("redeem nft"))
    }

    pub async fn delegate_nft(&self, mint: &Pubkey) -> Result<Signature, ClientError> {
        let run = async {
            let payer = self.payer()?;
            let instruction =
                delegate_nft_instruction(&self.program_id, &payer, mint, self.log_level)?;
            forward_legacy_transaction(
                &self.rpc,
                &self.wallet,
                &[instruction],
                &[],
                TransactionOptions::default(),
            )
            .await
        };
        run.await.map_err(|e| e.for_operation("delegate nft"))
    }

    pub async fn undelegate_nft(&self, mint: &Pubkey) -> Result<Signature, ClientError> {
        let run = async {
            let payer = self.payer()?;
            let instruction =
                undelegate_nft_instruction(&self.program_id, &payer, mint, self.log_level)?;
            forward_legacy_transaction(
                &self.rpc,
                &self.wallet,
                &[instruction],
                &[],
                TransactionOptions::default(),
            )
            .await
        };
        run.await.map_err(|e| e.for_operation("undelegate nft"))
    }

    /// Reveals the NFT's rarity. The oracle account tail exceeds the legacy
    /// size limit, so the accounts go through a fresh lookup table and a v0
    /// transaction.
    pub async fn imprint_rarity(&self, mint: &Pubkey) -> Result<Signature, ClientError> {
        let run = async {
            let payer = self.payer()?;
            let instruction = imprint_rarity_instruction(
                &self.program_id,
                &payer,
                mint,
                &self.cluster,
                self.log_level,
            )?;

            let addresses: Vec<Pubkey> =
                instruction.accounts.iter().map(|meta| meta.pubkey).collect();
            let table = create_lookup_table_for(
                &self.rpc,
                &self.wallet,
                &addresses,
                LookupTableWait::default(),
            )
            .await?;
            debug!(%table, "lookup table ready");

            forward_v0_transaction(
                &self.rpc,
                &self.wallet,
                &[instruction],
                &[table],
                &[],
                TransactionOptions::default(),
            )
            .await
        };
        run.await.map_err(|e| e.for_operation("imprint rarity"))
    }

    pub async fn claim_rewards(&self, mints: &[Pubkey]) -> Result<Signature, ClientError> {
        let run = async {
            let payer = self.payer()?;
            let instruction =
                process_rewards_instruction(&self.program_id, &payer, mints, self.log_level)?;
            forward_legacy_transaction(
                &self.rpc,
                &self.wallet,
                &[instruction],
                &[],
                TransactionOptions::default(),
            )
            .await
        };
        run.await.map_err(|e| e.for_operation("claim rewards"))
    }

    pub async fn nft_withdraw(&self, mints: &[Pubkey]) -> Result<Signature, ClientError> {
        let run = async {
            let payer = self.payer()?;
            let instruction =
                nft_withdraw_instruction(&self.program_id, &payer, mints, self.log_level)?;
            forward_legacy_transaction(
                &self.rpc,
                &self.wallet,
                &[instruction],
                &[],
                TransactionOptions::default(),
            )
            .await
        };
        run.await.map_err(|e| e.for_operation("withdraw nft funds"))
    }

    /// Opens a governance proposal. The request is validated before any
    /// network call; the proposal address comes from the general account's
    /// current numeration.
    pub async fn init_governance(
        &self,
        request: GovernanceRequest,
        nft_mint: &Pubkey,
        title: String,
        description: String,
    ) -> Result<(Pubkey, Signature), ClientError> {
        let run = async {
            let governance_type = request.into_governance_type()?;
            let payer = self.payer()?;

            let general = self.general_data().await?;
            let numeration = general.proposal_numeration;
            let (proposal, _) = pda::proposal_account(&self.program_id, numeration);

            let instruction = init_governance_instruction(
                &self.program_id,
                &payer,
                nft_mint,
                numeration,
                governance_type,
                title,
                description,
                self.log_level,
            )?;
            let signature = forward_legacy_transaction(
                &self.rpc,
                &self.wallet,
                &[instruction],
                &[],
                TransactionOptions::default(),
            )
            .await?;
            info!(%proposal, numeration, "governance proposal created");
            Ok((proposal, signature))
        };
        run.await
            .map_err(|e: ClientError| e.for_operation("create governance proposal"))
    }

    pub async fn vote_governance(
        &self,
        numeration: u32,
        vote: bool,
        nft_mints: &[Pubkey],
    ) -> Result<Signature, ClientError> {
        let run = async {
            let payer = self.payer()?;
            let instruction = vote_governance_instruction(
                &self.program_id,
                &payer,
                numeration,
                vote,
                nft_mints,
                self.log_level,
            )?;
            forward_legacy_transaction(
                &self.rpc,
                &self.wallet,
                &[instruction],
                &[],
                TransactionOptions::default(),
            )
            .await
        };
        run.await.map_err(|e| e.for_operation("vote on proposal"))
    }

    pub async fn finalize_governance(&self, numeration: u32) -> Result<Signature, ClientError> {
        let run = async {
            let payer = self.payer()?;
            let instruction = finalize_governance_instruction(
                &self.program_id,
                &payer,
                numeration,
                self.log_level,
            )?;
            forward_legacy_transaction(
                &self.rpc,
                &self.wallet,
                &[instruction],
                &[],
                TransactionOptions::default(),
            )
            .await
        };
        run.await.map_err(|e| e.for_operation("finalize proposal"))
    }

    /// Applies a passed proposal. The proposal account is fetched first
    /// because the instruction's account list depends on what it changes.
    pub async fn execute_governance(&self, numeration: u32) -> Result<Signature, ClientError> {
        let run = async {
            let payer = self.payer()?;
            let proposal = self.governance_data(numeration).await?;
            let instruction = execute_governance_instruction(
                &self.program_id,
                &payer,
                numeration,
                &proposal.governance_type,
                self.log_level,
            )?;
            forward_legacy_transaction(
                &self.rpc,
                &self.wallet,
                &[instruction],
                &[],
                TransactionOptions::default(),
            )
            .await
        };
        run.await.map_err(|e| e.for_operation("execute proposal"))
    }

    /// Initializes this program instance as a validator. When adopting an
    /// existing vote account its authorized withdrawer must be the payer,
    /// checked here before any transaction is built.
    pub async fn register_validator(
        &self,
        validator_id: &Pubkey,
        args: &InitValidatorArgs,
        existing_vote_account: Option<Pubkey>,
    ) -> Result<Signature, ClientError> {
        let run = async {
            let payer = self.payer()?;

            if let Some(vote_account) = existing_vote_account {
                let account = self
                    .rpc
                    .get_account(vote_account)
                    .await?
                    .ok_or(ClientError::AccountNotFound(vote_account))?;
                let withdrawer = authorized_withdrawer_from_vote_account(&account.data)?;
                if withdrawer != payer {
                    return Err(ClientError::AuthorizedWithdrawerMismatch { withdrawer, payer });
                }
            }

            let instruction = register_validator_instruction(
                &self.program_id,
                &payer,
                validator_id,
                args,
                existing_vote_account.as_ref(),
                self.log_level,
            )?;
            forward_legacy_transaction(
                &self.rpc,
                &self.wallet,
                &[instruction],
                &[],
                TransactionOptions::default(),
            )
            .await
        };
        run.await.map_err(|e| e.for_operation("register validator"))
    }

    /// Lists the validator through the registration backend: the backend
    /// verifies the deployed program, builds and co-signs the listing
    /// transaction, and this side adds the payer signature and submits.
    pub async fn list_validator<B: RegistrationBackend>(
        &self,
        backend: &B,
    ) -> Result<Signature, ClientError> {
        let run = async {
            let payer = self.payer()?;

            let status = backend.verify_program(&self.program_id).await?;
            if !status.is_listable() {
                return Err(ClientError::Validation(format!(
                    "program {} is not listable: {status:?}",
                    self.program_id
                )));
            }

            let (vote_account, _) = pda::vote_account(&self.program_id);
            let request = ListingRequest {
                program_id: self.program_id,
                vote_account,
                payer,
            };
            let bytes = backend.build_listing_transaction(&request).await?;
            let transaction = deserialize_versioned_transaction(&bytes)?;

            let transaction = self.wallet.sign_versioned_transaction(transaction).await?;
            let blockhash = *transaction.message.recent_blockhash();
            let bytes = bincode::serialize(&transaction)
                .map_err(|e| ClientError::Serialize(e.to_string()))?;

            // The backend picked the blockhash; borrow the current window
            // end as the confirmation bound.
            let (_, last_valid_block_height) = self.rpc.get_latest_blockhash().await?;
            let signature = self.rpc.send_raw_transaction(&bytes).await?;
            self.rpc
                .confirm_transaction(&signature, &blockhash, last_valid_block_height)
                .await?;
            Ok(signature)
        };
        run.await
            .map_err(|e: ClientError| e.for_operation("list validator"))
    }

    /// Current APY over the recent reward window.
    pub async fn current_apy(&self) -> Result<f64, ClientError> {
        let run = async {
            let general = self.general_data().await?;
            let epoch_info = self.rpc.get_epoch_info().await?;
            Ok(compute_apy(
                &general.vote_rewards,
                epoch_info.epoch,
                epoch_info.slots_in_epoch,
            ))
        };
        run.await.map_err(|e: ClientError| e.for_operation("compute apy"))
    }

    /// Rewards the NFT can claim right now, in lamports.
    pub async fn claimable_rewards(&self, mint: &Pubkey) -> Result<u64, ClientError> {
        let run = async {
            let nft = self.nft_data(mint).await?;
            let general = self.general_data().await?;
            let config = self.validator_config().await?;
            Ok(claimable_rewards(
                &nft,
                &general.vote_rewards,
                config.unit_backing,
            ))
        };
        run.await
            .map_err(|e: ClientError| e.for_operation("compute claimable rewards"))
    }

    /// Percentage share of each rarity tier, ascending.
    pub async fn rarity_spread(&self) -> Result<Vec<RarityShare>, ClientError> {
        let run = async {
            let uris = self.uris_account().await?;
            Ok(rarity_spread(&uris.rarities, &uris.rarity_names))
        };
        run.await
            .map_err(|e: ClientError| e.for_operation("compute rarity spread"))
    }
}
