//! Read models derived from on-chain reward history.
//!
//! Lamport amounts and epoch numbers stay in 64/128-bit integer arithmetic;
//! floating point is only used for the final APY/percentage ratios.

use crate::{
    accounts::{NftData, VoteReward},
    constants::{
        APY_WINDOW_EPOCHS, APY_WINDOW_MARGIN_EPOCHS, SECONDS_PER_DAY, SECONDS_PER_SLOT,
    },
};

/// Projected yearly percentage yield from the recent reward history.
///
/// Averages `nft_holders_reward / total_stake` over the entries within
/// `APY_WINDOW_EPOCHS + APY_WINDOW_MARGIN_EPOCHS` epochs of `latest_epoch`,
/// scales by epochs-per-year and truncates to two decimal places. Returns 0
/// when no entry qualifies.
pub fn compute_apy(vote_rewards: &[VoteReward], latest_epoch: u64, slots_per_epoch: u64) -> f64 {
    let window = APY_WINDOW_EPOCHS + APY_WINDOW_MARGIN_EPOCHS;
    let per_epoch_rates: Vec<f64> = vote_rewards
        .iter()
        .filter(|reward| latest_epoch.saturating_sub(reward.epoch_number) <= window)
        .filter(|reward| reward.total_stake > 0)
        .map(|reward| reward.nft_holders_reward as f64 / reward.total_stake as f64)
        .collect();
    if per_epoch_rates.is_empty() {
        return 0.0;
    }

    let mean = per_epoch_rates.iter().sum::<f64>() / per_epoch_rates.len() as f64;
    let epoch_duration_days = slots_per_epoch as f64 * SECONDS_PER_SLOT / SECONDS_PER_DAY;
    let epochs_per_year = 365.0 / epoch_duration_days;
    let apy = mean * epochs_per_year * 100.0;
    (apy * 100.0).trunc() / 100.0
}

/// Lamports claimable by a delegated NFT backed by `unit_backing` lamports.
///
/// Sums the NFT-holder share of every epoch from
/// `max(last_delegation_epoch, last_withdrawal_epoch)` (inclusive) to the
/// newest entry. An NFT with no delegation history earns nothing.
pub fn claimable_rewards(nft: &NftData, vote_rewards: &[VoteReward], unit_backing: u64) -> u64 {
    let start_epoch = match nft.last_delegation_epoch.max(nft.last_withdrawal_epoch) {
        Some(epoch) => epoch,
        None => return 0,
    };

    let total: u128 = vote_rewards
        .iter()
        .filter(|reward| reward.epoch_number >= start_epoch && reward.total_stake > 0)
        .map(|reward| {
            reward.nft_holders_reward as u128 * unit_backing as u128 / reward.total_stake as u128
        })
        .sum();
    total.min(u64::MAX as u128) as u64
}

#[derive(Clone, Debug, PartialEq)]
pub struct RarityShare {
    pub name: String,
    pub percentage: f64,
}

/// Percentage share of each rarity, ascending by percentage.
pub fn rarity_spread(rarities: &[u16], rarity_names: &[String]) -> Vec<RarityShare> {
    let total: u32 = rarities.iter().map(|count| *count as u32).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<RarityShare> = rarities
        .iter()
        .zip(rarity_names)
        .map(|(count, name)| RarityShare {
            name: name.clone(),
            percentage: *count as f64 * 100.0 / total as f64,
        })
        .collect();
    shares.sort_by(|a, b| a.percentage.total_cmp(&b.percentage));
    shares
}
