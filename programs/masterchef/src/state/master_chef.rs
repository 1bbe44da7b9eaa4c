use anchor_lang::prelude::*;

use crate::constants::{DEV_FEE_DENOMINATOR, DEV_FEE_NUMERATOR, TOTAL_ALLOC_POINT_CAP};
use crate::error::ChefError;

/// Top-level ledger: owns the pools, the reward budget and the fee pot.
/// PDA: ["master_chef", owner, seed]
#[account]
#[derive(Default)]
pub struct MasterChef {
    /// Owner; the only identity allowed to fund, manage pools and collect fees
    pub owner: Pubkey,

    /// Distinguishes several chefs run by the same owner
    pub seed: u64,

    /// Mint the rewards are paid in
    pub reward_mint: Pubkey,

    /// Vault holding the reward budget and the fee pot
    /// PDA: ["reward_vault", master_chef]
    pub reward_vault: Pubkey,

    /// Identity the collected fees are paid to
    pub fee_collector: Pubkey,

    /// Flips to true when the reward budget lands; never reverts
    pub is_initialized: bool,

    /// Derived at funding: total_reward / (deadline - start_time)
    pub reward_per_second: u64,

    /// Rewards accrue from this timestamp
    pub start_time: i64,

    /// Accrual never advances past this timestamp
    pub deadline: i64,

    /// Sum of all pool weights, capped at TOTAL_ALLOC_POINT_CAP
    pub total_alloc_point: u64,

    /// Number of pools created under this chef
    pub pool_count: u64,

    /// Accumulated protocol fees awaiting Collect, in reward token units
    pub fee_for_devs: u64,

    /// Fixed fee skimmed from the pending-reward pot on every
    /// withdraw/harvest, in reward token units
    pub protocol_op_fee: u64,

    /// When true, Collect is rejected until the deadline has passed
    pub collect_only_after_deadline: bool,

    /// PDA bump seed
    pub bump: u8,

    /// Reward vault bump seed
    pub reward_vault_bump: u8,
}

impl MasterChef {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // owner
        8 +  // seed
        32 + // reward_mint
        32 + // reward_vault
        32 + // fee_collector
        1 +  // is_initialized
        8 +  // reward_per_second
        8 +  // start_time
        8 +  // deadline
        8 +  // total_alloc_point
        8 +  // pool_count
        8 +  // fee_for_devs
        8 +  // protocol_op_fee
        1 +  // collect_only_after_deadline
        1 +  // bump
        1 +  // reward_vault_bump
        64; // padding for future fields

    /// Dev fee charged on top of the reward budget at funding time.
    pub fn dev_fee(total_reward: u64) -> Result<u64> {
        let fee = (total_reward as u128)
            .checked_mul(DEV_FEE_NUMERATOR as u128)
            .ok_or(ChefError::MathOverflow)?
            .checked_div(DEV_FEE_DENOMINATOR as u128)
            .ok_or(ChefError::DivisionByZero)?;
        u64::try_from(fee).map_err(|_| error!(ChefError::MathOverflow))
    }

    /// Reward rate implied by paying out `total_reward` evenly over
    /// `[start_time, deadline]`. The window must be non-empty and the rate
    /// must not round down to zero.
    pub fn derive_reward_rate(total_reward: u64, start_time: i64, deadline: i64) -> Result<u64> {
        let duration = deadline
            .checked_sub(start_time)
            .ok_or(ChefError::MathUnderflow)?;
        require!(duration > 0, ChefError::InvalidTimeWindow);

        let rate = (total_reward as u128)
            .checked_div(duration as u128)
            .ok_or(ChefError::DivisionByZero)?;
        require!(rate > 0, ChefError::InvalidRewardRate);

        u64::try_from(rate).map_err(|_| error!(ChefError::MathOverflow))
    }

    /// Registers a new pool weight, enforcing the global cap before any
    /// state changes.
    pub fn add_alloc_point(&mut self, points: u64) -> Result<()> {
        let total = self
            .total_alloc_point
            .checked_add(points)
            .ok_or(ChefError::MathOverflow)?;
        require!(total <= TOTAL_ALLOC_POINT_CAP, ChefError::AllocPointCapExceeded);

        self.total_alloc_point = total;
        Ok(())
    }

    /// Replaces one pool's weight inside the global total, same cap.
    pub fn swap_alloc_point(&mut self, old_points: u64, new_points: u64) -> Result<()> {
        let total = self
            .total_alloc_point
            .checked_sub(old_points)
            .ok_or(ChefError::MathUnderflow)?
            .checked_add(new_points)
            .ok_or(ChefError::MathOverflow)?;
        require!(total <= TOTAL_ALLOC_POINT_CAP, ChefError::AllocPointCapExceeded);

        self.total_alloc_point = total;
        Ok(())
    }

    /// Collectable fee pot; zeroed by a successful Collect.
    pub fn take_fees(&mut self) -> Result<u64> {
        require!(self.fee_for_devs > 0, ChefError::NothingToCollect);
        let amount = self.fee_for_devs;
        self.fee_for_devs = 0;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_fee_is_three_permille() {
        assert_eq!(MasterChef::dev_fee(1_000_000).unwrap(), 3_000);
        assert_eq!(MasterChef::dev_fee(1_000).unwrap(), 3);
        // rounds down below the denominator
        assert_eq!(MasterChef::dev_fee(999).unwrap(), 2);
        assert_eq!(MasterChef::dev_fee(0).unwrap(), 0);
    }

    #[test]
    fn test_reward_rate_derivation() {
        // 2_000_000 over 2000 seconds
        assert_eq!(
            MasterChef::derive_reward_rate(2_000_000, 1_000, 3_000).unwrap(),
            1_000
        );
    }

    #[test]
    fn test_reward_rate_rejects_empty_window() {
        assert!(MasterChef::derive_reward_rate(1_000, 3_000, 3_000).is_err());
        assert!(MasterChef::derive_reward_rate(1_000, 3_000, 2_000).is_err());
    }

    #[test]
    fn test_reward_rate_rejects_zero_rate() {
        // budget smaller than the window rounds to zero per second
        assert!(MasterChef::derive_reward_rate(10, 0, 1_000).is_err());
    }

    #[test]
    fn test_alloc_point_cap_enforced() {
        let mut chef = MasterChef::default();
        chef.add_alloc_point(6_000).unwrap();
        chef.add_alloc_point(4_000).unwrap();
        assert_eq!(chef.total_alloc_point, 10_000);

        // exceeding the cap is rejected with the total unchanged
        assert!(chef.add_alloc_point(1).is_err());
        assert_eq!(chef.total_alloc_point, 10_000);
    }

    #[test]
    fn test_swap_alloc_point() {
        let mut chef = MasterChef::default();
        chef.add_alloc_point(100).unwrap();
        chef.add_alloc_point(200).unwrap();

        chef.swap_alloc_point(100, 500).unwrap();
        assert_eq!(chef.total_alloc_point, 700);

        chef.swap_alloc_point(500, 0).unwrap();
        assert_eq!(chef.total_alloc_point, 200);

        assert!(chef.swap_alloc_point(200, 10_001).is_err());
        assert_eq!(chef.total_alloc_point, 200);
    }

    #[test]
    fn test_take_fees() {
        let mut chef = MasterChef {
            fee_for_devs: 42,
            ..MasterChef::default()
        };
        assert_eq!(chef.take_fees().unwrap(), 42);
        assert_eq!(chef.fee_for_devs, 0);
        assert!(chef.take_fees().is_err());
    }
}
