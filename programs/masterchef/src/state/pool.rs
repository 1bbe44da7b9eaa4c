use anchor_lang::prelude::*;

use crate::error::ChefError;

/// One weighted staking pool over a single depositable asset.
/// PDA: ["pool", master_chef, stake_mint]
#[account]
#[derive(Default)]
pub struct Pool {
    /// The MasterChef this pool belongs to
    pub master_chef: Pubkey,

    /// Mint of the asset staked into this pool; also the pool's identity
    pub stake_mint: Pubkey,

    /// Vault holding the staked tokens
    /// PDA: ["stake_vault", pool]
    pub stake_vault: Pubkey,

    /// Weight determining this pool's share of reward_per_second
    pub alloc_point: u64,

    /// Cumulative reward per staked unit, scaled by acc_precision
    pub acc_reward_per_share: u128,

    /// Fixed-point scale of acc_reward_per_share, persisted per pool
    pub acc_precision: u128,

    /// Last timestamp the accumulator was brought up to date
    pub last_reward_time: i64,

    /// Total tokens currently staked in this pool
    pub total_staked: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Stake vault bump seed
    pub stake_vault_bump: u8,
}

impl Pool {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // master_chef
        32 + // stake_mint
        32 + // stake_vault
        8 +  // alloc_point
        16 + // acc_reward_per_share (u128)
        16 + // acc_precision (u128)
        8 +  // last_reward_time
        8 +  // total_staked
        1 +  // bump
        1 +  // stake_vault_bump
        32; // padding for future fields

    /// Brings `acc_reward_per_share` up to date for the elapsed wall-clock
    /// time. Lazy: called at the top of every pool-touching operation, never
    /// from a timer.
    ///
    /// The accrual window is `[max(last_reward_time, start_time),
    /// min(now, deadline)]` - rewards neither start early nor outlive the
    /// deadline. With nothing staked (or a zero weight) the accumulator is
    /// left alone but `last_reward_time` still advances, which also makes a
    /// second call at the same timestamp a no-op.
    pub fn accrue(
        &mut self,
        now: i64,
        start_time: i64,
        deadline: i64,
        reward_per_second: u64,
        total_alloc_point: u64,
    ) -> Result<()> {
        let cutoff = now.min(deadline);
        let from = self.last_reward_time.max(start_time);
        if cutoff <= from {
            return Ok(());
        }

        if self.total_staked > 0 && self.alloc_point > 0 && total_alloc_point > 0 {
            let elapsed = cutoff
                .checked_sub(from)
                .ok_or(ChefError::MathUnderflow)? as u128;

            let reward = elapsed
                .checked_mul(reward_per_second as u128)
                .ok_or(ChefError::MathOverflow)?
                .checked_mul(self.alloc_point as u128)
                .ok_or(ChefError::MathOverflow)?
                .checked_div(total_alloc_point as u128)
                .ok_or(ChefError::DivisionByZero)?;

            let delta = reward
                .checked_mul(self.acc_precision)
                .ok_or(ChefError::MathOverflow)?
                .checked_div(self.total_staked as u128)
                .ok_or(ChefError::DivisionByZero)?;

            self.acc_reward_per_share = self
                .acc_reward_per_share
                .checked_add(delta)
                .ok_or(ChefError::MathOverflow)?;
        }

        self.last_reward_time = cutoff;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ACC_PRECISION;

    fn pool(alloc_point: u64, total_staked: u64) -> Pool {
        Pool {
            alloc_point,
            acc_precision: ACC_PRECISION,
            last_reward_time: 0,
            total_staked,
            ..Pool::default()
        }
    }

    const DEADLINE: i64 = 1_000_000;

    #[test]
    fn test_accrual_concrete_scenario() {
        // allocPoint=100, one depositor with 1_000_000 units,
        // rewardPerSecond=100_000: after 10 seconds the accumulator grows by
        // exactly 10 * 100_000 * PRECISION / 1_000_000.
        let mut p = pool(100, 1_000_000);
        p.accrue(10, 0, DEADLINE, 100_000, 100).unwrap();

        let expected = 10u128 * 100_000 * ACC_PRECISION / 1_000_000;
        assert_eq!(p.acc_reward_per_share, expected);
        assert_eq!(p.last_reward_time, 10);
    }

    #[test]
    fn test_accrual_is_idempotent_at_same_timestamp() {
        let mut once = pool(100, 500_000);
        once.accrue(50, 0, DEADLINE, 1_000, 100).unwrap();

        let mut twice = pool(100, 500_000);
        twice.accrue(50, 0, DEADLINE, 1_000, 100).unwrap();
        twice.accrue(50, 0, DEADLINE, 1_000, 100).unwrap();

        assert_eq!(once.acc_reward_per_share, twice.acc_reward_per_share);
        assert_eq!(once.last_reward_time, twice.last_reward_time);
    }

    #[test]
    fn test_accrual_split_into_steps_matches_single_step() {
        let mut stepped = pool(100, 100_000);
        stepped.accrue(40, 0, DEADLINE, 7_000, 100).unwrap();
        stepped.accrue(40, 0, DEADLINE, 7_000, 100).unwrap(); // interleaved no-op
        stepped.accrue(70, 0, DEADLINE, 7_000, 100).unwrap();
        stepped.accrue(100, 0, DEADLINE, 7_000, 100).unwrap();

        let mut single = pool(100, 100_000);
        single.accrue(100, 0, DEADLINE, 7_000, 100).unwrap();

        assert_eq!(stepped.acc_reward_per_share, single.acc_reward_per_share);
    }

    #[test]
    fn test_accrual_clamps_to_deadline() {
        let mut at_deadline = pool(100, 1_000);
        at_deadline.accrue(2_000, 0, 2_000, 500, 100).unwrap();

        let mut past_deadline = pool(100, 1_000);
        past_deadline.accrue(50_000, 0, 2_000, 500, 100).unwrap();

        assert_eq!(
            at_deadline.acc_reward_per_share,
            past_deadline.acc_reward_per_share
        );
        assert_eq!(past_deadline.last_reward_time, 2_000);

        // nothing more accrues afterwards
        let before = past_deadline.acc_reward_per_share;
        past_deadline.accrue(60_000, 0, 2_000, 500, 100).unwrap();
        assert_eq!(past_deadline.acc_reward_per_share, before);
    }

    #[test]
    fn test_accrual_does_not_start_before_start_time() {
        let mut p = pool(100, 1_000);
        p.accrue(500, 1_000, DEADLINE, 100, 100).unwrap();
        assert_eq!(p.acc_reward_per_share, 0);

        // once past start, only the in-window seconds count
        p.accrue(1_010, 1_000, DEADLINE, 100, 100).unwrap();
        assert_eq!(p.acc_reward_per_share, 10 * 100 * ACC_PRECISION / 1_000);
    }

    #[test]
    fn test_empty_pool_advances_clock_without_accruing() {
        let mut p = pool(100, 0);
        p.accrue(100, 0, DEADLINE, 1_000, 100).unwrap();
        assert_eq!(p.acc_reward_per_share, 0);
        assert_eq!(p.last_reward_time, 100);

        // a later deposit must not earn for the empty interval
        p.total_staked = 1_000;
        p.accrue(110, 0, DEADLINE, 1_000, 100).unwrap();
        assert_eq!(p.acc_reward_per_share, 10 * 1_000 * ACC_PRECISION / 1_000);
    }

    #[test]
    fn test_zero_weight_pool_accrues_nothing() {
        let mut p = pool(0, 1_000);
        p.accrue(100, 0, DEADLINE, 1_000, 100).unwrap();
        assert_eq!(p.acc_reward_per_share, 0);
        assert_eq!(p.last_reward_time, 100);
    }

    #[test]
    fn test_single_staker_earns_time_times_rate() {
        use crate::state::UserInfo;

        // deposit D, wait T seconds, harvest: reward == D * T * rps / supply
        let deposit = 1_000_000u64;
        let mut p = pool(100, 0);
        let mut u = UserInfo::default();

        u.apply_deposit(deposit, p.acc_reward_per_share, p.acc_precision)
            .unwrap();
        p.total_staked = deposit;

        p.accrue(250, 0, DEADLINE, 2_000, 100).unwrap();
        // interleaved no-op update must not change the payout
        p.accrue(250, 0, DEADLINE, 2_000, 100).unwrap();

        let reward = u
            .apply_harvest(p.acc_reward_per_share, p.acc_precision)
            .unwrap();
        assert_eq!(reward, 250 * 2_000);
    }

    #[test]
    fn test_weight_scales_reward() {
        // two pools, weights 100 and 300 out of 400
        let mut light = pool(100, 1_000);
        let mut heavy = pool(300, 1_000);
        light.accrue(100, 0, DEADLINE, 4_000, 400).unwrap();
        heavy.accrue(100, 0, DEADLINE, 4_000, 400).unwrap();

        assert_eq!(heavy.acc_reward_per_share, 3 * light.acc_reward_per_share);
    }
}
