use anchor_lang::prelude::*;

use crate::error::ChefError;

/// Per-(pool, depositor) sub-ledger. Derivable from the pool and the
/// depositor alone, created lazily on the first deposit, and mutated only
/// through this program - nobody can forge a settlement on it.
/// PDA: ["user_info", pool, depositor]
#[account]
#[derive(Default)]
pub struct UserInfo {
    /// Pool this position belongs to
    pub pool: Pubkey,

    /// Owner of the position
    pub depositor: Pubkey,

    /// Staked balance
    pub amount: u64,

    /// Accumulator value already settled for this stake, in reward token
    /// units. Goes negative when principal leaves while reward stays
    /// unharvested, which is why it is signed.
    pub reward_debt: i128,

    /// PDA bump seed
    pub bump: u8,
}

impl UserInfo {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // pool
        32 + // depositor
        8 +  // amount
        16 + // reward_debt (i128)
        1 +  // bump
        16; // padding for future fields

    /// Reward this stake has earned since pool inception:
    /// `amount * acc_reward_per_share / precision`.
    fn accrued(&self, acc_reward_per_share: u128, acc_precision: u128) -> Result<i128> {
        let gross = (self.amount as u128)
            .checked_mul(acc_reward_per_share)
            .ok_or(ChefError::MathOverflow)?
            .checked_div(acc_precision)
            .ok_or(ChefError::DivisionByZero)?;
        i128::try_from(gross).map_err(|_| error!(ChefError::MathOverflow))
    }

    /// Unclaimed reward since the last settlement.
    pub fn pending_reward(&self, acc_reward_per_share: u128, acc_precision: u128) -> Result<u64> {
        let pending = self
            .accrued(acc_reward_per_share, acc_precision)?
            .checked_sub(self.reward_debt)
            .ok_or(ChefError::MathUnderflow)?;
        u64::try_from(pending).map_err(|_| error!(ChefError::MathUnderflow))
    }

    /// Adds principal and rebases the debt to the current accumulator.
    /// Returns the pending reward accrued before this deposit; the caller
    /// must pay it out, because the rebase prices it into the new debt.
    pub fn apply_deposit(
        &mut self,
        amount: u64,
        acc_reward_per_share: u128,
        acc_precision: u128,
    ) -> Result<u64> {
        let pending = self.pending_reward(acc_reward_per_share, acc_precision)?;

        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(ChefError::MathOverflow)?;
        self.reward_debt = self.accrued(acc_reward_per_share, acc_precision)?;

        Ok(pending)
    }

    /// Removes principal without settling reward: the debt drops by exactly
    /// the removed stake's share of the accumulator, so the pending amount
    /// survives for a later harvest.
    pub fn apply_withdraw(
        &mut self,
        amount: u64,
        acc_reward_per_share: u128,
        acc_precision: u128,
    ) -> Result<()> {
        require!(amount <= self.amount, ChefError::InsufficientBalance);

        let removed_share = (amount as u128)
            .checked_mul(acc_reward_per_share)
            .ok_or(ChefError::MathOverflow)?
            .checked_div(acc_precision)
            .ok_or(ChefError::DivisionByZero)?;
        let removed_share =
            i128::try_from(removed_share).map_err(|_| error!(ChefError::MathOverflow))?;

        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(ChefError::MathUnderflow)?;
        self.reward_debt = self
            .reward_debt
            .checked_sub(removed_share)
            .ok_or(ChefError::MathUnderflow)?;

        Ok(())
    }

    /// Settles the pending reward and rebases the debt.
    pub fn apply_harvest(
        &mut self,
        acc_reward_per_share: u128,
        acc_precision: u128,
    ) -> Result<u64> {
        let pending = self.pending_reward(acc_reward_per_share, acc_precision)?;
        self.reward_debt = self.accrued(acc_reward_per_share, acc_precision)?;
        Ok(pending)
    }

    /// Removes principal and settles the pending reward in one step. The
    /// returned reward and the principal release belong to the same
    /// settlement and must be paid out together.
    pub fn apply_withdraw_and_harvest(
        &mut self,
        amount: u64,
        acc_reward_per_share: u128,
        acc_precision: u128,
    ) -> Result<u64> {
        require!(amount <= self.amount, ChefError::InsufficientBalance);

        let pending = self.pending_reward(acc_reward_per_share, acc_precision)?;
        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(ChefError::MathUnderflow)?;
        self.reward_debt = self.accrued(acc_reward_per_share, acc_precision)?;

        Ok(pending)
    }

    /// Consumes up to `cap` from the pending pot by raising the debt.
    /// Returns the amount actually taken.
    pub fn skim_pending(
        &mut self,
        cap: u64,
        acc_reward_per_share: u128,
        acc_precision: u128,
    ) -> Result<u64> {
        let pending = self.pending_reward(acc_reward_per_share, acc_precision)?;
        let fee = cap.min(pending);
        self.reward_debt = self
            .reward_debt
            .checked_add(fee as i128)
            .ok_or(ChefError::MathOverflow)?;
        Ok(fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ACC_PRECISION;

    const PREC: u128 = ACC_PRECISION;

    fn user() -> UserInfo {
        UserInfo::default()
    }

    // accumulator value representing `per_unit` reward tokens per staked unit
    fn acc(per_unit: u128) -> u128 {
        per_unit * PREC
    }

    #[test]
    fn test_pending_after_accumulator_growth() {
        let mut u = user();
        u.apply_deposit(1_000, 0, PREC).unwrap();

        // 3 reward tokens per staked unit since the deposit
        assert_eq!(u.pending_reward(acc(3), PREC).unwrap(), 3_000);
    }

    #[test]
    fn test_deposit_returns_prior_pending() {
        let mut u = user();
        assert_eq!(u.apply_deposit(1_000, 0, PREC).unwrap(), 0);

        // the second deposit settles what the first one earned
        let paid = u.apply_deposit(500, acc(2), PREC).unwrap();
        assert_eq!(paid, 2_000);
        assert_eq!(u.amount, 1_500);

        // and afterwards nothing is pending at the same accumulator
        assert_eq!(u.pending_reward(acc(2), PREC).unwrap(), 0);
    }

    #[test]
    fn test_two_stakes_split_proportionally() {
        let mut a = user();
        let mut b = user();
        a.apply_deposit(100, 0, PREC).unwrap();
        b.apply_deposit(300, 0, PREC).unwrap();

        // same pool, same period: rewards split 1:3 like the stakes
        let reward_a = a.apply_harvest(acc(5), PREC).unwrap();
        let reward_b = b.apply_harvest(acc(5), PREC).unwrap();
        assert_eq!(reward_a, 500);
        assert_eq!(reward_b, 1_500);
        assert_eq!(reward_b, 3 * reward_a);
    }

    #[test]
    fn test_harvest_resets_pending() {
        let mut u = user();
        u.apply_deposit(1_000, 0, PREC).unwrap();

        assert_eq!(u.apply_harvest(acc(4), PREC).unwrap(), 4_000);
        assert_eq!(u.apply_harvest(acc(4), PREC).unwrap(), 0);

        // further growth accrues again
        assert_eq!(u.apply_harvest(acc(6), PREC).unwrap(), 2_000);
    }

    #[test]
    fn test_withdraw_preserves_pending() {
        let mut u = user();
        u.apply_deposit(1_000, 0, PREC).unwrap();

        u.apply_withdraw(600, acc(2), PREC).unwrap();
        assert_eq!(u.amount, 400);
        // everything earned by the original 1_000 is still claimable
        assert_eq!(u.pending_reward(acc(2), PREC).unwrap(), 2_000);
    }

    #[test]
    fn test_full_withdraw_keeps_reward_claimable() {
        let mut u = user();
        u.apply_deposit(1_000, 0, PREC).unwrap();

        u.apply_withdraw(1_000, acc(2), PREC).unwrap();
        assert_eq!(u.amount, 0);
        assert!(u.reward_debt < 0);
        assert_eq!(u.apply_harvest(acc(2), PREC).unwrap(), 2_000);
        assert_eq!(u.reward_debt, 0);
    }

    #[test]
    fn test_overdraw_rejected_and_state_unchanged() {
        let mut u = user();
        u.apply_deposit(1_000, 0, PREC).unwrap();
        let debt_before = u.reward_debt;

        assert!(u.apply_withdraw(1_001, acc(1), PREC).is_err());
        assert_eq!(u.amount, 1_000);
        assert_eq!(u.reward_debt, debt_before);

        assert!(u.apply_withdraw_and_harvest(1_001, acc(1), PREC).is_err());
        assert_eq!(u.amount, 1_000);
        assert_eq!(u.reward_debt, debt_before);
    }

    #[test]
    fn test_withdraw_and_harvest_settles_both() {
        let mut u = user();
        u.apply_deposit(1_000, 0, PREC).unwrap();

        let reward = u.apply_withdraw_and_harvest(1_000, acc(3), PREC).unwrap();
        assert_eq!(reward, 3_000);
        assert_eq!(u.amount, 0);
        assert_eq!(u.pending_reward(acc(3), PREC).unwrap(), 0);
    }

    #[test]
    fn test_skim_pending_caps_at_available() {
        let mut u = user();
        u.apply_deposit(1_000, 0, PREC).unwrap();

        // pending is 1_000; a 300 skim leaves 700
        assert_eq!(u.skim_pending(300, acc(1), PREC).unwrap(), 300);
        assert_eq!(u.pending_reward(acc(1), PREC).unwrap(), 700);

        // a skim larger than the pot takes only the pot
        assert_eq!(u.skim_pending(10_000, acc(1), PREC).unwrap(), 700);
        assert_eq!(u.pending_reward(acc(1), PREC).unwrap(), 0);
    }
}
