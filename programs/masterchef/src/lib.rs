use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

// Program ID - will be updated after first deploy
declare_id!("FdS5NH1z7uPsEFEjo7onEc1U8q2S6iwVEfdbrg5kT3cH");

#[program]
pub mod masterchef {
    use super::*;

    /// Create a MasterChef instance
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `seed` - Distinguishes several chefs run by the same owner
    /// * `protocol_op_fee` - Fixed fee skimmed from pending rewards on withdraw/harvest
    /// * `collect_only_after_deadline` - Gate fee collection until the program ends
    ///
    pub fn initialize(
        ctx: Context<Initialize>,
        seed: u64,
        protocol_op_fee: u64,
        collect_only_after_deadline: bool,
    ) -> Result<()> {
        instructions::initialize::handler_initialize(
            ctx,
            seed,
            protocol_op_fee,
            collect_only_after_deadline,
        )
    }

    /// Fund the reward budget and start the program (one-shot)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `total_reward` - Budget paid out evenly between start_time and deadline
    /// * `start_time` - Rewards accrue from this timestamp
    /// * `deadline` - Accrual never advances past this timestamp
    ///
    pub fn fund_reward(
        ctx: Context<FundReward>,
        total_reward: u64,
        start_time: i64,
        deadline: i64,
    ) -> Result<()> {
        instructions::fund_reward::handler_fund_reward(ctx, total_reward, start_time, deadline)
    }

    /// Create a staking pool for one asset (owner only)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `alloc_point` - Pool weight; must be non-zero and fit under the cap
    ///
    pub fn add_pool(ctx: Context<AddPool>, alloc_point: u64) -> Result<()> {
        instructions::add_pool::handler_add_pool(ctx, alloc_point)
    }

    /// Reweight an existing pool (owner only)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `alloc_point` - New weight; zero parks the pool
    ///
    pub fn set_pool(ctx: Context<SetPool>, alloc_point: u64) -> Result<()> {
        instructions::set_pool::handler_set_pool(ctx, alloc_point)
    }

    /// Bring one pool's reward accumulator up to date (public)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    ///
    pub fn update_pool(ctx: Context<UpdatePool>) -> Result<()> {
        instructions::update_pool::handler_update_pool(ctx)
    }

    /// Stake tokens into a pool
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of the pool's asset to stake
    ///
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler_deposit(ctx, amount)
    }

    /// Withdraw staked principal; pending reward stays claimable
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of principal to release
    ///
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw::handler_withdraw(ctx, amount)
    }

    /// Claim the pending reward for one pool
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    ///
    pub fn harvest(ctx: Context<Harvest>) -> Result<()> {
        instructions::harvest::handler_harvest(ctx)
    }

    /// Withdraw principal and claim the pending reward atomically
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of principal to release
    ///
    pub fn withdraw_and_harvest(ctx: Context<WithdrawAndHarvest>, amount: u64) -> Result<()> {
        instructions::withdraw_and_harvest::handler_withdraw_and_harvest(ctx, amount)
    }

    /// Pay the accumulated protocol fees to the fee collector (owner only)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    ///
    pub fn collect(ctx: Context<Collect>) -> Result<()> {
        instructions::collect::handler_collect(ctx)
    }
}
