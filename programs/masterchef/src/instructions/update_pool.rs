use anchor_lang::prelude::*;

use crate::error::ChefError;
use crate::state::{MasterChef, Pool};

/// Bring one pool's accumulator up to date
///
/// Public - anyone can poke a pool. Calling it twice in the same second is
/// a no-op, and interleaved calls never change what a later harvest pays.
///
#[derive(Accounts)]
pub struct UpdatePool<'info> {
    pub master_chef: Account<'info, MasterChef>,

    #[account(
        mut,
        constraint = pool.master_chef == master_chef.key() @ ChefError::InvalidPool
    )]
    pub pool: Account<'info, Pool>,
}

pub fn handler_update_pool(ctx: Context<UpdatePool>) -> Result<()> {
    let master_chef = &ctx.accounts.master_chef;
    let pool = &mut ctx.accounts.pool;

    let now = Clock::get()?.unix_timestamp;
    pool.accrue(
        now,
        master_chef.start_time,
        master_chef.deadline,
        master_chef.reward_per_second,
        master_chef.total_alloc_point,
    )?;

    msg!(
        "Pool {} accrued to {}: acc_reward_per_share={}",
        pool.key(),
        pool.last_reward_time,
        pool.acc_reward_per_share
    );

    Ok(())
}
