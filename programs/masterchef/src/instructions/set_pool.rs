use anchor_lang::prelude::*;

use crate::error::ChefError;
use crate::events::PoolWeightSet;
use crate::state::{MasterChef, Pool};

/// Reweight an existing pool
///
/// Owner-only. The pool accrues with its old weight up to now before the
/// swap, so already-earned reward per share is untouched. Unlike creation,
/// a zero weight is allowed here - it parks the pool without deleting it.
///
#[derive(Accounts)]
pub struct SetPool<'info> {
    #[account(
        constraint = owner.key() == master_chef.owner @ ChefError::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(mut)]
    pub master_chef: Account<'info, MasterChef>,

    #[account(
        mut,
        constraint = pool.master_chef == master_chef.key() @ ChefError::InvalidPool
    )]
    pub pool: Account<'info, Pool>,
}

pub fn handler_set_pool(ctx: Context<SetPool>, alloc_point: u64) -> Result<()> {
    let master_chef = &mut ctx.accounts.master_chef;
    let pool = &mut ctx.accounts.pool;

    let now = Clock::get()?.unix_timestamp;
    pool.accrue(
        now,
        master_chef.start_time,
        master_chef.deadline,
        master_chef.reward_per_second,
        master_chef.total_alloc_point,
    )?;

    let old_alloc_point = pool.alloc_point;
    master_chef.swap_alloc_point(old_alloc_point, alloc_point)?;
    pool.alloc_point = alloc_point;

    emit!(PoolWeightSet {
        pool: pool.key(),
        old_alloc_point,
        new_alloc_point: alloc_point,
    });

    msg!(
        "Pool {} reweighted {} -> {}, total_alloc_point={}",
        pool.key(),
        old_alloc_point,
        alloc_point,
        master_chef.total_alloc_point
    );

    Ok(())
}
