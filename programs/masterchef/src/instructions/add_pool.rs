use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{ACC_PRECISION, POOL_SEED, STAKE_VAULT_SEED};
use crate::error::ChefError;
use crate::events::PoolAdded;
use crate::state::{MasterChef, Pool};

/// Create a staking pool for one asset
///
/// Owner-only. The pool is keyed by the staked mint, so there can be at most
/// one pool per asset under a chef. A zero weight is rejected outright, and
/// the weight cap is checked before anything is written.
///
#[derive(Accounts)]
pub struct AddPool<'info> {
    #[account(
        mut,
        constraint = owner.key() == master_chef.owner @ ChefError::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        constraint = master_chef.is_initialized @ ChefError::NotInitialized
    )]
    pub master_chef: Account<'info, MasterChef>,

    /// Mint of the asset staked into the new pool
    pub stake_mint: Account<'info, Mint>,

    /// Pool PDA
    #[account(
        init,
        payer = owner,
        space = Pool::SIZE,
        seeds = [POOL_SEED, master_chef.key().as_ref(), stake_mint.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    /// Vault to hold this pool's staked tokens
    #[account(
        init,
        payer = owner,
        seeds = [STAKE_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_add_pool(ctx: Context<AddPool>, alloc_point: u64) -> Result<()> {
    require!(alloc_point > 0, ChefError::ZeroAllocPoint);

    let master_chef = &mut ctx.accounts.master_chef;
    master_chef.add_alloc_point(alloc_point)?;
    master_chef.pool_count = master_chef
        .pool_count
        .checked_add(1)
        .ok_or(ChefError::MathOverflow)?;

    let now = Clock::get()?.unix_timestamp;
    let pool = &mut ctx.accounts.pool;
    pool.master_chef = master_chef.key();
    pool.stake_mint = ctx.accounts.stake_mint.key();
    pool.stake_vault = ctx.accounts.stake_vault.key();
    pool.alloc_point = alloc_point;
    pool.acc_reward_per_share = 0;
    pool.acc_precision = ACC_PRECISION;
    // rewards never accrue before the program start
    pool.last_reward_time = now.max(master_chef.start_time);
    pool.total_staked = 0;
    pool.bump = ctx.bumps.pool;
    pool.stake_vault_bump = ctx.bumps.stake_vault;

    emit!(PoolAdded {
        master_chef: master_chef.key(),
        pool: pool.key(),
        stake_mint: pool.stake_mint,
        alloc_point,
    });

    msg!(
        "Pool added: mint={}, alloc_point={}, total_alloc_point={}",
        pool.stake_mint,
        alloc_point,
        master_chef.total_alloc_point
    );

    Ok(())
}
