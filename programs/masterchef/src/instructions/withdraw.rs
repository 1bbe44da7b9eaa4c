use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{POOL_SEED, USER_INFO_SEED};
use crate::error::ChefError;
use crate::events::Withdrawn;
use crate::state::{MasterChef, Pool, UserInfo};

/// Withdraw staked principal
///
/// The pending reward is not settled here - the debt drops with the stake so
/// it stays claimable by a later harvest. Overdrawing fails with the position
/// untouched. The fixed protocol fee is taken from the pending pot.
///
#[derive(Accounts)]
pub struct Withdraw<'info> {
    pub withdrawer: Signer<'info>,

    #[account(
        mut,
        constraint = master_chef.is_initialized @ ChefError::NotInitialized
    )]
    pub master_chef: Account<'info, MasterChef>,

    #[account(
        mut,
        constraint = pool.master_chef == master_chef.key() @ ChefError::InvalidPool
    )]
    pub pool: Account<'info, Pool>,

    /// Withdrawer's position; the seeds bind it to the signer
    #[account(
        mut,
        seeds = [USER_INFO_SEED, pool.key().as_ref(), withdrawer.key().as_ref()],
        bump = user_info.bump,
        constraint = user_info.depositor == withdrawer.key() @ ChefError::Unauthorized
    )]
    pub user_info: Account<'info, UserInfo>,

    /// Where the principal goes; any account of the staked mint
    #[account(
        mut,
        token::mint = pool.stake_mint
    )]
    pub beneficiary_stake_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = stake_vault.key() == pool.stake_vault @ ChefError::InvalidStakeVault
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    require!(amount > 0, ChefError::InvalidAmount);

    let master_chef = &mut ctx.accounts.master_chef;
    let now = Clock::get()?.unix_timestamp;
    require!(now >= master_chef.start_time, ChefError::NotStarted);

    let pool = &mut ctx.accounts.pool;
    pool.accrue(
        now,
        master_chef.start_time,
        master_chef.deadline,
        master_chef.reward_per_second,
        master_chef.total_alloc_point,
    )?;

    // Settle the position first; the vault release below only happens with
    // the books already updated.
    let user_info = &mut ctx.accounts.user_info;
    user_info.apply_withdraw(amount, pool.acc_reward_per_share, pool.acc_precision)?;

    let fee = user_info.skim_pending(
        master_chef.protocol_op_fee,
        pool.acc_reward_per_share,
        pool.acc_precision,
    )?;
    master_chef.fee_for_devs = master_chef
        .fee_for_devs
        .checked_add(fee)
        .ok_or(ChefError::MathOverflow)?;

    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(ChefError::MathUnderflow)?;

    let chef_key = pool.master_chef;
    let mint_key = pool.stake_mint;
    let pool_seeds = &[
        POOL_SEED,
        chef_key.as_ref(),
        mint_key.as_ref(),
        &[pool.bump],
    ];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.stake_vault.to_account_info(),
                to: ctx.accounts.beneficiary_stake_account.to_account_info(),
                authority: pool.to_account_info(),
            },
            &[&pool_seeds[..]],
        ),
        amount,
    )?;

    emit!(Withdrawn {
        pool: pool.key(),
        depositor: ctx.accounts.withdrawer.key(),
        amount,
        fee,
    });

    msg!(
        "Withdrew {} from pool {}. User stake: {}, pool total: {}",
        amount,
        pool.key(),
        user_info.amount,
        pool.total_staked
    );

    Ok(())
}
