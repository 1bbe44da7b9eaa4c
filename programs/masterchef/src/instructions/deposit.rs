use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{MASTER_CHEF_SEED, USER_INFO_SEED};
use crate::error::ChefError;
use crate::events::Deposited;
use crate::state::{MasterChef, Pool, UserInfo};

/// Stake tokens into a pool
///
/// Rejected while the chef is unfunded or before the start time; principal
/// never moves on a rejected request. The position account is created on the
/// first deposit, derived from (pool, depositor). Reward accrued by the
/// existing stake is settled to the depositor in the same step, because the
/// debt rebase prices it in.
///
#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

    #[account(
        constraint = master_chef.is_initialized @ ChefError::NotInitialized
    )]
    pub master_chef: Account<'info, MasterChef>,

    #[account(
        mut,
        constraint = pool.master_chef == master_chef.key() @ ChefError::InvalidPool
    )]
    pub pool: Account<'info, Pool>,

    /// Depositor's position, created on first touch
    #[account(
        init_if_needed,
        payer = depositor,
        space = UserInfo::SIZE,
        seeds = [USER_INFO_SEED, pool.key().as_ref(), depositor.key().as_ref()],
        bump
    )]
    pub user_info: Account<'info, UserInfo>,

    /// Depositor's account for the staked asset
    #[account(
        mut,
        token::mint = pool.stake_mint,
        token::authority = depositor
    )]
    pub depositor_stake_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = stake_vault.key() == pool.stake_vault @ ChefError::InvalidStakeVault
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Depositor's account for the reward asset, receives any settled reward
    #[account(
        mut,
        token::mint = master_chef.reward_mint,
        token::authority = depositor
    )]
    pub depositor_reward_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = reward_vault.key() == master_chef.reward_vault @ ChefError::InvalidRewardVault
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    require!(amount > 0, ChefError::InvalidAmount);

    let master_chef = &ctx.accounts.master_chef;
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

    // Pull the principal in before touching the books
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.depositor_stake_account.to_account_info(),
                to: ctx.accounts.stake_vault.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        amount,
    )?;

    let user_info = &mut ctx.accounts.user_info;
    if user_info.depositor == Pubkey::default() {
        user_info.pool = pool.key();
        user_info.depositor = ctx.accounts.depositor.key();
        user_info.bump = ctx.bumps.user_info;
    }

    let reward_paid = user_info.apply_deposit(amount, pool.acc_reward_per_share, pool.acc_precision)?;
    pool.total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(ChefError::MathOverflow)?;

    if reward_paid > 0 {
        let owner_key = master_chef.owner;
        let seed_bytes = master_chef.seed.to_le_bytes();
        let chef_seeds = &[
            MASTER_CHEF_SEED,
            owner_key.as_ref(),
            seed_bytes.as_ref(),
            &[master_chef.bump],
        ];
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.reward_vault.to_account_info(),
                    to: ctx.accounts.depositor_reward_account.to_account_info(),
                    authority: master_chef.to_account_info(),
                },
                &[&chef_seeds[..]],
            ),
            reward_paid,
        )?;
    }

    emit!(Deposited {
        pool: pool.key(),
        depositor: ctx.accounts.depositor.key(),
        amount,
        reward_paid,
    });

    msg!(
        "Deposited {} into pool {}. User stake: {}, pool total: {}",
        amount,
        pool.key(),
        user_info.amount,
        pool.total_staked
    );

    Ok(())
}
