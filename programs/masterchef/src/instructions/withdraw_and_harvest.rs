use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{MASTER_CHEF_SEED, POOL_SEED, USER_INFO_SEED};
use crate::error::ChefError;
use crate::events::{Harvested, Withdrawn};
use crate::state::{MasterChef, Pool, UserInfo};

/// Withdraw principal and claim the pending reward in one step
///
/// One settlement covers both: the position is updated once, then principal
/// and reward are released from their vaults inside the same instruction.
/// There is no state in which only one of the two has been applied.
///
#[derive(Accounts)]
pub struct WithdrawAndHarvest<'info> {
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

    /// Where the reward goes; any account of the reward mint
    #[account(
        mut,
        token::mint = master_chef.reward_mint
    )]
    pub beneficiary_reward_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = reward_vault.key() == master_chef.reward_vault @ ChefError::InvalidRewardVault
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_withdraw_and_harvest(ctx: Context<WithdrawAndHarvest>, amount: u64) -> Result<()> {
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

    let user_info = &mut ctx.accounts.user_info;
    let reward =
        user_info.apply_withdraw_and_harvest(amount, pool.acc_reward_per_share, pool.acc_precision)?;

    let fee = master_chef.protocol_op_fee.min(reward);
    let payout = reward
        .checked_sub(fee)
        .ok_or(ChefError::MathUnderflow)?;
    master_chef.fee_for_devs = master_chef
        .fee_for_devs
        .checked_add(fee)
        .ok_or(ChefError::MathOverflow)?;

    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(ChefError::MathUnderflow)?;

    // Release the principal, pool PDA signing
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

    // Release the reward, chef PDA signing
    if payout > 0 {
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
                    to: ctx.accounts.beneficiary_reward_account.to_account_info(),
                    authority: master_chef.to_account_info(),
                },
                &[&chef_seeds[..]],
            ),
            payout,
        )?;
    }

    emit!(Withdrawn {
        pool: pool.key(),
        depositor: ctx.accounts.withdrawer.key(),
        amount,
        fee: 0,
    });
    emit!(Harvested {
        pool: pool.key(),
        depositor: ctx.accounts.withdrawer.key(),
        reward: payout,
        fee,
    });

    msg!(
        "Withdrew {} and harvested {} (fee {}) from pool {}",
        amount,
        payout,
        fee,
        pool.key()
    );

    Ok(())
}
