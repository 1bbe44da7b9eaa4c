use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{MASTER_CHEF_SEED, USER_INFO_SEED};
use crate::error::ChefError;
use crate::events::Harvested;
use crate::state::{MasterChef, Pool, UserInfo};

/// Claim the pending reward for one pool
///
/// Pays `amount * acc_reward_per_share / precision - reward_debt`, minus the
/// fixed protocol fee, to the beneficiary account. The accumulator is clamped
/// to the deadline, so harvesting late never pays more than the program
/// earned.
///
#[derive(Accounts)]
pub struct Harvest<'info> {
    pub harvester: Signer<'info>,

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

    /// Harvester's position; the seeds bind it to the signer
    #[account(
        mut,
        seeds = [USER_INFO_SEED, pool.key().as_ref(), harvester.key().as_ref()],
        bump = user_info.bump,
        constraint = user_info.depositor == harvester.key() @ ChefError::Unauthorized
    )]
    pub user_info: Account<'info, UserInfo>,

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

pub fn handler_harvest(ctx: Context<Harvest>) -> Result<()> {
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
    let reward = user_info.apply_harvest(pool.acc_reward_per_share, pool.acc_precision)?;
    require!(reward > 0, ChefError::NothingToHarvest);

    let fee = master_chef.protocol_op_fee.min(reward);
    let payout = reward
        .checked_sub(fee)
        .ok_or(ChefError::MathUnderflow)?;
    master_chef.fee_for_devs = master_chef
        .fee_for_devs
        .checked_add(fee)
        .ok_or(ChefError::MathOverflow)?;

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

    emit!(Harvested {
        pool: pool.key(),
        depositor: ctx.accounts.harvester.key(),
        reward: payout,
        fee,
    });

    msg!(
        "Harvested {} (fee {}) from pool {} for {}",
        payout,
        fee,
        pool.key(),
        ctx.accounts.harvester.key()
    );

    Ok(())
}
