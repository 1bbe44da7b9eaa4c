use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::ChefError;
use crate::events::ChefFunded;
use crate::state::MasterChef;

/// Fund the reward budget and start the program
///
/// One-shot: a second funding attempt is an error, not a no-op. The owner
/// must provide `total_reward` plus the 0.3% dev fee in a single transfer;
/// if the balance does not cover it the transaction aborts and nothing is
/// applied.
///
#[derive(Accounts)]
pub struct FundReward<'info> {
    /// Chef owner providing the budget
    #[account(
        mut,
        constraint = funder.key() == master_chef.owner @ ChefError::Unauthorized
    )]
    pub funder: Signer<'info>,

    #[account(mut)]
    pub master_chef: Account<'info, MasterChef>,

    /// Owner's reward token account the budget is pulled from
    #[account(
        mut,
        token::mint = master_chef.reward_mint,
        token::authority = funder
    )]
    pub funder_reward_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = reward_vault.key() == master_chef.reward_vault @ ChefError::InvalidRewardVault
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_fund_reward(
    ctx: Context<FundReward>,
    total_reward: u64,
    start_time: i64,
    deadline: i64,
) -> Result<()> {
    let master_chef = &mut ctx.accounts.master_chef;

    require!(!master_chef.is_initialized, ChefError::AlreadyInitialized);
    require!(total_reward > 0, ChefError::InvalidAmount);

    let now = Clock::get()?.unix_timestamp;
    require!(deadline > now, ChefError::InvalidTimeWindow);

    let reward_per_second = MasterChef::derive_reward_rate(total_reward, start_time, deadline)?;
    let dev_fee = MasterChef::dev_fee(total_reward)?;
    let funding = total_reward
        .checked_add(dev_fee)
        .ok_or(ChefError::MathOverflow)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.funder_reward_account.to_account_info(),
                to: ctx.accounts.reward_vault.to_account_info(),
                authority: ctx.accounts.funder.to_account_info(),
            },
        ),
        funding,
    )?;

    master_chef.reward_per_second = reward_per_second;
    master_chef.start_time = start_time;
    master_chef.deadline = deadline;
    master_chef.fee_for_devs = master_chef
        .fee_for_devs
        .checked_add(dev_fee)
        .ok_or(ChefError::MathOverflow)?;
    master_chef.is_initialized = true;

    emit!(ChefFunded {
        master_chef: master_chef.key(),
        total_reward,
        dev_fee,
        reward_per_second,
        start_time,
        deadline,
    });

    msg!(
        "Funded with {} (+{} fee): {} per second from {} to {}",
        total_reward,
        dev_fee,
        reward_per_second,
        start_time,
        deadline
    );

    Ok(())
}
