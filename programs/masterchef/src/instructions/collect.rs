use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::MASTER_CHEF_SEED;
use crate::error::ChefError;
use crate::events::FeesCollected;
use crate::state::MasterChef;

/// Pay the accumulated protocol fees to the fee collector
///
/// Owner-only. Chefs configured with `collect_only_after_deadline` refuse to
/// release the pot while the reward program is still running.
///
#[derive(Accounts)]
pub struct Collect<'info> {
    #[account(
        constraint = owner.key() == master_chef.owner @ ChefError::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(mut)]
    pub master_chef: Account<'info, MasterChef>,

    #[account(
        mut,
        constraint = reward_vault.key() == master_chef.reward_vault @ ChefError::InvalidRewardVault
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// Fee collector's account for the reward mint
    #[account(
        mut,
        token::mint = master_chef.reward_mint,
        constraint = fee_collector_account.owner == master_chef.fee_collector
            @ ChefError::InvalidFeeCollector
    )]
    pub fee_collector_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_collect(ctx: Context<Collect>) -> Result<()> {
    let master_chef = &mut ctx.accounts.master_chef;

    if master_chef.collect_only_after_deadline {
        let now = Clock::get()?.unix_timestamp;
        require!(now > master_chef.deadline, ChefError::CollectBeforeDeadline);
    }

    let amount = master_chef.take_fees()?;

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
                to: ctx.accounts.fee_collector_account.to_account_info(),
                authority: master_chef.to_account_info(),
            },
            &[&chef_seeds[..]],
        ),
        amount,
    )?;

    emit!(FeesCollected {
        master_chef: master_chef.key(),
        amount,
    });

    msg!(
        "Collected {} in fees to {}",
        amount,
        ctx.accounts.fee_collector_account.key()
    );

    Ok(())
}
