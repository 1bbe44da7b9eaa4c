use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{MASTER_CHEF_SEED, REWARD_VAULT_SEED};
use crate::state::MasterChef;

/// Create a MasterChef instance
///
/// The chef address derives from (owner, seed), so one owner can run several
/// independent reward programs side by side. The instance starts
/// uninitialized; no user operation is accepted until `fund_reward` lands
/// the budget.
///
#[derive(Accounts)]
#[instruction(seed: u64)]
pub struct Initialize<'info> {
    /// Owner of the new chef (signer, payer)
    #[account(mut)]
    pub owner: Signer<'info>,

    /// MasterChef PDA
    #[account(
        init,
        payer = owner,
        space = MasterChef::SIZE,
        seeds = [MASTER_CHEF_SEED, owner.key().as_ref(), seed.to_le_bytes().as_ref()],
        bump
    )]
    pub master_chef: Account<'info, MasterChef>,

    /// Mint the rewards will be paid in
    pub reward_mint: Account<'info, Mint>,

    /// Vault that will hold the reward budget and the fee pot
    #[account(
        init,
        payer = owner,
        seeds = [REWARD_VAULT_SEED, master_chef.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = master_chef
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// CHECK: identity the collected fees are paid to, stored as-is
    pub fee_collector: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(
    ctx: Context<Initialize>,
    seed: u64,
    protocol_op_fee: u64,
    collect_only_after_deadline: bool,
) -> Result<()> {
    let master_chef = &mut ctx.accounts.master_chef;

    master_chef.owner = ctx.accounts.owner.key();
    master_chef.seed = seed;
    master_chef.reward_mint = ctx.accounts.reward_mint.key();
    master_chef.reward_vault = ctx.accounts.reward_vault.key();
    master_chef.fee_collector = ctx.accounts.fee_collector.key();

    master_chef.is_initialized = false;
    master_chef.reward_per_second = 0;
    master_chef.start_time = 0;
    master_chef.deadline = 0;
    master_chef.total_alloc_point = 0;
    master_chef.pool_count = 0;
    master_chef.fee_for_devs = 0;

    master_chef.protocol_op_fee = protocol_op_fee;
    master_chef.collect_only_after_deadline = collect_only_after_deadline;

    master_chef.bump = ctx.bumps.master_chef;
    master_chef.reward_vault_bump = ctx.bumps.reward_vault;

    msg!(
        "MasterChef created: owner={}, seed={}, reward_mint={}",
        master_chef.owner,
        master_chef.seed,
        master_chef.reward_mint
    );

    Ok(())
}
