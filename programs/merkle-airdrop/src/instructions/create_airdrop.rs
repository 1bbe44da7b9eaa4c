use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::DISTRIBUTOR_SEED;
use crate::events::AirdropCreated;
use crate::state::AirdropDistributor;

/// Create a distributor instance
///
/// The address derives from (creator, seed) alone, so it can be computed
/// off-chain before this instruction runs and the vault funded in advance.
/// One creator can run any number of airdrops distinguished by seed.
///
#[derive(Accounts)]
#[instruction(seed: u64)]
pub struct CreateAirdrop<'info> {
    /// Creator of the airdrop (signer, payer)
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Distributor PDA
    #[account(
        init,
        payer = creator,
        space = AirdropDistributor::SIZE,
        seeds = [DISTRIBUTOR_SEED, creator.key().as_ref(), seed.to_le_bytes().as_ref()],
        bump
    )]
    pub distributor: Account<'info, AirdropDistributor>,

    /// Mint of the distributed token
    pub mint: Account<'info, Mint>,

    /// Vault the claims are paid from. Created (and typically funded)
    /// beforehand with the distributor PDA as its authority.
    #[account(
        token::mint = mint,
        token::authority = distributor
    )]
    pub token_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_create_airdrop(
    ctx: Context<CreateAirdrop>,
    seed: u64,
    merkle_root: [u8; 32],
) -> Result<()> {
    let distributor = &mut ctx.accounts.distributor;

    distributor.creator = ctx.accounts.creator.key();
    distributor.seed = seed;
    distributor.mint = ctx.accounts.mint.key();
    distributor.token_vault = ctx.accounts.token_vault.key();
    distributor.merkle_root = merkle_root;
    distributor.total_claimed = 0;
    distributor.num_claimed = 0;
    distributor.bump = ctx.bumps.distributor;

    emit!(AirdropCreated {
        distributor: distributor.key(),
        creator: distributor.creator,
        seed,
        mint: distributor.mint,
        merkle_root,
    });

    msg!(
        "Airdrop created: distributor={}, seed={}, vault={}",
        distributor.key(),
        seed,
        distributor.token_vault
    );

    Ok(())
}
