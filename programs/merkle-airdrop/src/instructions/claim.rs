use anchor_lang::prelude::*;
use solana_program::hash::hashv;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use merkle_verify::{verify, LEAF_PREFIX};

use crate::constants::{CLAIM_SEED, DISTRIBUTOR_SEED};
use crate::error::AirdropError;
use crate::events::Claimed;
use crate::state::{AirdropDistributor, ClaimRecord};

/// Claim one airdrop balance
///
/// The leaf is recomputed from the signer and the claimed amount, so a proof
/// only ever pays the account and amount it was generated for. The claim
/// record PDA is created with `init`: checking and marking the leaf as
/// claimed happen atomically, and a repeat claim dies before any transfer.
///
#[derive(Accounts)]
pub struct Claim<'info> {
    /// Who is claiming; must match the leaf
    #[account(mut)]
    pub claimant: Signer<'info>,

    #[account(mut)]
    pub distributor: Account<'info, AirdropDistributor>,

    /// Claimed-once flag for (distributor, claimant)
    #[account(
        init,
        payer = claimant,
        space = ClaimRecord::SIZE,
        seeds = [CLAIM_SEED, distributor.key().as_ref(), claimant.key().as_ref()],
        bump
    )]
    pub claim_record: Account<'info, ClaimRecord>,

    #[account(
        mut,
        constraint = token_vault.key() == distributor.token_vault @ AirdropError::VaultMismatch
    )]
    pub token_vault: Account<'info, TokenAccount>,

    /// Claimant's account for the distributed token
    #[account(
        mut,
        token::mint = distributor.mint,
        token::authority = claimant
    )]
    pub claimant_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Leaf for `(claimant, amount)`: the balance hash under the leaf domain tag.
/// Must stay in lockstep with the off-chain tree builder.
pub fn claim_leaf(claimant: &Pubkey, amount: u64) -> [u8; 32] {
    let balance = hashv(&[&claimant.to_bytes(), &amount.to_le_bytes()]);
    hashv(&[LEAF_PREFIX, &balance.to_bytes()]).to_bytes()
}

pub fn handler_claim(ctx: Context<Claim>, amount: u64, proof: Vec<[u8; 32]>) -> Result<()> {
    require!(amount > 0, AirdropError::InvalidAmount);

    let distributor = &mut ctx.accounts.distributor;

    let leaf = claim_leaf(&ctx.accounts.claimant.key(), amount);
    require!(
        verify(&proof, distributor.merkle_root, leaf),
        AirdropError::InvalidProof
    );

    let claim_record = &mut ctx.accounts.claim_record;
    claim_record.distributor = distributor.key();
    claim_record.claimant = ctx.accounts.claimant.key();
    claim_record.amount = amount;
    claim_record.claimed_at = Clock::get()?.unix_timestamp;
    claim_record.bump = ctx.bumps.claim_record;

    distributor.total_claimed = distributor
        .total_claimed
        .checked_add(amount)
        .ok_or(AirdropError::MathOverflow)?;
    distributor.num_claimed = distributor
        .num_claimed
        .checked_add(1)
        .ok_or(AirdropError::MathOverflow)?;

    let creator_key = distributor.creator;
    let seed_bytes = distributor.seed.to_le_bytes();
    let distributor_seeds = &[
        DISTRIBUTOR_SEED,
        creator_key.as_ref(),
        seed_bytes.as_ref(),
        &[distributor.bump],
    ];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.token_vault.to_account_info(),
                to: ctx.accounts.claimant_token_account.to_account_info(),
                authority: distributor.to_account_info(),
            },
            &[&distributor_seeds[..]],
        ),
        amount,
    )?;

    emit!(Claimed {
        distributor: distributor.key(),
        claimant: ctx.accounts.claimant.key(),
        amount,
    });

    msg!(
        "Claimed {} for {} from distributor {}",
        amount,
        ctx.accounts.claimant.key(),
        distributor.key()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use airdrop_merkle_tree::{BalanceTree, TreeNode};

    #[test]
    fn test_claim_leaf_matches_tree_builder() {
        let claimant = Pubkey::new_unique();
        let node = TreeNode::new(claimant, 12_345);
        assert_eq!(claim_leaf(&claimant, 12_345), node.leaf());
    }

    #[test]
    fn test_generated_proofs_pass_the_claim_check() {
        let entries: Vec<TreeNode> = (0..5)
            .map(|i| TreeNode::new(Pubkey::new_unique(), (i + 1) * 100))
            .collect();
        let tree = BalanceTree::new(&entries).unwrap();

        for entry in &entries {
            let proof = tree.proof_for(entry).unwrap();
            let leaf = claim_leaf(&entry.account, entry.amount);
            assert!(verify(&proof, tree.root(), leaf));
        }
    }

    #[test]
    fn test_wrong_claimant_or_amount_fails() {
        let entries: Vec<TreeNode> = (0..4)
            .map(|i| TreeNode::new(Pubkey::new_unique(), (i + 1) * 100))
            .collect();
        let tree = BalanceTree::new(&entries).unwrap();
        let proof = tree.proof_for(&entries[0]).unwrap();

        let wrong_amount = claim_leaf(&entries[0].account, entries[0].amount + 1);
        assert!(!verify(&proof, tree.root(), wrong_amount));

        let wrong_claimant = claim_leaf(&Pubkey::new_unique(), entries[0].amount);
        assert!(!verify(&proof, tree.root(), wrong_claimant));
    }
}
