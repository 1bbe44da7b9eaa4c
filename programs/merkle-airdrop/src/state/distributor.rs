use anchor_lang::prelude::*;

/// One airdrop: a Merkle root plus the vault the claims are paid from.
/// PDA: ["distributor", creator, seed] - computable off-chain before the
/// account exists, so the vault can be funded ahead of creation.
#[account]
#[derive(Default)]
pub struct AirdropDistributor {
    /// Identity that created this distributor
    pub creator: Pubkey,

    /// Distinguishes several airdrops by the same creator
    pub seed: u64,

    /// Mint of the distributed token
    pub mint: Pubkey,

    /// Pre-funded token account owned by this PDA
    pub token_vault: Pubkey,

    /// Root of the balance tree; claims must prove membership against it
    pub merkle_root: [u8; 32],

    /// Total amount paid out so far
    pub total_claimed: u64,

    /// Number of leaves claimed so far
    pub num_claimed: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl AirdropDistributor {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // creator
        8 +  // seed
        32 + // mint
        32 + // token_vault
        32 + // merkle_root
        8 +  // total_claimed
        8 +  // num_claimed
        1 +  // bump
        32; // padding for future fields
}
