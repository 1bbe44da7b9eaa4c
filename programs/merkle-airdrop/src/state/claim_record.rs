use anchor_lang::prelude::*;

/// Marks one leaf as claimed.
/// PDA: ["claim", distributor, claimant] - the account's existence is the
/// flag: `claim` creates it with `init`, so a second claim for the same leaf
/// fails before any tokens move.
#[account]
#[derive(Default)]
pub struct ClaimRecord {
    /// Distributor the claim was made against
    pub distributor: Pubkey,

    /// Account that claimed
    pub claimant: Pubkey,

    /// Amount that was paid out
    pub amount: u64,

    /// When the claim happened
    pub claimed_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl ClaimRecord {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // distributor
        32 + // claimant
        8 +  // amount
        8 +  // claimed_at
        1 +  // bump
        16; // padding for future fields
}
