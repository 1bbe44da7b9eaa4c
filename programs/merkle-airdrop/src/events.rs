use anchor_lang::prelude::*;

/// Emitted when a new distributor instance is created.
#[event]
pub struct AirdropCreated {
    pub distributor: Pubkey,
    pub creator: Pubkey,
    pub seed: u64,
    pub mint: Pubkey,
    pub merkle_root: [u8; 32],
}

/// Emitted when a leaf is claimed.
#[event]
pub struct Claimed {
    pub distributor: Pubkey,
    pub claimant: Pubkey,
    pub amount: u64,
}
