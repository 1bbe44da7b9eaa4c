use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

// Program ID - will be updated after first deploy
declare_id!("meRjbQXFNf5En86FXT2YPz1dQzLj4Yb3xK8u1MVhqkd");

#[program]
pub mod merkle_airdrop {
    use super::*;

    /// Create a distributor for one airdrop
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `seed` - Distinguishes several airdrops by the same creator
    /// * `merkle_root` - Root of the balance tree claims are verified against
    ///
    pub fn create_airdrop(
        ctx: Context<CreateAirdrop>,
        seed: u64,
        merkle_root: [u8; 32],
    ) -> Result<()> {
        instructions::create_airdrop::handler_create_airdrop(ctx, seed, merkle_root)
    }

    /// Claim one balance from a distributor
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Claimed amount; must match the leaf exactly
    /// * `proof` - Sibling hashes from the leaf up to the root
    ///
    pub fn claim(ctx: Context<Claim>, amount: u64, proof: Vec<[u8; 32]>) -> Result<()> {
        instructions::claim::handler_claim(ctx, amount, proof)
    }
}
