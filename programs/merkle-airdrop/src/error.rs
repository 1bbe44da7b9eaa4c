use anchor_lang::prelude::*;

#[error_code]
pub enum AirdropError {
    #[msg("Invalid Merkle proof")]
    InvalidProof,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Token vault does not match the distributor")]
    VaultMismatch,

    #[msg("Math overflow")]
    MathOverflow,
}
