use anchor_lang::prelude::*;

#[error_code]
pub enum ChefError {
    // Lifecycle
    #[msg("Contract is not initialized")]
    NotInitialized,

    #[msg("Contract is already initialized")]
    AlreadyInitialized,

    #[msg("Reward period has not started")]
    NotStarted,

    #[msg("Deadline must be in the future and after the start time")]
    InvalidTimeWindow,

    #[msg("Derived reward per second is zero")]
    InvalidRewardRate,

    // Pools
    #[msg("Pool weight must be greater than zero")]
    ZeroAllocPoint,

    #[msg("Total pool weight would exceed the cap")]
    AllocPointCapExceeded,

    #[msg("Pool does not belong to this MasterChef")]
    InvalidPool,

    // Amounts
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Insufficient staked balance")]
    InsufficientBalance,

    #[msg("No pending reward to harvest")]
    NothingToHarvest,

    // Authorization
    #[msg("Unauthorized: owner only")]
    Unauthorized,

    // Fee collection
    #[msg("Cannot collect fees before the deadline")]
    CollectBeforeDeadline,

    #[msg("No accumulated fees to collect")]
    NothingToCollect,

    #[msg("Fee collector account mismatch")]
    InvalidFeeCollector,

    // Account validation
    #[msg("Invalid reward vault")]
    InvalidRewardVault,

    #[msg("Invalid stake vault")]
    InvalidStakeVault,

    // Math
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,
}
