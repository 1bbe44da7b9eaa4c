use anchor_lang::prelude::*;

/// Emitted when the reward budget lands and the chef goes live.
#[event]
pub struct ChefFunded {
    pub master_chef: Pubkey,
    pub total_reward: u64,
    pub dev_fee: u64,
    pub reward_per_second: u64,
    pub start_time: i64,
    pub deadline: i64,
}

#[event]
pub struct PoolAdded {
    pub master_chef: Pubkey,
    pub pool: Pubkey,
    pub stake_mint: Pubkey,
    pub alloc_point: u64,
}

#[event]
pub struct PoolWeightSet {
    pub pool: Pubkey,
    pub old_alloc_point: u64,
    pub new_alloc_point: u64,
}

#[event]
pub struct Deposited {
    pub pool: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    /// Pending reward settled as part of the deposit.
    pub reward_paid: u64,
}

#[event]
pub struct Withdrawn {
    pub pool: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    pub fee: u64,
}

#[event]
pub struct Harvested {
    pub pool: Pubkey,
    pub depositor: Pubkey,
    pub reward: u64,
    pub fee: u64,
}

#[event]
pub struct FeesCollected {
    pub master_chef: Pubkey,
    pub amount: u64,
}
