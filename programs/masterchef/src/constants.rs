// PDA Seeds
pub const MASTER_CHEF_SEED: &[u8] = b"master_chef";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const POOL_SEED: &[u8] = b"pool";
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";
pub const USER_INFO_SEED: &[u8] = b"user_info";

// Fixed-point precision for acc_reward_per_share (12 decimals).
// Persisted per pool so pools over tokens with different decimal counts
// never contaminate each other's accounting.
pub const ACC_PRECISION: u128 = 1_000_000_000_000;

// Hard cap on the sum of all pool weights
pub const TOTAL_ALLOC_POINT_CAP: u64 = 10_000;

// Dev fee skimmed on top of the reward funding: 3 / 1000 = 0.3%
pub const DEV_FEE_NUMERATOR: u64 = 3;
pub const DEV_FEE_DENOMINATOR: u64 = 1_000;
