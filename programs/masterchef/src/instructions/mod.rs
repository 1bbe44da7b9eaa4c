pub mod add_pool;
pub mod collect;
pub mod deposit;
pub mod fund_reward;
pub mod harvest;
pub mod initialize;
pub mod set_pool;
pub mod update_pool;
pub mod withdraw;
pub mod withdraw_and_harvest;

pub use add_pool::*;
pub use collect::*;
pub use deposit::*;
pub use fund_reward::*;
pub use harvest::*;
pub use initialize::*;
pub use set_pool::*;
pub use update_pool::*;
pub use withdraw::*;
pub use withdraw_and_harvest::*;
