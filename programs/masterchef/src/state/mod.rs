pub mod master_chef;
pub mod pool;
pub mod user_info;

pub use master_chef::*;
pub use pool::*;
pub use user_info::*;
