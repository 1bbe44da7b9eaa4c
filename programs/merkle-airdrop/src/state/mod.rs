pub mod claim_record;
pub mod distributor;

pub use claim_record::*;
pub use distributor::*;
