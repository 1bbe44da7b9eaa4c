// PDA Seeds
pub const DISTRIBUTOR_SEED: &[u8] = b"distributor";
pub const CLAIM_SEED: &[u8] = b"claim";
