//! Off-chain side of the airdrop: turns a list of `(account, amount)`
//! balances into the Merkle root uploaded on-chain, and produces the proof
//! each claimant submits with their claim.

pub mod balance_tree;
pub mod csv_entry;
pub mod error;
pub mod manifest;
pub mod tree_node;

pub use balance_tree::BalanceTree;
pub use manifest::AirdropManifest;
pub use tree_node::TreeNode;
