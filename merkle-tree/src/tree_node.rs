use std::str::FromStr;

use merkle_verify::LEAF_PREFIX;
use serde::{Deserialize, Serialize};
use solana_program::{hash::hashv, pubkey::Pubkey};

use crate::csv_entry::CsvEntry;

/// One claimable balance in the airdrop.
#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Account entitled to the balance; signs the claim on-chain.
    pub account: Pubkey,
    /// Amount the account can claim, in token base units.
    pub amount: u64,
    /// Proof of inclusion, filled in once the tree is built.
    pub proof: Option<Vec<[u8; 32]>>,
}

impl TreeNode {
    pub fn new(account: Pubkey, amount: u64) -> Self {
        Self {
            account,
            amount,
            proof: None,
        }
    }

    /// Inner balance hash: `hash(account || amount_le)`. The on-chain claim
    /// check recomputes exactly this from the instruction arguments.
    pub fn hash(&self) -> [u8; 32] {
        hashv(&[&self.account.to_bytes(), &self.amount.to_le_bytes()]).to_bytes()
    }

    /// The leaf as it appears in the tree: the inner hash under the leaf
    /// domain tag.
    pub fn leaf(&self) -> [u8; 32] {
        hashv(&[LEAF_PREFIX, &self.hash()]).to_bytes()
    }
}

impl From<CsvEntry> for TreeNode {
    fn from(entry: CsvEntry) -> Self {
        Self {
            account: Pubkey::from_str(entry.account.as_str()).unwrap(),
            amount: entry.amount,
            proof: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_round_trip() {
        let node = TreeNode::new(Pubkey::new_unique(), 42);
        let serialized = serde_json::to_string(&node).unwrap();
        let deserialized: TreeNode = serde_json::from_str(&serialized).unwrap();
        assert_eq!(node, deserialized);
    }

    #[test]
    fn test_leaf_depends_on_amount() {
        let account = Pubkey::new_unique();
        let a = TreeNode::new(account, 100).leaf();
        let b = TreeNode::new(account, 101).leaf();
        assert_ne!(a, b);
    }

    #[test]
    fn test_leaf_is_domain_tagged() {
        let node = TreeNode::new(Pubkey::new_unique(), 7);
        assert_ne!(node.hash(), node.leaf());
    }
}
