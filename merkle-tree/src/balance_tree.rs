use merkle_verify::{hash_pair, LEAF_PREFIX};
use solana_program::hash::hashv;

use crate::{
    error::{MerkleTreeError, Result},
    tree_node::TreeNode,
};

/// Complete binary tree over the airdrop balances.
///
/// Leaves are domain-tagged balance hashes, padded to the next power of two
/// with deterministic fillers and sorted ascending by byte value, so the same
/// set of balances always produces the same root no matter the input order.
/// Parents hash their children smaller-first, which is what lets the verifier
/// fold a proof without knowing sibling positions.
///
/// All levels live in one flat array in heap order: the root at index 0, each
/// node's children at `2i + 1` and `2i + 2`, the sorted leaves filling the
/// tail. The array is immutable once built.
pub struct BalanceTree {
    nodes: Vec<[u8; 32]>,
    leaf_count: usize,
}

impl BalanceTree {
    /// Builds the tree from balance entries.
    pub fn new(tree_nodes: &[TreeNode]) -> Result<Self> {
        Self::from_leaves(tree_nodes.iter().map(|n| n.leaf()).collect())
    }

    /// Builds the tree from already-tagged leaf hashes.
    pub fn from_leaves(mut leaves: Vec<[u8; 32]>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(MerkleTreeError::EmptyTree);
        }

        // Pad to a perfect tree. Fillers are tagged like ordinary leaves so a
        // padding hash can never be confused with an interior node.
        let leaf_count = leaves.len().next_power_of_two();
        for pad_index in leaves.len()..leaf_count {
            leaves.push(hashv(&[LEAF_PREFIX, &(pad_index as u64).to_le_bytes()]).to_bytes());
        }

        // Sorted leaf order is load-bearing: it makes the root reproducible
        // and lets `proof` binary-search the leaf section.
        leaves.sort_unstable();

        let mut nodes = vec![[0u8; 32]; 2 * leaf_count - 1];
        nodes[leaf_count - 1..].copy_from_slice(&leaves);
        for i in (0..leaf_count - 1).rev() {
            nodes[i] = hash_pair(&nodes[2 * i + 1], &nodes[2 * i + 2]);
        }

        Ok(Self { nodes, leaf_count })
    }

    /// The Merkle root uploaded on-chain.
    pub fn root(&self) -> [u8; 32] {
        self.nodes[0]
    }

    /// Number of leaves including padding.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Sibling hashes from `leaf` up to (excluding) the root, in the order
    /// the verifier consumes them.
    pub fn proof(&self, leaf: &[u8; 32]) -> Result<Vec<[u8; 32]>> {
        let position = self.nodes[self.leaf_count - 1..]
            .binary_search(leaf)
            .map_err(|_| MerkleTreeError::LeafNotFound)?;

        let mut proof = Vec::new();
        let mut index = self.leaf_count - 1 + position;
        while index > 0 {
            // Odd indices are left children, so the sibling sits one to the
            // right; even indices one to the left.
            let sibling = if index % 2 == 1 { index + 1 } else { index - 1 };
            proof.push(self.nodes[sibling]);
            index = (index - 1) / 2;
        }
        Ok(proof)
    }

    /// Proof for a balance entry.
    pub fn proof_for(&self, node: &TreeNode) -> Result<Vec<[u8; 32]>> {
        self.proof(&node.leaf())
    }

    /// True when `leaf` is part of the tree (padding included).
    pub fn contains(&self, leaf: &[u8; 32]) -> bool {
        self.nodes[self.leaf_count - 1..].binary_search(leaf).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use merkle_verify::verify;
    use solana_program::pubkey::Pubkey;

    use super::*;

    fn nodes(count: u64) -> Vec<TreeNode> {
        (0..count)
            .map(|i| TreeNode::new(Pubkey::new_unique(), (i + 1) * 1_000))
            .collect()
    }

    #[test]
    fn test_empty_tree_rejected() {
        assert!(matches!(
            BalanceTree::new(&[]),
            Err(MerkleTreeError::EmptyTree)
        ));
    }

    #[test]
    fn test_single_leaf_tree() {
        let entries = nodes(1);
        let tree = BalanceTree::new(&entries).unwrap();
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.root(), entries[0].leaf());
        assert_eq!(tree.proof_for(&entries[0]).unwrap(), vec![] as Vec<[u8; 32]>);
    }

    #[test]
    fn test_pads_to_power_of_two() {
        for count in [2u64, 3, 5, 6, 9] {
            let tree = BalanceTree::new(&nodes(count)).unwrap();
            assert_eq!(tree.leaf_count(), (count as usize).next_power_of_two());
        }
    }

    #[test]
    fn test_round_trip_every_leaf() {
        for count in [1u64, 2, 3, 4, 7, 8, 13] {
            let entries = nodes(count);
            let tree = BalanceTree::new(&entries).unwrap();
            for entry in &entries {
                let proof = tree.proof_for(entry).unwrap();
                assert!(
                    verify(&proof, tree.root(), entry.leaf()),
                    "proof failed for tree of {count} leaves"
                );
            }
        }
    }

    #[test]
    fn test_root_independent_of_insertion_order() {
        let entries = nodes(6);
        let mut reversed = entries.clone();
        reversed.reverse();

        let a = BalanceTree::new(&entries).unwrap();
        let b = BalanceTree::new(&reversed).unwrap();
        assert_eq!(a.root(), b.root());
    }

    #[test]
    fn test_corrupting_any_proof_byte_fails() {
        let entries = nodes(5);
        let tree = BalanceTree::new(&entries).unwrap();
        let target = &entries[2];
        let proof = tree.proof_for(target).unwrap();
        assert!(!proof.is_empty());

        for element in 0..proof.len() {
            let mut tampered = proof.clone();
            tampered[element][7] ^= 0x20;
            assert!(!verify(&tampered, tree.root(), target.leaf()));
        }
    }

    #[test]
    fn test_unknown_leaf_rejected() {
        let tree = BalanceTree::new(&nodes(4)).unwrap();
        let stranger = TreeNode::new(Pubkey::new_unique(), 999);
        assert!(matches!(
            tree.proof_for(&stranger),
            Err(MerkleTreeError::LeafNotFound)
        ));
        assert!(!tree.contains(&stranger.leaf()));
    }

    #[test]
    fn test_wrong_amount_is_a_different_leaf() {
        let entries = nodes(4);
        let tree = BalanceTree::new(&entries).unwrap();
        let proof = tree.proof_for(&entries[0]).unwrap();

        let inflated = TreeNode::new(entries[0].account, entries[0].amount + 1);
        assert!(!verify(&proof, tree.root(), inflated.leaf()));
    }
}
