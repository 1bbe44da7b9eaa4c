use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

use indexmap::IndexMap;
use merkle_verify::verify;
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::{
    balance_tree::BalanceTree,
    csv_entry::CsvEntry,
    error::{MerkleTreeError::ValidationError, Result},
    tree_node::TreeNode,
};

/// Everything a distribution operator needs to run one airdrop: the root to
/// upload on-chain, the full balance list, and a ready-made proof per entry.
/// Serialized to JSON so the claim front-end can serve proofs without
/// rebuilding the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirdropManifest {
    /// Root of the balance tree, stored in the on-chain distributor.
    pub merkle_root: [u8; 32],
    /// Number of balance entries (padding leaves excluded).
    pub max_num_nodes: u64,
    /// Sum of all claimable amounts; the vault must be funded to at least this.
    pub max_total_claim: u64,
    pub tree_nodes: Vec<TreeNode>,
}

impl AirdropManifest {
    pub fn new(tree_nodes: Vec<TreeNode>) -> Result<Self> {
        // Entries for the same account are combined; the claim record is
        // keyed per account on-chain, so a split entry could only be claimed
        // once anyway.
        let mut by_account: IndexMap<Pubkey, TreeNode> = IndexMap::new();
        for node in tree_nodes {
            by_account
                .entry(node.account)
                .and_modify(|existing| {
                    existing.amount = existing
                        .amount
                        .checked_add(node.amount)
                        .expect("combined claim amount overflows u64");
                })
                .or_insert(node);
        }
        let mut tree_nodes: Vec<TreeNode> = by_account.into_values().collect();

        let tree = BalanceTree::new(&tree_nodes)?;
        for node in tree_nodes.iter_mut() {
            node.proof = Some(tree.proof_for(node)?);
        }

        let max_total_claim = tree_nodes
            .iter()
            .try_fold(0u64, |acc, n| acc.checked_add(n.amount))
            .ok_or_else(|| ValidationError("total claim overflows u64".to_string()))?;

        let manifest = Self {
            merkle_root: tree.root(),
            max_num_nodes: tree_nodes.len() as u64,
            max_total_claim,
            tree_nodes,
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// Builds a manifest straight from an `account,amount` CSV.
    pub fn new_from_csv(path: &Path) -> Result<Self> {
        let entries = CsvEntry::new_from_file(path)?;
        Self::new(entries.into_iter().map(TreeNode::from).collect())
    }

    /// Loads a previously written manifest.
    pub fn new_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let manifest: AirdropManifest = serde_json::from_reader(BufReader::new(file))?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(serialized.as_bytes())?;
        Ok(())
    }

    pub fn node_for(&self, account: &Pubkey) -> Option<&TreeNode> {
        self.tree_nodes.iter().find(|n| n.account == *account)
    }

    /// Map keyed by account for proof lookups in serving paths.
    pub fn as_map(&self) -> HashMap<Pubkey, TreeNode> {
        self.tree_nodes
            .iter()
            .map(|n| (n.account, n.clone()))
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.tree_nodes.is_empty() {
            return Err(ValidationError("manifest has no entries".to_string()));
        }
        if self.tree_nodes.len() as u64 != self.max_num_nodes {
            return Err(ValidationError(format!(
                "entry count {} does not match max_num_nodes {}",
                self.tree_nodes.len(),
                self.max_num_nodes
            )));
        }

        let total = self
            .tree_nodes
            .iter()
            .try_fold(0u64, |acc, n| acc.checked_add(n.amount))
            .ok_or_else(|| ValidationError("total claim overflows u64".to_string()))?;
        if total != self.max_total_claim {
            return Err(ValidationError(format!(
                "entry sum {} does not match max_total_claim {}",
                total, self.max_total_claim
            )));
        }

        for node in &self.tree_nodes {
            let proof = node
                .proof
                .as_ref()
                .ok_or_else(|| ValidationError(format!("{} has no proof", node.account)))?;
            if !verify(proof, self.merkle_root, node.leaf()) {
                return Err(ValidationError(format!(
                    "proof for {} does not match the root",
                    node.account
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_nodes() -> Vec<TreeNode> {
        vec![
            TreeNode::new(Pubkey::new_unique(), 1_000),
            TreeNode::new(Pubkey::new_unique(), 2_000),
            TreeNode::new(Pubkey::new_unique(), 3_000),
        ]
    }

    #[test]
    fn test_manifest_totals_and_proofs() {
        let manifest = AirdropManifest::new(sample_nodes()).unwrap();
        assert_eq!(manifest.max_num_nodes, 3);
        assert_eq!(manifest.max_total_claim, 6_000);
        for node in &manifest.tree_nodes {
            assert!(verify(
                node.proof.as_ref().unwrap(),
                manifest.merkle_root,
                node.leaf()
            ));
        }
    }

    #[test]
    fn test_duplicate_accounts_are_combined() {
        let account = Pubkey::new_unique();
        let manifest = AirdropManifest::new(vec![
            TreeNode::new(account, 500),
            TreeNode::new(Pubkey::new_unique(), 100),
            TreeNode::new(account, 250),
        ])
        .unwrap();

        assert_eq!(manifest.max_num_nodes, 2);
        assert_eq!(manifest.node_for(&account).unwrap().amount, 750);
    }

    #[test]
    fn test_file_round_trip() {
        let manifest = AirdropManifest::new(sample_nodes()).unwrap();
        let path = std::env::temp_dir().join("airdrop_manifest_test.json");
        manifest.write_to_file(&path).unwrap();
        let loaded = AirdropManifest::new_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.merkle_root, manifest.merkle_root);
        assert_eq!(loaded.tree_nodes.len(), manifest.tree_nodes.len());
    }

    #[test]
    fn test_tampered_manifest_rejected() {
        let mut manifest = AirdropManifest::new(sample_nodes()).unwrap();
        manifest.tree_nodes[0].amount += 1;
        let path = std::env::temp_dir().join("airdrop_manifest_tampered.json");
        manifest.write_to_file(&path).ok();
        // write_to_file does not re-validate; loading does.
        let loaded = AirdropManifest::new_from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(loaded.is_err());
    }
}
