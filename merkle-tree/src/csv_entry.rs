use std::{fs::File, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One row of an airdrop CSV: `account,amount`.
#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct CsvEntry {
    /// Base58 account address of the claimant.
    pub account: String,
    /// Claimable amount in token base units.
    pub amount: u64,
}

impl CsvEntry {
    pub fn new_from_file(path: &Path) -> Result<Vec<Self>> {
        let file = File::open(path)?;
        let mut rdr = csv::Reader::from_reader(file);

        let mut entries = Vec::new();
        for row in rdr.deserialize() {
            let entry: CsvEntry = row?;
            entries.push(entry);
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_program::pubkey::Pubkey;

    #[test]
    fn test_csv_parsing() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let path = std::env::temp_dir().join("airdrop_entries_test.csv");
        std::fs::write(&path, format!("account,amount\n{a},1000\n{b},2500\n")).unwrap();

        let entries = CsvEntry::new_from_file(&path).expect("failed to parse csv");
        std::fs::remove_file(&path).ok();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].account, a.to_string());
        assert_eq!(entries[0].amount, 1000);
        assert_eq!(entries[1].amount, 2500);
    }
}
