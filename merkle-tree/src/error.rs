use thiserror::Error;

#[derive(Error, Debug)]
pub enum MerkleTreeError {
    #[error("tree has no leaves")]
    EmptyTree,
    #[error("leaf not found")]
    LeafNotFound,
    #[error("manifest validation error: {0}")]
    ValidationError(String),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("csv error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MerkleTreeError>;
