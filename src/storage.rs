//! Ledger persistence layer
//!
//! Saves and loads the ledger as pretty-printed JSON. Writes go to a
//! temporary file first and are renamed into place so a crash mid-save
//! never leaves a truncated ledger file.

use crate::token::CustomToken;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: std::path::PathBuf,
    pub ledger_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: std::path::PathBuf::from(".token_ledger_data"),
            ledger_file: "ledger.json".to_string(),
        }
    }
}

/// Ledger storage manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StorageConfig::default())
    }

    /// Get the ledger file path
    fn ledger_path(&self) -> std::path::PathBuf {
        self.config.data_dir.join(&self.config.ledger_file)
    }

    /// Save the ledger to disk
    pub fn save(&self, token: &CustomToken) -> Result<(), StorageError> {
        let path = self.ledger_path();

        // Write to temporary file first
        let temp_path = self.config.data_dir.join("ledger.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, token)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    /// Load the ledger from disk
    pub fn load(&self) -> Result<CustomToken, StorageError> {
        let path = self.ledger_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Ledger file not found".to_string(),
            ));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);

        let token: CustomToken = serde_json::from_reader(reader)?;
        Ok(token)
    }

    /// Check if a saved ledger exists
    pub fn exists(&self) -> bool {
        self.ledger_path().exists()
    }

    /// Delete the saved ledger
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.ledger_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
