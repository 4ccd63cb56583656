// src/store/mod.rs

pub mod json_file;
pub mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::{Config, StorageBackend},
    models::{answer::AnswerSheet, participant::Participant},
};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} does not contain valid survey data: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("no participant id follows {last_id}")]
    IdSpaceExhausted { last_id: i64 },
    #[error("failed to encode survey data: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Data access for participants and their answers.
///
/// Each call is one complete operation; implementations serialize
/// read-modify-write cycles so concurrent requests cannot lose updates.
#[async_trait]
pub trait SurveyStore: Send + Sync {
    /// Appends a participant, assigning the next id.
    async fn add_participant(&self, name: String) -> Result<Participant, StoreError>;

    /// All participants in registration order.
    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError>;

    /// Replaces the answer set stored for `participant_id`.
    async fn put_answers(
        &self,
        participant_id: i64,
        answers: Vec<String>,
    ) -> Result<(), StoreError>;

    /// The answer set for `participant_id`, if one was ever submitted.
    async fn answers_for(&self, participant_id: i64) -> Result<Option<Vec<String>>, StoreError>;

    /// Every stored answer set.
    async fn answer_sheet(&self) -> Result<AnswerSheet, StoreError>;
}

/// Builds the store selected by `config.storage`.
pub fn build_store(config: &Config) -> Arc<dyn SurveyStore> {
    match config.storage {
        StorageBackend::File => {
            tracing::info!(
                "Using file storage: {} / {}",
                config.data_file.display(),
                config.answers_file.display()
            );
            Arc::new(JsonFileStore::new(&config.data_file, &config.answers_file))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    }
}
