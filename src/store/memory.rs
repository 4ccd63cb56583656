// src/store/memory.rs

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, SurveyStore};
use crate::models::{
    answer::AnswerSheet,
    participant::{Participant, next_participant_id},
};

#[derive(Default)]
struct Tables {
    participants: Vec<Participant>,
    answers: AnswerSheet,
}

/// In-memory survey storage backed by a `RwLock`.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SurveyStore for MemoryStore {
    async fn add_participant(&self, name: String) -> Result<Participant, StoreError> {
        let mut data = self.data.write().await;
        let id = next_participant_id(&data.participants).ok_or_else(|| {
            StoreError::IdSpaceExhausted {
                last_id: data.participants.last().map_or(0, |p| p.id),
            }
        })?;
        let participant = Participant { id, name };
        data.participants.push(participant.clone());
        Ok(participant)
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError> {
        Ok(self.data.read().await.participants.clone())
    }

    async fn put_answers(
        &self,
        participant_id: i64,
        answers: Vec<String>,
    ) -> Result<(), StoreError> {
        self.data.write().await.answers.insert(participant_id, answers);
        Ok(())
    }

    async fn answers_for(&self, participant_id: i64) -> Result<Option<Vec<String>>, StoreError> {
        Ok(self.data.read().await.answers.get(&participant_id).cloned())
    }

    async fn answer_sheet(&self) -> Result<AnswerSheet, StoreError> {
        Ok(self.data.read().await.answers.clone())
    }
}
