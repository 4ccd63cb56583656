// src/store/json_file.rs

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs, sync::Mutex};

use super::{StoreError, SurveyStore};
use crate::models::{
    answer::AnswerSheet,
    participant::{Participant, ParticipantList, next_participant_id},
};

/// Survey storage in two whole-file JSON documents.
///
/// * `participants_path` holds `{"participants": [...]}`.
/// * `answers_path` holds `{"<id>": [answers...]}`.
///
/// Every operation runs under one mutex, and every write goes to a sibling
/// `.tmp` file that is then renamed over the target.
pub struct JsonFileStore {
    participants_path: PathBuf,
    answers_path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(participants_path: impl Into<PathBuf>, answers_path: impl Into<PathBuf>) -> Self {
        Self {
            participants_path: participants_path.into(),
            answers_path: answers_path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load_participants(&self) -> Result<ParticipantList, StoreError> {
        load(&self.participants_path).await
    }

    async fn load_answers(&self) -> Result<AnswerSheet, StoreError> {
        load(&self.answers_path).await
    }
}

/// Reads a whole document. A missing or blank file is an empty collection;
/// anything unparsable is reported, never replaced.
async fn load<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("{} does not exist yet, starting empty", path.display());
            return Ok(T::default());
        }
        Err(e) => return Err(io_error(path)(e)),
    };

    if contents.trim().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Rewrites a whole document via write-to-temp then rename.
async fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(io_error(parent))?;
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, json).await.map_err(io_error(&tmp))?;
    fs::rename(&tmp, path).await.map_err(io_error(path))?;

    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + use<> {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[async_trait]
impl SurveyStore for JsonFileStore {
    async fn add_participant(&self, name: String) -> Result<Participant, StoreError> {
        let _guard = self.lock.lock().await;

        let mut list = self.load_participants().await?;
        let id = next_participant_id(&list.participants).ok_or_else(|| {
            StoreError::IdSpaceExhausted {
                last_id: list.participants.last().map_or(0, |p| p.id),
            }
        })?;
        let participant = Participant { id, name };
        list.participants.push(participant.clone());
        save(&self.participants_path, &list).await?;

        tracing::info!("Registered participant {}", participant.id);
        Ok(participant)
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.load_participants().await?.participants)
    }

    async fn put_answers(
        &self,
        participant_id: i64,
        answers: Vec<String>,
    ) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        let mut sheet = self.load_answers().await?;
        sheet.insert(participant_id, answers);
        save(&self.answers_path, &sheet).await?;

        tracing::info!("Recorded answers for participant {}", participant_id);
        Ok(())
    }

    async fn answers_for(&self, participant_id: i64) -> Result<Option<Vec<String>>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.load_answers().await?.remove(&participant_id))
    }

    async fn answer_sheet(&self) -> Result<AnswerSheet, StoreError> {
        let _guard = self.lock.lock().await;
        self.load_answers().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("data.json"), dir.path().join("answers.json"))
    }

    #[tokio::test]
    async fn test_missing_files_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.list_participants().await.unwrap().is_empty());
        assert!(store.answer_sheet().await.unwrap().is_empty());
        assert_eq!(store.answers_for(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_participants_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir).add_participant("Ada".into()).await.unwrap();
        let second = store_in(&dir).add_participant("Grace".into()).await.unwrap();

        assert_eq!(second.id, 2);

        let raw = std::fs::read_to_string(dir.path().join("data.json")).unwrap();
        let on_disk: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            on_disk,
            serde_json::json!({
                "participants": [
                    {"id": 1, "name": "Ada"},
                    {"id": 2, "name": "Grace"}
                ]
            })
        );
        assert!(raw.contains("\n  \"participants\""));
        assert!(!dir.path().join("data.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_reads_string_keyed_answers() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("answers.json"),
            r#"{"3": ["a", "b"], "7": ["c"]}"#,
        )
        .unwrap();
        let store = store_in(&dir);

        assert_eq!(
            store.answers_for(3).await.unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );

        // Rewriting keeps the other entry intact.
        store.put_answers(3, vec!["x".into()]).await.unwrap();
        assert_eq!(store.answers_for(7).await.unwrap(), Some(vec!["c".to_string()]));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = store_in(&dir);

        let err = store.add_participant("Ada".into()).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[tokio::test]
    async fn test_max_id_is_reported_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let seeded = r#"{"participants": [{"id": 9223372036854775807, "name": "Max"}]}"#;
        std::fs::write(&path, seeded).unwrap();
        let store = store_in(&dir);

        let err = store.add_participant("Next".into()).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::IdSpaceExhausted { last_id: i64::MAX }
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), seeded);
    }

    #[tokio::test]
    async fn test_non_integer_answer_key_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("answers.json"), r#"{"bob": ["a"]}"#).unwrap();

        let err = store_in(&dir).answer_sheet().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.json"), "\n").unwrap();

        let created = store_in(&dir).add_participant("Ada".into()).await.unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(
            dir.path().join("nested/data.json"),
            dir.path().join("nested/answers.json"),
        );

        store.put_answers(1, vec!["a".into()]).await.unwrap();
        assert!(dir.path().join("nested/answers.json").exists());
    }

    #[tokio::test]
    async fn test_concurrent_submissions_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir));

        let handles: Vec<_> = (1..=20)
            .map(|id| {
                let store = store.clone();
                tokio::spawn(async move { store.put_answers(id, vec![format!("a{}", id)]).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let sheet = store.answer_sheet().await.unwrap();
        assert_eq!(sheet.len(), 20);
        assert_eq!(sheet.get(&13), Some(&vec!["a13".to_string()]));
    }
}
