// src/models/participant.rs

use serde::{Deserialize, Serialize};

/// A registered survey respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Server-assigned, see [`next_participant_id`].
    pub id: i64,
    pub name: String,
}

/// On-disk and wire shape of the participant table: `{"participants": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantList {
    pub participants: Vec<Participant>,
}

/// DTO for registering a participant.
/// Any `id` sent by the client is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateParticipantRequest {
    pub name: String,
}

/// Id for the next registration: the last stored participant's id + 1, or 1.
///
/// Only the last entry is consulted, so a hand-edited file with ids out of
/// order can yield a duplicate. Returns `None` once the last id is `i64::MAX`.
pub fn next_participant_id(participants: &[Participant]) -> Option<i64> {
    match participants.last() {
        Some(p) => p.id.checked_add(1),
        None => Some(1),
    }
}
