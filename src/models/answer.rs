// src/models/answer.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Every recorded answer set, keyed by participant id.
///
/// Serialized as a JSON object, so keys appear as strings on disk
/// (`{"3": ["a", "b"]}`) and are parsed back into integers on load.
pub type AnswerSheet = BTreeMap<i64, Vec<String>>;

/// DTO for submitting a participant's answers.
#[derive(Debug, Deserialize)]
pub struct SubmitAnswersRequest {
    pub answers: Vec<String>,
}

/// Collects the answer at 1-based `question` from every participant who
/// answered at least that many questions.
///
/// Returns `None` for `question == 0`, which has no position.
pub fn answers_to_question(
    sheet: &AnswerSheet,
    question: usize,
) -> Option<BTreeMap<i64, String>> {
    let index = question.checked_sub(1)?;

    Some(
        sheet
            .iter()
            .filter_map(|(id, answers)| answers.get(index).map(|a| (*id, a.clone())))
            .collect(),
    )
}
