//! Built-in program definitions and their typed request records.

pub mod ielts;
pub mod snbt;
pub mod toefl;

use serde::Deserialize;

use crate::model::responses::RawResponseSet;

/// Objective-section answers: either per-item flags or a count tallied
/// upstream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ObjectiveAnswers {
    Count(u32),
    Items(Vec<bool>),
}

impl ObjectiveAnswers {
    pub fn to_response_set(&self) -> RawResponseSet {
        match self {
            ObjectiveAnswers::Count(count) => RawResponseSet::Tally(*count),
            ObjectiveAnswers::Items(items) => RawResponseSet::Items(items.clone()),
        }
    }
}
