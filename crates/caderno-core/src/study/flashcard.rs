//! Flashcard domain model.

use serde::{Deserialize, Serialize};

/// One generated question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// Request for the AI flashcard generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardRequest {
    /// Topic to generate cards about.
    pub topic: String,
    /// How many cards to ask for.
    pub count: u8,
    /// Subject to slant the generation toward, if any.
    #[serde(default)]
    pub subject_id: Option<i64>,
}
