//! Error types for vowel-core.

use thiserror::Error;

/// Result type alias using ContentError.
pub type Result<T> = std::result::Result<T, ContentError>;

/// Defects in the vowel catalog or sub-level tables.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("unknown vowel: {name}")]
    UnknownVowel { name: String },

    #[error("vowel {name} has no word audio to prompt with")]
    NoWordAudio { name: String },

    #[error("duplicate vowel {name} in catalog")]
    DuplicateVowel { name: String },

    #[error("vowel {name} has {count} isolated sounds, expected at most one")]
    MultipleIsolatedSounds { name: String, count: usize },

    #[error("sub-level {id} has no rounds")]
    ZeroRounds { id: String },

    #[error("sub-level {id} produced an empty answer queue")]
    EmptyQueue { id: String },

    #[error("duplicate sub-level id {id}")]
    DuplicateSubLevel { id: String },

    #[error("{level} has no sub-levels")]
    EmptyLevel { level: &'static str },

    #[error("sub-level index {index} out of range for {level} ({len} sub-levels)")]
    SubLevelOutOfRange {
        level: &'static str,
        index: usize,
        len: usize,
    },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}
