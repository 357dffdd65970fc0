//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from vowel-core
pub use vowel_core::{
    IntroductionCard, Instruction, LevelKind, SessionSnapshot,
};

/// Response after creating a session
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Start a level, optionally at a specific sub-level
#[derive(Debug, Serialize, Deserialize)]
pub struct StartLevelRequest {
    pub level: LevelKind,
    #[serde(default)]
    pub sub_level: Option<usize>,
}

/// Card clicked by the learner
#[derive(Debug, Serialize, Deserialize)]
pub struct SelectRequest {
    pub vowel: String,
}

/// Instructions the client should apply in order
#[derive(Debug, Serialize, Deserialize)]
pub struct InstructionsResponse {
    pub instructions: Vec<Instruction>,
}

/// Selection result. When `feedback_delay_ms` is set, the follow-up
/// instructions arrive on the events endpoint after that delay.
#[derive(Debug, Serialize, Deserialize)]
pub struct SelectResponse {
    pub instructions: Vec<Instruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_delay_ms: Option<u64>,
}
