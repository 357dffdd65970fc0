//! Render instructions handed to the presentation adapter.

use crate::types::{Card, LevelKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Something the adapter should show or play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instruction {
    /// New sub-level screen. Distinction levels carry their fixed cards here.
    RenderLevel {
        header: String,
        sub_level_id: String,
        round_count: u32,
        cards: Vec<Card>,
    },
    RenderCounters {
        score: u32,
        current_round: u32,
        round_count: u32,
        progress: f64,
    },
    /// Fresh cards for a Familiarization round.
    RenderCards { cards: Vec<Card> },
    PlayAudio { audio: String },
    /// Mark the clicked card and disable the rest until `UnlockInput`.
    MarkSelection { vowel: String, correct: bool },
    UnlockInput,
    LevelEnded { summary: LevelSummary },
    ShowMenu,
}

/// What happens after a sub-level ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextStep {
    NextSubLevel { id: String, name: String },
    RepeatSubLevel { id: String },
    /// Level 1 mastered; Level 2 starts next.
    AdvanceToDistinction,
    GameComplete,
}

/// Diagnostic report for a finished sub-level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub level: LevelKind,
    pub sub_level_id: String,
    pub sub_level_name: String,
    pub score: u32,
    pub round_count: u32,
    pub mistakes: u32,
    pub replays_used: u32,
    pub passed: bool,
    pub next: NextStep,
}

/// A delayed transition the adapter must complete after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTicket {
    pub generation: u64,
    pub delay: Duration,
}

/// Result of a card selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feedback {
    pub instructions: Vec<Instruction>,
    /// `None` when the selection was ignored.
    pub ticket: Option<FeedbackTicket>,
}
