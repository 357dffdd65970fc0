//! Core library for the vowel matching game.
//!
//! Provides:
//! - Vowel catalog and the scripted sub-level tables
//! - Selection of the correct vowel, distractors and prompt audio
//! - The round/level state machine that gates progression
//! - Shared types (VowelEntry, SubLevelSpec, Card, etc.)

pub mod catalog;
pub mod error;
pub mod selection;
pub mod session;
pub mod settings;
pub mod stages;
pub mod types;

pub use catalog::{IntroductionCard, VowelCatalog};
pub use error::{ContentError, Result};
pub use session::{
    Cursor, Feedback, FeedbackTicket, GameSession, Instruction, LevelProgress, LevelSummary,
    NextStep, Phase, SessionSnapshot,
};
pub use settings::GameSettings;
pub use stages::StageTable;
pub use types::{Card, LevelKind, SubLevelSpec, VowelEntry, WordAudio};
