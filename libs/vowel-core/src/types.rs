//! Core types for the vowel matching game.

use serde::{Deserialize, Serialize};

/// Marker used by audio references that hold the vowel sound on its own.
pub const ISOLATED_SOUND_MARKER: &str = "vowel_sound_only";

/// The two levels of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelKind {
    Familiarization,
    Distinction,
}

impl Default for LevelKind {
    fn default() -> Self {
        Self::Familiarization
    }
}

impl LevelKind {
    /// Get the level name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Familiarization => "familiarization",
            Self::Distinction => "distinction",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "familiarization" => Some(Self::Familiarization),
            "distinction" => Some(Self::Distinction),
            _ => None,
        }
    }

    /// Level number shown to the learner.
    pub fn number(self) -> u8 {
        match self {
            Self::Familiarization => 1,
            Self::Distinction => 2,
        }
    }
}

/// One audio clip belonging to a vowel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordAudio {
    pub audio: String,
    #[serde(default)]
    pub is_isolated_sound: bool,
}

impl WordAudio {
    pub fn word(audio: impl Into<String>) -> Self {
        Self {
            audio: audio.into(),
            is_isolated_sound: false,
        }
    }

    pub fn isolated(audio: impl Into<String>) -> Self {
        Self {
            audio: audio.into(),
            is_isolated_sound: true,
        }
    }
}

/// A vowel sound with its picture and recordings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VowelEntry {
    pub name: String,
    pub image: String,
    pub words: Vec<WordAudio>,
}

impl VowelEntry {
    /// The clip of the vowel sound alone, if any.
    pub fn isolated_sound(&self) -> Option<&WordAudio> {
        self.words.iter().find(|w| w.is_isolated_sound)
    }

    /// Word clips usable as round prompts.
    pub fn word_audio(&self) -> impl Iterator<Item = &WordAudio> {
        self.words.iter().filter(|w| !w.is_isolated_sound)
    }

    /// Card shown for this vowel.
    pub fn card(&self) -> Card {
        Card {
            vowel_name: self.name.clone(),
            image: self.image.clone(),
        }
    }
}

/// A scripted segment of a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubLevelSpec {
    pub id: String,
    pub name: String,
    pub round_count: u32,
    /// Target vowels, in weight/ratio order.
    pub vowels: [String; 3],
}

impl SubLevelSpec {
    pub fn new(id: &str, name: &str, round_count: u32, vowels: [&str; 3]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            round_count,
            vowels: vowels.map(str::to_string),
        }
    }

    pub fn is_target(&self, name: &str) -> bool {
        self.vowels.iter().any(|v| v == name)
    }
}

/// A selectable image card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub vowel_name: String,
    pub image: String,
}
