//! Content selection for each round.
//!
//! All functions take the random source as a parameter so sessions and tests
//! can seed it.

pub mod familiarization;
pub mod weighted;

pub use familiarization::{build_queue, deal_cards, next_from_queue, pick_distractors};
pub use weighted::{pick_distinction_vowel, weighted_pick};

use crate::error::{ContentError, Result};
use crate::types::{VowelEntry, WordAudio};
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick the word clip to play for a round, never the isolated sound.
pub fn pick_prompt_audio<'a, R: Rng + ?Sized>(
    entry: &'a VowelEntry,
    rng: &mut R,
) -> Result<&'a WordAudio> {
    let words: Vec<&WordAudio> = entry.word_audio().collect();
    words
        .choose(rng)
        .copied()
        .ok_or_else(|| ContentError::NoWordAudio {
            name: entry.name.clone(),
        })
}
