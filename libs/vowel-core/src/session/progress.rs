//! Mutable per-sub-level progress and the progression cursor.

use crate::types::{Card, LevelKind};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Where the session is in the menu/level/round cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    MenuIdle,
    RoundActive,
    LevelEnded,
}

/// Which sub-level each level resumes at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursor {
    pub level: LevelKind,
    pub familiarization_index: usize,
    pub distinction_index: usize,
}

impl Cursor {
    pub fn index(&self, kind: LevelKind) -> usize {
        match kind {
            LevelKind::Familiarization => self.familiarization_index,
            LevelKind::Distinction => self.distinction_index,
        }
    }

    pub(crate) fn set(&mut self, kind: LevelKind, index: usize) {
        match kind {
            LevelKind::Familiarization => self.familiarization_index = index,
            LevelKind::Distinction => self.distinction_index = index,
        }
    }
}

/// State of the sub-level being played.
#[derive(Debug, Clone)]
pub struct LevelProgress {
    pub(crate) level: LevelKind,
    pub(crate) sub_level_index: usize,
    pub(crate) round_count: u32,
    pub(crate) current_round: u32,
    pub(crate) score: u32,
    pub(crate) mistakes: u32,
    pub(crate) replays_used: u32,
    pub(crate) last_correct_vowel: Option<String>,
    pub(crate) pending_queue: VecDeque<String>,
    pub(crate) correct_answer: Option<String>,
    pub(crate) prompt_audio: Option<String>,
    pub(crate) cards: Vec<Card>,
    pub(crate) selection_locked: bool,
}

impl LevelProgress {
    pub(crate) fn new(level: LevelKind, sub_level_index: usize, round_count: u32) -> Self {
        Self {
            level,
            sub_level_index,
            round_count,
            current_round: 0,
            score: 0,
            mistakes: 0,
            replays_used: 0,
            last_correct_vowel: None,
            pending_queue: VecDeque::new(),
            correct_answer: None,
            prompt_audio: None,
            cards: Vec::new(),
            selection_locked: false,
        }
    }

    /// Zero everything a finished sub-level accumulated.
    pub(crate) fn reset_counters(&mut self) {
        self.current_round = 0;
        self.score = 0;
        self.mistakes = 0;
        self.replays_used = 0;
        self.last_correct_vowel = None;
        self.pending_queue.clear();
        self.correct_answer = None;
        self.prompt_audio = None;
        self.selection_locked = false;
    }

    pub fn level(&self) -> LevelKind {
        self.level
    }

    pub fn sub_level_index(&self) -> usize {
        self.sub_level_index
    }

    pub fn round_count(&self) -> u32 {
        self.round_count
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn replays_used(&self) -> u32 {
        self.replays_used
    }

    pub fn last_correct_vowel(&self) -> Option<&str> {
        self.last_correct_vowel.as_deref()
    }

    /// Remaining Familiarization answers, head first.
    pub fn pending_queue(&self) -> &VecDeque<String> {
        &self.pending_queue
    }

    pub fn correct_answer(&self) -> Option<&str> {
        self.correct_answer.as_deref()
    }

    pub fn prompt_audio(&self) -> Option<&str> {
        self.prompt_audio.as_deref()
    }

    /// Cards currently on screen.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_selection_locked(&self) -> bool {
        self.selection_locked
    }

    /// Fraction of the sub-level's rounds reached so far.
    pub fn progress_fraction(&self) -> f64 {
        if self.round_count == 0 {
            return 0.0;
        }
        self.current_round as f64 / self.round_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_level_identity() {
        let mut progress = LevelProgress::new(LevelKind::Distinction, 3, 5);
        progress.current_round = 5;
        progress.score = 4;
        progress.mistakes = 2;
        progress.replays_used = 1;
        progress.correct_answer = Some("pin".to_string());
        progress.selection_locked = true;

        progress.reset_counters();

        assert_eq!(progress.level(), LevelKind::Distinction);
        assert_eq!(progress.sub_level_index(), 3);
        assert_eq!(
            (progress.current_round(), progress.score(), progress.mistakes(), progress.replays_used()),
            (0, 0, 0, 0)
        );
        assert_eq!(progress.correct_answer(), None);
        assert!(!progress.is_selection_locked());
    }

    #[test]
    fn progress_fraction_tracks_rounds() {
        let mut progress = LevelProgress::new(LevelKind::Familiarization, 0, 7);
        assert_eq!(progress.progress_fraction(), 0.0);
        progress.current_round = 7;
        assert_eq!(progress.progress_fraction(), 1.0);
    }

    #[test]
    fn cursor_tracks_each_level_separately() {
        let mut cursor = Cursor::default();
        cursor.set(LevelKind::Distinction, 4);
        assert_eq!(cursor.index(LevelKind::Familiarization), 0);
        assert_eq!(cursor.index(LevelKind::Distinction), 4);
    }
}
