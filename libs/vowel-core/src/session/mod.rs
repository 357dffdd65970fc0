//! Round/level state machine.
//!
//! A [`GameSession`] owns the progress of one learner. The adapter drives it
//! with commands (`start_level`, `handle_selection`, `replay`, `proceed`,
//! `navigate_to_menu`) and renders the [`Instruction`]s each command returns.
//!
//! Selection feedback is a delayed transition: `handle_selection` hands back
//! a [`FeedbackTicket`] and the adapter calls `complete_feedback` once the
//! delay has passed. Any later state change (menu, new level) invalidates
//! outstanding tickets.

pub mod instruction;
pub mod progress;


pub use instruction::{Feedback, FeedbackTicket, Instruction, LevelSummary, NextStep};
pub use progress::{Cursor, LevelProgress, Phase};

use crate::catalog::VowelCatalog;
use crate::error::{ContentError, Result};
use crate::selection::{
    build_queue, deal_cards, next_from_queue, pick_distinction_vowel, pick_distractors,
    pick_prompt_audio,
};
use crate::settings::GameSettings;
use crate::stages::StageTable;
use crate::types::{Card, LevelKind, SubLevelSpec};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What the adapter is waiting to resume after feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingFeedback {
    /// Correct answer: move to the next round.
    Advance,
    /// Wrong answer: let the learner try the same round again.
    Unlock,
}

/// Content chosen for one round.
struct RoundContent {
    correct: String,
    prompt: String,
    cards: Option<Vec<Card>>,
}

/// Serializable view of a session. Never reveals the correct answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub cursor: Cursor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_level_id: Option<String>,
    pub current_round: u32,
    pub round_count: u32,
    pub score: u32,
    pub mistakes: u32,
    pub replays_used: u32,
    pub cards: Vec<Card>,
    pub awaiting_feedback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_summary: Option<LevelSummary>,
}

/// One learner's game.
pub struct GameSession<R = StdRng> {
    catalog: Arc<VowelCatalog>,
    stages: Arc<StageTable>,
    settings: Arc<GameSettings>,
    rng: R,
    phase: Phase,
    cursor: Cursor,
    progress: Option<LevelProgress>,
    pending: Option<PendingFeedback>,
    generation: u64,
    last_summary: Option<LevelSummary>,
}

impl GameSession<StdRng> {
    /// Create a session seeded from OS entropy.
    pub fn new(
        catalog: Arc<VowelCatalog>,
        stages: Arc<StageTable>,
        settings: Arc<GameSettings>,
    ) -> Self {
        Self::with_rng(catalog, stages, settings, StdRng::from_entropy())
    }

    /// Create a reproducible session.
    pub fn seeded(
        catalog: Arc<VowelCatalog>,
        stages: Arc<StageTable>,
        settings: Arc<GameSettings>,
        seed: u64,
    ) -> Self {
        Self::with_rng(catalog, stages, settings, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(
        catalog: Arc<VowelCatalog>,
        stages: Arc<StageTable>,
        settings: Arc<GameSettings>,
        rng: R,
    ) -> Self {
        Self {
            catalog,
            stages,
            settings,
            rng,
            phase: Phase::MenuIdle,
            cursor: Cursor::default(),
            progress: None,
            pending: None,
            generation: 0,
            last_summary: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn progress(&self) -> Option<&LevelProgress> {
        self.progress.as_ref()
    }

    /// Start the level at the sub-level its cursor points to.
    pub fn start_level(&mut self, kind: LevelKind) -> Result<Vec<Instruction>> {
        self.start_sub_level(kind, self.cursor.index(kind))
    }

    /// Start a specific sub-level, resetting all counters.
    pub fn start_sub_level(&mut self, kind: LevelKind, index: usize) -> Result<Vec<Instruction>> {
        let stages = Arc::clone(&self.stages);
        let catalog = Arc::clone(&self.catalog);
        let sub = stages.sub_level(kind, index)?;

        self.generation += 1;
        self.pending = None;
        self.cursor.level = kind;
        self.cursor.set(kind, index);

        let mut progress = LevelProgress::new(kind, index, sub.round_count);
        match kind {
            LevelKind::Familiarization => {
                progress.pending_queue =
                    build_queue(&sub.vowels, &self.settings.familiarization_ratio, &mut self.rng);
            }
            LevelKind::Distinction => {
                let mut cards: Vec<Card> = sub
                    .vowels
                    .iter()
                    .filter_map(|name| match catalog.get(name) {
                        Ok(entry) => Some(entry.card()),
                        Err(err) => {
                            tracing::error!(sub_level = %sub.id, error = %err, "dropping card");
                            None
                        }
                    })
                    .collect();
                cards.shuffle(&mut self.rng);
                progress.cards = cards;
            }
        }

        tracing::info!(level = kind.as_str(), sub_level = %sub.id, "starting sub-level");

        let mut out = vec![
            Instruction::RenderLevel {
                header: level_header(kind, sub),
                sub_level_id: sub.id.clone(),
                round_count: sub.round_count,
                cards: progress.cards.clone(),
            },
            counters(&progress),
        ];

        self.progress = Some(progress);
        self.phase = Phase::RoundActive;
        self.start_round(&mut out);
        Ok(out)
    }

    /// Handle a card click.
    ///
    /// Ignored outside an active round or while earlier feedback is pending.
    pub fn handle_selection(&mut self, vowel: &str) -> Feedback {
        if self.phase != Phase::RoundActive {
            tracing::debug!(vowel, "ignoring selection outside an active round");
            return Feedback::default();
        }
        let Some(progress) = self.progress.as_mut() else {
            return Feedback::default();
        };
        if progress.selection_locked {
            tracing::debug!(vowel, "ignoring selection while feedback is showing");
            return Feedback::default();
        }
        let Some(correct) = progress.correct_answer.clone() else {
            return Feedback::default();
        };

        progress.selection_locked = true;
        let is_correct = vowel == correct;
        let mut instructions = vec![Instruction::MarkSelection {
            vowel: vowel.to_string(),
            correct: is_correct,
        }];

        let pending = if is_correct {
            progress.score += 1;
            progress.last_correct_vowel = Some(correct);
            instructions.push(counters(progress));
            PendingFeedback::Advance
        } else {
            progress.mistakes += 1;
            PendingFeedback::Unlock
        };
        tracing::debug!(
            vowel,
            correct = is_correct,
            round = progress.current_round,
            "selection"
        );

        self.generation += 1;
        self.pending = Some(pending);

        Feedback {
            instructions,
            ticket: Some(FeedbackTicket {
                generation: self.generation,
                delay: self.settings.feedback_delay(),
            }),
        }
    }

    /// Finish the feedback delay started by `handle_selection`.
    ///
    /// Stale tickets are ignored.
    pub fn complete_feedback(&mut self, ticket: FeedbackTicket) -> Vec<Instruction> {
        if ticket.generation != self.generation {
            tracing::debug!(ticket = ticket.generation, "ignoring stale feedback ticket");
            return Vec::new();
        }
        let Some(pending) = self.pending.take() else {
            return Vec::new();
        };
        let Some(progress) = self.progress.as_mut() else {
            return Vec::new();
        };

        progress.selection_locked = false;
        let mut out = vec![Instruction::UnlockInput];
        if pending == PendingFeedback::Advance {
            self.start_round(&mut out);
        }
        out
    }

    /// Play the current prompt again. Every replay is counted.
    pub fn replay(&mut self) -> Vec<Instruction> {
        if self.phase != Phase::RoundActive {
            return Vec::new();
        }
        let Some(progress) = self.progress.as_mut() else {
            return Vec::new();
        };
        let Some(audio) = progress.prompt_audio.clone() else {
            return Vec::new();
        };

        progress.replays_used += 1;
        vec![Instruction::PlayAudio { audio }]
    }

    /// Continue after a sub-level ends: next sub-level, repeat, or Level 2.
    pub fn proceed(&mut self) -> Result<Vec<Instruction>> {
        if self.phase != Phase::LevelEnded {
            return Ok(Vec::new());
        }
        self.start_level(self.cursor.level)
    }

    /// Discard the current level and return to the menu.
    pub fn navigate_to_menu(&mut self) -> Vec<Instruction> {
        self.generation += 1;
        self.pending = None;
        self.progress = None;
        self.phase = Phase::MenuIdle;
        vec![Instruction::ShowMenu]
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let progress = self.progress.as_ref();
        let sub_level_id = progress.and_then(|p| {
            self.stages
                .sub_level(p.level, p.sub_level_index)
                .ok()
                .map(|s| s.id.clone())
        });

        SessionSnapshot {
            phase: self.phase,
            cursor: self.cursor,
            sub_level_id,
            current_round: progress.map_or(0, |p| p.current_round),
            round_count: progress.map_or(0, |p| p.round_count),
            score: progress.map_or(0, |p| p.score),
            mistakes: progress.map_or(0, |p| p.mistakes),
            replays_used: progress.map_or(0, |p| p.replays_used),
            cards: progress.map(|p| p.cards.clone()).unwrap_or_default(),
            awaiting_feedback: self.pending.is_some(),
            last_summary: self.last_summary.clone(),
        }
    }

    /// Advance to the next playable round, ending the level once rounds run out.
    ///
    /// A round whose content is broken is logged and skipped.
    fn start_round(&mut self, out: &mut Vec<Instruction>) {
        let stages = Arc::clone(&self.stages);
        let catalog = Arc::clone(&self.catalog);
        let settings = Arc::clone(&self.settings);

        loop {
            let Some(progress) = self.progress.as_mut() else {
                return;
            };
            let sub = match stages.sub_level(progress.level, progress.sub_level_index) {
                Ok(sub) => sub,
                Err(err) => {
                    tracing::error!(error = %err, "sub-level vanished");
                    return;
                }
            };

            if progress.current_round >= progress.round_count {
                self.end_level(out);
                return;
            }

            progress.current_round += 1;
            out.push(counters(progress));

            match select_round(progress, sub, &catalog, &settings, &mut self.rng) {
                Ok(content) => {
                    tracing::debug!(
                        sub_level = %sub.id,
                        round = progress.current_round,
                        vowel = %content.correct,
                        "round started"
                    );
                    if let Some(cards) = content.cards {
                        progress.cards = cards.clone();
                        out.push(Instruction::RenderCards { cards });
                    }
                    out.push(Instruction::PlayAudio {
                        audio: content.prompt.clone(),
                    });
                    progress.correct_answer = Some(content.correct);
                    progress.prompt_audio = Some(content.prompt);
                    progress.selection_locked = false;
                    return;
                }
                Err(err) => {
                    tracing::error!(
                        sub_level = %sub.id,
                        round = progress.current_round,
                        error = %err,
                        "content defect, skipping round"
                    );
                    progress.correct_answer = None;
                    progress.prompt_audio = None;
                }
            }
        }
    }

    /// Evaluate the finished sub-level, move the cursor and zero the counters.
    fn end_level(&mut self, out: &mut Vec<Instruction>) {
        let stages = Arc::clone(&self.stages);
        let Some(progress) = self.progress.as_mut() else {
            return;
        };
        let level = progress.level;
        let index = progress.sub_level_index;
        let subs = stages.level(level);
        let Some(sub) = subs.get(index) else {
            return;
        };

        let passed = match level {
            LevelKind::Familiarization => true,
            LevelKind::Distinction => {
                progress.score == progress.round_count
                    && progress.replays_used < self.settings.distinction_max_replays
                    && progress.mistakes < self.settings.distinction_max_mistakes
            }
        };

        let next = if !passed {
            NextStep::RepeatSubLevel { id: sub.id.clone() }
        } else if let Some(following) = subs.get(index + 1) {
            self.cursor.set(level, index + 1);
            NextStep::NextSubLevel {
                id: following.id.clone(),
                name: following.name.clone(),
            }
        } else {
            match level {
                LevelKind::Familiarization => {
                    self.cursor.set(LevelKind::Familiarization, 0);
                    self.cursor.set(LevelKind::Distinction, 0);
                    self.cursor.level = LevelKind::Distinction;
                    NextStep::AdvanceToDistinction
                }
                LevelKind::Distinction => {
                    self.cursor = Cursor::default();
                    NextStep::GameComplete
                }
            }
        };

        let summary = LevelSummary {
            level,
            sub_level_id: sub.id.clone(),
            sub_level_name: sub.name.clone(),
            score: progress.score,
            round_count: progress.round_count,
            mistakes: progress.mistakes,
            replays_used: progress.replays_used,
            passed,
            next,
        };

        if passed {
            tracing::info!(
                sub_level = %sub.id,
                score = summary.score,
                mistakes = summary.mistakes,
                replays = summary.replays_used,
                "sub-level passed"
            );
        } else {
            tracing::info!(
                sub_level = %sub.id,
                score = summary.score,
                mistakes = summary.mistakes,
                replays = summary.replays_used,
                "sub-level failed, repeat required"
            );
        }

        progress.reset_counters();
        self.generation += 1;
        self.pending = None;
        self.phase = Phase::LevelEnded;
        self.last_summary = Some(summary.clone());
        out.push(Instruction::LevelEnded { summary });
    }
}

/// Pick the correct vowel, prompt clip and (Level 1) cards for a round.
fn select_round<R: Rng + ?Sized>(
    progress: &mut LevelProgress,
    sub: &SubLevelSpec,
    catalog: &VowelCatalog,
    settings: &GameSettings,
    rng: &mut R,
) -> Result<RoundContent> {
    let correct = match progress.level {
        LevelKind::Distinction => pick_distinction_vowel(
            &sub.vowels,
            &settings.distinction_weights,
            progress.last_correct_vowel.as_deref(),
            settings.max_selection_attempts,
            rng,
        )
        .to_string(),
        LevelKind::Familiarization => {
            if progress.pending_queue.is_empty() {
                // Only reached when rounds outnumber the queue.
                progress.pending_queue =
                    build_queue(&sub.vowels, &settings.familiarization_ratio, rng);
            }
            next_from_queue(
                &mut progress.pending_queue,
                progress.last_correct_vowel.as_deref(),
            )
            .ok_or_else(|| ContentError::EmptyQueue { id: sub.id.clone() })?
        }
    };

    let entry = catalog.get(&correct)?;
    let cards = match progress.level {
        LevelKind::Familiarization => {
            let distractors = pick_distractors(catalog, sub, &correct, settings, rng);
            Some(deal_cards(entry, &distractors, rng))
        }
        LevelKind::Distinction => None,
    };
    let prompt = pick_prompt_audio(entry, rng)?.audio.clone();

    Ok(RoundContent {
        correct,
        prompt,
        cards,
    })
}

fn level_header(kind: LevelKind, sub: &SubLevelSpec) -> String {
    format!("LEVEL {} - Sub-Level {}: {}", kind.number(), sub.id, sub.name)
}

fn counters(progress: &LevelProgress) -> Instruction {
    Instruction::RenderCounters {
        score: progress.score,
        current_round: progress.current_round,
        round_count: progress.round_count,
        progress: progress.progress_fraction(),
    }
}
