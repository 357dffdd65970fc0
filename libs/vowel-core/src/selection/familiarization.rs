//! Queue and distractor selection for Familiarization rounds.

use crate::catalog::VowelCatalog;
use crate::settings::GameSettings;
use crate::types::{Card, SubLevelSpec, VowelEntry};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// Build the shuffled answer queue for a sub-level.
///
/// Each target appears as many times as its ratio entry (3:2:2 by default).
pub fn build_queue<R: Rng + ?Sized>(
    targets: &[String; 3],
    ratio: &[u32; 3],
    rng: &mut R,
) -> VecDeque<String> {
    let mut queue: Vec<String> = targets
        .iter()
        .zip(ratio)
        .flat_map(|(name, &copies)| std::iter::repeat(name.clone()).take(copies as usize))
        .collect();
    queue.shuffle(rng);
    queue.into()
}

/// Take the next answer, sending a back-to-back repeat to the tail once.
pub fn next_from_queue(queue: &mut VecDeque<String>, last: Option<&str>) -> Option<String> {
    let head = queue.pop_front()?;
    if last == Some(head.as_str()) && !queue.is_empty() {
        queue.push_back(head);
        return queue.pop_front();
    }
    Some(head)
}

/// Pick two wrong answers: one easy and one difficult when both pools allow.
///
/// Pools exclude the sub-level's targets and the correct vowel. If a pool is
/// empty, the rest are drawn from any unused vowel in the catalog.
pub fn pick_distractors<'a, R: Rng + ?Sized>(
    catalog: &'a VowelCatalog,
    sub_level: &SubLevelSpec,
    correct: &str,
    settings: &GameSettings,
    rng: &mut R,
) -> Vec<&'a VowelEntry> {
    let (mut difficult, mut easy): (Vec<&VowelEntry>, Vec<&VowelEntry>) = catalog
        .entries()
        .iter()
        .filter(|e| e.name != correct && !sub_level.is_target(&e.name))
        .partition(|e| settings.is_difficult(&e.name));

    easy.shuffle(rng);
    difficult.shuffle(rng);

    let mut picked: Vec<&VowelEntry> = easy.first().into_iter().chain(difficult.first()).copied().collect();

    while picked.len() < 2 {
        let remaining: Vec<&VowelEntry> = catalog
            .entries()
            .iter()
            .filter(|e| e.name != correct && !picked.iter().any(|p| p.name == e.name))
            .collect();
        match remaining.choose(rng) {
            Some(entry) => picked.push(*entry),
            None => break,
        }
    }

    picked
}

/// Shuffle the correct card in with the distractors.
pub fn deal_cards<R: Rng + ?Sized>(
    correct: &VowelEntry,
    distractors: &[&VowelEntry],
    rng: &mut R,
) -> Vec<Card> {
    let mut cards: Vec<Card> = std::iter::once(correct)
        .chain(distractors.iter().copied())
        .map(VowelEntry::card)
        .collect();
    cards.shuffle(rng);
    cards
}
