//! The vowel catalog: every vowel sound the game can ask about.
//!
//! The catalog is read-only once built. Sessions share it behind an `Arc`.

use crate::error::{ContentError, Result};
use crate::types::{VowelEntry, WordAudio, ISOLATED_SOUND_MARKER};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Entry on the sound introduction screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntroductionCard {
    pub name: String,
    pub image: String,
    pub isolated_sound: Option<String>,
}

/// Validated, name-indexed vowel list.
#[derive(Debug, Clone)]
pub struct VowelCatalog {
    entries: Vec<VowelEntry>,
    index: HashMap<String, usize>,
}

impl VowelCatalog {
    /// Build a catalog, rejecting duplicate names and vowels with more
    /// than one isolated sound.
    pub fn new(entries: Vec<VowelEntry>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.name.clone(), i).is_some() {
                return Err(ContentError::DuplicateVowel {
                    name: entry.name.clone(),
                });
            }

            let isolated = entry.words.iter().filter(|w| w.is_isolated_sound).count();
            if isolated > 1 {
                return Err(ContentError::MultipleIsolatedSounds {
                    name: entry.name.clone(),
                    count: isolated,
                });
            }

            // Still usable as a distractor, so only warn.
            if entry.word_audio().next().is_none() {
                tracing::warn!(vowel = %entry.name, "vowel has no word audio and cannot be prompted");
            }
        }

        Ok(Self { entries, index })
    }

    /// Load a catalog from a JSON array of vowel entries.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut entries: Vec<VowelEntry> = serde_json::from_str(json)?;
        for word in entries.iter_mut().flat_map(|e| e.words.iter_mut()) {
            if word.audio.contains(ISOLATED_SOUND_MARKER) {
                word.is_isolated_sound = true;
            }
        }
        Self::new(entries)
    }

    /// The fifteen vowel sounds the game ships with.
    pub fn builtin() -> Self {
        let entries = vec![
            vowel("alligator", &["apple", "cat", "hat"]),
            vowel("elephant", &["egg", "bed", "red"]),
            vowel("pin", &["fish", "sit", "pig"]),
            vowel("umbrella", &["up", "cup", "sun"]),
            vowel("ostrich", &["octopus", "hot", "dog"]),
            vowel("foot", &["book", "cook", "wood"]),
            vowel("acorn", &["cake", "rain", "day"]),
            vowel("icecream", &["kite", "bike", "light"]),
            vowel("ocean", &["boat", "rope", "snow"]),
            vowel("ukulele", &["cube", "mule", "music"]),
            vowel("eagle", &["tree", "bee", "feet"]),
            vowel("australia", &["saw", "ball", "paw"]),
            vowel("earth", &["bird", "fern", "turn"]),
            vowel("oil", &["coin", "boy", "toy"]),
            vowel("owl", &["cow", "house", "mouse"]),
        ];
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();
        Self { entries, index }
    }

    pub fn find(&self, name: &str) -> Option<&VowelEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Look up a vowel, treating a missing name as a content defect.
    pub fn get(&self, name: &str) -> Result<&VowelEntry> {
        self.find(name).ok_or_else(|| ContentError::UnknownVowel {
            name: name.to_string(),
        })
    }

    pub fn entries(&self) -> &[VowelEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every vowel sorted by name, with the clip of its sound alone.
    pub fn introduction(&self) -> Vec<IntroductionCard> {
        let mut cards: Vec<IntroductionCard> = self
            .entries
            .iter()
            .map(|e| {
                if e.isolated_sound().is_none() {
                    tracing::error!(vowel = %e.name, "isolated sound not found");
                }
                IntroductionCard {
                    name: e.name.clone(),
                    image: e.image.clone(),
                    isolated_sound: e.isolated_sound().map(|w| w.audio.clone()),
                }
            })
            .collect();
        cards.sort_by(|a, b| a.name.cmp(&b.name));
        cards
    }
}

impl Default for VowelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn vowel(name: &str, words: &[&str]) -> VowelEntry {
    let mut clips: Vec<WordAudio> = words
        .iter()
        .map(|word| WordAudio::word(format!("audio/{name}/{word}.mp3")))
        .collect();
    clips.push(WordAudio::isolated(format!(
        "audio/{name}/{ISOLATED_SOUND_MARKER}.mp3"
    )));

    VowelEntry {
        name: name.to_string(),
        image: format!("images/{name}.jpg"),
        words: clips,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = VowelCatalog::builtin();
        assert_eq!(builtin.len(), 15);

        let rebuilt = VowelCatalog::new(builtin.entries().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), 15);
        for entry in rebuilt.entries() {
            assert!(entry.isolated_sound().is_some(), "{} lacks isolated sound", entry.name);
            assert!(entry.word_audio().count() >= 1);
        }
    }

    #[test]
    fn get_unknown_vowel_is_content_error() {
        let catalog = VowelCatalog::builtin();
        assert!(catalog.get("pin").is_ok());
        assert!(matches!(
            catalog.get("zebra"),
            Err(ContentError::UnknownVowel { name }) if name == "zebra"
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let entries = vec![vowel("pin", &["fish"]), vowel("pin", &["sit"])];
        assert!(matches!(
            VowelCatalog::new(entries),
            Err(ContentError::DuplicateVowel { .. })
        ));
    }

    #[test]
    fn rejects_multiple_isolated_sounds() {
        let mut entry = vowel("pin", &["fish"]);
        entry.words.push(WordAudio::isolated("audio/pin/other.mp3"));
        assert!(matches!(
            VowelCatalog::new(vec![entry]),
            Err(ContentError::MultipleIsolatedSounds { count: 2, .. })
        ));
    }

    #[test]
    fn from_json_infers_isolated_sound_from_marker() {
        let json = r#"[
            {
                "name": "owl",
                "image": "images/owl.jpg",
                "words": [
                    { "audio": "audio/owl/cow.mp3" },
                    { "audio": "audio/owl/vowel_sound_only.mp3" }
                ]
            }
        ]"#;
        let catalog = VowelCatalog::from_json(json).unwrap();
        let owl = catalog.get("owl").unwrap();
        assert_eq!(owl.word_audio().count(), 1);
        assert_eq!(
            owl.isolated_sound().map(|w| w.audio.as_str()),
            Some("audio/owl/vowel_sound_only.mp3")
        );
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        assert!(matches!(
            VowelCatalog::from_json("{not json"),
            Err(ContentError::Json(_))
        ));
    }

    #[test]
    fn introduction_is_sorted_by_name() {
        let cards = VowelCatalog::builtin().introduction();
        let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names[0], "acorn");
        assert_eq!(
            cards[0].isolated_sound.as_deref(),
            Some("audio/acorn/vowel_sound_only.mp3")
        );
    }
}
