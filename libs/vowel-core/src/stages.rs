//! Sub-level tables for both levels.

use crate::catalog::VowelCatalog;
use crate::error::{ContentError, Result};
use crate::types::{LevelKind, SubLevelSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Static sub-level configuration, loaded once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageTable {
    familiarization: Vec<SubLevelSpec>,
    distinction: Vec<SubLevelSpec>,
}

impl StageTable {
    /// Build a table, checking ids, round counts and that neither level is empty.
    pub fn new(familiarization: Vec<SubLevelSpec>, distinction: Vec<SubLevelSpec>) -> Result<Self> {
        let table = Self {
            familiarization,
            distinction,
        };

        for kind in [LevelKind::Familiarization, LevelKind::Distinction] {
            let subs = table.level(kind);
            if subs.is_empty() {
                return Err(ContentError::EmptyLevel {
                    level: kind.as_str(),
                });
            }

            let mut seen = HashSet::new();
            for sub in subs {
                if !seen.insert(sub.id.as_str()) {
                    return Err(ContentError::DuplicateSubLevel { id: sub.id.clone() });
                }
                if sub.round_count == 0 {
                    return Err(ContentError::ZeroRounds { id: sub.id.clone() });
                }
            }
        }

        Ok(table)
    }

    /// The scripted game: five Familiarization and twenty-six Distinction sub-levels.
    pub fn builtin() -> Self {
        let familiarization = vec![
            SubLevelSpec::new("1A", "Short Vowels (A, E, I)", 7, ["alligator", "elephant", "pin"]),
            SubLevelSpec::new("1B", "Short Vowels (U, O, OO)", 7, ["umbrella", "ostrich", "foot"]),
            SubLevelSpec::new("1C", "Long Vowels (A, I, O)", 7, ["acorn", "icecream", "ocean"]),
            SubLevelSpec::new("1D", "Long Vowels (U, E) & AU", 7, ["ukulele", "eagle", "australia"]),
            SubLevelSpec::new("1E", "R-Controlled & Special Sounds", 7, ["earth", "oil", "owl"]),
        ];

        let distinction = [
            ("2.1.A", "Earth Distinction 1", ["earth", "elephant", "ocean"]),
            ("2.2.A", "Australia Distinction 1", ["australia", "earth", "elephant"]),
            ("2.2.B", "Australia Distinction 2", ["australia", "ocean", "pin"]),
            ("2.3.A", "Alligator Distinction 1", ["alligator", "elephant", "earth"]),
            ("2.3.B", "Alligator Distinction 2", ["alligator", "acorn", "umbrella"]),
            ("2.3.C", "Alligator Distinction 3", ["alligator", "australia", "pin"]),
            ("2.4.A", "Foot Distinction 1", ["foot", "ocean", "earth"]),
            ("2.4.B", "Foot Distinction 2", ["foot", "australia", "icecream"]),
            ("2.4.C", "Foot Distinction 3", ["foot", "ukulele", "pin"]),
            ("2.4.D", "Foot Distinction 4", ["foot", "elephant", "ostrich"]),
            ("2.5.A", "Umbrella Distinction 1", ["umbrella", "foot", "elephant"]),
            ("2.5.B", "Umbrella Distinction 2", ["umbrella", "ocean", "ostrich"]),
            ("2.5.C", "Umbrella Distinction 3", ["umbrella", "australia", "eagle"]),
            ("2.5.D", "Umbrella Distinction 4", ["umbrella", "ukulele", "earth"]),
            ("2.6.A", "Ostrich Distinction 1", ["ostrich", "ocean", "eagle"]),
            ("2.6.B", "Ostrich Distinction 2", ["ostrich", "umbrella", "acorn"]),
            ("2.6.C", "Ostrich Distinction 3", ["ostrich", "foot", "icecream"]),
            ("2.6.D", "Ostrich Distinction 4", ["ostrich", "australia", "elephant"]),
            ("2.6.E", "Ostrich Distinction 5", ["ostrich", "alligator", "pin"]),
            ("2.6.F", "Ostrich Distinction 6", ["ostrich", "australia", "icecream"]),
            ("2.7.A", "Pin Distinction 1", ["pin", "eagle", "icecream"]),
            ("2.7.B", "Pin Distinction 2", ["pin", "elephant", "ocean"]),
            ("2.7.C", "Pin Distinction 3", ["pin", "ostrich", "acorn"]),
            ("2.7.D", "Pin Distinction 4", ["pin", "umbrella", "australia"]),
            ("2.7.E", "Pin Distinction 5", ["pin", "foot", "ostrich"]),
            ("2.7.F", "Pin Distinction 6", ["pin", "australia", "icecream"]),
        ]
        .into_iter()
        .map(|(id, name, vowels)| SubLevelSpec::new(id, name, 5, vowels))
        .collect();

        Self {
            familiarization,
            distinction,
        }
    }

    pub fn level(&self, kind: LevelKind) -> &[SubLevelSpec] {
        match kind {
            LevelKind::Familiarization => &self.familiarization,
            LevelKind::Distinction => &self.distinction,
        }
    }

    pub fn sub_level(&self, kind: LevelKind, index: usize) -> Result<&SubLevelSpec> {
        let subs = self.level(kind);
        subs.get(index).ok_or(ContentError::SubLevelOutOfRange {
            level: kind.as_str(),
            index,
            len: subs.len(),
        })
    }

    /// Check that every target vowel exists in the catalog.
    pub fn validate(&self, catalog: &VowelCatalog) -> Result<()> {
        for sub in self.familiarization.iter().chain(self.distinction.iter()) {
            for name in &sub.vowels {
                let entry = catalog.get(name)?;
                if entry.word_audio().next().is_none() {
                    return Err(ContentError::NoWordAudio { name: name.clone() });
                }
            }
        }
        Ok(())
    }
}

impl Default for StageTable {
    fn default() -> Self {
        Self::builtin()
    }
}
