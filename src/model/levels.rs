use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CefrLevel {
    BelowA1,
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    pub fn label(self) -> &'static str {
        match self {
            CefrLevel::BelowA1 => "Below A1",
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CefrLevel::BelowA1 => "Not yet at basic user level",
            CefrLevel::A1 => "Basic user: breakthrough",
            CefrLevel::A2 => "Basic user: waystage",
            CefrLevel::B1 => "Independent user: threshold",
            CefrLevel::B2 => "Independent user: vantage",
            CefrLevel::C1 => "Proficient user: effective operational proficiency",
            CefrLevel::C2 => "Proficient user: mastery",
        }
    }
}

/// ETS performance levels. Reading and listening bottom out at
/// `BelowLowIntermediate`; speaking and writing add `Basic` and `BelowBasic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToeflLevel {
    BelowBasic,
    BelowLowIntermediate,
    Basic,
    LowIntermediate,
    HighIntermediate,
    Advanced,
}

impl ToeflLevel {
    pub fn label(self) -> &'static str {
        match self {
            ToeflLevel::BelowBasic => "Below Basic",
            ToeflLevel::BelowLowIntermediate => "Below Low-Intermediate",
            ToeflLevel::Basic => "Basic",
            ToeflLevel::LowIntermediate => "Low-Intermediate",
            ToeflLevel::HighIntermediate => "High-Intermediate",
            ToeflLevel::Advanced => "Advanced",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToeflLevel::BelowBasic => {
                "Insufficient evidence of the skills needed for academic tasks"
            }
            ToeflLevel::BelowLowIntermediate => {
                "Understands only isolated parts of academic material"
            }
            ToeflLevel::Basic => "Communicates simple ideas with frequent lapses",
            ToeflLevel::LowIntermediate => "Handles basic academic content with noticeable gaps",
            ToeflLevel::HighIntermediate => {
                "Handles most academic content with occasional difficulty"
            }
            ToeflLevel::Advanced => "Handles a wide range of academic content with ease",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PercentileTier {
    NeedsImprovement,
    BelowAverage,
    Average,
    Good,
    Excellent,
}

impl PercentileTier {
    pub fn label(self) -> &'static str {
        match self {
            PercentileTier::NeedsImprovement => "Needs Improvement (Bottom 25%)",
            PercentileTier::BelowAverage => "Below Average (Bottom 50%)",
            PercentileTier::Average => "Average (Above Median)",
            PercentileTier::Good => "Good (Top 25%)",
            PercentileTier::Excellent => "Excellent (Top 10%)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PercentileTier::NeedsImprovement => {
                "Behind most test takers; rebuild the fundamentals of this area"
            }
            PercentileTier::BelowAverage => {
                "Below the median; focused practice should lift this score"
            }
            PercentileTier::Average => "Ahead of at least half of all test takers",
            PercentileTier::Good => "Ahead of at least three in four test takers",
            PercentileTier::Excellent => "Ahead of at least nine in ten test takers",
        }
    }
}

/// A proficiency level from one of the closed level families. Levels from
/// different families are unordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Cefr(CefrLevel),
    Toefl(ToeflLevel),
    Percentile(PercentileTier),
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::Cefr(l) => l.label(),
            Level::Toefl(l) => l.label(),
            Level::Percentile(l) => l.label(),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Level::Cefr(l) => l.description(),
            Level::Toefl(l) => l.description(),
            Level::Percentile(l) => l.description(),
        }
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Level::Cefr(a), Level::Cefr(b)) => Some(a.cmp(b)),
            (Level::Toefl(a), Level::Toefl(b)) => Some(a.cmp(b)),
            (Level::Percentile(a), Level::Percentile(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl From<CefrLevel> for Level {
    fn from(value: CefrLevel) -> Self {
        Level::Cefr(value)
    }
}

impl From<ToeflLevel> for Level {
    fn from(value: ToeflLevel) -> Self {
        Level::Toefl(value)
    }
}

impl From<PercentileTier> for Level {
    fn from(value: PercentileTier) -> Self {
        Level::Percentile(value)
    }
}

/// Ordered `(threshold, label)` steps. A score takes the label of the highest
/// threshold at or below it; scores under the first threshold take the first
/// label.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale<L> {
    name: String,
    steps: Vec<(f64, L)>,
}

impl<L: Copy> BandScale<L> {
    pub fn new(name: impl Into<String>, steps: &[(f64, L)]) -> Result<Self, ConfigError> {
        let name = name.into();
        if steps.is_empty() {
            return Err(ConfigError::EmptyBandScale { scale: name });
        }
        let ordered = steps.iter().all(|(t, _)| t.is_finite())
            && steps.windows(2).all(|pair| pair[0].0 < pair[1].0);
        if !ordered {
            return Err(ConfigError::UnorderedBandScale { scale: name });
        }
        Ok(Self {
            name,
            steps: steps.to_vec(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[(f64, L)] {
        &self.steps
    }

    pub fn map<M: Copy>(&self, f: impl Fn(L) -> M) -> BandScale<M> {
        BandScale {
            name: self.name.clone(),
            steps: self.steps.iter().map(|&(t, l)| (t, f(l))).collect(),
        }
    }
}

/// Exact-match descriptor texts keyed on canonical score values.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorTable {
    entries: Vec<(f64, String)>,
    fallback: String,
}

impl DescriptorTable {
    pub fn new(entries: &[(f64, &str)], fallback: impl Into<String>) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|&(score, text)| (score, text.to_string()))
                .collect(),
            fallback: fallback.into(),
        }
    }

    pub fn entries(&self) -> &[(f64, String)] {
        &self.entries
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/levels.rs"]
mod tests;
