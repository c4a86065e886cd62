use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{ConfigError, ScoreError};
use crate::model::levels::{BandScale, Level, PercentileTier};
use crate::model::program::{Combiner, ProgramConfig, ProgramKind, ProgramSpec, Rounding};
use crate::model::responses::ResponseMap;
use crate::model::results::CompositeResult;
use crate::model::section::{InputSpec, Scoring, SectionSpec, TargetScale};
use crate::model::thresholds::{AnalysisThresholds, ScoreBasis};
use crate::pipeline::compute;
use crate::programs::ObjectiveAnswers;

pub struct SubtestDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub questions: usize,
    pub weight: f64,
    pub population_mean: f64,
    pub population_sd: f64,
}

pub const SUBTESTS: &[SubtestDef] = &[
    SubtestDef {
        id: "penalaran_umum",
        name: "Penalaran Umum (General Reasoning)",
        description: "Logical thinking and pattern recognition",
        questions: 30,
        weight: 1.0,
        population_mean: 15.5,
        population_sd: 4.2,
    },
    SubtestDef {
        id: "pengetahuan_kuantitatif",
        name: "Pengetahuan Kuantitatif (Quantitative Knowledge)",
        description: "Mathematical reasoning and problem solving",
        questions: 25,
        weight: 1.0,
        population_mean: 12.8,
        population_sd: 3.8,
    },
    SubtestDef {
        id: "penalaran_matematika",
        name: "Penalaran Matematika (Mathematical Reasoning)",
        description: "Advanced mathematical logic and analysis",
        questions: 25,
        weight: 1.0,
        population_mean: 13.2,
        population_sd: 4.1,
    },
    SubtestDef {
        id: "literasi_bahasa_indonesia",
        name: "Literasi Bahasa Indonesia (Indonesian Literacy)",
        description: "Reading comprehension and language analysis",
        questions: 30,
        weight: 1.0,
        population_mean: 18.3,
        population_sd: 3.9,
    },
    SubtestDef {
        id: "literasi_bahasa_inggris",
        name: "Literasi Bahasa Inggris (English Literacy)",
        description: "English reading comprehension and usage",
        questions: 20,
        weight: 1.0,
        population_mean: 11.7,
        population_sd: 3.5,
    },
];

pub const TARGET_SCALE: TargetScale = TargetScale {
    mean: 500.0,
    sd: 100.0,
    min: 200.0,
    max: 800.0,
};

const PERCENTILE_TIERS: &[(f64, PercentileTier)] = &[
    (0.0, PercentileTier::NeedsImprovement),
    (25.0, PercentileTier::BelowAverage),
    (50.0, PercentileTier::Average),
    (75.0, PercentileTier::Good),
    (90.0, PercentileTier::Excellent),
];

impl ProgramConfig {
    pub fn snbt() -> Result<Self, ConfigError> {
        let tiers = BandScale::new("snbt_percentile_tiers", PERCENTILE_TIERS)?.map(Level::from);
        let sections = SUBTESTS
            .iter()
            .map(|def| SectionSpec {
                id: def.id.to_string(),
                name: def.name.to_string(),
                description: Some(def.description.to_string()),
                input: InputSpec::Objective {
                    item_count: def.questions,
                    max_raw: def.questions as u32,
                },
                scoring: Scoring::Standardize {
                    population_mean: def.population_mean,
                    population_sd: def.population_sd,
                    target: TARGET_SCALE,
                },
                weight: def.weight,
                levels: tiers.clone(),
            })
            .collect();

        ProgramConfig::new(ProgramSpec {
            kind: ProgramKind::Snbt,
            variant: None,
            sections,
            combiner: Combiner::WeightedMean,
            rounding: Rounding::Decimals(1),
            percentile: Some(TARGET_SCALE),
            level_basis: ScoreBasis::Percentile,
            overall_levels: tiers,
            descriptors: None,
            analysis: AnalysisThresholds::snbt_v1(),
        })
    }
}

/// Answers keyed by subtest id. Unknown or missing subtests surface as
/// validation issues rather than parse errors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SnbtResponses(pub BTreeMap<String, ObjectiveAnswers>);

impl SnbtResponses {
    pub fn to_response_map(&self) -> ResponseMap {
        self.0
            .iter()
            .map(|(id, answers)| (id.clone(), answers.to_response_set()))
            .collect()
    }
}

pub fn score(responses: &SnbtResponses) -> Result<CompositeResult, ScoreError> {
    let config = ProgramConfig::snbt()?;
    Ok(compute(&config, &responses.to_response_map())?)
}

#[cfg(test)]
#[path = "../../tests/src_inline/programs/snbt.rs"]
mod tests;
