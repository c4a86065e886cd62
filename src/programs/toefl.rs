use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{ConfigError, ScoreError};
use crate::model::levels::{BandScale, CefrLevel, Level, ToeflLevel};
use crate::model::program::{Combiner, ProgramConfig, ProgramKind, ProgramSpec, Rounding};
use crate::model::responses::{RawResponseSet, ResponseMap};
use crate::model::results::CompositeResult;
use crate::model::section::{InputSpec, Scoring, SectionSpec};
use crate::model::table::{ConversionTable, LookupMode};
use crate::model::thresholds::{AnalysisThresholds, ScoreBasis};
use crate::pipeline::compute;
use crate::programs::ObjectiveAnswers;

pub const READING: &str = "reading";
pub const LISTENING: &str = "listening";
pub const SPEAKING: &str = "speaking";
pub const WRITING: &str = "writing";

#[rustfmt::skip]
const READING_TABLE: &[(u32, f64)] = &[
    (0, 0.0), (1, 0.0), (2, 1.0), (3, 2.0), (4, 3.0), (5, 4.0),
    (6, 5.0), (7, 6.0), (8, 7.0), (9, 8.0), (10, 9.0), (11, 10.0),
    (12, 11.0), (13, 12.0), (14, 13.0), (15, 14.0), (16, 15.0), (17, 16.0),
    (18, 17.0), (19, 18.0), (20, 19.0), (21, 20.0), (22, 21.0), (23, 22.0),
    (24, 23.0), (25, 24.0), (26, 25.0), (27, 26.0), (28, 27.0), (29, 29.0),
    (30, 30.0),
];

#[rustfmt::skip]
const LISTENING_TABLE: &[(u32, f64)] = &[
    (0, 0.0), (1, 1.0), (2, 2.0), (3, 3.0), (4, 4.0), (5, 5.0),
    (6, 6.0), (7, 7.0), (8, 8.0), (9, 9.0), (10, 10.0), (11, 11.0),
    (12, 12.0), (13, 13.0), (14, 14.0), (15, 15.0), (16, 16.0), (17, 17.0),
    (18, 18.0), (19, 19.0), (20, 20.0), (21, 22.0), (22, 23.0), (23, 24.0),
    (24, 25.0), (25, 26.0), (26, 28.0), (27, 29.0), (28, 30.0),
];

// Rubric averages as published, truncated to two decimals.
#[rustfmt::skip]
const SPEAKING_TABLE: &[(f64, f64)] = &[
    (4.00, 30.0), (3.83, 29.0), (3.66, 28.0), (3.50, 27.0), (3.33, 26.0),
    (3.16, 24.0), (3.00, 23.0), (2.83, 22.0), (2.66, 20.0), (2.50, 19.0),
    (2.33, 18.0), (2.16, 17.0), (2.00, 15.0), (1.83, 14.0), (1.66, 13.0),
    (1.50, 11.0), (1.33, 10.0), (1.16, 9.0), (1.00, 8.0), (0.83, 6.0),
    (0.66, 5.0), (0.50, 4.0), (0.33, 3.0), (0.16, 2.0), (0.00, 0.0),
];

#[rustfmt::skip]
const WRITING_TABLE: &[(f64, f64)] = &[
    (5.00, 30.0), (4.75, 29.0), (4.50, 28.0), (4.25, 27.0), (4.00, 25.0),
    (3.75, 24.0), (3.50, 22.0), (3.25, 21.0), (3.00, 20.0), (2.75, 18.0),
    (2.50, 17.0), (2.25, 15.0), (2.00, 14.0), (1.75, 12.0), (1.50, 11.0),
    (1.25, 10.0), (1.00, 8.0), (0.75, 7.0), (0.50, 5.0), (0.25, 4.0),
    (0.00, 0.0),
];

const READING_LEVELS: &[(f64, ToeflLevel)] = &[
    (0.0, ToeflLevel::BelowLowIntermediate),
    (4.0, ToeflLevel::LowIntermediate),
    (18.0, ToeflLevel::HighIntermediate),
    (24.0, ToeflLevel::Advanced),
];

const LISTENING_LEVELS: &[(f64, ToeflLevel)] = &[
    (0.0, ToeflLevel::BelowLowIntermediate),
    (9.0, ToeflLevel::LowIntermediate),
    (17.0, ToeflLevel::HighIntermediate),
    (22.0, ToeflLevel::Advanced),
];

const SPEAKING_LEVELS: &[(f64, ToeflLevel)] = &[
    (0.0, ToeflLevel::BelowBasic),
    (10.0, ToeflLevel::Basic),
    (16.0, ToeflLevel::LowIntermediate),
    (20.0, ToeflLevel::HighIntermediate),
    (25.0, ToeflLevel::Advanced),
];

const WRITING_LEVELS: &[(f64, ToeflLevel)] = &[
    (0.0, ToeflLevel::BelowBasic),
    (7.0, ToeflLevel::Basic),
    (13.0, ToeflLevel::LowIntermediate),
    (17.0, ToeflLevel::HighIntermediate),
    (24.0, ToeflLevel::Advanced),
];

const TOTAL_CEFR: &[(f64, CefrLevel)] = &[
    (0.0, CefrLevel::A2),
    (42.0, CefrLevel::B1),
    (72.0, CefrLevel::B2),
    (95.0, CefrLevel::C1),
];

pub const READING_ITEMS: usize = 30;
pub const LISTENING_ITEMS: usize = 28;
pub const SPEAKING_TASKS: usize = 4;
pub const WRITING_TASKS: usize = 2;

impl ProgramConfig {
    pub fn toefl_ibt() -> Result<Self, ConfigError> {
        let sections = vec![
            objective_section(
                READING,
                "Reading",
                READING_ITEMS,
                READING_TABLE,
                READING_LEVELS,
            )?,
            objective_section(
                LISTENING,
                "Listening",
                LISTENING_ITEMS,
                LISTENING_TABLE,
                LISTENING_LEVELS,
            )?,
            rated_section(
                SPEAKING,
                "Speaking",
                SPEAKING_TASKS,
                4.0,
                SPEAKING_TABLE,
                SPEAKING_LEVELS,
            )?,
            rated_section(
                WRITING,
                "Writing",
                WRITING_TASKS,
                5.0,
                WRITING_TABLE,
                WRITING_LEVELS,
            )?,
        ];

        ProgramConfig::new(ProgramSpec {
            kind: ProgramKind::ToeflIbt,
            variant: None,
            sections,
            combiner: Combiner::Sum,
            rounding: Rounding::None,
            percentile: None,
            level_basis: ScoreBasis::Scaled,
            overall_levels: BandScale::new("toefl_total_cefr", TOTAL_CEFR)?.map(Level::from),
            descriptors: None,
            analysis: AnalysisThresholds::toefl_v1(),
        })
    }
}

fn objective_section(
    id: &str,
    name: &str,
    items: usize,
    table: &[(u32, f64)],
    levels: &[(f64, ToeflLevel)],
) -> Result<SectionSpec, ConfigError> {
    Ok(SectionSpec {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        input: InputSpec::Objective {
            item_count: items,
            max_raw: items as u32,
        },
        scoring: Scoring::Table(ConversionTable::from_counts(
            format!("toefl_{id}"),
            LookupMode::Floor,
            table,
        )?),
        weight: 1.0,
        levels: BandScale::new(format!("toefl_{id}_levels"), levels)?.map(Level::from),
    })
}

fn rated_section(
    id: &str,
    name: &str,
    tasks: usize,
    max_rating: f64,
    table: &[(f64, f64)],
    levels: &[(f64, ToeflLevel)],
) -> Result<SectionSpec, ConfigError> {
    Ok(SectionSpec {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        input: InputSpec::Rated {
            task_count: tasks,
            max_rating,
        },
        scoring: Scoring::Table(ConversionTable::new(
            format!("toefl_{id}"),
            LookupMode::Nearest,
            table,
        )?),
        weight: 1.0,
        levels: BandScale::new(format!("toefl_{id}_levels"), levels)?.map(Level::from),
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToeflResponses {
    pub reading: ObjectiveAnswers,
    pub listening: ObjectiveAnswers,
    pub speaking: Vec<f64>,
    pub writing: Vec<f64>,
}

impl ToeflResponses {
    pub fn to_response_map(&self) -> ResponseMap {
        BTreeMap::from([
            (READING.to_string(), self.reading.to_response_set()),
            (LISTENING.to_string(), self.listening.to_response_set()),
            (SPEAKING.to_string(), RawResponseSet::Ratings(self.speaking.clone())),
            (WRITING.to_string(), RawResponseSet::Ratings(self.writing.clone())),
        ])
    }
}

pub fn score(responses: &ToeflResponses) -> Result<CompositeResult, ScoreError> {
    let config = ProgramConfig::toefl_ibt()?;
    Ok(compute(&config, &responses.to_response_map())?)
}

#[cfg(test)]
#[path = "../../tests/src_inline/programs/toefl.rs"]
mod tests;
