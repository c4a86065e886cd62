use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{ConfigError, ScoreError};
use crate::model::levels::{BandScale, CefrLevel, DescriptorTable, Level};
use crate::model::program::{Combiner, ProgramConfig, ProgramKind, ProgramSpec, Rounding};
use crate::model::responses::{CriterionRatings, RawResponseSet, ResponseMap};
use crate::model::results::CompositeResult;
use crate::model::section::{CriterionSpec, InputSpec, Scoring, SectionSpec, TaskSpec};
use crate::model::table::{ConversionTable, LookupMode};
use crate::model::thresholds::{AnalysisThresholds, ScoreBasis};
use crate::pipeline::compute;
use crate::programs::ObjectiveAnswers;

pub const LISTENING: &str = "listening";
pub const READING: &str = "reading";
pub const WRITING: &str = "writing";
pub const SPEAKING: &str = "speaking";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IeltsModule {
    Academic,
    GeneralTraining,
}

impl IeltsModule {
    pub fn name(self) -> &'static str {
        match self {
            IeltsModule::Academic => "Academic",
            IeltsModule::GeneralTraining => "General Training",
        }
    }

    pub fn reading_max_raw(self) -> u32 {
        match self {
            IeltsModule::Academic => 39,
            IeltsModule::GeneralTraining => 40,
        }
    }
}

#[rustfmt::skip]
const LISTENING_TABLE: &[(u32, f64)] = &[
    (39, 9.0), (38, 8.5), (37, 8.5), (36, 8.0), (35, 8.0),
    (34, 7.5), (33, 7.5), (32, 7.0), (31, 7.0), (30, 6.5),
    (29, 6.5), (28, 6.0), (27, 6.0), (26, 5.5), (25, 5.5),
    (24, 5.0), (23, 5.0), (22, 4.5), (21, 4.5), (20, 4.0),
    (19, 4.0), (18, 3.5), (17, 3.5), (16, 3.0), (15, 3.0),
    (14, 2.5), (13, 2.5), (12, 2.0), (11, 2.0), (10, 1.5),
    (9, 1.5), (8, 1.0), (7, 1.0), (6, 0.5), (5, 0.5),
    (4, 0.5), (3, 0.5), (2, 0.5), (1, 0.5), (0, 0.0),
];

#[rustfmt::skip]
const READING_ACADEMIC_TABLE: &[(u32, f64)] = &[
    (39, 9.0), (38, 8.5), (37, 8.0), (36, 7.5), (35, 7.0),
    (34, 6.5), (33, 6.0), (32, 5.5), (31, 5.0), (30, 4.5),
    (29, 4.0), (28, 3.5), (27, 3.0), (26, 2.5), (25, 2.0),
    (24, 1.5), (23, 1.0), (22, 0.5), (21, 0.5), (20, 0.5),
    (19, 0.5), (18, 0.5), (17, 0.5), (16, 0.5), (15, 0.5),
    (14, 0.5), (13, 0.5), (12, 0.5), (11, 0.5), (10, 0.5),
    (9, 0.5), (8, 0.5), (7, 0.5), (6, 0.5), (5, 0.5),
    (4, 0.5), (3, 0.5), (2, 0.5), (1, 0.5), (0, 0.0),
];

#[rustfmt::skip]
const READING_GENERAL_TABLE: &[(u32, f64)] = &[
    (40, 9.0), (39, 8.5), (38, 8.0), (37, 7.5), (36, 7.0),
    (35, 6.5), (34, 6.0), (33, 5.5), (32, 5.0), (31, 4.5),
    (30, 4.0), (29, 3.5), (28, 3.0), (27, 2.5), (26, 2.0),
    (25, 1.5), (24, 1.0), (23, 0.5), (22, 0.5), (21, 0.5),
    (20, 0.5), (19, 0.5), (18, 0.5), (17, 0.5), (16, 0.5),
    (15, 0.5), (14, 0.5), (13, 0.5), (12, 0.5), (11, 0.5),
    (10, 0.5), (9, 0.5), (8, 0.5), (7, 0.5), (6, 0.5),
    (5, 0.5), (4, 0.5), (3, 0.5), (2, 0.5), (1, 0.5), (0, 0.0),
];

const CEFR_STEPS: &[(f64, CefrLevel)] = &[
    (0.0, CefrLevel::BelowA1),
    (0.5, CefrLevel::A1),
    (3.5, CefrLevel::A2),
    (4.5, CefrLevel::B1),
    (5.5, CefrLevel::B2),
    (7.0, CefrLevel::C1),
    (8.5, CefrLevel::C2),
];

const BAND_DESCRIPTORS: &[(f64, &str)] = &[
    (9.0, "Expert User - Has fully operational command of the language"),
    (8.5, "Very Good User - Handles complex detailed argumentation well"),
    (8.0, "Very Good User - Has fully operational command with occasional inaccuracies"),
    (7.5, "Good User - Has operational command with occasional inaccuracies"),
    (7.0, "Good User - Handles complex language well and understands detailed reasoning"),
    (6.5, "Competent User - Generally effective command with some inaccuracies"),
    (6.0, "Competent User - Has generally effective command despite some inaccuracies"),
    (5.5, "Modest User - Has partial command with frequent problems"),
    (5.0, "Modest User - Has partial command and copes with overall meaning"),
    (4.5, "Limited User - Basic competence limited to familiar situations"),
    (4.0, "Limited User - Basic competence limited to familiar situations"),
    (3.5, "Extremely Limited User - Conveys general meaning in very familiar situations"),
    (3.0, "Extremely Limited User - Conveys general meaning in very familiar situations"),
    (2.5, "Intermittent User - Great difficulty following spoken and written English"),
    (2.0, "Intermittent User - Great difficulty following spoken and written English"),
    (1.5, "Non User - Essentially no ability except isolated words"),
    (1.0, "Non User - Essentially no ability except isolated words"),
    (0.5, "Did Not Attempt - Provides no assessable information"),
    (0.0, "Did Not Attempt - Did not attempt the test"),
];

pub const DESCRIPTOR_FALLBACK: &str = "Score not found";

const WRITING_CRITERIA: &[(&str, &str)] = &[
    ("task_achievement", "Task Achievement/Response"),
    ("coherence_cohesion", "Coherence and Cohesion"),
    ("lexical_resource", "Lexical Resource"),
    ("grammatical_range", "Grammatical Range and Accuracy"),
];

const SPEAKING_CRITERIA: &[(&str, &str)] = &[
    ("fluency_coherence", "Fluency and Coherence"),
    ("lexical_resource", "Lexical Resource"),
    ("grammatical_range", "Grammatical Range and Accuracy"),
    ("pronunciation", "Pronunciation"),
];

const MAX_BAND: f64 = 9.0;
const QUESTION_COUNT: usize = 40;

impl ProgramConfig {
    pub fn ielts(module: IeltsModule) -> Result<Self, ConfigError> {
        let levels = BandScale::new("ielts_cefr", CEFR_STEPS)?.map(Level::from);
        let reading_table = match module {
            IeltsModule::Academic => READING_ACADEMIC_TABLE,
            IeltsModule::GeneralTraining => READING_GENERAL_TABLE,
        };

        let sections = vec![
            SectionSpec {
                id: LISTENING.to_string(),
                name: "Listening".to_string(),
                description: None,
                input: InputSpec::Objective {
                    item_count: QUESTION_COUNT,
                    max_raw: 40,
                },
                scoring: Scoring::Table(ConversionTable::from_counts(
                    "ielts_listening",
                    LookupMode::Floor,
                    LISTENING_TABLE,
                )?),
                weight: 1.0,
                levels: levels.clone(),
            },
            SectionSpec {
                id: READING.to_string(),
                name: "Reading".to_string(),
                description: None,
                input: InputSpec::Objective {
                    item_count: QUESTION_COUNT,
                    max_raw: module.reading_max_raw(),
                },
                scoring: Scoring::Table(ConversionTable::from_counts(
                    "ielts_reading",
                    LookupMode::Floor,
                    reading_table,
                )?),
                weight: 1.0,
                levels: levels.clone(),
            },
            SectionSpec {
                id: WRITING.to_string(),
                name: "Writing".to_string(),
                description: None,
                input: InputSpec::Criteria {
                    tasks: vec![
                        task("task1", "Task 1", 1.0 / 3.0),
                        task("task2", "Task 2", 2.0 / 3.0),
                    ],
                    criteria: criteria(WRITING_CRITERIA),
                    max_rating: MAX_BAND,
                },
                scoring: Scoring::HalfBand {
                    min: 0.0,
                    max: MAX_BAND,
                },
                weight: 1.0,
                levels: levels.clone(),
            },
            SectionSpec {
                id: SPEAKING.to_string(),
                name: "Speaking".to_string(),
                description: None,
                input: InputSpec::Criteria {
                    tasks: vec![task("interview", "Interview", 1.0)],
                    criteria: criteria(SPEAKING_CRITERIA),
                    max_rating: MAX_BAND,
                },
                scoring: Scoring::HalfBand {
                    min: 0.0,
                    max: MAX_BAND,
                },
                weight: 1.0,
                levels: levels.clone(),
            },
        ];

        ProgramConfig::new(ProgramSpec {
            kind: ProgramKind::Ielts,
            variant: Some(module.name().to_string()),
            sections,
            combiner: Combiner::Mean,
            rounding: Rounding::HalfBand,
            percentile: None,
            level_basis: ScoreBasis::Scaled,
            overall_levels: levels,
            descriptors: Some(DescriptorTable::new(BAND_DESCRIPTORS, DESCRIPTOR_FALLBACK)),
            analysis: AnalysisThresholds::ielts_v1(),
        })
    }
}

fn task(id: &str, name: &str, weight: f64) -> TaskSpec {
    TaskSpec {
        id: id.to_string(),
        name: name.to_string(),
        weight,
    }
}

fn criteria(defs: &[(&str, &str)]) -> Vec<CriterionSpec> {
    defs.iter()
        .map(|&(id, name)| CriterionSpec {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WritingCriteria {
    pub task_achievement: f64,
    pub coherence_cohesion: f64,
    pub lexical_resource: f64,
    pub grammatical_range: f64,
}

impl WritingCriteria {
    fn ratings(&self) -> CriterionRatings {
        BTreeMap::from([
            ("task_achievement".to_string(), self.task_achievement),
            ("coherence_cohesion".to_string(), self.coherence_cohesion),
            ("lexical_resource".to_string(), self.lexical_resource),
            ("grammatical_range".to_string(), self.grammatical_range),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeakingCriteria {
    pub fluency_coherence: f64,
    pub lexical_resource: f64,
    pub grammatical_range: f64,
    pub pronunciation: f64,
}

impl SpeakingCriteria {
    fn ratings(&self) -> CriterionRatings {
        BTreeMap::from([
            ("fluency_coherence".to_string(), self.fluency_coherence),
            ("lexical_resource".to_string(), self.lexical_resource),
            ("grammatical_range".to_string(), self.grammatical_range),
            ("pronunciation".to_string(), self.pronunciation),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IeltsResponses {
    #[serde(alias = "listening_raw")]
    pub listening: ObjectiveAnswers,
    #[serde(alias = "reading_raw")]
    pub reading: ObjectiveAnswers,
    pub writing_task1: WritingCriteria,
    pub writing_task2: WritingCriteria,
    #[serde(alias = "speaking_criteria")]
    pub speaking: SpeakingCriteria,
}

impl IeltsResponses {
    pub fn to_response_map(&self) -> ResponseMap {
        BTreeMap::from([
            (LISTENING.to_string(), self.listening.to_response_set()),
            (READING.to_string(), self.reading.to_response_set()),
            (
                WRITING.to_string(),
                RawResponseSet::Tasks(vec![
                    self.writing_task1.ratings(),
                    self.writing_task2.ratings(),
                ]),
            ),
            (
                SPEAKING.to_string(),
                RawResponseSet::Tasks(vec![self.speaking.ratings()]),
            ),
        ])
    }
}

pub fn score(
    module: IeltsModule,
    responses: &IeltsResponses,
) -> Result<CompositeResult, ScoreError> {
    let config = ProgramConfig::ielts(module)?;
    Ok(compute(&config, &responses.to_response_map())?)
}

#[cfg(test)]
#[path = "../../tests/src_inline/programs/ielts.rs"]
mod tests;
