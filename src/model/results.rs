use serde::Serialize;

use crate::model::levels::Level;
use crate::model::program::ProgramKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionScore {
    pub criterion: String,
    pub name: String,
    pub rating: f64,
    pub band: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskBreakdown {
    pub task: String,
    pub name: String,
    pub weight: f64,
    pub average: f64,
    pub band: f64,
    pub criteria: Vec<CriterionScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionResult {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub raw_score: f64,
    pub max_raw: f64,
    pub scaled_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile: Option<f64>,
    pub level: Level,
    pub feedback: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskBreakdown>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    StrongPerformance,
    RelativeStrength,
    NeedsImprovement,
    AreaForDevelopment,
    CriterionFocus,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub subject: String,
    pub kind: FindingKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub message: String,
}

/// Strength and improvement findings. Each list holds at least one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceAnalysis {
    pub strengths: Vec<Finding>,
    pub improvements: Vec<Finding>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeResult {
    pub program: ProgramKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub sections: Vec<SectionResult>,
    pub overall_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_percentile: Option<f64>,
    pub overall_level: Level,
    pub overall_feedback: String,
    pub analysis: PerformanceAnalysis,
}

impl CompositeResult {
    pub fn section(&self, id: &str) -> Option<&SectionResult> {
        self.sections.iter().find(|s| s.id == id)
    }
}
