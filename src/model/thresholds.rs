use serde::Serialize;

/// Which number a rule reads: the scaled score or its percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBasis {
    Scaled,
    Percentile,
}

pub const STRENGTH_PLACEHOLDER: &str = "Continue building skills across all areas";
pub const IMPROVEMENT_PLACEHOLDER: &str = "Strong performance across all skills!";

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisThresholds {
    pub basis: ScoreBasis,
    pub strong: f64,
    pub relative_strength: f64,
    pub weak: f64,
    pub development: f64,
    pub criterion_focus: Option<f64>,
    pub unit: &'static str,
    pub decimals: usize,
    pub strength_placeholder: String,
    pub improvement_placeholder: String,
}

impl AnalysisThresholds {
    pub fn ielts_v1() -> Self {
        Self {
            basis: ScoreBasis::Scaled,
            strong: 7.0,
            relative_strength: 6.0,
            weak: 6.0,
            development: 7.0,
            criterion_focus: Some(6.0),
            unit: "Band",
            decimals: 1,
            strength_placeholder: STRENGTH_PLACEHOLDER.to_string(),
            improvement_placeholder: IMPROVEMENT_PLACEHOLDER.to_string(),
        }
    }

    pub fn toefl_v1() -> Self {
        Self {
            basis: ScoreBasis::Scaled,
            strong: 24.0,
            relative_strength: 18.0,
            weak: 17.0,
            development: 24.0,
            criterion_focus: None,
            unit: "Score",
            decimals: 0,
            ..Self::ielts_v1()
        }
    }

    pub fn snbt_v1() -> Self {
        Self {
            basis: ScoreBasis::Percentile,
            strong: 75.0,
            relative_strength: 50.0,
            weak: 25.0,
            development: 50.0,
            criterion_focus: None,
            unit: "Percentile",
            decimals: 1,
            ..Self::ielts_v1()
        }
    }
}
