use crate::model::results::{Finding, FindingKind, PerformanceAnalysis};
use crate::model::thresholds::AnalysisThresholds;
use crate::report::format_score;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisInput {
    pub subject: String,
    pub score: f64,
    /// `(label, half-band rating)` per criterion, empty when the section has
    /// no criterion breakdown.
    pub criteria: Vec<(String, f64)>,
}

/// Strengths and improvement areas. The relative strength rule (section max)
/// only applies when the sections do not all tie. The development rule reads
/// the section min, so a full tie below the development threshold flags every
/// section. Each returned list has at least one entry.
pub fn run_stage6(
    thresholds: &AnalysisThresholds,
    inputs: &[AnalysisInput],
) -> PerformanceAnalysis {
    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    if let Some((min, max)) = score_bounds(inputs) {
        let all_tied = min == max;

        for input in inputs {
            if input.score >= thresholds.strong {
                strengths.push(finding(thresholds, input, FindingKind::StrongPerformance));
            } else if !all_tied
                && input.score == max
                && input.score >= thresholds.relative_strength
            {
                strengths.push(finding(thresholds, input, FindingKind::RelativeStrength));
            }
        }

        for input in inputs {
            if input.score < thresholds.weak {
                improvements.push(finding(thresholds, input, FindingKind::NeedsImprovement));
            } else if input.score == min && input.score < thresholds.development {
                improvements.push(finding(thresholds, input, FindingKind::AreaForDevelopment));
            }
        }
    }

    if let Some(limit) = thresholds.criterion_focus {
        for input in inputs {
            improvements.extend(criterion_focus(thresholds, input, limit));
        }
    }

    if strengths.is_empty() {
        strengths.push(placeholder(&thresholds.strength_placeholder));
    }
    if improvements.is_empty() {
        improvements.push(placeholder(&thresholds.improvement_placeholder));
    }

    PerformanceAnalysis {
        strengths,
        improvements,
    }
}

fn score_bounds(inputs: &[AnalysisInput]) -> Option<(f64, f64)> {
    let mut iter = inputs.iter().map(|i| i.score);
    let first = iter.next()?;
    let bounds = iter.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s)));
    Some(bounds)
}

/// Every criterion tied for the section's lowest rating, when that rating is
/// below `limit`.
fn criterion_focus(
    thresholds: &AnalysisThresholds,
    input: &AnalysisInput,
    limit: f64,
) -> Vec<Finding> {
    let Some(lowest) = input
        .criteria
        .iter()
        .map(|&(_, rating)| rating)
        .reduce(f64::min)
    else {
        return Vec::new();
    };
    if lowest >= limit {
        return Vec::new();
    }

    input
        .criteria
        .iter()
        .filter(|(_, rating)| *rating == lowest)
        .map(|(label, rating)| {
            let subject = format!("{} - {}", input.subject, label);
            Finding {
                message: format!(
                    "{subject}: Focus area ({})",
                    score_note(thresholds, *rating)
                ),
                subject,
                kind: FindingKind::CriterionFocus,
                score: Some(*rating),
            }
        })
        .collect()
}

fn finding(thresholds: &AnalysisThresholds, input: &AnalysisInput, kind: FindingKind) -> Finding {
    let phrase = match kind {
        FindingKind::StrongPerformance => "Strong performance",
        FindingKind::RelativeStrength => "Relative strength",
        FindingKind::NeedsImprovement => "Needs significant improvement",
        FindingKind::AreaForDevelopment => "Area for development",
        FindingKind::CriterionFocus => "Focus area",
        FindingKind::Placeholder => "",
    };
    Finding {
        subject: input.subject.clone(),
        kind,
        score: Some(input.score),
        message: format!(
            "{}: {} ({})",
            input.subject,
            phrase,
            score_note(thresholds, input.score)
        ),
    }
}

fn placeholder(text: &str) -> Finding {
    Finding {
        subject: String::new(),
        kind: FindingKind::Placeholder,
        score: None,
        message: text.to_string(),
    }
}

fn score_note(thresholds: &AnalysisThresholds, score: f64) -> String {
    format!(
        "{} {}",
        thresholds.unit,
        format_score(score, thresholds.decimals)
    )
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_analyze.rs"]
mod tests;
