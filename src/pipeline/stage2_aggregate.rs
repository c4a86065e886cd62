use crate::error::ValidationIssue;
use crate::model::responses::RawResponseSet;
use crate::model::results::{CriterionScore, TaskBreakdown};
use crate::model::section::{InputSpec, SectionSpec};
use crate::pipeline::stage1_validate::expected_kind;
use crate::pipeline::stage3_convert::round_half;
use crate::pipeline::stage4_combine::{mean, weighted_mean};

#[derive(Debug, Clone, PartialEq)]
pub struct RawAggregate {
    pub raw: f64,
    pub tasks: Vec<TaskBreakdown>,
}

/// Reduces one validated section to its raw score. Means keep full
/// precision; only the breakdown carries half-band values.
pub fn run_stage2(
    spec: &SectionSpec,
    set: &RawResponseSet,
) -> Result<RawAggregate, ValidationIssue> {
    match (&spec.input, set) {
        (InputSpec::Objective { .. }, RawResponseSet::Items(items)) => Ok(RawAggregate {
            raw: f64::from(count_correct(items)),
            tasks: Vec::new(),
        }),
        (InputSpec::Objective { .. }, RawResponseSet::Tally(count)) => Ok(RawAggregate {
            raw: f64::from(*count),
            tasks: Vec::new(),
        }),
        (InputSpec::Rated { .. }, RawResponseSet::Ratings(ratings)) => Ok(RawAggregate {
            raw: mean(ratings),
            tasks: Vec::new(),
        }),
        (InputSpec::Criteria { tasks, criteria, .. }, RawResponseSet::Tasks(task_ratings)) => {
            let mut breakdown = Vec::with_capacity(tasks.len());
            for (task, ratings) in tasks.iter().zip(task_ratings) {
                let scores = criteria
                    .iter()
                    .filter_map(|c| {
                        ratings.get(&c.id).map(|&rating| CriterionScore {
                            criterion: c.id.clone(),
                            name: c.name.clone(),
                            rating,
                            band: round_half(rating),
                        })
                    })
                    .collect::<Vec<_>>();
                let average = mean(&scores.iter().map(|c| c.rating).collect::<Vec<_>>());
                breakdown.push(TaskBreakdown {
                    task: task.id.clone(),
                    name: task.name.clone(),
                    weight: task.weight,
                    average,
                    band: round_half(average),
                    criteria: scores,
                });
            }
            let weighted = breakdown
                .iter()
                .map(|t| (t.average, t.weight))
                .collect::<Vec<_>>();
            Ok(RawAggregate {
                raw: weighted_mean(&weighted),
                tasks: breakdown,
            })
        }
        (input, set) => Err(ValidationIssue::WrongResponseKind {
            section: spec.id.clone(),
            expected: expected_kind(input),
            actual: set.kind_name(),
        }),
    }
}

pub fn count_correct(items: &[bool]) -> u32 {
    items.iter().filter(|&&correct| correct).count() as u32
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_aggregate.rs"]
mod tests;
