use crate::error::{RatingLocation, ValidationError, ValidationIssue};
use crate::model::program::ProgramConfig;
use crate::model::responses::{CriterionRatings, RawResponseSet, ResponseMap};
use crate::model::section::{CriterionSpec, InputSpec, SectionSpec, TaskSpec};

/// Checks every section before scoring starts and reports all issues at once.
pub fn run_stage1(config: &ProgramConfig, responses: &ResponseMap) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    for spec in config.sections() {
        match responses.get(&spec.id) {
            Some(set) => validate_section(spec, set, &mut issues),
            None => issues.push(ValidationIssue::MissingSection {
                section: spec.id.clone(),
            }),
        }
    }

    for id in responses.keys() {
        if config.section(id).is_none() {
            issues.push(ValidationIssue::UnknownSection {
                section: id.clone(),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        tracing::debug!(issues = issues.len(), "response validation failed");
        Err(ValidationError { issues })
    }
}

pub fn validate_section(
    spec: &SectionSpec,
    set: &RawResponseSet,
    issues: &mut Vec<ValidationIssue>,
) {
    match (&spec.input, set) {
        (
            InputSpec::Objective {
                item_count,
                max_raw,
            },
            RawResponseSet::Items(items),
        ) => {
            if items.len() != *item_count {
                issues.push(count_mismatch(spec, *item_count, items.len()));
                return;
            }
            let correct = items.iter().filter(|&&c| c).count();
            if correct > *max_raw as usize {
                issues.push(raw_out_of_range(spec, correct as f64));
            }
        }
        (InputSpec::Objective { max_raw, .. }, RawResponseSet::Tally(count)) => {
            if count > max_raw {
                issues.push(raw_out_of_range(spec, f64::from(*count)));
            }
        }
        (
            InputSpec::Rated {
                task_count,
                max_rating,
            },
            RawResponseSet::Ratings(ratings),
        ) => {
            if ratings.len() != *task_count {
                issues.push(count_mismatch(spec, *task_count, ratings.len()));
                return;
            }
            for (idx, &value) in ratings.iter().enumerate() {
                check_rating(
                    spec,
                    RatingLocation::Task(idx + 1),
                    value,
                    *max_rating,
                    issues,
                );
            }
        }
        (
            InputSpec::Criteria {
                tasks,
                criteria,
                max_rating,
            },
            RawResponseSet::Tasks(task_ratings),
        ) => {
            if task_ratings.len() != tasks.len() {
                issues.push(count_mismatch(spec, tasks.len(), task_ratings.len()));
                return;
            }
            for (task, ratings) in tasks.iter().zip(task_ratings) {
                validate_task(spec, task, criteria, ratings, *max_rating, issues);
            }
        }
        (input, set) => issues.push(ValidationIssue::WrongResponseKind {
            section: spec.id.clone(),
            expected: expected_kind(input),
            actual: set.kind_name(),
        }),
    }
}

fn validate_task(
    spec: &SectionSpec,
    task: &TaskSpec,
    criteria: &[CriterionSpec],
    ratings: &CriterionRatings,
    max_rating: f64,
    issues: &mut Vec<ValidationIssue>,
) {
    for key in ratings.keys() {
        if !criteria.iter().any(|c| &c.id == key) {
            issues.push(ValidationIssue::UnknownCriterion {
                section: spec.id.clone(),
                task: task.id.clone(),
                criterion: key.clone(),
            });
        }
    }
    for criterion in criteria {
        match ratings.get(&criterion.id) {
            Some(&value) => {
                let location = RatingLocation::Criterion {
                    task: task.id.clone(),
                    criterion: criterion.id.clone(),
                };
                check_rating(spec, location, value, max_rating, issues);
            }
            None => issues.push(ValidationIssue::MissingCriterion {
                section: spec.id.clone(),
                task: task.id.clone(),
                criterion: criterion.id.clone(),
            }),
        }
    }
}

fn check_rating(
    spec: &SectionSpec,
    location: RatingLocation,
    value: f64,
    max: f64,
    issues: &mut Vec<ValidationIssue>,
) {
    if !value.is_finite() {
        issues.push(ValidationIssue::NonFiniteRating {
            section: spec.id.clone(),
            location,
        });
    } else if !(0.0..=max).contains(&value) {
        issues.push(ValidationIssue::RatingOutOfRange {
            section: spec.id.clone(),
            location,
            value,
            max,
        });
    }
}

fn count_mismatch(spec: &SectionSpec, expected: usize, actual: usize) -> ValidationIssue {
    ValidationIssue::CountMismatch {
        section: spec.id.clone(),
        expected,
        actual,
    }
}

pub(crate) fn raw_out_of_range(spec: &SectionSpec, raw: f64) -> ValidationIssue {
    let (min, max) = spec.input.raw_range();
    ValidationIssue::RawOutOfRange {
        section: spec.id.clone(),
        raw,
        min,
        max,
    }
}

pub(crate) fn expected_kind(input: &InputSpec) -> &'static str {
    match input {
        InputSpec::Objective { .. } => "item or tallied",
        InputSpec::Rated { .. } => "task rating",
        InputSpec::Criteria { .. } => "criterion rating",
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_validate.rs"]
mod tests;
