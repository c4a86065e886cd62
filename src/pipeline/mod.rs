pub mod stage1_validate;
pub mod stage2_aggregate;
pub mod stage3_convert;
pub mod stage4_combine;
pub mod stage5_classify;
pub mod stage6_analyze;

use crate::error::{ValidationError, ValidationIssue};
use crate::model::program::ProgramConfig;
use crate::model::responses::ResponseMap;
use crate::model::results::{CompositeResult, SectionResult};
use crate::model::section::InputSpec;
use crate::model::thresholds::ScoreBasis;

use stage1_validate::run_stage1;
use stage2_aggregate::run_stage2;
use stage3_convert::{percentile, run_stage3};
use stage4_combine::run_stage4;
use stage5_classify::{classify, feedback};
use stage6_analyze::{AnalysisInput, run_stage6};

/// Scores one set of responses against a program. Validation runs first and
/// reports every offending section; nothing is scored unless it passes.
pub fn compute(
    config: &ProgramConfig,
    responses: &ResponseMap,
) -> Result<CompositeResult, ValidationError> {
    run_stage1(config, responses)?;

    let mut sections = Vec::with_capacity(config.sections().len());
    for spec in config.sections() {
        let set = responses.get(&spec.id).ok_or_else(|| {
            ValidationError::single(ValidationIssue::MissingSection {
                section: spec.id.clone(),
            })
        })?;
        let aggregate = run_stage2(spec, set).map_err(ValidationError::single)?;
        let scaled = run_stage3(spec, aggregate.raw).map_err(ValidationError::single)?;
        let section_percentile = config
            .percentile_scale()
            .map(|scale| percentile(scaled, scale));
        let level = classify(
            &spec.levels,
            basis_value(config.level_basis(), scaled, section_percentile),
        );

        sections.push(SectionResult {
            id: spec.id.clone(),
            name: spec.name.clone(),
            description: spec.description.clone(),
            raw_score: aggregate.raw,
            max_raw: spec.input.raw_range().1,
            scaled_score: scaled,
            percentile: section_percentile,
            level,
            feedback: feedback(config, scaled, level),
            tasks: aggregate.tasks,
        });
    }

    let overall_score = run_stage4(config, &sections);
    let overall_percentile = config
        .percentile_scale()
        .map(|scale| percentile(overall_score, scale));
    let overall_level = classify(
        config.overall_levels(),
        basis_value(config.level_basis(), overall_score, overall_percentile),
    );
    let overall_feedback = feedback(config, overall_score, overall_level);

    let thresholds = config.analysis();
    let inputs = sections
        .iter()
        .map(|s| analysis_input(config, thresholds.basis, s))
        .collect::<Vec<_>>();
    let analysis = run_stage6(thresholds, &inputs);

    tracing::info!(
        program = %config.kind(),
        overall_score,
        overall_level = %overall_level,
        "computed composite result"
    );

    Ok(CompositeResult {
        program: config.kind(),
        variant: config.variant().map(str::to_string),
        sections,
        overall_score,
        overall_percentile,
        overall_level,
        overall_feedback,
        analysis,
    })
}

fn basis_value(basis: ScoreBasis, scaled: f64, percentile: Option<f64>) -> f64 {
    match (basis, percentile) {
        (ScoreBasis::Percentile, Some(p)) => p,
        _ => scaled,
    }
}

fn analysis_input(
    config: &ProgramConfig,
    basis: ScoreBasis,
    section: &SectionResult,
) -> AnalysisInput {
    let multi_task = config
        .section(&section.id)
        .map(|spec| {
            matches!(&spec.input, InputSpec::Criteria { tasks, .. } if tasks.len() > 1)
        })
        .unwrap_or(false);

    let criteria = section
        .tasks
        .iter()
        .flat_map(|task| {
            task.criteria.iter().map(move |c| {
                let label = if multi_task {
                    format!("{} ({})", c.name, task.name)
                } else {
                    c.name.clone()
                };
                (label, c.band)
            })
        })
        .collect();

    AnalysisInput {
        subject: section.name.clone(),
        score: basis_value(basis, section.scaled_score, section.percentile),
        criteria,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/engine.rs"]
mod tests;
