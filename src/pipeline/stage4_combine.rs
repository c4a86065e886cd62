use crate::model::program::{Combiner, ProgramConfig, Rounding};
use crate::model::results::SectionResult;
use crate::pipeline::stage3_convert::{round_half, round_to};

/// Composite score from the section scaled scores, weighted by each
/// section's configured weight.
pub fn run_stage4(config: &ProgramConfig, sections: &[SectionResult]) -> f64 {
    let scored = sections
        .iter()
        .map(|s| {
            let weight = config.section(&s.id).map(|spec| spec.weight).unwrap_or(1.0);
            (s.scaled_score, weight)
        })
        .collect::<Vec<_>>();
    let combined = combine(config.combiner(), &scored);
    apply_rounding(combined, config.rounding())
}

/// `(score, weight)` pairs reduced by the given rule; weights only matter for
/// [`Combiner::WeightedMean`].
pub fn combine(combiner: Combiner, scored: &[(f64, f64)]) -> f64 {
    match combiner {
        Combiner::Mean => {
            let values = scored.iter().map(|&(s, _)| s).collect::<Vec<_>>();
            mean(&values)
        }
        Combiner::WeightedMean => weighted_mean(scored),
        Combiner::Sum => scored.iter().map(|&(s, _)| s).sum(),
    }
}

pub fn apply_rounding(value: f64, rounding: Rounding) -> f64 {
    match rounding {
        Rounding::None => value,
        Rounding::HalfBand => round_half(value),
        Rounding::Decimals(places) => round_to(value, places),
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn weighted_mean(scored: &[(f64, f64)]) -> f64 {
    let total_weight = scored.iter().map(|&(_, w)| w).sum::<f64>();
    if total_weight <= 0.0 {
        return 0.0;
    }
    scored.iter().map(|&(s, w)| s * w).sum::<f64>() / total_weight
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_combine.rs"]
mod tests;
