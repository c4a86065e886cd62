use std::f64::consts::{FRAC_2_SQRT_PI, SQRT_2};

use crate::error::ValidationIssue;
use crate::model::section::{Scoring, SectionSpec, TargetScale};
use crate::pipeline::stage1_validate::raw_out_of_range;

/// Converts a raw score to the section's reporting scale. Raw scores outside
/// the section's valid range are rejected rather than clamped.
pub fn run_stage3(spec: &SectionSpec, raw: f64) -> Result<f64, ValidationIssue> {
    let (min, max) = spec.input.raw_range();
    if !raw.is_finite() || raw < min || raw > max {
        return Err(raw_out_of_range(spec, raw));
    }

    let scaled = match &spec.scoring {
        Scoring::Table(table) => {
            tracing::trace!(table = table.name(), mode = ?table.mode(), raw, "table lookup");
            table.convert(raw)
        }
        Scoring::Standardize {
            population_mean,
            population_sd,
            target,
        } => standardize(raw, *population_mean, *population_sd, target),
        Scoring::HalfBand { min, max } => round_half(raw).clamp(*min, *max),
    };

    tracing::debug!(section = %spec.id, raw, scaled, "converted raw score");
    Ok(scaled)
}

/// `M + z * S` with `z = (raw - mean) / sd`, clamped to the target range and
/// rounded to one decimal.
pub fn standardize(
    raw: f64,
    population_mean: f64,
    population_sd: f64,
    target: &TargetScale,
) -> f64 {
    let z = (raw - population_mean) / population_sd;
    let scaled = (target.mean + z * target.sd).clamp(target.min, target.max);
    round_to(scaled, 1)
}

/// Share of the modeled population at or below `score`, in percent, one
/// decimal.
pub fn percentile(score: f64, scale: &TargetScale) -> f64 {
    let z = (score - scale.mean) / scale.sd;
    round_to(normal_cdf(z) * 100.0, 1)
}

pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / SQRT_2))
}

/// Error function via the all-positive series
/// `2/sqrt(pi) * exp(-x^2) * sum(2^n x^(2n+1) / (2n+1)!!)`.
/// Absolute error stays near machine precision for |x| < 6; beyond that
/// erf is 1 to double precision.
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let ax = x.abs();
    if ax >= 6.0 {
        return x.signum();
    }

    let two_x2 = 2.0 * ax * ax;
    let mut term = ax;
    let mut sum = ax;
    let mut n = 0u32;
    while n < 1000 {
        n += 1;
        term *= two_x2 / f64::from(2 * n + 1);
        sum += term;
        if term <= sum * f64::EPSILON {
            break;
        }
    }

    let value = (FRAC_2_SQRT_PI * (-ax * ax).exp() * sum).min(1.0);
    value.copysign(x)
}

/// Nearest multiple of 0.5, halves away from zero: 6.25 -> 6.5, 6.75 -> 7.0.
pub fn round_half(x: f64) -> f64 {
    (x * 2.0).round() / 2.0
}

/// Rounds to `decimals` places, halves away from zero.
pub fn round_to(x: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (x * factor).round() / factor
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_convert.rs"]
mod tests;
