use super::*;

#[test]
fn test_mean_of_equal_bands() {
    let scored = [(7.0, 1.0), (7.0, 1.0), (7.0, 1.0), (7.0, 1.0)];
    assert_eq!(combine(Combiner::Mean, &scored), 7.0);
}

#[test]
fn test_mean_ignores_weights() {
    let scored = [(6.0, 3.0), (8.0, 1.0)];
    assert_eq!(combine(Combiner::Mean, &scored), 7.0);
    assert_eq!(combine(Combiner::WeightedMean, &scored), 6.5);
}

#[test]
fn test_sum_of_section_scores() {
    let scored = [(23.0, 1.0), (24.0, 1.0), (23.0, 1.0), (24.0, 1.0)];
    assert_eq!(combine(Combiner::Sum, &scored), 94.0);
}

#[test]
fn test_rounding_rules() {
    assert_eq!(apply_rounding(6.125, Rounding::HalfBand), 6.0);
    assert_eq!(apply_rounding(6.25, Rounding::HalfBand), 6.5);
    assert_eq!(apply_rounding(593.74, Rounding::Decimals(1)), 593.7);
    assert_eq!(apply_rounding(93.999, Rounding::None), 93.999);
}

#[test]
fn test_empty_inputs_yield_zero() {
    assert_eq!(mean(&[]), 0.0);
    assert_eq!(weighted_mean(&[]), 0.0);
}

#[test]
fn test_weighted_mean_normalizes_by_total_weight() {
    let value = weighted_mean(&[(6.5, 1.0 / 3.0), (7.0, 2.0 / 3.0)]);
    assert!((value - 6.833_333_333).abs() < 1e-6);
    let doubled = weighted_mean(&[(6.5, 2.0), (7.0, 4.0)]);
    assert!((value - doubled).abs() < 1e-12);
}
