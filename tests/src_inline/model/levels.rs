use super::*;

#[test]
fn test_levels_order_within_family() {
    assert!(Level::Cefr(CefrLevel::C1) > Level::Cefr(CefrLevel::B2));
    assert!(
        Level::Toefl(ToeflLevel::Advanced) > Level::Toefl(ToeflLevel::HighIntermediate)
    );
    assert!(
        Level::Percentile(PercentileTier::Excellent) > Level::Percentile(PercentileTier::Good)
    );
}

#[test]
fn test_levels_from_different_families_are_unordered() {
    let a = Level::Cefr(CefrLevel::C2);
    let b = Level::Percentile(PercentileTier::NeedsImprovement);
    assert_eq!(a.partial_cmp(&b), None);
    assert!(!(a > b) && !(a < b));
}

#[test]
fn test_level_serializes_as_label() {
    let json = serde_json::to_string(&Level::from(CefrLevel::BelowA1)).unwrap();
    assert_eq!(json, "\"Below A1\"");
    assert_eq!(
        Level::from(PercentileTier::Good).to_string(),
        "Good (Top 25%)"
    );
}

#[test]
fn test_percentile_descriptions_differ_from_labels() {
    let tiers = [
        PercentileTier::NeedsImprovement,
        PercentileTier::BelowAverage,
        PercentileTier::Average,
        PercentileTier::Good,
        PercentileTier::Excellent,
    ];
    for tier in tiers {
        let level = Level::from(tier);
        assert_ne!(level.description(), level.label());
        assert_eq!(level.description(), tier.description());
    }
}

#[test]
fn test_band_scale_rejects_unordered_steps() {
    let err = BandScale::new("x", &[(1.0, CefrLevel::A1), (1.0, CefrLevel::A2)]).unwrap_err();
    assert!(matches!(err, ConfigError::UnorderedBandScale { .. }));
    let err = BandScale::<CefrLevel>::new("x", &[]).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyBandScale { .. }));
}

#[test]
fn test_band_scale_map_keeps_thresholds() {
    let scale = BandScale::new("x", &[(0.0, CefrLevel::A1), (5.0, CefrLevel::B2)]).unwrap();
    let mapped = scale.map(Level::from);
    assert_eq!(mapped.name(), "x");
    assert_eq!(mapped.steps()[1], (5.0, Level::Cefr(CefrLevel::B2)));
}
