use super::*;

use crate::model::results::FindingKind;

fn answers(correct: usize, total: usize) -> ObjectiveAnswers {
    ObjectiveAnswers::Items((0..total).map(|i| i < correct).collect())
}

fn scenario() -> ToeflResponses {
    ToeflResponses {
        reading: answers(24, READING_ITEMS),
        listening: answers(23, LISTENING_ITEMS),
        speaking: vec![3.0, 3.0, 3.0, 3.0],
        writing: vec![3.5, 4.0],
    }
}

#[test]
fn test_scenario_total() {
    let result = score(&scenario()).unwrap();

    let scaled = result
        .sections
        .iter()
        .map(|s| (s.id.as_str(), s.scaled_score))
        .collect::<Vec<_>>();
    assert_eq!(
        scaled,
        vec![(READING, 23.0), (LISTENING, 24.0), (SPEAKING, 23.0), (WRITING, 24.0)]
    );
    assert_eq!(result.overall_score, 94.0);
    assert_eq!(result.overall_level, Level::Cefr(CefrLevel::B2));
    assert_eq!(result.overall_percentile, None);
}

#[test]
fn test_section_levels() {
    let result = score(&scenario()).unwrap();
    let level = |id: &str| result.section(id).unwrap().level;
    assert_eq!(level(READING), Level::Toefl(ToeflLevel::HighIntermediate));
    assert_eq!(level(LISTENING), Level::Toefl(ToeflLevel::Advanced));
    assert_eq!(level(SPEAKING), Level::Toefl(ToeflLevel::HighIntermediate));
    assert_eq!(level(WRITING), Level::Toefl(ToeflLevel::Advanced));
    assert_eq!(
        result.section(READING).unwrap().feedback,
        ToeflLevel::HighIntermediate.description()
    );
}

#[test]
fn test_scenario_analysis() {
    let result = score(&scenario()).unwrap();
    let strengths = result
        .analysis
        .strengths
        .iter()
        .map(|f| (f.subject.as_str(), f.kind))
        .collect::<Vec<_>>();
    assert_eq!(
        strengths,
        vec![
            ("Listening", FindingKind::StrongPerformance),
            ("Writing", FindingKind::StrongPerformance),
        ]
    );
    let improvements = result
        .analysis
        .improvements
        .iter()
        .map(|f| (f.subject.as_str(), f.kind))
        .collect::<Vec<_>>();
    assert_eq!(
        improvements,
        vec![
            ("Reading", FindingKind::AreaForDevelopment),
            ("Speaking", FindingKind::AreaForDevelopment),
        ]
    );
}

#[test]
fn test_rated_sections_snap_to_nearest_key() {
    let mut responses = scenario();
    // mean 3.125 sits closest to 3.16
    responses.speaking = vec![3.0, 3.0, 3.5, 3.0];
    let result = score(&responses).unwrap();
    assert_eq!(result.section(SPEAKING).unwrap().scaled_score, 24.0);
}

#[test]
fn test_perfect_and_empty_scores() {
    let perfect = ToeflResponses {
        reading: answers(30, READING_ITEMS),
        listening: answers(28, LISTENING_ITEMS),
        speaking: vec![4.0; 4],
        writing: vec![5.0; 2],
    };
    assert_eq!(score(&perfect).unwrap().overall_score, 120.0);

    let empty = ToeflResponses {
        reading: ObjectiveAnswers::Count(0),
        listening: ObjectiveAnswers::Count(0),
        speaking: vec![0.0; 4],
        writing: vec![0.0; 2],
    };
    let result = score(&empty).unwrap();
    assert_eq!(result.overall_score, 0.0);
    assert_eq!(result.overall_level, Level::Cefr(CefrLevel::A2));
}

#[test]
fn test_wrong_answer_count_rejected() {
    let mut responses = scenario();
    responses.reading = answers(24, 29);
    let err = score(&responses).unwrap_err();
    let ScoreError::Validation(err) = err else {
        panic!("expected validation error");
    };
    assert_eq!(err.sections(), vec![READING]);
}

#[test]
fn test_tables_are_monotonic_over_full_range() {
    let config = ProgramConfig::toefl_ibt().unwrap();
    for spec in config.sections() {
        let Scoring::Table(table) = &spec.scoring else {
            panic!("toefl sections are table scored");
        };
        let (_, max) = spec.input.raw_range();
        let mut previous = f64::NEG_INFINITY;
        let mut raw = 0.0;
        while raw <= max {
            let value = table.convert(raw);
            assert!(value >= previous, "{} raw {raw}", spec.id);
            assert!((0.0..=30.0).contains(&value));
            previous = value;
            raw += 0.125;
        }
    }
}
