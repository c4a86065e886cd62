use super::*;

use crate::model::results::FindingKind;
use crate::model::thresholds::{IMPROVEMENT_PLACEHOLDER, STRENGTH_PLACEHOLDER};

fn writing(value: f64) -> WritingCriteria {
    WritingCriteria {
        task_achievement: value,
        coherence_cohesion: value,
        lexical_resource: value,
        grammatical_range: value,
    }
}

fn scenario() -> IeltsResponses {
    IeltsResponses {
        listening: ObjectiveAnswers::Count(32),
        reading: ObjectiveAnswers::Count(35),
        writing_task1: writing(6.5),
        writing_task2: writing(7.0),
        speaking: SpeakingCriteria {
            fluency_coherence: 7.0,
            lexical_resource: 6.5,
            grammatical_range: 6.5,
            pronunciation: 7.5,
        },
    }
}

#[test]
fn test_academic_scenario() {
    let result = score(IeltsModule::Academic, &scenario()).unwrap();

    let bands = result
        .sections
        .iter()
        .map(|s| (s.id.as_str(), s.scaled_score))
        .collect::<Vec<_>>();
    assert_eq!(
        bands,
        vec![(LISTENING, 7.0), (READING, 7.0), (WRITING, 7.0), (SPEAKING, 7.0)]
    );

    let writing = result.section(WRITING).unwrap();
    assert!((writing.raw_score - 6.833_333_333).abs() < 1e-6);
    assert_eq!(writing.tasks.len(), 2);
    assert_eq!(writing.tasks[0].band, 6.5);
    assert_eq!(writing.tasks[1].band, 7.0);

    let speaking = result.section(SPEAKING).unwrap();
    assert!((speaking.raw_score - 6.875).abs() < 1e-6);

    assert_eq!(result.overall_score, 7.0);
    assert_eq!(result.overall_level.label(), "C1");
    assert!(result.overall_feedback.starts_with("Good User"));
    assert_eq!(result.variant.as_deref(), Some("Academic"));
}

#[test]
fn test_all_strong_sections_yield_placeholder_improvement() {
    let result = score(IeltsModule::Academic, &scenario()).unwrap();
    assert_eq!(result.analysis.strengths.len(), 4);
    assert_eq!(result.analysis.improvements.len(), 1);
    assert_eq!(
        result.analysis.improvements[0].kind,
        FindingKind::Placeholder
    );
    assert_eq!(
        result.analysis.improvements[0].message,
        IMPROVEMENT_PLACEHOLDER
    );
}

#[test]
fn test_uniform_six_lists_every_section_for_development() {
    let responses = IeltsResponses {
        listening: ObjectiveAnswers::Count(28),
        reading: ObjectiveAnswers::Count(33),
        writing_task1: writing(6.0),
        writing_task2: writing(6.0),
        speaking: SpeakingCriteria {
            fluency_coherence: 6.0,
            lexical_resource: 6.0,
            grammatical_range: 6.0,
            pronunciation: 6.0,
        },
    };
    let result = score(IeltsModule::Academic, &responses).unwrap();

    assert!(result.sections.iter().all(|s| s.scaled_score == 6.0));
    assert_eq!(result.overall_score, 6.0);
    assert_eq!(result.overall_level.label(), "B2");

    assert_eq!(result.analysis.strengths.len(), 1);
    assert_eq!(result.analysis.strengths[0].message, STRENGTH_PLACEHOLDER);
    let improvements = result
        .analysis
        .improvements
        .iter()
        .map(|f| (f.kind, f.message.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        improvements,
        vec![
            (FindingKind::AreaForDevelopment, "Listening: Area for development (Band 6.0)"),
            (FindingKind::AreaForDevelopment, "Reading: Area for development (Band 6.0)"),
            (FindingKind::AreaForDevelopment, "Writing: Area for development (Band 6.0)"),
            (FindingKind::AreaForDevelopment, "Speaking: Area for development (Band 6.0)"),
        ]
    );
}

#[test]
fn test_general_training_reading_scale() {
    let mut responses = scenario();
    responses.reading = ObjectiveAnswers::Count(35);
    let result = score(IeltsModule::GeneralTraining, &responses).unwrap();
    assert_eq!(result.section(READING).unwrap().scaled_score, 6.5);

    responses.reading = ObjectiveAnswers::Count(40);
    let result = score(IeltsModule::GeneralTraining, &responses).unwrap();
    assert_eq!(result.section(READING).unwrap().scaled_score, 9.0);
}

#[test]
fn test_academic_reading_accepts_at_most_39() {
    let mut responses = scenario();
    responses.reading = ObjectiveAnswers::Count(40);
    let err = score(IeltsModule::Academic, &responses).unwrap_err();
    assert!(matches!(err, ScoreError::Validation(_)));
}

#[test]
fn test_listening_items_and_tally_agree() {
    let mut items = vec![true; 32];
    items.extend([false; 8]);
    let mut responses = scenario();
    responses.listening = ObjectiveAnswers::Items(items);

    let from_items = score(IeltsModule::Academic, &responses).unwrap();
    let from_tally = score(IeltsModule::Academic, &scenario()).unwrap();
    assert_eq!(from_items, from_tally);
}

#[test]
fn test_listening_forty_floors_to_top_band() {
    let mut responses = scenario();
    responses.listening = ObjectiveAnswers::Count(40);
    let result = score(IeltsModule::Academic, &responses).unwrap();
    assert_eq!(result.section(LISTENING).unwrap().scaled_score, 9.0);
}

#[test]
fn test_weak_criterion_flagged_with_task_label() {
    let mut responses = scenario();
    responses.writing_task1.coherence_cohesion = 5.0;
    let result = score(IeltsModule::Academic, &responses).unwrap();

    let focus = result
        .analysis
        .improvements
        .iter()
        .find(|f| f.kind == FindingKind::CriterionFocus)
        .unwrap();
    assert_eq!(focus.subject, "Writing - Coherence and Cohesion (Task 1)");
    assert_eq!(focus.score, Some(5.0));
}

#[test]
fn test_request_json_with_aliases() {
    let json = r#"{
        "listening_raw": 32,
        "reading_raw": 35,
        "writing_task1": {
            "task_achievement": 6.5, "coherence_cohesion": 6.5,
            "lexical_resource": 6.5, "grammatical_range": 6.5
        },
        "writing_task2": {
            "task_achievement": 7.0, "coherence_cohesion": 7.0,
            "lexical_resource": 7.0, "grammatical_range": 7.0
        },
        "speaking_criteria": {
            "fluency_coherence": 7.0, "lexical_resource": 6.5,
            "grammatical_range": 6.5, "pronunciation": 7.5
        }
    }"#;
    let parsed: IeltsResponses = serde_json::from_str(json).unwrap();
    assert_eq!(parsed, scenario());
}

#[test]
fn test_unknown_criterion_key_rejected() {
    let json = r#"{
        "fluency_coherence": 7.0, "lexical_resource": 6.5, "grammatical_range": 6.5,
        "pronunciation": 7.5, "vocabulary": 6.0
    }"#;
    assert!(serde_json::from_str::<SpeakingCriteria>(json).is_err());
}

#[test]
fn test_result_is_bit_identical_across_runs() {
    let first = score(IeltsModule::Academic, &scenario()).unwrap();
    let second = score(IeltsModule::Academic, &scenario()).unwrap();
    assert_eq!(
        first.overall_score.to_bits(),
        second.overall_score.to_bits()
    );
    for (a, b) in first.sections.iter().zip(&second.sections) {
        assert_eq!(a.raw_score.to_bits(), b.raw_score.to_bits());
    }
}
