use super::*;

use crate::model::levels::{BandScale, CefrLevel, Level};
use crate::model::responses::CriterionRatings;
use crate::model::section::{CriterionSpec, Scoring, TaskSpec};

fn section(input: InputSpec) -> SectionSpec {
    SectionSpec {
        id: "s".to_string(),
        name: "S".to_string(),
        description: None,
        input,
        scoring: Scoring::HalfBand { min: 0.0, max: 9.0 },
        weight: 1.0,
        levels: BandScale::new("cefr", &[(0.0, CefrLevel::A1)])
            .unwrap()
            .map(Level::from),
    }
}

fn objective(items: usize) -> InputSpec {
    InputSpec::Objective {
        item_count: items,
        max_raw: items as u32,
    }
}

fn rated(task_count: usize, max_rating: f64) -> InputSpec {
    InputSpec::Rated {
        task_count,
        max_rating,
    }
}

fn task(id: &str, weight: f64) -> TaskSpec {
    TaskSpec {
        id: id.to_string(),
        name: id.to_uppercase(),
        weight,
    }
}

fn criterion(id: &str) -> CriterionSpec {
    CriterionSpec {
        id: id.to_string(),
        name: id.to_uppercase(),
    }
}

fn ratings(values: &[(&str, f64)]) -> CriterionRatings {
    values.iter().map(|&(k, v)| (k.to_string(), v)).collect()
}

#[test]
fn test_items_count_correct_answers() {
    let spec = section(objective(5));
    let items = vec![true, false, true, true, false];
    let agg = run_stage2(&spec, &RawResponseSet::Items(items)).unwrap();
    assert_eq!(agg.raw, 3.0);
    assert!(agg.tasks.is_empty());
    assert_eq!(count_correct(&[]), 0);
}

#[test]
fn test_tally_passes_through() {
    let spec = section(objective(40));
    let agg = run_stage2(&spec, &RawResponseSet::Tally(32)).unwrap();
    assert_eq!(agg.raw, 32.0);
}

#[test]
fn test_ratings_mean_keeps_full_precision() {
    let spec = section(rated(3, 4.0));
    let agg = run_stage2(&spec, &RawResponseSet::Ratings(vec![3.0, 3.0, 2.0])).unwrap();
    assert!((agg.raw - 8.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_criteria_weighted_task_means() {
    let spec = section(InputSpec::Criteria {
        tasks: vec![task("t1", 1.0 / 3.0), task("t2", 2.0 / 3.0)],
        criteria: vec![criterion("a"), criterion("b")],
        max_rating: 9.0,
    });
    let set = RawResponseSet::Tasks(vec![
        ratings(&[("a", 6.0), ("b", 7.0)]),
        ratings(&[("a", 7.0), ("b", 7.0)]),
    ]);

    let agg = run_stage2(&spec, &set).unwrap();
    assert!((agg.raw - (6.5 / 3.0 + 7.0 * 2.0 / 3.0)).abs() < 1e-6);
    assert_eq!(agg.tasks.len(), 2);
    assert_eq!(agg.tasks[0].average, 6.5);
    assert_eq!(agg.tasks[0].band, 6.5);
    assert_eq!(agg.tasks[0].criteria[0].criterion, "a");
    assert_eq!(agg.tasks[1].criteria[1].band, 7.0);
}

#[test]
fn test_criterion_band_rounds_to_half() {
    let spec = section(InputSpec::Criteria {
        tasks: vec![task("t", 1.0)],
        criteria: vec![criterion("a")],
        max_rating: 9.0,
    });
    let agg = run_stage2(&spec, &RawResponseSet::Tasks(vec![ratings(&[("a", 6.25)])])).unwrap();
    assert_eq!(agg.tasks[0].criteria[0].rating, 6.25);
    assert_eq!(agg.tasks[0].criteria[0].band, 6.5);
}

#[test]
fn test_mismatched_kind_is_an_issue() {
    let spec = section(rated(2, 5.0));
    let err = run_stage2(&spec, &RawResponseSet::Tally(3)).unwrap_err();
    assert_eq!(
        err,
        ValidationIssue::WrongResponseKind {
            section: "s".to_string(),
            expected: "task rating",
            actual: "tallied",
        }
    );
}
