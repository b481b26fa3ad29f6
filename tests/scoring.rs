#![forbid(unsafe_code)]
use dutyroster::engine::{normalize, rank, score, InputError, Tally};
use dutyroster::{Learner, Person, Resident, RosterInput};

#[test]
fn juniors_score_higher_than_seniors() {
    let fresh = Tally::default();
    let junior = Person::NeuroResident(Resident::new("Junior", 1));
    let senior = Person::NeuroResident(Resident::new("Senior", 5));
    assert_eq!(score(&junior, 0, &fresh, 3), 510);
    assert_eq!(score(&senior, 0, &fresh, 3), 170);
}

#[test]
fn off_service_types_are_preferred() {
    let fresh = Tally::default();
    let visitor = Person::NonNeuroResident(Resident::new("Visitor", 3));
    let away = Person::NeuroResident(Resident::new("Away", 2).off_service());
    assert_eq!(score(&visitor, 0, &fresh, 3), 1340);
    assert_eq!(score(&away, 0, &fresh, 3), 925);
}

#[test]
fn calls_and_recency_lower_the_score() {
    let junior = Person::NeuroResident(Resident::new("Junior", 1));
    let tally = Tally {
        call_days: vec![2, 5],
        ..Tally::default()
    };
    // dernière garde il y a 3 jours : pénalité
    assert_eq!(score(&junior, 8, &tally, 3), 510 - 200 - 5000);
    assert_eq!(score(&junior, 9, &tally, 3), 510 - 200);
    assert_eq!(score(&junior, 9, &tally, 4), 510 - 200 - 5000);
}

#[test]
fn learners_get_no_seniority_bonus() {
    let student = Person::Student(Learner::new("Student"));
    assert_eq!(score(&student, 0, &Tally::default(), 3), 0);
}

#[test]
fn rank_is_stable_on_ties() {
    let order = rank(vec![(0, 10), (1, 20), (2, 10), (3, -5000)]);
    assert_eq!(order, vec![1, 0, 2, 3]);
}

#[test]
fn period_classifies_weekends_and_holidays() {
    // vendredi 10 → mardi 14 octobre 2025, le lundi 13 férié
    let mut input = RosterInput::new("2025-10-10", "2025-10-14");
    input.stat_holidays = vec![4, 0, 40];

    let period = normalize(&input).unwrap();
    assert_eq!(period.days(), 5);
    let flags: Vec<bool> = (0..period.days())
        .map(|d| period.is_weekend_or_holiday(d))
        .collect();
    assert_eq!(flags, vec![false, true, true, true, false]);
    assert!(period.is_holiday(3));
    assert!(!period.is_holiday(1));
    assert_eq!(period.index_of(5), Some(4));
    assert_eq!(period.index_of(6), None);
    assert_eq!(period.index_of(0), None);
}

#[test]
fn single_day_period() {
    let input = RosterInput::new("2025-10-10", "2025-10-10");
    let period = normalize(&input).unwrap();
    assert_eq!(period.days(), 1);
}

#[test]
fn normalizer_rejects_bad_ranges() {
    let input = RosterInput::new("2025-10-10", "2025-10-09");
    assert!(matches!(
        normalize(&input),
        Err(InputError::Inverted { .. })
    ));

    let input = RosterInput::new("2025-10-10", "  ");
    assert_eq!(normalize(&input), Err(InputError::MissingDate("end")));

    let input = RosterInput::new("10/10/2025", "2025-10-12");
    assert!(matches!(
        normalize(&input),
        Err(InputError::Unparseable { field: "start", .. })
    ));
}
