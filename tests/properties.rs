#![forbid(unsafe_code)]
use chrono::Weekday;
use dutyroster::{
    audit, generate_schedule, Activity, CallRule, CallRules, ClinicSlotQuota, ConflictKind,
    Learner, OrCase, Person, PersonId, Resident, RosterInput, StaffTeams,
};

#[test]
fn month_schedule_keeps_invariants() {
    let input = november_input();
    let roster = generate_schedule(&input);
    assert_eq!(roster.days, 28);
    assert_eq!(roster.people.len(), input.people.len());

    let conflicts = audit(&roster, &input);
    for c in &conflicts {
        match c.kind {
            ConflictKind::MissingBackup => {
                let name = roster.find_person_by_id(&c.person).unwrap().person.name();
                let date = roster.date_of(c.day).unwrap();
                let expected = format!("no PGY-3+ backup available for {name} (PGY-1) on {date}");
                assert!(
                    roster.diagnostics.contains(&expected),
                    "silent backup violation: {expected}"
                );
            }
            other => panic!("unexpected {other:?} conflict for {} on day {}", c.person, c.day),
        }
    }

    for assigned in &roster.people {
        assert!(assigned.schedule.iter().all(|cell| !cell.is_empty()));
    }
}

#[test]
fn vacation_days_are_exclusive() {
    let input = november_input();
    let roster = generate_schedule(&input);

    let away = roster.find_person_by_id(&PersonId::new("pgy1-b")).unwrap();
    for day in [5u32, 6] {
        assert_eq!(
            away.schedule[day as usize - 1],
            vec![Activity::Vacation],
            "day {day}"
        );
        assert!(!away.call_days.contains(&day));
    }
    let worked = away
        .schedule
        .iter()
        .filter(|cell| !cell.contains(&Activity::Vacation))
        .count();
    assert_eq!(worked, 26);
}

#[test]
fn students_never_take_call() {
    let input = november_input();
    let roster = generate_schedule(&input);

    let student = roster.find_person_by_id(&PersonId::new("student")).unwrap();
    assert!(student.call_days.is_empty());
    assert!(student
        .schedule
        .iter()
        .all(|cell| cell.as_slice() == [Activity::Float]));
}

#[test]
fn exempt_resident_is_never_on_call() {
    let input = november_input();
    let roster = generate_schedule(&input);

    let exempt = roster.find_person_by_id(&PersonId::new("exempt")).unwrap();
    assert!(exempt.call_days.is_empty());
    let on_call = |a: &Activity| {
        matches!(
            a,
            Activity::DayCall | Activity::NightCall | Activity::WeekendCall | Activity::Backup
        )
    };
    assert!(exempt.schedule.iter().all(|cell| !cell.iter().any(on_call)));
}

#[test]
fn weekend_calls_never_exceed_two() {
    let input = november_input();
    let roster = generate_schedule(&input);
    for assigned in &roster.people {
        assert!(assigned.weekend_calls <= 2, "{}", assigned.person.name());
    }
}

#[test]
fn same_input_gives_identical_output() {
    let input = november_input();
    let first = serde_json::to_string(&generate_schedule(&input)).unwrap();
    let second = serde_json::to_string(&generate_schedule(&input)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn inverted_range_is_fatal() {
    let mut input = november_input();
    input.start_date = Some("2025-11-30".into());
    input.end_date = Some("2025-11-03".into());

    let roster = generate_schedule(&input);
    assert!(roster.people.is_empty());
    assert_eq!(roster.start_date, None);
    assert_eq!(
        roster.diagnostics,
        vec!["invalid date range: end date 2025-11-03 is before start date 2025-11-30".to_string()]
    );
}

#[test]
fn missing_or_malformed_dates_are_fatal() {
    let mut input = november_input();
    input.start_date = None;
    assert_eq!(
        generate_schedule(&input).diagnostics,
        vec!["invalid date range: missing start date".to_string()]
    );

    input.start_date = Some("2025-13-01".into());
    assert_eq!(
        generate_schedule(&input).diagnostics,
        vec!["invalid date range: invalid start date: 2025-13-01 (expected YYYY-MM-DD)".to_string()]
    );
}

/// Quatre semaines (lundi 3 → dimanche 30 novembre 2025), le 11 férié.
fn november_input() -> RosterInput {
    let mut input = RosterInput::new("2025-11-03", "2025-11-30");
    input.stat_holidays = vec![9];
    input.rules = CallRules {
        on_service_bands: vec![
            CallRule {
                min_on_service_days: 0,
                max_on_service_days: 20,
                max_calls: 5,
            },
            CallRule {
                min_on_service_days: 21,
                max_on_service_days: 31,
                max_calls: 7,
            },
        ],
        off_service_max_calls: 6,
        ..CallRules::default()
    };
    input.people = vec![
        Person::NeuroResident(Resident::new("Ada", 1).with_id("pgy1-a")),
        Person::NeuroResident(Resident::new("Bao", 1).with_id("pgy1-b").with_vacation([5, 6])),
        Person::NeuroResident(Resident::new("Cyd", 2).with_id("pgy2")),
        Person::NeuroResident(Resident::new("Dee", 3).with_id("pgy3")),
        Person::NeuroResident(Resident::new("Eli", 4).with_id("pgy4")),
        Person::NeuroResident(Resident::new("Fay", 5).with_id("pgy5")),
        Person::NeuroResident(Resident::new("Gus", 6).with_id("chief").chief([1, 8, 15, 22])),
        Person::NeuroResident(Resident::new("Hal", 5).with_id("exempt").exempt()),
        Person::NeuroResident(Resident::new("Ivy", 4).with_id("away").off_service()),
        Person::NonNeuroResident(Resident::new("Jon", 2).with_id("ortho")),
        Person::NonNeuroResident(Resident::new("Kim", 3).with_id("plastics")),
        Person::Student(Learner {
            id: PersonId::new("student"),
            name: "Lou".into(),
            vacation_days: Default::default(),
        }),
    ];
    input.or_cases = (1..=28u32)
        .flat_map(|day| {
            let surgeon = if day % 2 == 0 { "Dr Red" } else { "Dr Blue" };
            [
                OrCase {
                    day,
                    surgeon: surgeon.into(),
                },
                OrCase {
                    day,
                    surgeon: "Dr Red".into(),
                },
            ]
        })
        .collect();
    input.clinic_quotas = [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
        .into_iter()
        .map(|weekday| ClinicSlotQuota {
            weekday,
            red_team: 1,
            blue_team: 2,
        })
        .collect();
    input.staff_teams = StaffTeams {
        red: vec!["Dr Red".into()],
        blue: vec!["Dr Blue".into()],
    };
    input
}
