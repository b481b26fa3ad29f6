#![forbid(unsafe_code)]
use dutyroster::{
    generate_schedule, io, load_input_from_file, Person, PersonId, Resident, RosterInput,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn import_people_from_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("people.csv");
    fs::write(
        &path,
        "id,name,kind,level,on_service,chief,solo_pgy1,backup,exempt,vacations,chief_or_days\n\
         gus,Gus,neuro,6,,yes,,,,3..4,1;8\n\
         ,Ada,neuro,1,true,no,oui,,,,\n\
         jon,Jon,non-neuro,2,false,,,,1,,\n\
         lou,Lou,student\n",
    )
    .unwrap();

    let people = io::import_people_csv(&path).unwrap();
    assert_eq!(people.len(), 4);

    let Person::NeuroResident(gus) = &people[0] else {
        panic!("expected neuro resident");
    };
    assert_eq!(gus.id, PersonId::new("gus"));
    assert!(gus.is_chief && gus.on_service);
    assert_eq!(gus.vacation_days.iter().copied().collect::<Vec<_>>(), vec![3, 4]);
    assert_eq!(gus.chief_or_days.iter().copied().collect::<Vec<_>>(), vec![1, 8]);

    let ada = people[1].resident().unwrap();
    assert!(!ada.id.as_str().is_empty());
    assert!(ada.allow_solo_pgy1_call);
    assert!(ada.can_act_as_backup);

    assert!(matches!(&people[2], Person::NonNeuroResident(r) if r.exempt_from_call && !r.on_service));
    assert!(matches!(&people[3], Person::Student(l) if l.name == "Lou"));
}

#[test]
fn import_rejects_unknown_kind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("people.csv");
    fs::write(&path, "id,name,kind\nx,Xan,surgeon\n").unwrap();
    assert!(io::import_people_csv(&path).is_err());
}

#[test]
fn day_lists_accept_ranges() {
    let days = io::parse_day_list("3; 5..7,9-10").unwrap();
    assert_eq!(days.into_iter().collect::<Vec<_>>(), vec![3, 5, 6, 7, 9, 10]);
    assert!(io::parse_day_list("").unwrap().is_empty());
    assert!(io::parse_day_list("0").is_err());
    assert!(io::parse_day_list("7..5").is_err());
    assert!(io::parse_day_list("monday").is_err());
    assert!(io::parse_day_list("1..4000000000").is_err());
    assert!(io::parse_day_list("367").is_err());
    assert_eq!(io::parse_day_list("360..366").unwrap().len(), 7);
}

#[test]
fn input_document_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.json");
    let mut input = RosterInput::new("2025-10-06", "2025-10-10");
    input.people = vec![Person::NeuroResident(
        Resident::new("Ada", 1).with_id("ada").with_vacation([2]),
    )];

    io::save_input_json(&path, &input).unwrap();
    let loaded = load_input_from_file(&path).unwrap();
    assert_eq!(loaded.people, input.people);
    assert_eq!(loaded.start_date.as_deref(), Some("2025-10-06"));
    assert_eq!(loaded.rules.max_weekend_calls, 2);
}

#[test]
fn load_rejects_duplicate_ids() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.json");
    let mut input = RosterInput::new("2025-10-06", "2025-10-10");
    input.people = vec![
        Person::NeuroResident(Resident::new("Ada", 1).with_id("same")),
        Person::NeuroResident(Resident::new("Bao", 2).with_id("same")),
    ];
    io::save_input_json(&path, &input).unwrap();

    let err = load_input_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("duplicate person id same"));
}

#[test]
fn export_schedule_grid() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("schedule.csv");
    let json_path = dir.path().join("schedule.json");
    let mut input = RosterInput::new("2025-10-11", "2025-10-12");
    let mut solo = Resident::new("Solo", 2).with_id("solo");
    solo.allow_solo_pgy1_call = true;
    input.rules.on_service_bands = vec![dutyroster::CallRule {
        min_on_service_days: 0,
        max_on_service_days: 31,
        max_calls: 4,
    }];
    input.people = vec![Person::NeuroResident(solo)];
    let roster = generate_schedule(&input);

    io::export_schedule_csv(&csv_path, &roster).unwrap();
    let content = fs::read_to_string(&csv_path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("id,name,2025-10-11,2025-10-12,calls,weekend_calls,or_days")
    );
    assert_eq!(lines.next(), Some("solo,Solo,WeekendCall,PostCall,1,1,0"));

    io::export_assigned_json(&json_path, &roster).unwrap();
    let reloaded = io::load_assigned_json(&json_path).unwrap();
    assert_eq!(reloaded, roster);
}
