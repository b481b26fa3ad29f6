use crate::config::RosterInput;
use crate::engine::AssignedRoster;
use crate::model::{Learner, Person, PersonId, Resident};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Import de personnes depuis CSV, header
/// `id,name,kind,level,on_service,chief,solo_pgy1,backup,exempt,vacations,chief_or_days`.
/// Seuls `name` et `kind` sont obligatoires ; un `id` vide est tiré au hasard.
pub fn import_people_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Person>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let field = |i: usize| rec.get(i).map(str::trim).unwrap_or("");
        let name = field(1);
        let kind = field(2);
        if name.is_empty() || kind.is_empty() {
            bail!("invalid people row (empty name or kind)");
        }
        let id = match field(0) {
            "" => PersonId::random(),
            raw => PersonId::new(raw),
        };
        let vacations = parse_day_list(field(9))
            .with_context(|| format!("invalid vacations value for {name}"))?;

        let person = match kind.to_ascii_lowercase().as_str() {
            "student" | "other" | "other_learner" => {
                let learner = Learner {
                    id,
                    name: name.to_string(),
                    vacation_days: vacations,
                };
                if kind.eq_ignore_ascii_case("student") {
                    Person::Student(learner)
                } else {
                    Person::OtherLearner(learner)
                }
            }
            "neuro" | "non-neuro" | "non_neuro" => {
                let level: u8 = field(3)
                    .parse()
                    .with_context(|| format!("invalid level for {name}"))?;
                let flag = |i: usize, default: bool| -> anyhow::Result<bool> {
                    match field(i) {
                        "" => Ok(default),
                        raw => parse_bool(raw).with_context(|| format!("invalid flag for {name}")),
                    }
                };
                let resident = Resident {
                    id,
                    name: name.to_string(),
                    level,
                    on_service: flag(4, true)?,
                    vacation_days: vacations,
                    is_chief: flag(5, false)?,
                    allow_solo_pgy1_call: flag(6, false)?,
                    can_act_as_backup: flag(7, true)?,
                    exempt_from_call: flag(8, false)?,
                    chief_or_days: parse_day_list(field(10))
                        .with_context(|| format!("invalid chief_or_days value for {name}"))?,
                };
                if kind.eq_ignore_ascii_case("neuro") {
                    Person::NeuroResident(resident)
                } else {
                    Person::NonNeuroResident(resident)
                }
            }
            other => bail!("unknown person kind {other:?} for {name}"),
        };
        out.push(person);
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Plus grand numéro de jour accepté (une année bissextile).
pub const MAX_DAY: u32 = 366;

/// Liste de numéros de jour : `3;5..7;12` (ou `5-7`), bornée par [`MAX_DAY`].
pub fn parse_day_list(raw: &str) -> anyhow::Result<BTreeSet<u32>> {
    let mut out = BTreeSet::new();
    for chunk in raw.split([';', ',']).map(str::trim).filter(|c| !c.is_empty()) {
        if let Some((start, end)) = chunk.split_once("..").or_else(|| chunk.split_once('-')) {
            let start: u32 = start.trim().parse().with_context(|| format!("day {start}"))?;
            let end: u32 = end.trim().parse().with_context(|| format!("day {end}"))?;
            if end < start {
                bail!("inverted day range {chunk}");
            }
            if end > MAX_DAY {
                bail!("day range {chunk} goes past day {MAX_DAY}");
            }
            out.extend(start..=end);
        } else {
            out.insert(chunk.parse().with_context(|| format!("day {chunk}"))?);
        }
    }
    if out.contains(&0) {
        bail!("day numbers start at 1");
    }
    if out.last().is_some_and(|&d| d > MAX_DAY) {
        bail!("day numbers stop at {MAX_DAY}");
    }
    Ok(out)
}

/// Sauvegarde atomique du document d'entrée.
pub fn save_input_json<P: AsRef<Path>>(path: P, input: &RosterInput) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_vec_pretty(input)?;
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(parent).with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}

/// Export JSON du roster calculé (jolie mise en forme)
pub fn export_assigned_json<P: AsRef<Path>>(path: P, roster: &AssignedRoster) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(roster)?;
    fs::write(path, s)?;
    Ok(())
}

pub fn load_assigned_json<P: AsRef<Path>>(path: P) -> anyhow::Result<AssignedRoster> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))
}

/// Export CSV en grille : `id,name,<date>...,calls,weekend_calls,or_days`.
/// Une case à plusieurs étiquettes est rendue `DayCall+NightCall`.
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, roster: &AssignedRoster) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    let mut header = vec!["id".to_string(), "name".to_string()];
    header.extend((1..=roster.days as u32).map(|day| {
        roster
            .date_of(day)
            .map_or_else(|| format!("day{day}"), |d| d.to_string())
    }));
    header.extend(["calls", "weekend_calls", "or_days"].map(String::from));
    w.write_record(&header)?;

    let mut buf = itoa::Buffer::new();
    for assigned in &roster.people {
        let mut row = vec![
            assigned.person.id().as_str().to_string(),
            assigned.person.name().to_string(),
        ];
        row.extend(assigned.schedule.iter().map(|cell| {
            cell.iter()
                .map(|a| a.label())
                .collect::<Vec<_>>()
                .join("+")
        }));
        row.push(buf.format(assigned.call_days.len()).to_string());
        row.push(buf.format(assigned.weekend_calls).to_string());
        row.push(buf.format(assigned.or_days).to_string());
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}
