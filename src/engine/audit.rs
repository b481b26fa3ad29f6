use super::types::{AssignedRoster, Conflict, ConflictKind};
use crate::config::RosterInput;
use crate::model::{Activity, Person};

/// Revalide un roster déjà calculé (par exemple après un échange manuel).
pub fn audit(roster: &AssignedRoster, input: &RosterInput) -> Vec<Conflict> {
    let mut out = Vec::new();

    for assigned in &roster.people {
        let person = &assigned.person;
        for (day, cell) in assigned.schedule.iter().enumerate() {
            let number = day as u32 + 1;
            if double_booked(cell) {
                out.push(conflict(person, number, ConflictKind::DoubleBooking));
            }
            if cell.iter().any(|a| a.requires_rest()) {
                let rested = assigned.schedule.get(day + 1).map_or(true, |next| {
                    next.contains(&Activity::PostCall) || next.contains(&Activity::Vacation)
                });
                if !rested {
                    out.push(conflict(person, number, ConflictKind::MissingPostCall));
                }
            }
            let solo_call = cell
                .iter()
                .any(|&a| a == Activity::DayCall || a == Activity::WeekendCall);
            if solo_call && person.needs_call_backup() && !backed_up(roster, day) {
                out.push(conflict(person, number, ConflictKind::MissingBackup));
            }
        }

        if let Some(quota) = quota_of(person, roster.days, input) {
            if assigned.call_days.len() as u32 > quota {
                let day = assigned.call_days.last().copied().unwrap_or(1);
                out.push(conflict(person, day, ConflictKind::QuotaExceeded));
            }
        }
    }

    out
}

fn conflict(person: &Person, day: u32, kind: ConflictKind) -> Conflict {
    Conflict {
        person: person.id().clone(),
        day,
        kind,
    }
}

/// Seule la fusion jour + nuit (garde de 24 h) est tolérée.
fn double_booked(cell: &[Activity]) -> bool {
    let exclusive: Vec<Activity> = cell.iter().copied().filter(|a| a.is_exclusive()).collect();
    match exclusive.as_slice() {
        [] | [_] => false,
        [Activity::DayCall, Activity::NightCall] | [Activity::NightCall, Activity::DayCall] => {
            false
        }
        _ => true,
    }
}

fn backed_up(roster: &AssignedRoster, day: usize) -> bool {
    roster.people.iter().any(|p| {
        p.person.level().is_some_and(|level| level >= 3)
            && p
                .schedule
                .get(day)
                .is_some_and(|cell| cell.contains(&Activity::Backup))
    })
}

fn quota_of(person: &Person, days: usize, input: &RosterInput) -> Option<u32> {
    let resident = person.resident()?;
    if person.is_on_service_neuro() {
        let vacations = resident
            .vacation_days
            .iter()
            .filter(|&&d| d >= 1 && d as usize <= days)
            .count();
        input
            .rules
            .on_service_quota(days.saturating_sub(vacations) as u32)
    } else {
        Some(input.rules.off_service_max_calls)
    }
}
