use super::score::{rank, score};
use super::types::{CallSlot, Violation};
use super::RunState;
use crate::config::{CallKind, PredefinedCall};
use crate::model::Activity;
use std::collections::BTreeMap;
use tracing::debug;

/// Vivier de candidats pour un créneau.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pool {
    Any,
    /// Nuit en semaine : réservée aux résidents hors service / hors neuro.
    Night,
}

pub(super) fn run(state: &mut RunState<'_>) {
    if state.input.use_predefined_calls {
        stamp_predefined(state);
        return;
    }

    assign_quotas(state);
    for day in 0..state.period.days() {
        if state.period.is_weekend_or_holiday(day) {
            assign_weekend(state, day);
        } else {
            assign_weekday(state, day);
        }
    }
}

fn stamp_predefined(state: &mut RunState<'_>) {
    let input = state.input;
    let index: BTreeMap<_, _> = state
        .people()
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.id(), idx))
        .collect();

    for PredefinedCall { day, person, kind } in &input.predefined_calls {
        let Some(&p) = index.get(person) else {
            state.diagnostics.push(Violation::UnknownPerson {
                person: person.clone(),
                day: *day,
            });
            continue;
        };
        let Some(d) = state.period.index_of(*day) else {
            state.diagnostics.push(Violation::DayOutOfRange {
                person: state.people()[p].name().to_string(),
                day: *day,
                days: state.period.days(),
            });
            continue;
        };
        let labels: &[Activity] = match kind {
            CallKind::Day => &[Activity::DayCall],
            CallKind::Night => &[Activity::NightCall],
            CallKind::Weekend => &[Activity::WeekendCall],
            CallKind::TwentyFourHour => &[Activity::DayCall, Activity::NightCall],
            CallKind::Backup => &[Activity::Backup],
        };
        if !state.grid.is_open(p, d) {
            state.diagnostics.push(Violation::PredefinedBlocked {
                person: state.people()[p].name().to_string(),
                date: state.period.date(d),
                existing: state.grid.describe(p, d),
            });
            continue;
        }
        for &label in labels {
            state.grid.push(p, d, label);
        }
        match kind {
            CallKind::Backup => {}
            CallKind::Weekend => {
                state.tallies[p].record_call(d);
                state.tallies[p].weekend_calls += 1;
            }
            _ => state.tallies[p].record_call(d),
        }
    }
}

fn assign_quotas(state: &mut RunState<'_>) {
    let days = state.period.days() as u32;
    for (p, person) in state.people().iter().enumerate() {
        let Some(resident) = person.resident() else {
            continue;
        };
        let quota = if person.is_on_service_neuro() {
            let present = days.saturating_sub(state.period.count_within(&resident.vacation_days));
            match state.input.rules.on_service_quota(present) {
                Some(quota) => quota,
                None => {
                    if !resident.exempt_from_call {
                        state.diagnostics.push(Violation::NoQuotaBand {
                            person: resident.name.clone(),
                            days: present,
                        });
                    }
                    0
                }
            }
        } else {
            state.input.rules.off_service_max_calls
        };
        state.tallies[p].quota = quota;
    }
}

/// Contraintes dures : un candidat qui en échoue une est exclu.
fn eligible(state: &RunState<'_>, p: usize, day: usize, pool: Pool) -> bool {
    let person = &state.people()[p];
    let Some(resident) = person.resident() else {
        return false;
    };
    if resident.exempt_from_call || !state.grid.is_open(p, day) {
        return false;
    }
    if day > 0
        && state
            .grid
            .cell(p, day - 1)
            .iter()
            .any(|a| a.requires_rest())
    {
        return false;
    }
    let tally = &state.tallies[p];
    if tally.calls() >= tally.quota {
        return false;
    }
    if state.period.is_weekend_or_holiday(day)
        && tally.weekend_calls >= state.input.rules.max_weekend_calls
    {
        return false;
    }
    !(pool == Pool::Night && person.is_on_service_neuro())
}

fn ranked(state: &RunState<'_>, day: usize, pool: Pool) -> Vec<usize> {
    let window = state.input.rules.recency_window_days;
    let scored = (0..state.people().len())
        .filter(|&p| eligible(state, p, day, pool))
        .map(|p| (p, score(&state.people()[p], day, &state.tallies[p], window)))
        .collect();
    rank(scored)
}

fn assign_weekend(state: &mut RunState<'_>, day: usize) {
    let candidates = ranked(state, day, Pool::Any);
    let Some(&top) = candidates.first() else {
        state.diagnostics.push(Violation::NoCandidate {
            slot: CallSlot::Weekend,
            date: state.period.date(day),
        });
        return;
    };
    assign_call(state, top, day, &[Activity::WeekendCall]);
    state.tallies[top].weekend_calls += 1;
    ensure_backup(state, top, day, &candidates[1..]);
}

fn assign_weekday(state: &mut RunState<'_>, day: usize) {
    let night = ranked(state, day, Pool::Night);
    if let Some(&night_top) = night.first() {
        assign_call(state, night_top, day, &[Activity::NightCall]);

        let day_pool = ranked(state, day, Pool::Any);
        let Some(&day_top) = day_pool.first() else {
            state.diagnostics.push(Violation::NoCandidate {
                slot: CallSlot::Day,
                date: state.period.date(day),
            });
            return;
        };
        assign_call(state, day_top, day, &[Activity::DayCall]);
        ensure_backup(state, day_top, day, &day_pool[1..]);
        return;
    }

    let candidates = ranked(state, day, Pool::Any);
    let Some(&top) = candidates.first() else {
        state.diagnostics.push(Violation::NoCandidate {
            slot: CallSlot::TwentyFourHour,
            date: state.period.date(day),
        });
        return;
    };
    debug!(day, person = state.people()[top].name(), "24-hour contingency call");
    assign_call(state, top, day, &[Activity::DayCall, Activity::NightCall]);
    ensure_backup(state, top, day, &candidates[1..]);
}

fn assign_call(state: &mut RunState<'_>, p: usize, day: usize, labels: &[Activity]) {
    for &label in labels {
        state.grid.push(p, day, label);
    }
    state.tallies[p].record_call(day);
}

/// Un PGY-1 sans garde solo doit être doublé par un PGY-3+ ; le vivier
/// est déjà trié par score.
fn ensure_backup(state: &mut RunState<'_>, assignee: usize, day: usize, pool: &[usize]) {
    let people = state.people();
    if !people[assignee].needs_call_backup() {
        return;
    }
    let backup = pool.iter().copied().find(|&p| {
        p != assignee && state.grid.is_open(p, day) && people[p].can_back_up()
    });
    match backup {
        Some(p) => state.grid.push(p, day, Activity::Backup),
        None => state.diagnostics.push(Violation::MissingBackup {
            person: people[assignee].name().to_string(),
            date: state.period.date(day),
        }),
    }
}
