use super::RunState;
use crate::config::OrCase;
use crate::model::Activity;
use chrono::Datelike;
use std::cmp::Reverse;
use tracing::debug;

pub(super) fn run(state: &mut RunState<'_>) {
    let input = state.input;
    for day in 0..state.period.days() {
        let cases: Vec<&OrCase> = input
            .or_cases
            .iter()
            .filter(|c| state.period.index_of(c.day) == Some(day))
            .collect();

        let chiefs = claim_chief_days(state, day);
        fill_clinic(state, day, cases.first().copied());

        let demand = cases.len().saturating_sub(chiefs);
        let mut pool = open_on_service(state, day);
        pool.sort_by_key(|&p| {
            (
                Reverse(state.people()[p].level().unwrap_or(0)),
                state.tallies[p].or_days,
            )
        });
        for p in pool.into_iter().take(demand) {
            assign_or(state, p, day);
        }
    }
}

/// (a) Chaque chef garde son jour de bloc présélectionné si la case est libre.
fn claim_chief_days(state: &mut RunState<'_>, day: usize) -> usize {
    let number = day as u32 + 1;
    let mut claimed = 0;
    for (p, person) in state.people().iter().enumerate() {
        let Some(resident) = person.resident() else {
            continue;
        };
        if resident.is_chief
            && resident.chief_or_days.contains(&number)
            && state.grid.is_open(p, day)
        {
            assign_or(state, p, day);
            claimed += 1;
        }
    }
    claimed
}

/// (b) Clinique par ordre d'ancienneté croissant, selon le quota du jour de
/// semaine. L'équipe du jour se déduit du chirurgien du premier cas.
fn fill_clinic(state: &mut RunState<'_>, day: usize, first_case: Option<&OrCase>) {
    let weekday = state.period.date(day).weekday();
    let team = first_case.and_then(|c| state.input.staff_teams.team_of(&c.surgeon));
    let slots = state
        .input
        .clinic_quotas
        .iter()
        .find(|q| q.weekday == weekday)
        .map_or(0, |q| q.slots_for(team)) as usize;
    if slots == 0 {
        return;
    }
    debug!(day, ?team, slots, "clinic slots");

    let mut juniors_first = open_on_service(state, day);
    juniors_first.sort_by_key(|&p| state.people()[p].level().unwrap_or(0));
    for p in juniors_first.into_iter().take(slots) {
        state.grid.push(p, day, Activity::Clinic);
    }
}

fn open_on_service(state: &RunState<'_>, day: usize) -> Vec<usize> {
    state
        .people()
        .iter()
        .enumerate()
        .filter(|&(p, person)| person.is_on_service_neuro() && state.grid.is_open(p, day))
        .map(|(p, _)| p)
        .collect()
}

pub(super) fn assign_or(state: &mut RunState<'_>, p: usize, day: usize) {
    state.grid.push(p, day, Activity::Or);
    state.tallies[p].or_days += 1;
}
