use super::types::Violation;
use super::RunState;
use crate::model::Activity;

pub(super) fn run(state: &mut RunState<'_>) {
    let days = state.period.days();
    for (p, person) in state.people().iter().enumerate() {
        for day in 0..days.saturating_sub(1) {
            if !state.grid.cell(p, day).iter().any(|a| a.requires_rest()) {
                continue;
            }
            let next = day + 1;
            if state.grid.is_open(p, next) {
                state.grid.push(p, next, Activity::PostCall);
                continue;
            }
            if state.grid.contains(p, next, Activity::Vacation)
                || state.grid.contains(p, next, Activity::PostCall)
            {
                continue;
            }
            state.diagnostics.push(Violation::PostCallBlocked {
                person: person.name().to_string(),
                date: state.period.date(next),
                existing: state.grid.describe(p, next),
            });
        }
    }
}
