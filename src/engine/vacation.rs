use super::RunState;
use crate::model::Activity;

pub(super) fn run(state: &mut RunState<'_>) {
    for (p, person) in state.people().iter().enumerate() {
        for &number in person.vacation_days() {
            if let Some(day) = state.period.index_of(number) {
                state.grid.replace(p, day, Activity::Vacation);
            }
        }
    }
}
