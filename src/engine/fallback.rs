use super::RunState;
use crate::model::Activity;

pub(super) fn run(state: &mut RunState<'_>) {
    for p in 0..state.grid.people() {
        for day in 0..state.grid.days() {
            if state.grid.is_open(p, day) {
                state.grid.push(p, day, Activity::Float);
            }
        }
    }
}
