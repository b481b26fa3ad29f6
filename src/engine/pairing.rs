use super::or_clinic::assign_or;
use super::RunState;
use crate::model::Activity;
use tracing::debug;

/// Chaque junior libre (PGY 1–2) rejoint au bloc le senior (PGY 3+) seul
/// au bloc ce jour-là s'il a au moins deux ans de plus. Ce senior est figé
/// pour la journée : plusieurs juniors peuvent le rejoindre.
pub(super) fn run(state: &mut RunState<'_>) {
    let people = state.people();
    for day in 0..state.period.days() {
        let Some((senior, senior_level)) = senior_alone(state, day) else {
            continue;
        };

        for (p, person) in people.iter().enumerate() {
            let Some(level) = person.level() else {
                continue;
            };
            if !(1..=2).contains(&level)
                || !person.is_on_service_neuro()
                || !state.grid.is_open(p, day)
            {
                continue;
            }
            if senior_level >= level + 2 {
                debug!(
                    day,
                    junior = person.name(),
                    senior = people[senior].name(),
                    "junior paired in OR"
                );
                assign_or(state, p, day);
            }
        }
    }
}

/// Senior au bloc sans autre occupant ce jour-là.
fn senior_alone(state: &RunState<'_>, day: usize) -> Option<(usize, u8)> {
    let occupants: Vec<usize> = (0..state.people().len())
        .filter(|&p| state.grid.contains(p, day, Activity::Or))
        .collect();
    match occupants.as_slice() {
        &[p] => state.people()[p]
            .level()
            .filter(|&level| level >= 3)
            .map(|level| (p, level)),
        _ => None,
    }
}
