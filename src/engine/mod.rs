mod audit;
mod call;
mod diagnostics;
mod fallback;
mod grid;
mod normalize;
mod or_clinic;
mod pairing;
mod post_call;
mod score;
mod types;
mod vacation;

pub use audit::audit;
pub use diagnostics::Diagnostics;
pub use grid::ScheduleGrid;
pub use normalize::{normalize, Period};
pub use score::{rank, score};
pub use types::{
    AssignedPerson, AssignedRoster, CallSlot, Conflict, ConflictKind, InputError, Tally, Violation,
};

use crate::config::RosterInput;
use crate::model::Person;
use tracing::debug;

/// État partagé par les passes : l'arène, les compteurs, les diagnostics.
pub(crate) struct RunState<'a> {
    pub input: &'a RosterInput,
    pub period: Period,
    pub grid: ScheduleGrid,
    pub tallies: Vec<Tally>,
    pub diagnostics: Diagnostics,
}

impl<'a> RunState<'a> {
    fn new(input: &'a RosterInput, period: Period) -> Self {
        let people = input.people.len();
        Self {
            input,
            grid: ScheduleGrid::new(people, period.days()),
            tallies: vec![Tally::default(); people],
            period,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn people(&self) -> &'a [Person] {
        &self.input.people
    }

    fn into_roster(self) -> AssignedRoster {
        let RunState {
            input,
            period,
            grid,
            tallies,
            diagnostics,
        } = self;
        let people = input
            .people
            .iter()
            .zip(tallies)
            .enumerate()
            .map(|(idx, (person, tally))| AssignedPerson {
                person: person.clone(),
                schedule: grid.row(idx).to_vec(),
                call_days: tally.call_days.iter().map(|&d| d as u32 + 1).collect(),
                weekend_calls: tally.weekend_calls,
                or_days: tally.or_days,
            })
            .collect();
        AssignedRoster {
            start_date: Some(period.start()),
            days: period.days(),
            people,
            diagnostics: diagnostics.into_lines(),
        }
    }
}

/// Calcule le planning complet. N'échoue jamais : toute règle non tenue
/// devient une ligne de `diagnostics`, et une période invalide donne un
/// roster vide accompagné d'un seul diagnostic.
pub fn generate_schedule(input: &RosterInput) -> AssignedRoster {
    let period = match normalize(input) {
        Ok(period) => period,
        Err(err) => {
            let mut diagnostics = Diagnostics::default();
            diagnostics.push(Violation::from(err));
            return AssignedRoster {
                diagnostics: diagnostics.into_lines(),
                ..AssignedRoster::default()
            };
        }
    };
    debug!(
        days = period.days(),
        people = input.people.len(),
        "generating schedule"
    );

    let mut state = RunState::new(input, period);
    vacation::run(&mut state);
    call::run(&mut state);
    post_call::run(&mut state);
    or_clinic::run(&mut state);
    pairing::run(&mut state);
    fallback::run(&mut state);
    state.into_roster()
}
