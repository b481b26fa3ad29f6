use super::types::Tally;
use crate::model::Person;
use std::cmp::Reverse;

/// Priorité d'un candidat pour une garde le jour `day` (plus haut = préféré).
///
/// - +1000 résident hors neurochirurgie
/// - +500 résident de neurochirurgie en stage extérieur
/// - −100 par garde déjà attribuée
/// - +(7 − PGY) × 85 : les juniors portent plus de gardes
/// - −5000 si la dernière garde date de `recency_window` jours ou moins
pub fn score(person: &Person, day: usize, tally: &Tally, recency_window: u32) -> i64 {
    let mut total = 0i64;
    match person {
        Person::NonNeuroResident(_) => total += 1000,
        Person::NeuroResident(r) if !r.on_service => total += 500,
        _ => {}
    }
    total -= 100 * i64::from(tally.calls());
    if let Some(level) = person.level() {
        total += (7 - i64::from(level)) * 85;
    }
    let recent = tally
        .last_call_day()
        .is_some_and(|last| last <= day && day - last <= recency_window as usize);
    if recent {
        total -= 5000;
    }
    total
}

/// Tri stable par score décroissant ; l'ordre du roster départage.
pub fn rank(mut scored: Vec<(usize, i64)>) -> Vec<usize> {
    scored.sort_by_key(|&(_, s)| Reverse(s));
    scored.into_iter().map(|(idx, _)| idx).collect()
}
