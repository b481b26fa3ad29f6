use crate::model::{Activity, Person, PersonId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Erreur fatale de normalisation : aucune passe ne tourne.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("missing {0} date")]
    MissingDate(&'static str),
    #[error("invalid {field} date: {value} (expected YYYY-MM-DD)")]
    Unparseable { field: &'static str, value: String },
    #[error("end date {end} is before start date {start}")]
    Inverted { start: NaiveDate, end: NaiveDate },
    #[error("date overflow while expanding the period")]
    Overflow,
}

/// Créneau de garde à pourvoir.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSlot {
    Day,
    Night,
    TwentyFourHour,
    Weekend,
}

impl fmt::Display for CallSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CallSlot::Day => "day",
            CallSlot::Night => "night",
            CallSlot::TwentyFourHour => "24-hour",
            CallSlot::Weekend => "weekend",
        })
    }
}

/// Règle non satisfaite ; son `Display` est la ligne de diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("invalid date range: {0}")]
    InvalidPeriod(#[from] InputError),
    #[error("no eligible candidate for {slot} call on {date}")]
    NoCandidate { slot: CallSlot, date: NaiveDate },
    #[error("no PGY-3+ backup available for {person} (PGY-1) on {date}")]
    MissingBackup { person: String, date: NaiveDate },
    #[error("post-call for {person} on {date} blocked by {existing}")]
    PostCallBlocked {
        person: String,
        date: NaiveDate,
        existing: String,
    },
    #[error("predefined call for {person} on {date} blocked by {existing}")]
    PredefinedBlocked {
        person: String,
        date: NaiveDate,
        existing: String,
    },
    #[error("no call rule band covers {days} on-service days for {person}; call quota set to 0")]
    NoQuotaBand { person: String, days: u32 },
    #[error("predefined call on day {day} references unknown person {person}")]
    UnknownPerson { person: PersonId, day: u32 },
    #[error("predefined call for {person} on day {day} is outside the 1..={days} period")]
    DayOutOfRange { person: String, day: u32, days: usize },
}

/// Compteurs accumulés d'une personne pendant un calcul.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    /// Indices de jour (base 0), croissants.
    pub call_days: Vec<usize>,
    pub weekend_calls: u32,
    pub or_days: u32,
    pub quota: u32,
}

impl Tally {
    pub fn calls(&self) -> u32 {
        self.call_days.len() as u32
    }

    pub fn last_call_day(&self) -> Option<usize> {
        self.call_days.last().copied()
    }

    pub(crate) fn record_call(&mut self, day: usize) {
        if self.call_days.last() != Some(&day) {
            self.call_days.push(day);
        }
    }
}

/// Personne et son planning calculé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedPerson {
    pub person: Person,
    pub schedule: Vec<Vec<Activity>>,
    /// Numéros de jour (base 1).
    pub call_days: Vec<u32>,
    pub weekend_calls: u32,
    pub or_days: u32,
}

/// Résultat complet d'un calcul.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedRoster {
    pub start_date: Option<NaiveDate>,
    pub days: usize,
    pub people: Vec<AssignedPerson>,
    pub diagnostics: Vec<String>,
}

impl AssignedRoster {
    pub fn find_person_by_id(&self, id: &PersonId) -> Option<&AssignedPerson> {
        self.people.iter().find(|p| p.person.id() == id)
    }

    /// Case (personne, numéro de jour base 1).
    pub fn cell(&self, id: &PersonId, day: u32) -> Option<&[Activity]> {
        let idx = usize::try_from(day).ok()?.checked_sub(1)?;
        self.find_person_by_id(id)?
            .schedule
            .get(idx)
            .map(Vec::as_slice)
    }

    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        let start = self.start_date?;
        start.checked_add_days(chrono::Days::new(u64::from(day.checked_sub(1)?)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    DoubleBooking,
    MissingPostCall,
    MissingBackup,
    QuotaExceeded,
}

impl ConflictKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictKind::DoubleBooking => "double",
            ConflictKind::MissingPostCall => "post-call",
            ConflictKind::MissingBackup => "backup",
            ConflictKind::QuotaExceeded => "quota",
        }
    }
}

/// Conflit relevé par l'audit d'un roster déjà calculé.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub person: PersonId,
    /// Numéro de jour (base 1).
    pub day: u32,
    pub kind: ConflictKind,
}
