use super::types::InputError;
use crate::config::RosterInput;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;
use tracing::debug;

/// Période normalisée : dates dépliées, fériés en indices base 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    dates: Vec<NaiveDate>,
    holidays: BTreeSet<usize>,
}

impl Period {
    pub fn days(&self) -> usize {
        self.dates.len()
    }

    pub fn start(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn date(&self, day: usize) -> NaiveDate {
        self.dates[day]
    }

    pub fn is_holiday(&self, day: usize) -> bool {
        self.holidays.contains(&day)
    }

    pub fn is_weekend_or_holiday(&self, day: usize) -> bool {
        self.is_holiday(day) || matches!(self.dates[day].weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Convertit un numéro de jour (base 1) en indice, si dans la période.
    pub fn index_of(&self, day_number: u32) -> Option<usize> {
        let idx = usize::try_from(day_number).ok()?.checked_sub(1)?;
        (idx < self.days()).then_some(idx)
    }

    /// Jours de la liste (base 1) qui tombent dans la période.
    pub fn count_within(&self, day_numbers: &BTreeSet<u32>) -> u32 {
        day_numbers
            .iter()
            .filter(|&&d| self.index_of(d).is_some())
            .count() as u32
    }
}

pub fn normalize(input: &RosterInput) -> Result<Period, InputError> {
    let start = parse_date("start", input.start_date.as_deref())?;
    let end = parse_date("end", input.end_date.as_deref())?;
    if end < start {
        return Err(InputError::Inverted { start, end });
    }

    let mut dates = Vec::new();
    let mut current = start;
    loop {
        dates.push(current);
        if current == end {
            break;
        }
        current = current.succ_opt().ok_or(InputError::Overflow)?;
    }

    let mut holidays = BTreeSet::new();
    for &number in &input.stat_holidays {
        match usize::try_from(number).ok().and_then(|n| n.checked_sub(1)) {
            Some(idx) if idx < dates.len() => {
                holidays.insert(idx);
            }
            _ => debug!(day = number, "holiday outside the period ignored"),
        }
    }

    Ok(Period { dates, holidays })
}

fn parse_date(field: &'static str, raw: Option<&str>) -> Result<NaiveDate, InputError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(InputError::MissingDate(field))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| InputError::Unparseable {
        field,
        value: raw.to_string(),
    })
}
