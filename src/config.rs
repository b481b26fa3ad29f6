use crate::model::{Person, PersonId};
use anyhow::{bail, Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Document d'entrée complet du moteur.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterInput {
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`, inclus
    #[serde(default)]
    pub end_date: Option<String>,
    /// Jours fériés (numéros de jour, base 1)
    #[serde(default)]
    pub stat_holidays: Vec<u32>,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub rules: CallRules,
    #[serde(default)]
    pub use_predefined_calls: bool,
    #[serde(default)]
    pub predefined_calls: Vec<PredefinedCall>,
    #[serde(default)]
    pub or_cases: Vec<OrCase>,
    #[serde(default)]
    pub clinic_quotas: Vec<ClinicSlotQuota>,
    #[serde(default)]
    pub staff_teams: StaffTeams,
}

impl RosterInput {
    pub fn new<S: Into<String>, E: Into<String>>(start: S, end: E) -> Self {
        Self {
            start_date: Some(start.into()),
            end_date: Some(end.into()),
            ..Self::default()
        }
    }

    /// Contrôles structurels ; le moteur lui-même tolère ces défauts.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for person in &self.people {
            if !seen.insert(person.id()) {
                bail!("duplicate person id {}", person.id());
            }
            if person.name().trim().is_empty() {
                bail!("person {} has an empty name", person.id());
            }
            if let Some(level) = person.level() {
                if !(1..=6).contains(&level) {
                    bail!("person {} has PGY level {level}, expected 1..=6", person.id());
                }
            }
        }
        for band in &self.rules.on_service_bands {
            if band.min_on_service_days > band.max_on_service_days {
                bail!(
                    "call rule band {}..={} is inverted",
                    band.min_on_service_days,
                    band.max_on_service_days
                );
            }
        }
        if self.rules.max_weekend_calls == 0 {
            bail!("max_weekend_calls must be > 0");
        }
        for call in &self.predefined_calls {
            if call.day == 0 {
                bail!("predefined call for {} uses day 0 (days start at 1)", call.person);
            }
        }
        Ok(())
    }
}

/// Règles de quotas et de pondération des gardes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRules {
    #[serde(default)]
    pub on_service_bands: Vec<CallRule>,
    #[serde(default)]
    pub off_service_max_calls: u32,
    #[serde(default = "default_max_weekend_calls")]
    pub max_weekend_calls: u32,
    #[serde(default = "default_recency_window_days")]
    pub recency_window_days: u32,
}

impl Default for CallRules {
    fn default() -> Self {
        Self {
            on_service_bands: Vec::new(),
            off_service_max_calls: 0,
            max_weekend_calls: default_max_weekend_calls(),
            recency_window_days: default_recency_window_days(),
        }
    }
}

impl CallRules {
    /// Quota d'un résident sur service, selon ses jours présents.
    pub fn on_service_quota(&self, on_service_days: u32) -> Option<u32> {
        self.on_service_bands
            .iter()
            .find(|b| (b.min_on_service_days..=b.max_on_service_days).contains(&on_service_days))
            .map(|b| b.max_calls)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRule {
    pub min_on_service_days: u32,
    pub max_on_service_days: u32,
    pub max_calls: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallKind {
    Day,
    Night,
    Weekend,
    TwentyFourHour,
    Backup,
}

/// Entrée de la table de gardes prédéfinie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredefinedCall {
    pub day: u32,
    pub person: PersonId,
    pub kind: CallKind,
}

/// Un cas opératoire : une unité de demande de bloc sur son jour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrCase {
    pub day: u32,
    #[serde(default)]
    pub surgeon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red,
    Blue,
}

/// Places de clinique pour un jour de semaine, par équipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicSlotQuota {
    pub weekday: Weekday,
    #[serde(default)]
    pub red_team: u32,
    #[serde(default)]
    pub blue_team: u32,
}

impl ClinicSlotQuota {
    pub fn slots_for(&self, team: Option<Team>) -> u32 {
        match team {
            Some(Team::Red) => self.red_team,
            Some(Team::Blue) => self.blue_team,
            None => self.red_team + self.blue_team,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffTeams {
    #[serde(default)]
    pub red: Vec<String>,
    #[serde(default)]
    pub blue: Vec<String>,
}

impl StaffTeams {
    pub fn team_of(&self, surgeon: &str) -> Option<Team> {
        if self.red.iter().any(|s| s == surgeon) {
            Some(Team::Red)
        } else if self.blue.iter().any(|s| s == surgeon) {
            Some(Team::Blue)
        } else {
            None
        }
    }
}

pub fn load_input_from_file<P: AsRef<Path>>(path: P) -> Result<RosterInput> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading input {}", path.display()))?;
    let input: RosterInput = serde_json::from_slice(&data)
        .with_context(|| format!("parsing input {}", path.display()))?;
    input.validate()?;
    Ok(input)
}

fn default_max_weekend_calls() -> u32 {
    2
}

fn default_recency_window_days() -> u32 {
    3
}
