use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Identifiant fort pour Person
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Étiquette d'activité posée dans une case (personne × jour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    DayCall,
    NightCall,
    WeekendCall,
    PostCall,
    Vacation,
    #[serde(rename = "OR")]
    Or,
    Clinic,
    Backup,
    Float,
}

impl Activity {
    pub fn label(self) -> &'static str {
        match self {
            Activity::DayCall => "DayCall",
            Activity::NightCall => "NightCall",
            Activity::WeekendCall => "WeekendCall",
            Activity::PostCall => "PostCall",
            Activity::Vacation => "Vacation",
            Activity::Or => "OR",
            Activity::Clinic => "Clinic",
            Activity::Backup => "Backup",
            Activity::Float => "Float",
        }
    }

    /// Garde de nuit ou de week-end : impose un repos le lendemain.
    pub fn requires_rest(self) -> bool {
        matches!(self, Activity::NightCall | Activity::WeekendCall)
    }

    /// Étiquettes qui ne peuvent pas cohabiter dans une même case.
    pub fn is_exclusive(self) -> bool {
        !matches!(self, Activity::PostCall | Activity::Backup)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Champs propres aux résidents (neurochirurgie ou non).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
    pub id: PersonId,
    pub name: String,
    /// Année de résidence (PGY), 1 à 6.
    pub level: u8,
    #[serde(default = "default_true")]
    pub on_service: bool,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub vacation_days: BTreeSet<u32>,
    #[serde(default)]
    pub is_chief: bool,
    #[serde(default)]
    pub allow_solo_pgy1_call: bool,
    #[serde(default = "default_true")]
    pub can_act_as_backup: bool,
    #[serde(default)]
    pub exempt_from_call: bool,
    /// Jours de bloc garantis au chef (numéros de jour, base 1).
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub chief_or_days: BTreeSet<u32>,
}

impl Resident {
    pub fn new<N: Into<String>>(name: N, level: u8) -> Self {
        Self {
            id: PersonId::random(),
            name: name.into(),
            level,
            on_service: true,
            vacation_days: BTreeSet::new(),
            is_chief: false,
            allow_solo_pgy1_call: false,
            can_act_as_backup: true,
            exempt_from_call: false,
            chief_or_days: BTreeSet::new(),
        }
    }

    pub fn with_id<S: AsRef<str>>(mut self, id: S) -> Self {
        self.id = PersonId::new(id);
        self
    }

    pub fn off_service(mut self) -> Self {
        self.on_service = false;
        self
    }

    pub fn exempt(mut self) -> Self {
        self.exempt_from_call = true;
        self
    }

    pub fn with_vacation<I: IntoIterator<Item = u32>>(mut self, days: I) -> Self {
        self.vacation_days.extend(days);
        self
    }

    pub fn chief<I: IntoIterator<Item = u32>>(mut self, or_days: I) -> Self {
        self.is_chief = true;
        self.chief_or_days.extend(or_days);
        self
    }
}

/// Étudiant ou autre apprenant : pas de niveau, jamais de garde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Learner {
    pub id: PersonId,
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub vacation_days: BTreeSet<u32>,
}

impl Learner {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            id: PersonId::random(),
            name: name.into(),
            vacation_days: BTreeSet::new(),
        }
    }
}

/// Membre du roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Person {
    NeuroResident(Resident),
    NonNeuroResident(Resident),
    Student(Learner),
    OtherLearner(Learner),
}

impl Person {
    pub fn id(&self) -> &PersonId {
        match self {
            Person::NeuroResident(r) | Person::NonNeuroResident(r) => &r.id,
            Person::Student(l) | Person::OtherLearner(l) => &l.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Person::NeuroResident(r) | Person::NonNeuroResident(r) => &r.name,
            Person::Student(l) | Person::OtherLearner(l) => &l.name,
        }
    }

    pub fn vacation_days(&self) -> &BTreeSet<u32> {
        match self {
            Person::NeuroResident(r) | Person::NonNeuroResident(r) => &r.vacation_days,
            Person::Student(l) | Person::OtherLearner(l) => &l.vacation_days,
        }
    }

    pub fn resident(&self) -> Option<&Resident> {
        match self {
            Person::NeuroResident(r) | Person::NonNeuroResident(r) => Some(r),
            Person::Student(_) | Person::OtherLearner(_) => None,
        }
    }

    pub fn level(&self) -> Option<u8> {
        self.resident().map(|r| r.level)
    }

    /// Résident de neurochirurgie actuellement sur le service.
    pub fn is_on_service_neuro(&self) -> bool {
        matches!(self, Person::NeuroResident(r) if r.on_service)
    }

    /// PGY-1 sans autorisation de garde solo.
    pub fn needs_call_backup(&self) -> bool {
        self.resident()
            .is_some_and(|r| r.level == 1 && !r.allow_solo_pgy1_call)
    }

    pub fn can_back_up(&self) -> bool {
        self.resident()
            .is_some_and(|r| r.level >= 3 && r.can_act_as_backup)
    }
}

fn default_true() -> bool {
    true
}
