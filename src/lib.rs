#![forbid(unsafe_code)]
//! Dutyroster — moteur de planification des gardes de résidents.
//!
//! - Passes successives sur une arène personnes × jours.
//! - Gardes (jour, nuit, week-end, 24 h), post-garde, bloc, clinique.
//! - Déterministe, sans état partagé ; les règles non tenues deviennent
//!   des diagnostics au lieu d'erreurs.

pub mod config;
pub mod engine;
pub mod io;
pub mod model;

pub use config::{
    load_input_from_file, CallKind, CallRule, CallRules, ClinicSlotQuota, OrCase, PredefinedCall,
    RosterInput, StaffTeams, Team,
};
pub use engine::{
    audit, generate_schedule, AssignedPerson, AssignedRoster, Conflict, ConflictKind, InputError,
};
pub use model::{Activity, Learner, Person, PersonId, Resident};
