use super::types::Violation;
use tracing::warn;

/// Liste ordonnée, en ajout seul, des règles non satisfaites.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    lines: Vec<String>,
}

impl Diagnostics {
    pub fn push(&mut self, violation: Violation) {
        let line = violation.to_string();
        warn!(diagnostic = %line);
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
