use crate::model::Activity;

/// Arène personnes × jours ; chaque case est une liste ordonnée d'étiquettes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleGrid {
    people: usize,
    days: usize,
    cells: Vec<Vec<Activity>>,
}

impl ScheduleGrid {
    pub fn new(people: usize, days: usize) -> Self {
        Self {
            people,
            days,
            cells: vec![Vec::new(); people * days],
        }
    }

    pub fn people(&self) -> usize {
        self.people
    }

    pub fn days(&self) -> usize {
        self.days
    }

    fn index(&self, person: usize, day: usize) -> usize {
        debug_assert!(person < self.people && day < self.days);
        person * self.days + day
    }

    pub fn cell(&self, person: usize, day: usize) -> &[Activity] {
        &self.cells[self.index(person, day)]
    }

    pub fn is_open(&self, person: usize, day: usize) -> bool {
        self.cell(person, day).is_empty()
    }

    pub fn contains(&self, person: usize, day: usize, activity: Activity) -> bool {
        self.cell(person, day).contains(&activity)
    }

    /// Étiquettes de la case jointes par `+` (ex. `DayCall+NightCall`).
    pub fn describe(&self, person: usize, day: usize) -> String {
        self.cell(person, day)
            .iter()
            .map(|a| a.label())
            .collect::<Vec<_>>()
            .join("+")
    }

    pub fn push(&mut self, person: usize, day: usize, activity: Activity) {
        let idx = self.index(person, day);
        self.cells[idx].push(activity);
    }

    /// Écrase le contenu de la case.
    pub fn replace(&mut self, person: usize, day: usize, activity: Activity) {
        let idx = self.index(person, day);
        self.cells[idx] = vec![activity];
    }

    pub fn row(&self, person: usize) -> &[Vec<Activity>] {
        let start = person * self.days;
        &self.cells[start..start + self.days]
    }
}
