//! The ordered list of subjects, and the occupancy rules that keep their timeslots disjoint
//!
//! Registration order matters: it is the tie-break used by the [`ScheduleGrid`](crate::schedule::ScheduleGrid)
//! in case two subjects claim the same slot (which can only happen for data that has been loaded from a store).

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::subject::{Color, Subject, SubjectId};
use crate::timeslot::TimeslotKey;


#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a subject needs a name")]
    EmptyName,
    #[error("timeslot {key} is already taken by {subject:?}")]
    Conflict { key: TimeslotKey, subject: String },
    #[error("there is no subject at index {0}")]
    UnknownSubject(usize),
    #[error("subject {0} does not exist anymore")]
    RemovedSubject(SubjectId),
}


/// The set of slots claimed by every subject but (optionally) the one that is being edited
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccupancyIndex {
    occupied: HashSet<TimeslotKey>,
}

impl OccupancyIndex {
    /// Build the index from `subjects`, ignoring the subject at index `excluded` (if any)
    pub fn build(subjects: &[Subject], excluded: Option<usize>) -> Self {
        let occupied = subjects.iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != excluded)
            .flat_map(|(_, subject)| subject.claimed_keys().copied())
            .collect();
        Self { occupied }
    }

    pub fn is_occupied(&self, key: &TimeslotKey) -> bool {
        self.occupied.contains(key)
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }
}


/// The content of the subject editor.
///
/// This is either a brand new subject (`editing() == None`), or a modified copy of an existing one.
/// An existing subject is tracked by its identifier, so that the draft stays valid while other subjects come and go.
/// It is passed to [`SubjectRegistry::save`] once the user is done.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubjectDraft {
    pub name: String,
    pub color: Color,
    timeslots: BTreeMap<TimeslotKey, bool>,
    editing: Option<SubjectId>,
}

impl SubjectDraft {
    /// An empty draft for a subject that does not exist yet
    pub fn new() -> Self {
        Self::default()
    }

    /// The subject this draft modifies, or `None` for a new subject
    pub fn editing(&self) -> Option<&SubjectId> {
        self.editing.as_ref()
    }

    pub fn timeslots(&self) -> &BTreeMap<TimeslotKey, bool> {
        &self.timeslots
    }

    pub fn is_selected(&self, key: &TimeslotKey) -> bool {
        self.timeslots.get(key).copied().unwrap_or(false)
    }

    /// Toggle a slot of this draft.
    ///
    /// Selecting a slot that `occupancy` reports as taken is silently refused. Deselecting is always possible.
    /// Returns whether the toggle happened.
    pub fn toggle_timeslot(&mut self, key: TimeslotKey, occupancy: &OccupancyIndex) -> bool {
        let is_selected = self.is_selected(&key);
        if is_selected == false && occupancy.is_occupied(&key) {
            log::debug!("Refusing to select {}, it is already occupied", key);
            return false;
        }
        self.timeslots.insert(key, !is_selected);
        true
    }
}


/// The subjects, in registration order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubjectRegistry {
    subjects: Vec<Subject>,
}

impl SubjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already existing subjects (e.g. loaded from a store), keeping their order.
    ///
    /// No overlap check is performed here.
    pub fn from_subjects(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn get(&self, index: usize) -> Option<&Subject> {
        self.subjects.get(index)
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// The current index of a subject
    pub fn position(&self, id: &SubjectId) -> Option<usize> {
        self.subjects.iter().position(|subject| subject.id() == id)
    }

    /// Slots claimed by every subject except `excluded`
    pub fn occupancy(&self, excluded: Option<usize>) -> OccupancyIndex {
        OccupancyIndex::build(&self.subjects, excluded)
    }

    /// The occupancy that applies while `draft` is being edited
    pub fn occupancy_for(&self, draft: &SubjectDraft) -> OccupancyIndex {
        self.occupancy(draft.editing().and_then(|id| self.position(id)))
    }

    /// Open the editor on an existing subject
    pub fn edit(&self, index: usize) -> Result<SubjectDraft, RegistryError> {
        let subject = self.subjects.get(index).ok_or(RegistryError::UnknownSubject(index))?;
        Ok(SubjectDraft {
            name: subject.name().to_string(),
            color: subject.color(),
            timeslots: subject.timeslots().clone(),
            editing: Some(subject.id().clone()),
        })
    }

    /// Insert or replace a subject from an editor draft.
    ///
    /// The draft is rejected (and the registry left untouched) if its name is blank, or if it claims a slot
    /// that another subject already claims.
    /// An edited subject keeps its identifier and its current position, a new one is appended with a fresh identifier.
    /// Saving a draft whose subject has been removed in the meantime fails with [`RegistryError::RemovedSubject`].
    /// Returns the index of the saved subject.
    pub fn save(&mut self, draft: SubjectDraft) -> Result<usize, RegistryError> {
        if draft.name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        let position = match &draft.editing {
            None => None,
            Some(id) => match self.position(id) {
                Some(index) => Some(index),
                None => return Err(RegistryError::RemovedSubject(id.clone())),
            },
        };
        self.check_conflicts(&draft)?;

        match (position, draft.editing) {
            (Some(index), Some(id)) => {
                self.subjects[index] = Subject::new(id, draft.name, draft.color, draft.timeslots);
                Ok(index)
            },
            _ => {
                self.subjects.push(Subject::new(SubjectId::random(), draft.name, draft.color, draft.timeslots));
                Ok(self.subjects.len() - 1)
            },
        }
    }

    fn check_conflicts(&self, draft: &SubjectDraft) -> Result<(), RegistryError> {
        let claimed = draft.timeslots.iter().filter(|(_, claimed)| **claimed).map(|(key, _)| key);
        for key in claimed {
            let owner = self.subjects.iter()
                .filter(|subject| Some(subject.id()) != draft.editing())
                .find(|subject| subject.claims(key));
            if let Some(subject) = owner {
                return Err(RegistryError::Conflict { key: *key, subject: subject.name().to_string() });
            }
        }
        Ok(())
    }

    /// Remove a subject, returning it
    pub fn remove(&mut self, index: usize) -> Result<Subject, RegistryError> {
        if index >= self.subjects.len() {
            return Err(RegistryError::UnknownSubject(index));
        }
        Ok(self.subjects.remove(index))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeslot::{Hour, Weekday};

    fn key(day: Weekday, hour: u8) -> TimeslotKey {
        TimeslotKey::new(day, Hour::new(hour).unwrap())
    }

    fn draft(name: &str, keys: &[TimeslotKey]) -> SubjectDraft {
        let mut draft = SubjectDraft::new();
        draft.name = name.to_string();
        let none = OccupancyIndex::default();
        for k in keys {
            draft.toggle_timeslot(*k, &none);
        }
        draft
    }

    #[test]
    fn occupancy_excludes_the_edited_subject() {
        let mut registry = SubjectRegistry::new();
        registry.save(draft("Math", &[key(Weekday::Montag, 0)])).unwrap();
        registry.save(draft("Bio", &[key(Weekday::Montag, 1)])).unwrap();

        let all = registry.occupancy(None);
        assert!(all.is_occupied(&key(Weekday::Montag, 0)));
        assert!(all.is_occupied(&key(Weekday::Montag, 1)));

        let without_math = registry.occupancy(Some(0));
        assert!(without_math.is_occupied(&key(Weekday::Montag, 0)) == false);
        assert!(without_math.is_occupied(&key(Weekday::Montag, 1)));
        assert_eq!(without_math.len(), 1);
    }

    #[test]
    fn occupied_slots_can_not_be_selected() {
        let mut registry = SubjectRegistry::new();
        registry.save(draft("Math", &[key(Weekday::Dienstag, 2)])).unwrap();

        let mut new_subject = SubjectDraft::new();
        let occupancy = registry.occupancy_for(&new_subject);
        assert!(new_subject.toggle_timeslot(key(Weekday::Dienstag, 2), &occupancy) == false);
        assert!(new_subject.is_selected(&key(Weekday::Dienstag, 2)) == false);
        assert!(new_subject.toggle_timeslot(key(Weekday::Dienstag, 3), &occupancy));

        // The edited subject may deselect and reselect its own slots
        let mut math = registry.edit(0).unwrap();
        let occupancy = registry.occupancy_for(&math);
        assert!(math.toggle_timeslot(key(Weekday::Dienstag, 2), &occupancy));
        assert!(math.toggle_timeslot(key(Weekday::Dienstag, 2), &occupancy));
        assert!(math.is_selected(&key(Weekday::Dienstag, 2)));
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut registry = SubjectRegistry::new();
        assert_eq!(registry.save(draft("   ", &[])), Err(RegistryError::EmptyName));
        assert!(registry.is_empty());
    }

    #[test]
    fn conflicting_saves_are_rejected() {
        let mut registry = SubjectRegistry::new();
        registry.save(draft("Math", &[key(Weekday::Freitag, 3)])).unwrap();

        let result = registry.save(draft("Art", &[key(Weekday::Freitag, 2), key(Weekday::Freitag, 3)]));
        assert_eq!(result, Err(RegistryError::Conflict { key: key(Weekday::Freitag, 3), subject: "Math".to_string() }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn editing_keeps_identity_and_position() {
        let mut registry = SubjectRegistry::new();
        registry.save(draft("Math", &[key(Weekday::Montag, 0)])).unwrap();
        registry.save(draft("Bio", &[key(Weekday::Montag, 1)])).unwrap();
        let id = registry.get(0).unwrap().id().clone();

        let mut edited = registry.edit(0).unwrap();
        edited.name = "Mathematik".to_string();
        edited.color = Color::Indigo;
        assert_eq!(registry.save(edited), Ok(0));

        let math = registry.get(0).unwrap();
        assert_eq!(math.id(), &id);
        assert_eq!(math.name(), "Mathematik");
        assert_eq!(math.color(), Color::Indigo);
        assert_eq!(registry.get(1).unwrap().name(), "Bio");
    }

    #[test]
    fn remove_unknown_index() {
        let mut registry = SubjectRegistry::new();
        assert_eq!(registry.remove(3), Err(RegistryError::UnknownSubject(3)));
        assert_eq!(registry.edit(0), Err(RegistryError::UnknownSubject(0)));
    }

    #[test]
    fn drafts_follow_their_subject() {
        let mut registry = SubjectRegistry::new();
        registry.save(draft("A", &[key(Weekday::Montag, 0)])).unwrap();
        registry.save(draft("B", &[key(Weekday::Montag, 1)])).unwrap();
        registry.save(draft("C", &[key(Weekday::Montag, 2)])).unwrap();
        let b_id = registry.get(1).unwrap().id().clone();
        let c_id = registry.get(2).unwrap().id().clone();

        let mut b = registry.edit(1).unwrap();
        b.name = "B2".to_string();
        let occupancy = registry.occupancy_for(&b);
        assert!(b.toggle_timeslot(key(Weekday::Montag, 1), &occupancy));
        assert!(b.toggle_timeslot(key(Weekday::Montag, 5), &occupancy));

        registry.remove(0).unwrap();
        // B moved to index 0, the draft still excludes it
        let occupancy = registry.occupancy_for(&b);
        assert!(occupancy.is_occupied(&key(Weekday::Montag, 1)) == false);
        assert!(occupancy.is_occupied(&key(Weekday::Montag, 2)));

        assert_eq!(registry.save(b), Ok(0));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0).unwrap().id(), &b_id);
        assert_eq!(registry.get(0).unwrap().name(), "B2");
        assert!(registry.get(0).unwrap().claims(&key(Weekday::Montag, 5)));
        assert_eq!(registry.get(1).unwrap().id(), &c_id);
        assert_eq!(registry.get(1).unwrap().name(), "C");
    }

    #[test]
    fn drafts_of_removed_subjects_are_rejected() {
        let mut registry = SubjectRegistry::new();
        registry.save(draft("A", &[key(Weekday::Montag, 0)])).unwrap();
        registry.save(draft("B", &[key(Weekday::Montag, 1)])).unwrap();
        let a_id = registry.get(0).unwrap().id().clone();

        let mut a = registry.edit(0).unwrap();
        a.name = "A2".to_string();
        registry.remove(0).unwrap();

        assert_eq!(registry.save(a), Err(RegistryError::RemovedSubject(a_id)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(0).unwrap().name(), "B");
    }
}
