//! To-dos attached to a (week, day, hour) slot
//!
//! The [`TodoStore`] only holds local state. Every mutation returns a [`TodoMutation`], that tells
//! what has to be written to a [`DocumentStore`](crate::traits::DocumentStore), and how to undo the local change
//! should that write fail. The [`Planner`](crate::Planner) takes care of both.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timeslot::{Hour, TimeslotError, TimeslotKey, Weekday};
use crate::traits::Confirm;

/// The question asked before a to-do is deleted
pub const DELETE_TODO_QUESTION: &str = "Möchten Sie dieses To-Do wirklich löschen?";


#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoKeyError {
    #[error("to-do id {0:?} does not have the form week-day-hour")]
    Malformed(String),
    #[error("invalid week in to-do id {0:?}")]
    InvalidWeek(String),
    #[error(transparent)]
    Timeslot(#[from] TimeslotError),
}

/// The identity of a to-do
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TodoKey {
    pub week: u32,
    pub day: Weekday,
    pub hour: Hour,
}

impl TodoKey {
    pub fn new(week: u32, day: Weekday, hour: Hour) -> Self {
        Self { week, day, hour }
    }

    pub fn timeslot(&self) -> TimeslotKey {
        TimeslotKey::new(self.day, self.hour)
    }
}

/// The document id, e.g. `2-Freitag-3`
impl Display for TodoKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.week, self.day, self.hour)
    }
}

impl FromStr for TodoKey {
    type Err = TodoKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 3 {
            return Err(TodoKeyError::Malformed(s.to_string()));
        }
        let week = parts[0].parse().map_err(|_| TodoKeyError::InvalidWeek(s.to_string()))?;
        Ok(Self {
            week,
            day: parts[1].parse()?,
            hour: parts[2].parse()?,
        })
    }
}


/// The content of a to-do
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub text: String,
    pub done: bool,
}

impl TodoItem {
    /// An item with no text is the same as no item at all
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// A to-do, as it is stored in a document store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub week: u32,
    pub day: Weekday,
    pub hour: Hour,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl TodoRecord {
    pub fn new(key: TodoKey, item: TodoItem) -> Self {
        Self { week: key.week, day: key.day, hour: key.hour, text: item.text, done: item.done }
    }

    pub fn key(&self) -> TodoKey {
        TodoKey::new(self.week, self.day, self.hour)
    }

    pub fn item(&self) -> TodoItem {
        TodoItem { text: self.text.clone(), done: self.done }
    }
}


/// What a local mutation requires from the document store
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoChange {
    /// The whole document must be (over)written
    Written(TodoRecord),
    /// Only the `done` field of the document must be merged
    DoneChanged { key: TodoKey, done: bool },
    /// The document must be deleted
    Removed(TodoKey),
}

/// The local state of a slot before a mutation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoUndo {
    pub key: TodoKey,
    pub previous: Option<TodoItem>,
}

/// A local mutation that has been applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoMutation {
    pub change: TodoChange,
    pub undo: TodoUndo,
}


/// An interactive edit of a to-do text.
///
/// The session is a plain value: whoever opened it owns it, and hands it back to
/// [`TodoStore::save_edit`] (or simply drops it to cancel).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoEdit {
    key: TodoKey,
    text: String,
}

impl TodoEdit {
    pub fn key(&self) -> TodoKey { self.key }
    pub fn text(&self) -> &str   { &self.text }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }
}


/// The local to-dos, ordered by week, day and hour
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoStore {
    items: BTreeMap<TodoKey, TodoItem>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the local state from stored records. Records with an empty text are ignored.
    pub fn from_records<I: IntoIterator<Item = TodoRecord>>(records: I) -> Self {
        let items = records.into_iter()
            .filter(|record| record.text.is_empty() == false)
            .map(|record| (record.key(), record.item()))
            .collect();
        Self { items }
    }

    /// The local state of a slot (which may have an empty text)
    pub fn get(&self, key: &TodoKey) -> Option<&TodoItem> {
        self.items.get(key)
    }

    /// The item of a slot, or an empty one
    pub fn item(&self, key: &TodoKey) -> TodoItem {
        self.items.get(key).cloned().unwrap_or_default()
    }

    /// Every non-blank to-do, ordered by week, day and hour
    pub fn iter(&self) -> impl Iterator<Item = (&TodoKey, &TodoItem)> {
        self.items.iter().filter(|(_, item)| item.is_blank() == false)
    }

    /// Every week that has local state
    pub fn weeks(&self) -> BTreeSet<u32> {
        self.items.keys().map(|key| key.week).collect()
    }

    fn replace(&mut self, key: TodoKey, item: Option<TodoItem>) -> TodoUndo {
        let previous = match item {
            Some(item) => self.items.insert(key, item),
            None => self.items.remove(&key),
        };
        TodoUndo { key, previous }
    }

    /// Set the text of a slot.
    ///
    /// A text that is blank once trimmed removes the to-do. Otherwise the `done` flag of an existing to-do is kept.
    pub fn upsert(&mut self, key: TodoKey, text: &str) -> TodoMutation {
        if text.trim().is_empty() {
            let undo = self.replace(key, None);
            return TodoMutation { change: TodoChange::Removed(key), undo };
        }

        let done = self.items.get(&key).map(|item| item.done).unwrap_or(false);
        let item = TodoItem { text: text.to_string(), done };
        let record = TodoRecord::new(key, item.clone());
        let undo = self.replace(key, Some(item));
        TodoMutation { change: TodoChange::Written(record), undo }
    }

    /// Flip the `done` flag of a slot (of an empty to-do if there is none)
    pub fn toggle_done(&mut self, key: TodoKey) -> TodoMutation {
        let mut item = self.item(&key);
        item.done = !item.done;
        let done = item.done;
        let undo = self.replace(key, Some(item));
        TodoMutation { change: TodoChange::DoneChanged { key, done }, undo }
    }

    /// Remove a to-do without asking
    pub fn clear(&mut self, key: TodoKey) -> TodoMutation {
        let undo = self.replace(key, None);
        TodoMutation { change: TodoChange::Removed(key), undo }
    }

    /// Remove a to-do, provided the user confirms it.
    ///
    /// Returns `None` (and changes nothing) if the user declines
    pub fn delete<C: Confirm + ?Sized>(&mut self, key: TodoKey, confirm: &mut C) -> Option<TodoMutation> {
        if confirm.confirm(DELETE_TODO_QUESTION) == false {
            log::debug!("Deletion of to-do {} declined", key);
            return None;
        }
        Some(self.clear(key))
    }

    /// Put back the local state recorded in `undo`
    pub fn restore(&mut self, undo: TodoUndo) {
        log::debug!("Restoring the local state of to-do {}", undo.key);
        self.replace(undo.key, undo.previous);
    }

    /// Open an edit session on a slot, starting from `text`
    pub fn start_edit(&self, key: TodoKey, text: String) -> TodoEdit {
        TodoEdit { key, text }
    }

    /// Commit an edit session. This behaves exactly like [`Self::upsert`] on the session's slot
    pub fn save_edit(&mut self, edit: TodoEdit) -> TodoMutation {
        self.upsert(edit.key, &edit.text)
    }
}
