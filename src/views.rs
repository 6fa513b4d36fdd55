//! View models for the three screens: the weekly grid, the to-do list and the subject configuration
//!
//! Nothing here draws anything. These types only hold the state a screen needs, and compute what it shows.

use chrono::NaiveDate;

use crate::config::FREE_SLOT_LABEL;
use crate::holiday::HolidayIndex;
use crate::schedule::ScheduleGrid;
use crate::subject::Color;
use crate::timeslot::{Hour, Weekday};
use crate::todo::{TodoEdit, TodoItem, TodoKey, TodoStore};
use crate::week::{day_label, WeekKeyResolver};

/// The screen currently shown. Exactly one is active at a time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Week,
    Todos,
    Subjects,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Week
    }
}


/// The column header of a day in the weekly grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayHeader {
    pub day: Weekday,
    pub date: NaiveDate,
    /// e.g. `06.01.`
    pub label: String,
    pub holiday: Option<String>,
    pub is_today: bool,
}

/// Navigation state of the weekly grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WeekView {
    offset: i64,
}

impl WeekView {
    /// How many weeks away from the current one the grid shows
    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn previous(&mut self) {
        self.offset -= 1;
    }

    pub fn next(&mut self) {
        self.offset += 1;
    }

    pub fn back_to_today(&mut self) {
        self.offset = 0;
    }

    /// The week number to-dos of the shown week are stored under
    pub fn week(&self, resolver: &WeekKeyResolver) -> u32 {
        resolver.week(self.offset)
    }

    /// The key of a slot of the shown week
    pub fn todo_key(&self, resolver: &WeekKeyResolver, day: Weekday, hour: Hour) -> TodoKey {
        TodoKey::new(self.week(resolver), day, hour)
    }

    /// The headers of the shown week
    pub fn headers(&self, resolver: &WeekKeyResolver, holidays: &HolidayIndex) -> Vec<DayHeader> {
        Weekday::ALL.iter()
            .map(|&day| {
                let date = resolver.date_for_offset_day(self.offset, day);
                DayHeader {
                    day,
                    date,
                    label: day_label(date),
                    holiday: holidays.is_holiday_date(date).map(str::to_string),
                    is_today: self.offset == 0 && resolver.current_day_index() == day.index(),
                }
            })
            .collect()
    }
}


/// A to-do, as listed in the to-do overview
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoEntry {
    pub key: TodoKey,
    pub item: TodoItem,
    /// The subject taught in this slot, or `Frei`
    pub subject: String,
    pub color: Option<Color>,
}

/// The to-dos of a week, as listed in the to-do overview
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekTodos {
    pub week: u32,
    pub entries: Vec<TodoEntry>,
}

/// State of the to-do list screen
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoListView {
    pub hide_completed: bool,
    editing: Option<TodoEdit>,
}

impl TodoListView {
    /// Weeks that have at least one visible to-do, in increasing order.
    /// Within a week, to-dos are ordered by day, then by hour
    pub fn overview(&self, todos: &TodoStore, grid: &ScheduleGrid) -> Vec<WeekTodos> {
        let mut weeks: Vec<WeekTodos> = Vec::new();
        let visible = todos.iter()
            .filter(|(_, item)| self.hide_completed == false || item.done == false);

        for (key, item) in visible {
            let slot = grid.slot(key.day, key.hour);
            let entry = TodoEntry {
                key: *key,
                item: item.clone(),
                subject: slot.subject.clone().unwrap_or_else(|| FREE_SLOT_LABEL.to_string()),
                color: slot.color,
            };
            match weeks.last_mut() {
                Some(week) if week.week == key.week => week.entries.push(entry),
                _ => weeks.push(WeekTodos { week: key.week, entries: vec![entry] }),
            }
        }
        weeks
    }

    /// The edit session in progress, if any
    pub fn editing(&self) -> Option<&TodoEdit> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut TodoEdit> {
        self.editing.as_mut()
    }

    pub fn is_editing(&self, key: &TodoKey) -> bool {
        self.editing.as_ref().map(|edit| &edit.key() == key).unwrap_or(false)
    }

    /// Start editing. Any edit that was in progress is discarded, there is at most one at a time
    pub fn begin_edit(&mut self, edit: TodoEdit) {
        if let Some(previous) = self.editing.replace(edit) {
            log::debug!("Discarding the unsaved edit of to-do {}", previous.key());
        }
    }

    /// Hand the edit session over, e.g. to [`Planner::save_edit`](crate::Planner::save_edit)
    pub fn take_edit(&mut self) -> Option<TodoEdit> {
        self.editing.take()
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }
}
