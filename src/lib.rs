//! This crate manages a weekly class schedule, and to-dos attached to its slots.
//!
//! Subjects own timeslots (a weekday and a school hour). From them, the [`schedule`] module derives the
//! [`ScheduleGrid`](schedule::ScheduleGrid) of the week, and aggregates it into display blocks.
//! The [`registry`] module keeps the subjects and makes sure two subjects never claim the same slot.
//!
//! To-dos are addressed by a week number (see the [`week`] module), a day and an hour, and live in a [`TodoStore`](todo::TodoStore).
//!
//! Both are persisted into a [`DocumentStore`](traits::DocumentStore), usually a remote one. A [`Planner`] ties
//! everything together: it applies changes locally first, then writes them to the store.
//! This crate ships a [`LocalStore`](local_store::LocalStore), that keeps its documents in local JSON files.

pub mod traits;

pub mod timeslot;
pub mod subject;
pub mod registry;
pub mod schedule;
pub mod week;
pub mod holiday;
pub mod todo;

pub mod planner;
pub use planner::{Planner, PlannerError};
pub mod local_store;
pub mod mock_behaviour;
pub mod views;

pub mod config;
pub mod utils;
