//! This module ties the subjects, the to-dos and a document store together
//!
//! Every mutation is first applied to the local state, then written to the store.
//! A failed write is logged and reported to the caller, but the local state is **not** rolled back:
//! the caller decides whether to [`revert`](Planner::revert) it, retry, or simply carry on.

use std::error::Error;

use thiserror::Error;

use crate::registry::{RegistryError, SubjectDraft, SubjectRegistry};
use crate::schedule::{BlockAggregator, ScheduleGrid, WeekBlocks};
use crate::subject::Subject;
use crate::todo::{TodoChange, TodoEdit, TodoKey, TodoMutation, TodoStore, TodoUndo};
use crate::traits::{Confirm, DocumentStore};


#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The local state has been changed, but the store could not be updated accordingly.
    /// `undo` tells how to put back the to-dos that have been changed locally.
    #[error("unable to {operation}: {message}")]
    Store {
        operation: String,
        message: String,
        undo: Vec<TodoUndo>,
    },
}

impl PlannerError {
    fn store(operation: String, err: Box<dyn Error>, undo: Vec<TodoUndo>) -> Self {
        log::error!("Unable to {}: {}", operation, err);
        Self::Store { operation, message: err.to_string(), undo }
    }
}


/// The subjects and to-dos of a user, kept in sync with a [`DocumentStore`]
#[derive(Debug)]
pub struct Planner<S>
where
    S: DocumentStore,
{
    store: S,
    registry: SubjectRegistry,
    todos: TodoStore,
}

impl<S> Planner<S>
where
    S: DocumentStore,
{
    /// Create an empty planner. Call [`Self::load`] to fetch the stored data.
    pub fn new(store: S) -> Self {
        Self {
            store,
            registry: SubjectRegistry::new(),
            todos: TodoStore::new(),
        }
    }

    pub fn store(&self) -> &S { &self.store }
    pub fn registry(&self) -> &SubjectRegistry { &self.registry }
    pub fn todos(&self) -> &TodoStore { &self.todos }

    /// Replace the local state with the content of the store.
    ///
    /// In case the store can not be read, the local state is left untouched.
    pub async fn load(&mut self) -> Result<(), PlannerError> {
        let subjects = match self.store.get_subjects().await {
            Ok(subjects) => subjects,
            Err(err) => return Err(PlannerError::store("load subjects".to_string(), err, Vec::new())),
        };
        let todos = match self.store.get_todos().await {
            Ok(todos) => todos,
            Err(err) => return Err(PlannerError::store("load to-dos".to_string(), err, Vec::new())),
        };

        self.registry = SubjectRegistry::from_subjects(
            subjects.into_iter()
                .map(|(id, record)| Subject::from_record(id, record))
                .collect()
        );
        self.todos = TodoStore::from_records(todos);
        log::info!("Loaded {} subjects and {} to-dos", self.registry.len(), self.todos.iter().count());
        Ok(())
    }

    /// The subject of every slot of the week
    pub fn grid(&self) -> ScheduleGrid {
        ScheduleGrid::build(self.registry.subjects())
    }

    /// The display blocks of every day of the week
    pub fn blocks(&self) -> WeekBlocks {
        BlockAggregator::build(&self.grid())
    }


    /// Insert or update a subject from an editor draft, then rewrite the whole subject collection.
    ///
    /// Invalid drafts are rejected before anything changes. Returns the index of the saved subject.
    pub async fn save_subject(&mut self, draft: SubjectDraft) -> Result<usize, PlannerError> {
        let index = self.registry.save(draft)?;

        if let Some(subject) = self.registry.get(index) {
            let (id, record) = (subject.id().clone(), subject.to_record());
            if let Err(err) = self.store.put_subject(&id, record).await {
                return Err(PlannerError::store(format!("save subject {}", id), err, Vec::new()));
            }
            log::info!("Subject {} saved", id);
        }

        self.rewrite_subjects().await?;
        Ok(index)
    }

    /// Delete a subject, and every to-do (of any week) in a slot it claims, provided the user confirms.
    ///
    /// Returns `Ok(false)` if the user declined.
    pub async fn delete_subject<C: Confirm + ?Sized>(&mut self, index: usize, confirm: &mut C) -> Result<bool, PlannerError> {
        let question = match self.registry.get(index) {
            None => return Err(RegistryError::UnknownSubject(index).into()),
            Some(subject) => format!("Möchten Sie das Fach \"{}\" wirklich löschen?", subject.name()),
        };
        if confirm.confirm(&question) == false {
            log::debug!("Deletion of subject {} declined", index);
            return Ok(false);
        }

        let subject = self.registry.remove(index)?;
        let mut mutations = Vec::new();
        for week in self.todos.weeks() {
            for key in subject.claimed_keys() {
                let todo_key = TodoKey::new(week, key.day(), key.hour());
                if self.todos.get(&todo_key).is_some() {
                    mutations.push(self.todos.clear(todo_key));
                }
            }
        }
        log::debug!("Deleting subject {} clears {} to-dos", subject.id(), mutations.len());

        let mut failures = Vec::new();
        if let Err(err) = self.store.delete_subject(subject.id()).await {
            log::error!("Unable to delete subject {}: {}", subject.id(), err);
            failures.push(err.to_string());
        }
        let mut undo = Vec::new();
        for mutation in mutations {
            if let Err(err) = self.push_change(&mutation.change).await {
                log::error!("Unable to delete to-do {}: {}", mutation.undo.key, err);
                failures.push(err.to_string());
                undo.push(mutation.undo);
            }
        }
        if self.registry.is_empty() == false {
            if let Err(err) = self.rewrite_subjects().await {
                failures.push(err.to_string());
            }
        }

        if failures.is_empty() {
            log::info!("Subject {} deleted", subject.id());
            Ok(true)
        } else {
            Err(PlannerError::Store {
                operation: format!("delete subject {}", subject.id()),
                message: failures.join("; "),
                undo,
            })
        }
    }

    /// Delete every stored subject, then insert the current ones
    async fn rewrite_subjects(&mut self) -> Result<(), PlannerError> {
        let documents = self.registry.subjects().iter()
            .map(|subject| (subject.id().clone(), subject.to_record()))
            .collect();
        match self.store.replace_subjects(documents).await {
            Ok(()) => {
                log::debug!("Subject collection rewritten ({} subjects)", self.registry.len());
                Ok(())
            },
            Err(err) => Err(PlannerError::store("rewrite the subject collection".to_string(), err, Vec::new())),
        }
    }


    /// Set the text of a to-do. A blank text deletes it.
    pub async fn upsert_todo(&mut self, key: TodoKey, text: &str) -> Result<(), PlannerError> {
        let mutation = self.todos.upsert(key, text);
        self.commit("save to-do", mutation).await
    }

    /// Flip the `done` flag of a to-do
    pub async fn toggle_todo_done(&mut self, key: TodoKey) -> Result<(), PlannerError> {
        let mutation = self.todos.toggle_done(key);
        self.commit("update the done status of to-do", mutation).await
    }

    /// Delete a to-do, provided the user confirms. Returns `Ok(false)` if the user declined.
    pub async fn delete_todo<C: Confirm + ?Sized>(&mut self, key: TodoKey, confirm: &mut C) -> Result<bool, PlannerError> {
        match self.todos.delete(key, confirm) {
            None => Ok(false),
            Some(mutation) => self.commit("delete to-do", mutation).await.map(|_| true),
        }
    }

    /// Open an edit session on a to-do, starting from its current text
    pub fn start_edit(&self, key: TodoKey) -> TodoEdit {
        self.todos.start_edit(key, self.todos.item(&key).text)
    }

    /// Commit an edit session
    pub async fn save_edit(&mut self, edit: TodoEdit) -> Result<(), PlannerError> {
        let mutation = self.todos.save_edit(edit);
        self.commit("save edited to-do", mutation).await
    }

    /// Put back the local state of to-dos whose store write failed
    pub fn revert(&mut self, undo: Vec<TodoUndo>) {
        for u in undo.into_iter().rev() {
            self.todos.restore(u);
        }
    }

    async fn push_change(&mut self, change: &TodoChange) -> Result<(), Box<dyn Error>> {
        match change {
            TodoChange::Written(record) => self.store.set_todo(record.clone()).await,
            TodoChange::DoneChanged { key, done } => self.store.merge_todo_done(key, *done).await,
            TodoChange::Removed(key) => self.store.delete_todo(key).await,
        }
    }

    async fn commit(&mut self, operation: &str, mutation: TodoMutation) -> Result<(), PlannerError> {
        match self.push_change(&mutation.change).await {
            Ok(()) => {
                log::debug!("Done: {} {}", operation, mutation.undo.key);
                Ok(())
            },
            Err(err) => {
                let operation = format!("{} {}", operation, mutation.undo.key);
                Err(PlannerError::store(operation, err, vec![mutation.undo]))
            },
        }
    }
}
