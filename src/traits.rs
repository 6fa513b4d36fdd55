use std::error::Error;

use async_trait::async_trait;

use crate::subject::{SubjectId, SubjectRecord};
use crate::todo::{TodoKey, TodoRecord};

/// A (usually remote) document store that persists subjects and to-dos
#[async_trait]
pub trait DocumentStore {
    /// Returns every subject document, in storage order
    async fn get_subjects(&self) -> Result<Vec<(SubjectId, SubjectRecord)>, Box<dyn Error>>;
    /// Deletes every subject document, then inserts the given ones.
    /// This is not transactional: a reader may see an empty collection in between
    async fn replace_subjects(&mut self, subjects: Vec<(SubjectId, SubjectRecord)>) -> Result<(), Box<dyn Error>>;
    /// Creates or overwrites a single subject document
    async fn put_subject(&mut self, id: &SubjectId, subject: SubjectRecord) -> Result<(), Box<dyn Error>>;
    /// Deletes a subject document. Deleting a missing document is not an error
    async fn delete_subject(&mut self, id: &SubjectId) -> Result<(), Box<dyn Error>>;

    /// Returns every to-do document
    async fn get_todos(&self) -> Result<Vec<TodoRecord>, Box<dyn Error>>;
    /// Creates or overwrites the to-do document `{week}-{day}-{hour}`
    async fn set_todo(&mut self, todo: TodoRecord) -> Result<(), Box<dyn Error>>;
    /// Only updates the `done` field of a to-do document
    async fn merge_todo_done(&mut self, key: &TodoKey, done: bool) -> Result<(), Box<dyn Error>>;
    /// Deletes a to-do document. Deleting a missing document is not an error
    async fn delete_todo(&mut self, key: &TodoKey) -> Result<(), Box<dyn Error>>;
}

/// Something that can ask the user to confirm a destructive action
pub trait Confirm {
    /// Returns whether the user agreed
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}
