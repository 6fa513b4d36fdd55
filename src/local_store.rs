//! This module provides a document store that keeps its collections in local JSON files

use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::mock_behaviour::MockBehaviour;
use crate::subject::{SubjectId, SubjectRecord};
use crate::todo::{TodoKey, TodoRecord};
use crate::traits::DocumentStore;

/// A [`DocumentStore`] that stores its collections in a local folder, one JSON file per collection.
///
/// It can also live in memory only, which is useful to mock a remote store in tests.
#[derive(Debug)]
pub struct LocalStore {
    backing_folder: Option<PathBuf>,
    data: StoredData,

    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

#[derive(Default, Debug, Clone, PartialEq)]
struct StoredData {
    subjects: Vec<SubjectDocument>,
    /// Keyed by document id
    todos: BTreeMap<String, TodoRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SubjectDocument {
    id: SubjectId,
    #[serde(flatten)]
    record: SubjectRecord,
}

impl LocalStore {
    /// Initialize a store from the content of a valid backing folder if it exists.
    /// Returns an error otherwise
    pub fn from_folder(folder: &Path) -> Result<Self, Box<dyn Error>> {
        let subjects_path = subjects_file(folder);
        let subjects = match std::fs::File::open(&subjects_path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", subjects_path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        let todos_path = todos_file(folder);
        let todos = match std::fs::File::open(&todos_path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", todos_path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self{
            backing_folder: Some(PathBuf::from(folder)),
            data: StoredData { subjects, todos },
            mock_behaviour: None,
        })
    }

    /// Initialize an empty store, that will be saved into `folder`
    pub fn new(folder: &Path) -> Self {
        Self{
            backing_folder: Some(PathBuf::from(folder)),
            data: StoredData::default(),
            mock_behaviour: None,
        }
    }

    /// Initialize an empty store, that is never written to disk
    pub fn in_memory() -> Self {
        Self{
            backing_folder: None,
            data: StoredData::default(),
            mock_behaviour: None,
        }
    }

    /// Make this store fail on some operations, as described by `mock_behaviour`
    pub fn set_mock_behaviour(&mut self, mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = mock_behaviour;
    }

    /// Store the current content to the backing folder (if any)
    pub fn save_to_folder(&self) -> Result<(), Box<dyn Error>> {
        let folder = match &self.backing_folder {
            None => return Ok(()),
            Some(folder) => folder,
        };
        std::fs::create_dir_all(folder)?;

        let file = std::fs::File::create(subjects_file(folder))?;
        serde_json::to_writer(file, &self.data.subjects)?;

        let file = std::fs::File::create(todos_file(folder))?;
        serde_json::to_writer(file, &self.data.todos)?;

        log::debug!("Saved {} subjects and {} to-dos to {:?}", self.data.subjects.len(), self.data.todos.len(), folder);
        Ok(())
    }

    fn check_mock<F>(&self, operation: F) -> Result<(), Box<dyn Error>>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), Box<dyn Error>>,
    {
        if let Some(mock) = &self.mock_behaviour {
            let mut mock = mock.lock().map_err(|_| "Mock behaviour lock is poisoned")?;
            operation(&mut mock)?;
        }
        Ok(())
    }

    /// Compares two stores to check they have the same current content
    pub fn has_same_contents_than(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

fn subjects_file(folder: &Path) -> PathBuf {
    let name = sanitize_filename::sanitize(config::subjects_collection() + ".json");
    folder.join(name)
}

fn todos_file(folder: &Path) -> PathBuf {
    let name = sanitize_filename::sanitize(config::todos_collection() + ".json");
    folder.join(name)
}


#[async_trait]
impl DocumentStore for LocalStore {
    async fn get_subjects(&self) -> Result<Vec<(SubjectId, SubjectRecord)>, Box<dyn Error>> {
        self.check_mock(|mock| mock.can_get_subjects())?;
        Ok(self.data.subjects.iter()
            .map(|doc| (doc.id.clone(), doc.record.clone()))
            .collect())
    }

    async fn replace_subjects(&mut self, subjects: Vec<(SubjectId, SubjectRecord)>) -> Result<(), Box<dyn Error>> {
        self.check_mock(|mock| mock.can_replace_subjects())?;
        self.data.subjects.clear();
        for (id, record) in subjects {
            // a later duplicate id overwrites the earlier document, as a batch write would
            match self.data.subjects.iter_mut().find(|doc| doc.id == id) {
                Some(doc) => doc.record = record,
                None => self.data.subjects.push(SubjectDocument { id, record }),
            }
        }
        self.save_to_folder()
    }

    async fn put_subject(&mut self, id: &SubjectId, subject: SubjectRecord) -> Result<(), Box<dyn Error>> {
        self.check_mock(|mock| mock.can_put_subject())?;
        match self.data.subjects.iter_mut().find(|doc| &doc.id == id) {
            Some(doc) => doc.record = subject,
            None => self.data.subjects.push(SubjectDocument { id: id.clone(), record: subject }),
        }
        self.save_to_folder()
    }

    async fn delete_subject(&mut self, id: &SubjectId) -> Result<(), Box<dyn Error>> {
        self.check_mock(|mock| mock.can_delete_subject())?;
        self.data.subjects.retain(|doc| &doc.id != id);
        self.save_to_folder()
    }

    async fn get_todos(&self) -> Result<Vec<TodoRecord>, Box<dyn Error>> {
        self.check_mock(|mock| mock.can_get_todos())?;
        Ok(self.data.todos.values().cloned().collect())
    }

    async fn set_todo(&mut self, todo: TodoRecord) -> Result<(), Box<dyn Error>> {
        self.check_mock(|mock| mock.can_set_todo())?;
        self.data.todos.insert(todo.key().to_string(), todo);
        self.save_to_folder()
    }

    async fn merge_todo_done(&mut self, key: &TodoKey, done: bool) -> Result<(), Box<dyn Error>> {
        self.check_mock(|mock| mock.can_merge_todo())?;
        match self.data.todos.get_mut(&key.to_string()) {
            Some(todo) => todo.done = done,
            None => {
                log::debug!("No to-do document {} to merge into, ignoring", key);
                return Ok(());
            },
        }
        self.save_to_folder()
    }

    async fn delete_todo(&mut self, key: &TodoKey) -> Result<(), Box<dyn Error>> {
        self.check_mock(|mock| mock.can_delete_todo())?;
        self.data.todos.remove(&key.to_string());
        self.save_to_folder()
    }
}
