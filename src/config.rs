//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Name of the collection that holds one document per subject.
/// Feel free to override it when initing this library.
pub static SUBJECTS_COLLECTION: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("faecher".to_string())));

/// Name of the collection that holds one document per non-empty to-do.
/// Feel free to override it when initing this library.
pub static TODOS_COLLECTION: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("todos".to_string())));

/// Label shown for a slot that no subject occupies
pub const FREE_SLOT_LABEL: &str = "Frei";

/// Returns the current value of a collection name setting.
///
/// A poisoned lock falls back to `default`.
pub(crate) fn collection_name(setting: &Lazy<Arc<Mutex<String>>>, default: &str) -> String {
    match setting.lock() {
        Ok(name) => name.clone(),
        Err(_) => {
            log::warn!("Collection name setting is poisoned, using {:?}", default);
            default.to_string()
        },
    }
}

pub(crate) fn subjects_collection() -> String {
    collection_name(&SUBJECTS_COLLECTION, "faecher")
}

pub(crate) fn todos_collection() -> String {
    collection_name(&TODOS_COLLECTION, "todos")
}
