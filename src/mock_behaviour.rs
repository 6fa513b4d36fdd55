//! This module provides ways to make a [`LocalStore`](crate::local_store::LocalStore) return errors on some tests,
//! just like a remote document store that is unreachable would

use std::error::Error;

/// This stores some behaviour tweaks, that describe how a mocked store will behave during a given test
///
/// So that a functions fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    // Subject collection
    pub get_subjects_behaviour: (u32, u32),
    pub replace_subjects_behaviour: (u32, u32),
    pub put_subject_behaviour: (u32, u32),
    pub delete_subject_behaviour: (u32, u32),

    // To-do collection
    pub get_todos_behaviour: (u32, u32),
    pub set_todo_behaviour: (u32, u32),
    pub merge_todo_behaviour: (u32, u32),
    pub delete_todo_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            get_subjects_behaviour: (0, n_fails),
            replace_subjects_behaviour: (0, n_fails),
            put_subject_behaviour: (0, n_fails),
            delete_subject_behaviour: (0, n_fails),
            get_todos_behaviour: (0, n_fails),
            set_todo_behaviour: (0, n_fails),
            merge_todo_behaviour: (0, n_fails),
            delete_todo_behaviour: (0, n_fails),
        }
    }

    /// Every write to the to-do collection fails, for `n_fails` times
    pub fn fail_todo_writes(n_fails: u32) -> Self {
        Self {
            set_todo_behaviour: (0, n_fails),
            merge_todo_behaviour: (0, n_fails),
            delete_todo_behaviour: (0, n_fails),
            ..Self::default()
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_get_subjects(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.get_subjects_behaviour, "get_subjects")
    }
    pub fn can_replace_subjects(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.replace_subjects_behaviour, "replace_subjects")
    }
    pub fn can_put_subject(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.put_subject_behaviour, "put_subject")
    }
    pub fn can_delete_subject(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.delete_subject_behaviour, "delete_subject")
    }
    pub fn can_get_todos(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.get_todos_behaviour, "get_todos")
    }
    pub fn can_set_todo(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.set_todo_behaviour, "set_todo")
    }
    pub fn can_merge_todo(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.merge_todo_behaviour, "merge_todo_done")
    }
    pub fn can_delete_todo(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.delete_todo_behaviour, "delete_todo")
    }
}


/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), Box<dyn Error>> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else {
        if remaining_failures > 0 {
            value.1 = value.1 - 1;
            log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
            Err(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value).into())
        } else {
            log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        for _ in 0..5 {
            assert!(ok.can_get_subjects().is_ok());
            assert!(ok.can_set_todo().is_ok());
        }

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_get_subjects().is_err());
        assert!(now.can_delete_todo().is_err());
        assert!(now.can_delete_todo().is_err());
        assert!(now.can_get_subjects().is_err());
        assert!(now.can_get_subjects().is_ok());
        assert!(now.can_get_subjects().is_ok());
        assert!(now.can_delete_todo().is_ok());

        let mut custom = MockBehaviour{
            set_todo_behaviour: (0,1),
            replace_subjects_behaviour: (1,3),
            ..MockBehaviour::default()
        };
        assert!(custom.can_set_todo().is_err());
        assert!(custom.can_set_todo().is_ok());
        assert!(custom.can_set_todo().is_ok());
        assert!(custom.can_replace_subjects().is_ok());
        assert!(custom.can_replace_subjects().is_err());
        assert!(custom.can_replace_subjects().is_err());
        assert!(custom.can_replace_subjects().is_err());
        assert!(custom.can_replace_subjects().is_ok());

        let mut suspended = MockBehaviour::fail_todo_writes(1);
        suspended.suspend();
        assert!(suspended.can_merge_todo().is_ok());
        suspended.resume();
        assert!(suspended.can_merge_todo().is_err());
        assert!(suspended.can_merge_todo().is_ok());
        assert!(suspended.can_get_todos().is_ok());
    }
}
