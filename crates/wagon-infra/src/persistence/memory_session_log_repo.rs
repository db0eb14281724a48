//! In-memory implementation of SessionLogRepository
//!
//! Lives for one session only and is never written back as state; export is
//! a separate, explicit step.

use std::cell::RefCell;

use wagon_domain::model::SessionEntry;
use wagon_domain::repository::SessionLogRepository;
use wagon_types::Error;

#[derive(Debug, Default)]
pub struct InMemorySessionLogRepository {
    entries: RefCell<Vec<SessionEntry>>,
}

impl InMemorySessionLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionLogRepository for InMemorySessionLogRepository {
    fn append(&self, entry: SessionEntry) -> Result<(), Error> {
        log::debug!("session log: recording {}", entry.id);
        self.entries.borrow_mut().push(entry);
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<SessionEntry>, Error> {
        Ok(self.entries.borrow().clone())
    }

    fn count(&self) -> Result<usize, Error> {
        Ok(self.entries.borrow().len())
    }

    fn clear(&self) -> Result<(), Error> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}
