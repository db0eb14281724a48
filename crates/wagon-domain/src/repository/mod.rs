//! Repository trait definitions

use crate::model::SessionEntry;
use wagon_types::Error;

/// Append-only log of calculations made in one session
pub trait SessionLogRepository {
    /// Record a calculation
    fn append(&self, entry: SessionEntry) -> Result<(), Error>;

    /// All entries, oldest first
    fn find_all(&self) -> Result<Vec<SessionEntry>, Error>;

    /// Number of entries recorded
    fn count(&self) -> Result<usize, Error> {
        Ok(self.find_all()?.len())
    }

    /// Drop every entry and start the session over
    fn clear(&self) -> Result<(), Error>;
}
