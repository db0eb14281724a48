//! Repository implementations

mod memory_session_log_repo;

pub use memory_session_log_repo::InMemorySessionLogRepository;
