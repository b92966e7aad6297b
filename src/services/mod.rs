// Service exports
pub mod cache;
pub mod memory;
pub mod mentorship;
pub mod postgres;
pub mod store;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use memory::MemoryStore;
pub use mentorship::MentorshipService;
pub use postgres::{PostgresClient, PostgresError};
pub use store::MatchStore;
