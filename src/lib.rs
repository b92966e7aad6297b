//! Mentor Match - cohort-based mentor/mentee matching service
//!
//! Participants register in a time-boxed cohort as mentor or mentee with a
//! set of interest tags. Once registration closes every mentor/mentee pair is
//! scored by shared tags, each mentee is shown their three best-scoring
//! mentors and their ranked pick feeds bonuses back into the scores.

pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use auth::{Identity, TokenVerifier};
pub use core::{normalize_tags, plan_selection, score_cohort, top_three};
pub use error::{ConflictKind, MatchError, PolicyViolation};
pub use models::{Cohort, MentorshipScore, Participant, Role, Tag};
pub use services::{MatchStore, MemoryStore, MentorshipService};
