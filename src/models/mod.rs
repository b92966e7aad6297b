// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Cohort, CohortDefaults, CohortDraft, CohortSummary, MenteeScore, MentorshipScore, Participant,
    Registration, Role, ScoreBonus, Tag, User, UserProfile,
};
pub use requests::{CreateCohortRequest, CreateUserRequest, RegisterRequest, TopThreeChoicesRequest};
pub use responses::{
    CohortResponse, DetailResponse, ErrorResponse, HealthResponse, MatchResponse, ParticipantResponse,
};
