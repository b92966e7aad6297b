use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::MatchError;
use crate::models::{
    Cohort, CohortSummary, MenteeScore, MentorshipScore, Participant, Registration, ScoreBonus, Tag,
    User,
};

/// Persistence seam for cohorts, participants and scores.
///
/// Every method is one unit of work: implementations run the checks and the
/// writes of a call atomically, so a rejected call leaves no trace.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Insert a user together with its profile
    async fn create_user(&self, user: &User) -> Result<(), MatchError>;

    async fn create_cohort(&self, cohort: &Cohort) -> Result<(), MatchError>;

    async fn get_cohort(&self, cohort_id: Uuid) -> Result<Option<CohortSummary>, MatchError>;

    /// All cohorts of a programme, earliest opening first
    async fn programme_cohorts(&self, programme_id: Uuid) -> Result<Vec<CohortSummary>, MatchError>;

    /// Enforce the registration window, uniqueness and capacity, then insert
    /// the participant with its tags resolved through get-or-create.
    async fn register(
        &self,
        registration: Registration,
        now: DateTime<Utc>,
    ) -> Result<Participant, MatchError>;

    async fn get_participant(
        &self,
        participant_id: Uuid,
    ) -> Result<Option<(Participant, Cohort)>, MatchError>;

    async fn user_participants(&self, user_id: Uuid) -> Result<Vec<Participant>, MatchError>;

    /// Score rows where the participant is the mentee, joined with their mentor
    async fn mentee_scores(&self, mentee_id: Uuid) -> Result<Vec<MenteeScore>, MatchError>;

    /// All score rows of a cohort
    async fn cohort_scores(&self, cohort_id: Uuid) -> Result<Vec<MentorshipScore>, MatchError>;

    /// Score every mentor/mentee pair of a cohort and mark it matched.
    /// A cohort can only be matched once.
    async fn match_cohort(
        &self,
        cohort_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<MentorshipScore>, MatchError>;

    /// Apply a mentee's ranked top-three choice, at most once per mentee
    async fn submit_top_three(
        &self,
        participant_id: Uuid,
        requester: Uuid,
        choices: &[Uuid],
        now: DateTime<Utc>,
    ) -> Result<Vec<ScoreBonus>, MatchError>;

    async fn list_tags(&self) -> Result<Vec<Tag>, MatchError>;

    async fn health_check(&self) -> Result<bool, MatchError>;
}
