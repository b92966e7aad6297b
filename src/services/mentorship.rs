use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::Identity;
use crate::core::{active_cohort, check_top_three_access, normalize_tags, top_three};
use crate::error::{MatchError, PolicyViolation};
use crate::models::{
    CohortDefaults, CohortDraft, CohortSummary, Cohort, MentorshipScore, Participant,
    ParticipantResponse, Registration, Role, ScoreBonus, Tag, User,
};
use crate::services::cache::CacheManager;
use crate::services::store::MatchStore;

/// Entry point for every cohort and participant operation.
///
/// Wraps a [`MatchStore`] with identity checks, input normalisation, the
/// optional top-three cache and logging.
#[derive(Clone)]
pub struct MentorshipService {
    store: Arc<dyn MatchStore>,
    cache: Option<Arc<CacheManager>>,
    defaults: CohortDefaults,
}

impl MentorshipService {
    pub fn new(
        store: Arc<dyn MatchStore>,
        cache: Option<Arc<CacheManager>>,
        defaults: CohortDefaults,
    ) -> Self {
        Self {
            store,
            cache,
            defaults,
        }
    }

    pub async fn health(&self) -> bool {
        self.store.health_check().await.unwrap_or(false)
    }

    /// Create a user and its profile
    pub async fn create_user(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        now: DateTime<Utc>,
    ) -> Result<User, MatchError> {
        let user = User::new(
            email.trim().to_lowercase(),
            first_name.trim().to_string(),
            last_name.trim().to_string(),
            now,
        );
        self.store.create_user(&user).await?;

        tracing::info!("Created user {}", user.user_id);
        Ok(user)
    }

    pub async fn create_cohort(
        &self,
        identity: &Identity,
        programme_id: Uuid,
        draft: CohortDraft,
        now: DateTime<Utc>,
    ) -> Result<CohortSummary, MatchError> {
        identity.require_staff()?;

        let cohort = Cohort::from_draft(programme_id, identity.user_id, draft, &self.defaults, now)?;
        self.store.create_cohort(&cohort).await?;

        tracing::info!(
            "Created cohort {} in programme {} (size {}, closes {}, matching ends {})",
            cohort.cohort_id,
            programme_id,
            cohort.cohort_size,
            cohort.close_date,
            cohort.match_date
        );

        Ok(CohortSummary {
            cohort,
            participant_count: 0,
        })
    }

    pub async fn programme_cohorts(&self, programme_id: Uuid) -> Result<Vec<CohortSummary>, MatchError> {
        self.store.programme_cohorts(programme_id).await
    }

    /// Cohort of the programme currently taking registrations
    pub async fn active_cohort(
        &self,
        programme_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<CohortSummary, MatchError> {
        let cohorts = self.store.programme_cohorts(programme_id).await?;
        active_cohort(&cohorts, now)
            .cloned()
            .ok_or_else(|| MatchError::NotFound(format!("programme {} has no open cohort", programme_id)))
    }

    pub async fn cohort(&self, cohort_id: Uuid) -> Result<CohortSummary, MatchError> {
        self.store
            .get_cohort(cohort_id)
            .await?
            .ok_or_else(|| MatchError::not_found("cohort", cohort_id))
    }

    /// Register the caller in a cohort
    pub async fn register(
        &self,
        identity: &Identity,
        cohort_id: Uuid,
        is_mentor: Option<bool>,
        tag_names: &[String],
        now: DateTime<Utc>,
    ) -> Result<Participant, MatchError> {
        let role = is_mentor
            .map(Role::from_is_mentor)
            .ok_or_else(|| MatchError::Validation("isMentor is required".to_string()))?;
        let tags = normalize_tags(tag_names)?;

        let registration = Registration {
            cohort_id,
            user_id: identity.user_id,
            role,
            tags,
        };

        match self.store.register(registration, now).await {
            Ok(participant) => {
                tracing::info!(
                    "User {} registered in cohort {} as {:?} with {} tags",
                    identity.user_id,
                    cohort_id,
                    participant.role,
                    participant.tags.len()
                );
                Ok(participant)
            }
            Err(e) => {
                tracing::warn!("Registration of {} in cohort {} rejected: {}", identity.user_id, cohort_id, e);
                Err(e)
            }
        }
    }

    /// Score every mentor/mentee pair of a cohort
    pub async fn match_cohort(
        &self,
        identity: &Identity,
        cohort_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<MentorshipScore>, MatchError> {
        identity.require_staff()?;

        let scores = self.store.match_cohort(cohort_id, now).await?;

        tracing::info!("Matched cohort {}: {} scores created", cohort_id, scores.len());
        Ok(scores)
    }

    pub async fn user_participants(&self, identity: &Identity) -> Result<Vec<Participant>, MatchError> {
        self.store.user_participants(identity.user_id).await
    }

    /// Participant detail, visible to its owner only
    pub async fn participant(
        &self,
        identity: &Identity,
        participant_id: Uuid,
    ) -> Result<Participant, MatchError> {
        let (participant, _) = self.load_participant(participant_id).await?;
        if participant.user_id != identity.user_id {
            return Err(PolicyViolation::NotOwner.into());
        }
        Ok(participant)
    }

    /// Best-scoring mentors of a participant; empty for mentors and for
    /// mentees who already made their selection.
    pub async fn top_three(&self, participant_id: Uuid) -> Result<Vec<Participant>, MatchError> {
        let (participant, _) = self.load_participant(participant_id).await?;
        let scores = self.store.mentee_scores(participant_id).await?;
        Ok(top_three(&participant, scores))
    }

    /// Top-three as shown to the mentee, gated on ownership, role and the
    /// cohort's match window.
    pub async fn top_three_view(
        &self,
        identity: &Identity,
        participant_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<ParticipantResponse>, MatchError> {
        let (participant, cohort) = self.load_participant(participant_id).await?;
        check_top_three_access(&participant, &cohort, identity.user_id, now)?;

        // Selection state comes from the store, never from a cached view
        if participant.is_top_three_selected {
            return Ok(Vec::new());
        }

        if let Some(cache) = &self.cache {
            match cache.get_top_three(participant_id).await {
                Ok(Some(cached)) => return Ok(cached),
                Ok(None) => {}
                Err(e) => tracing::warn!("Top-three cache lookup for {} failed: {}", participant_id, e),
            }
        }

        let scores = self.store.mentee_scores(participant_id).await?;
        let view: Vec<ParticipantResponse> = top_three(&participant, scores)
            .iter()
            .map(ParticipantResponse::from)
            .collect();

        // Nothing worth caching before the cohort has been scored
        if let (Some(cache), false) = (&self.cache, view.is_empty()) {
            if let Err(e) = cache.set_top_three(participant_id, &view).await {
                tracing::warn!("Failed to cache top three for {}: {}", participant_id, e);
            }
        }

        Ok(view)
    }

    /// Apply a mentee's ranked choice of their top three
    pub async fn submit_top_three(
        &self,
        identity: &Identity,
        participant_id: Uuid,
        choices: &[Uuid],
        now: DateTime<Utc>,
    ) -> Result<Vec<ScoreBonus>, MatchError> {
        let plan = match self
            .store
            .submit_top_three(participant_id, identity.user_id, choices, now)
            .await
        {
            Ok(plan) => plan,
            Err(e) => {
                tracing::warn!("Top-three selection for {} rejected: {}", participant_id, e);
                return Err(e);
            }
        };

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.invalidate_top_three(participant_id).await {
                tracing::warn!("Failed to invalidate top three for {}: {}", participant_id, e);
            }
        }

        tracing::info!(
            "Participant {} selected top three: {:?}",
            participant_id,
            plan.iter().map(|b| (b.mentor_id, b.bonus)).collect::<Vec<_>>()
        );
        Ok(plan)
    }

    pub async fn tags(&self) -> Result<Vec<Tag>, MatchError> {
        self.store.list_tags().await
    }

    async fn load_participant(&self, participant_id: Uuid) -> Result<(Participant, Cohort), MatchError> {
        self.store
            .get_participant(participant_id)
            .await?
            .ok_or_else(|| MatchError::not_found("participant", participant_id))
    }
}
