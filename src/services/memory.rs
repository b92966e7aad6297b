use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::{check_match_ready, check_registration_window, plan_selection, score_cohort};
use crate::error::{ConflictKind, MatchError};
use crate::models::{
    Cohort, CohortSummary, MenteeScore, MentorshipScore, Participant, Registration, ScoreBonus, Tag,
    User,
};
use crate::services::store::MatchStore;

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    cohorts: HashMap<Uuid, Cohort>,
    // Kept in insertion order, which is sign-up order
    participants: Vec<Participant>,
    tags: BTreeMap<String, Tag>,
    scores: Vec<MentorshipScore>,
}

impl State {
    fn summary(&self, cohort: &Cohort) -> CohortSummary {
        CohortSummary {
            cohort: cohort.clone(),
            participant_count: self
                .participants
                .iter()
                .filter(|p| p.cohort_id == cohort.cohort_id)
                .count() as i64,
        }
    }

    fn participant(&self, participant_id: Uuid) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.participant_id == participant_id)
    }

    fn mentee_scores(&self, mentee_id: Uuid) -> Vec<MenteeScore> {
        self.scores
            .iter()
            .filter(|s| s.mentee_id == mentee_id)
            .filter_map(|s| {
                self.participant(s.mentor_id).map(|mentor| MenteeScore {
                    mentor: mentor.clone(),
                    score: s.score,
                })
            })
            .collect()
    }
}

/// Process-local store.
///
/// One mutex guards all state and is held for the whole of each call, which
/// makes every operation atomic and serializes concurrent callers.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn create_user(&self, user: &User) -> Result<(), MatchError> {
        let mut state = self.state.lock().await;
        if state
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(ConflictKind::EmailTaken.into());
        }
        state.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn create_cohort(&self, cohort: &Cohort) -> Result<(), MatchError> {
        let mut state = self.state.lock().await;
        state.cohorts.insert(cohort.cohort_id, cohort.clone());
        Ok(())
    }

    async fn get_cohort(&self, cohort_id: Uuid) -> Result<Option<CohortSummary>, MatchError> {
        let state = self.state.lock().await;
        Ok(state.cohorts.get(&cohort_id).map(|c| state.summary(c)))
    }

    async fn programme_cohorts(&self, programme_id: Uuid) -> Result<Vec<CohortSummary>, MatchError> {
        let state = self.state.lock().await;
        let mut cohorts: Vec<CohortSummary> = state
            .cohorts
            .values()
            .filter(|c| c.programme_id == programme_id)
            .map(|c| state.summary(c))
            .collect();
        cohorts.sort_by_key(|c| (c.cohort.open_date, c.cohort.cohort_id));
        Ok(cohorts)
    }

    async fn register(
        &self,
        registration: Registration,
        now: DateTime<Utc>,
    ) -> Result<Participant, MatchError> {
        let mut state = self.state.lock().await;

        let cohort = state
            .cohorts
            .get(&registration.cohort_id)
            .cloned()
            .ok_or_else(|| MatchError::not_found("cohort", registration.cohort_id))?;
        if !state.users.contains_key(&registration.user_id) {
            return Err(MatchError::not_found("user", registration.user_id));
        }

        check_registration_window(&cohort, now)?;

        let summary = state.summary(&cohort);
        if state
            .participants
            .iter()
            .any(|p| p.cohort_id == cohort.cohort_id && p.user_id == registration.user_id)
        {
            return Err(ConflictKind::AlreadyRegistered.into());
        }
        if summary.participant_count >= i64::from(cohort.cohort_size) {
            return Err(ConflictKind::CohortFull.into());
        }

        let tags = registration
            .tags
            .into_iter()
            .map(|tag| state.tags.entry(tag.key.clone()).or_insert(tag).clone())
            .collect();

        let participant = Participant::new(
            registration.user_id,
            cohort.cohort_id,
            registration.role,
            tags,
            now,
        );
        state.participants.push(participant.clone());

        Ok(participant)
    }

    async fn get_participant(
        &self,
        participant_id: Uuid,
    ) -> Result<Option<(Participant, Cohort)>, MatchError> {
        let state = self.state.lock().await;
        Ok(state.participant(participant_id).and_then(|p| {
            state
                .cohorts
                .get(&p.cohort_id)
                .map(|c| (p.clone(), c.clone()))
        }))
    }

    async fn user_participants(&self, user_id: Uuid) -> Result<Vec<Participant>, MatchError> {
        let state = self.state.lock().await;
        Ok(state
            .participants
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn mentee_scores(&self, mentee_id: Uuid) -> Result<Vec<MenteeScore>, MatchError> {
        let state = self.state.lock().await;
        Ok(state.mentee_scores(mentee_id))
    }

    async fn cohort_scores(&self, cohort_id: Uuid) -> Result<Vec<MentorshipScore>, MatchError> {
        let state = self.state.lock().await;
        Ok(state
            .scores
            .iter()
            .filter(|s| {
                state
                    .participant(s.mentee_id)
                    .is_some_and(|p| p.cohort_id == cohort_id)
            })
            .cloned()
            .collect())
    }

    async fn match_cohort(
        &self,
        cohort_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<MentorshipScore>, MatchError> {
        let mut state = self.state.lock().await;

        let cohort = state
            .cohorts
            .get(&cohort_id)
            .cloned()
            .ok_or_else(|| MatchError::not_found("cohort", cohort_id))?;
        if cohort.is_matched() {
            return Err(ConflictKind::AlreadyMatched.into());
        }
        check_match_ready(&cohort, now)?;

        let members: Vec<Participant> = state
            .participants
            .iter()
            .filter(|p| p.cohort_id == cohort_id)
            .cloned()
            .collect();
        let scores = score_cohort(&members);

        state.scores.extend(scores.iter().cloned());
        if let Some(c) = state.cohorts.get_mut(&cohort_id) {
            c.matched_at = Some(now);
        }

        Ok(scores)
    }

    async fn submit_top_three(
        &self,
        participant_id: Uuid,
        requester: Uuid,
        choices: &[Uuid],
        now: DateTime<Utc>,
    ) -> Result<Vec<ScoreBonus>, MatchError> {
        let mut state = self.state.lock().await;

        let participant = state
            .participant(participant_id)
            .cloned()
            .ok_or_else(|| MatchError::not_found("participant", participant_id))?;
        let cohort = state
            .cohorts
            .get(&participant.cohort_id)
            .cloned()
            .ok_or_else(|| MatchError::not_found("cohort", participant.cohort_id))?;

        let scores = state.mentee_scores(participant_id);
        let plan = plan_selection(&participant, &cohort, scores, requester, choices, now)?;

        for bonus in &plan {
            if let Some(row) = state
                .scores
                .iter_mut()
                .find(|s| s.mentor_id == bonus.mentor_id && s.mentee_id == bonus.mentee_id)
            {
                row.score += bonus.bonus;
            }
        }
        if let Some(p) = state
            .participants
            .iter_mut()
            .find(|p| p.participant_id == participant_id)
        {
            p.is_top_three_selected = true;
        }

        Ok(plan)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, MatchError> {
        let state = self.state.lock().await;
        Ok(state.tags.values().cloned().collect())
    }

    async fn health_check(&self) -> Result<bool, MatchError> {
        Ok(true)
    }
}
