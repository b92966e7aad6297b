use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::window::CohortPhase;
use crate::models::domain::{CohortSummary, Participant, Tag};

/// Participant as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub participant_id: Uuid,
    pub user_id: Uuid,
    pub cohort_id: Uuid,
    pub sign_up_date: DateTime<Utc>,
    pub is_mentor: bool,
    pub is_matched: bool,
    pub is_top_three_selected: bool,
    pub tags: Vec<Tag>,
}

impl From<&Participant> for ParticipantResponse {
    fn from(p: &Participant) -> Self {
        Self {
            participant_id: p.participant_id,
            user_id: p.user_id,
            cohort_id: p.cohort_id,
            sign_up_date: p.sign_up_date,
            is_mentor: p.role.is_mentor(),
            is_matched: p.is_matched,
            is_top_three_selected: p.is_top_three_selected,
            tags: p.tags.clone(),
        }
    }
}

/// Cohort with derived participation data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortResponse {
    pub cohort_id: Uuid,
    pub programme_id: Uuid,
    pub cohort_size: i32,
    pub participant_count: i64,
    pub open_date: DateTime<Utc>,
    pub close_date: DateTime<Utc>,
    pub match_date: DateTime<Utc>,
    pub matched_at: Option<DateTime<Utc>>,
    pub phase: CohortPhase,
}

impl CohortResponse {
    pub fn new(summary: &CohortSummary, now: DateTime<Utc>) -> Self {
        let cohort = &summary.cohort;
        Self {
            cohort_id: cohort.cohort_id,
            programme_id: cohort.programme_id,
            cohort_size: cohort.cohort_size,
            participant_count: summary.participant_count,
            open_date: cohort.open_date,
            close_date: cohort.close_date,
            match_date: cohort.match_date,
            matched_at: cohort.matched_at,
            phase: cohort.phase(now),
        }
    }
}

/// Outcome of a cohort match run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub cohort_id: Uuid,
    pub scores_created: usize,
}

/// Generic confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
