use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MatchError;

/// Role a participant plays inside a cohort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Mentee,
}

impl Role {
    /// Storage and wire formats carry the role as an `isMentor` flag
    pub fn from_is_mentor(is_mentor: bool) -> Self {
        if is_mentor {
            Role::Mentor
        } else {
            Role::Mentee
        }
    }

    pub fn is_mentor(self) -> bool {
        matches!(self, Role::Mentor)
    }
}

/// Interest label, identified by its case-folded key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(skip)]
    pub key: String,
    pub name: String,
    pub slug: String,
}

/// Time-boxed enrollment group within a programme
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cohort {
    pub cohort_id: Uuid,
    pub programme_id: Uuid,
    pub cohort_size: i32,
    pub open_date: DateTime<Utc>,
    pub close_date: DateTime<Utc>,
    pub match_date: DateTime<Utc>,
    pub created_by: Uuid,
    #[serde(default)]
    pub matched_at: Option<DateTime<Utc>>,
}

/// Defaults applied when a cohort is created without explicit values
#[derive(Debug, Clone, Copy)]
pub struct CohortDefaults {
    pub cohort_size: i32,
    pub registration_days: i64,
    pub match_days: i64,
}

impl Default for CohortDefaults {
    fn default() -> Self {
        Self {
            cohort_size: 100,
            registration_days: 14,
            match_days: 21,
        }
    }
}

/// Optional overrides supplied by the caller creating a cohort
#[derive(Debug, Clone, Default)]
pub struct CohortDraft {
    pub cohort_size: Option<i32>,
    pub open_date: Option<DateTime<Utc>>,
    pub close_date: Option<DateTime<Utc>>,
    pub match_date: Option<DateTime<Utc>>,
}

impl Cohort {
    /// Build a new cohort, filling unset fields from `defaults`.
    ///
    /// Close and match dates default to an offset from the open date. Fails
    /// when that offset runs past the representable date range.
    pub fn from_draft(
        programme_id: Uuid,
        created_by: Uuid,
        draft: CohortDraft,
        defaults: &CohortDefaults,
        now: DateTime<Utc>,
    ) -> Result<Self, MatchError> {
        let open_date = draft.open_date.unwrap_or(now);
        let offset = |days: i64| {
            Duration::try_days(days)
                .and_then(|d| open_date.checked_add_signed(d))
                .ok_or_else(|| {
                    MatchError::Validation(format!(
                        "openDate {} is too far in the future to derive cohort dates",
                        open_date
                    ))
                })
        };

        let close_date = match draft.close_date {
            Some(date) => date,
            None => offset(defaults.registration_days)?,
        };
        let match_date = match draft.match_date {
            Some(date) => date,
            None => offset(defaults.match_days)?,
        };

        Ok(Self {
            cohort_id: Uuid::new_v4(),
            programme_id,
            cohort_size: draft.cohort_size.unwrap_or(defaults.cohort_size),
            open_date,
            close_date,
            match_date,
            created_by,
            matched_at: None,
        })
    }

    pub fn is_matched(&self) -> bool {
        self.matched_at.is_some()
    }
}

/// A user's membership in one cohort
#[derive(Debug, Clone)]
pub struct Participant {
    pub participant_id: Uuid,
    pub user_id: Uuid,
    pub cohort_id: Uuid,
    pub sign_up_date: DateTime<Utc>,
    pub role: Role,
    pub is_matched: bool,
    pub is_top_three_selected: bool,
    pub tags: Vec<Tag>,
}

impl Participant {
    pub fn new(
        user_id: Uuid,
        cohort_id: Uuid,
        role: Role,
        tags: Vec<Tag>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            participant_id: Uuid::new_v4(),
            user_id,
            cohort_id,
            sign_up_date: now,
            role,
            is_matched: false,
            is_top_three_selected: false,
            tags,
        }
    }
}

/// Compatibility score between one mentor and one mentee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorshipScore {
    pub mentorship_score_id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub score: i32,
}

/// A mentee's score row joined with the mentor it refers to
#[derive(Debug, Clone)]
pub struct MenteeScore {
    pub mentor: Participant,
    pub score: i32,
}

/// Score increment granted by a top-three selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBonus {
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub bonus: i32,
}

/// Registration input after the role has been validated
#[derive(Debug, Clone)]
pub struct Registration {
    pub cohort_id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
    pub tags: Vec<Tag>,
}

/// Cohort together with its current participant count
#[derive(Debug, Clone)]
pub struct CohortSummary {
    pub cohort: Cohort,
    pub participant_count: i64,
}

/// Platform user. Always carries its profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub join_date: Option<NaiveDate>,
    pub position: String,
    pub department: String,
    pub date_of_birth: Option<NaiveDate>,
    pub bio: String,
    pub profile_setup_complete: bool,
}

impl User {
    /// Create a user and its default profile in one step
    pub fn new(email: String, first_name: String, last_name: String, now: DateTime<Utc>) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            email,
            first_name,
            last_name,
            profile: UserProfile {
                join_date: Some(now.date_naive()),
                position: String::new(),
                department: String::new(),
                date_of_birth: None,
                bio: String::new(),
                profile_setup_complete: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_flag() {
        assert_eq!(Role::from_is_mentor(true), Role::Mentor);
        assert_eq!(Role::from_is_mentor(false), Role::Mentee);
        assert!(Role::Mentor.is_mentor());
        assert!(!Role::Mentee.is_mentor());
    }

    #[test]
    fn test_cohort_defaults_offset_from_open_date() {
        let now = Utc::now();
        let cohort = Cohort::from_draft(
            Uuid::new_v4(),
            Uuid::new_v4(),
            CohortDraft::default(),
            &CohortDefaults::default(),
            now,
        )
        .unwrap();

        assert_eq!(cohort.cohort_size, 100);
        assert_eq!(cohort.open_date, now);
        assert_eq!(cohort.close_date, now + Duration::days(14));
        assert_eq!(cohort.match_date, now + Duration::days(21));
        assert!(!cohort.is_matched());
    }

    #[test]
    fn test_cohort_date_overflow_is_rejected() {
        let open = DateTime::<Utc>::MAX_UTC - Duration::days(3);
        let draft = CohortDraft {
            open_date: Some(open),
            ..CohortDraft::default()
        };
        let result = Cohort::from_draft(
            Uuid::new_v4(),
            Uuid::new_v4(),
            draft,
            &CohortDefaults::default(),
            Utc::now(),
        );
        assert!(matches!(result, Err(MatchError::Validation(_))));

        // Explicit dates need no offset from the open date
        let draft = CohortDraft {
            open_date: Some(open),
            close_date: Some(open + Duration::days(1)),
            match_date: Some(open + Duration::days(2)),
            ..CohortDraft::default()
        };
        let cohort = Cohort::from_draft(
            Uuid::new_v4(),
            Uuid::new_v4(),
            draft,
            &CohortDefaults::default(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(cohort.close_date, open + Duration::days(1));
    }

    #[test]
    fn test_user_is_created_with_profile() {
        let now = Utc::now();
        let user = User::new("a@example.com".into(), "Ada".into(), "Lovelace".into(), now);
        assert_eq!(user.profile.join_date, Some(now.date_naive()));
        assert!(!user.profile.profile_setup_complete);
    }
}
