use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConflictKind, PolicyViolation};
use crate::models::{Cohort, CohortSummary};

/// Where a cohort sits in its open → close → match timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CohortPhase {
    /// Registration has not opened yet
    Upcoming,
    /// Accepting registrations
    Registration,
    /// Registration closed, mentees may pick their top three
    Matching,
    /// Match window over
    Finished,
}

impl Cohort {
    pub fn phase(&self, now: DateTime<Utc>) -> CohortPhase {
        if now < self.open_date {
            CohortPhase::Upcoming
        } else if now < self.close_date {
            CohortPhase::Registration
        } else if now <= self.match_date {
            CohortPhase::Matching
        } else {
            CohortPhase::Finished
        }
    }
}

/// Registration is accepted while `open_date <= now <= close_date`
pub fn check_registration_window(cohort: &Cohort, now: DateTime<Utc>) -> Result<(), ConflictKind> {
    if now < cohort.open_date || now > cohort.close_date {
        return Err(ConflictKind::RegistrationClosed);
    }
    Ok(())
}

/// Matching and top-three selection are allowed while `close_date <= now <= match_date`
pub fn check_selection_window(cohort: &Cohort, now: DateTime<Utc>) -> Result<(), PolicyViolation> {
    if now < cohort.close_date {
        return Err(PolicyViolation::MatchingNotStarted);
    }
    if now > cohort.match_date {
        return Err(PolicyViolation::MatchingFinished);
    }
    Ok(())
}

/// Scoring may only run once registration has closed
pub fn check_match_ready(cohort: &Cohort, now: DateTime<Utc>) -> Result<(), PolicyViolation> {
    if now < cohort.close_date {
        return Err(PolicyViolation::MatchingNotStarted);
    }
    Ok(())
}

/// Pick the cohort of a programme currently taking registrations.
///
/// Among cohorts with `open_date <= now < close_date`, the earliest opening
/// one with free places wins; if all are full the earliest one is returned.
pub fn active_cohort(cohorts: &[CohortSummary], now: DateTime<Utc>) -> Option<&CohortSummary> {
    let mut open: Vec<&CohortSummary> = cohorts
        .iter()
        .filter(|c| c.cohort.open_date <= now && now < c.cohort.close_date)
        .collect();

    open.sort_by_key(|c| c.cohort.open_date);

    open.iter()
        .find(|c| c.participant_count < i64::from(c.cohort.cohort_size))
        .or_else(|| open.first())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn cohort(open: i64, close: i64, matched: i64, size: i32) -> Cohort {
        let now = Utc::now();
        Cohort {
            cohort_id: Uuid::new_v4(),
            programme_id: Uuid::nil(),
            cohort_size: size,
            open_date: now + Duration::days(open),
            close_date: now + Duration::days(close),
            match_date: now + Duration::days(matched),
            created_by: Uuid::nil(),
            matched_at: None,
        }
    }

    fn summary(cohort: Cohort, count: i64) -> CohortSummary {
        CohortSummary {
            cohort,
            participant_count: count,
        }
    }

    #[test]
    fn test_phases() {
        let now = Utc::now();
        assert_eq!(cohort(1, 2, 3, 10).phase(now), CohortPhase::Upcoming);
        assert_eq!(cohort(-1, 2, 3, 10).phase(now), CohortPhase::Registration);
        assert_eq!(cohort(-2, -1, 3, 10).phase(now), CohortPhase::Matching);
        assert_eq!(cohort(-3, -2, -1, 10).phase(now), CohortPhase::Finished);
    }

    #[test]
    fn test_registration_window() {
        let now = Utc::now();
        assert!(check_registration_window(&cohort(-1, 2, 3, 10), now).is_ok());
        assert_eq!(
            check_registration_window(&cohort(1, 2, 3, 10), now),
            Err(ConflictKind::RegistrationClosed)
        );
        assert_eq!(
            check_registration_window(&cohort(-7, -2, 3, 10), now),
            Err(ConflictKind::RegistrationClosed)
        );
    }

    #[test]
    fn test_selection_window() {
        let now = Utc::now();
        assert_eq!(
            check_selection_window(&cohort(-1, 2, 3, 10), now),
            Err(PolicyViolation::MatchingNotStarted)
        );
        assert!(check_selection_window(&cohort(-2, -1, 3, 10), now).is_ok());
        assert_eq!(
            check_selection_window(&cohort(-3, -2, -1, 10), now),
            Err(PolicyViolation::MatchingFinished)
        );
    }

    #[test]
    fn test_active_cohort_none_when_no_cohorts() {
        assert!(active_cohort(&[], Utc::now()).is_none());
    }

    #[test]
    fn test_active_cohort_skips_unopened_and_closed() {
        let cohorts = vec![
            summary(cohort(1, 5, 7, 10), 0),
            summary(cohort(-7, -1, 3, 10), 0),
        ];
        assert!(active_cohort(&cohorts, Utc::now()).is_none());
    }

    #[test]
    fn test_active_cohort_prefers_earliest_with_space() {
        let first = cohort(-3, 5, 7, 2);
        let second = cohort(-2, 5, 7, 2);
        let second_id = second.cohort_id;
        let cohorts = vec![summary(second, 1), summary(first, 2)];

        let active = active_cohort(&cohorts, Utc::now()).unwrap();
        assert_eq!(active.cohort.cohort_id, second_id);
    }

    #[test]
    fn test_active_cohort_earliest_when_all_full() {
        let first = cohort(-3, 5, 7, 1);
        let first_id = first.cohort_id;
        let cohorts = vec![summary(cohort(-2, 5, 7, 1), 1), summary(first, 1)];

        let active = active_cohort(&cohorts, Utc::now()).unwrap();
        assert_eq!(active.cohort.cohort_id, first_id);
    }
}
