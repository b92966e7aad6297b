use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::ranking::{top_three, TOP_THREE};
use crate::core::window::check_selection_window;
use crate::error::PolicyViolation;
use crate::models::{Cohort, MenteeScore, Participant, Role, ScoreBonus};

/// Score bonus granted to the mentor at each rank of a mentee's choice
pub const RANK_BONUSES: [i32; TOP_THREE] = [10, 5, 0];

/// Checks shared by viewing and submitting a top-three, in rejection order:
/// ownership, role, then the cohort's match window.
pub fn check_top_three_access(
    participant: &Participant,
    cohort: &Cohort,
    requester: Uuid,
    now: DateTime<Utc>,
) -> Result<(), PolicyViolation> {
    if participant.user_id != requester {
        return Err(PolicyViolation::NotOwner);
    }
    if let Role::Mentor = participant.role {
        return Err(PolicyViolation::MentorsCannotSelect);
    }
    check_selection_window(cohort, now)
}

/// Validate a mentee's ranked choice and work out the bonuses it earns.
///
/// `choices` must be exactly the mentee's current top three, each once, most
/// preferred first. Nothing is mutated here; the caller applies the returned
/// bonuses and flips the selection flag in one transaction.
pub fn plan_selection(
    participant: &Participant,
    cohort: &Cohort,
    scores: Vec<MenteeScore>,
    requester: Uuid,
    choices: &[Uuid],
    now: DateTime<Utc>,
) -> Result<Vec<ScoreBonus>, PolicyViolation> {
    check_top_three_access(participant, cohort, requester, now)?;
    if participant.is_top_three_selected {
        return Err(PolicyViolation::AlreadySelected);
    }

    let expected: HashSet<Uuid> = top_three(participant, scores)
        .iter()
        .map(|m| m.participant_id)
        .collect();

    // Nothing to rank until the cohort has been scored against mentors
    if expected.is_empty() || choices.len() != expected.len() {
        return Err(PolicyViolation::InvalidChoices);
    }

    let chosen: HashSet<Uuid> = choices.iter().copied().collect();
    if chosen.len() != choices.len() || chosen != expected {
        return Err(PolicyViolation::InvalidChoices);
    }

    Ok(choices
        .iter()
        .zip(RANK_BONUSES)
        .map(|(&mentor_id, bonus)| ScoreBonus {
            mentor_id,
            mentee_id: participant.participant_id,
            bonus,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    struct Fixture {
        cohort: Cohort,
        mentee: Participant,
        mentors: Vec<Participant>,
    }

    impl Fixture {
        fn new(close_offset_days: i64, match_offset_days: i64) -> Self {
            let now = Utc::now();
            let cohort = Cohort {
                cohort_id: Uuid::new_v4(),
                programme_id: Uuid::nil(),
                cohort_size: 10,
                open_date: now - Duration::days(30),
                close_date: now + Duration::days(close_offset_days),
                match_date: now + Duration::days(match_offset_days),
                created_by: Uuid::nil(),
                matched_at: None,
            };
            let mentee = Participant::new(Uuid::new_v4(), cohort.cohort_id, Role::Mentee, vec![], now);
            let mentors = (0..3)
                .map(|i| {
                    Participant::new(
                        Uuid::new_v4(),
                        cohort.cohort_id,
                        Role::Mentor,
                        vec![],
                        now + Duration::seconds(i),
                    )
                })
                .collect();
            Self { cohort, mentee, mentors }
        }

        fn open() -> Self {
            Self::new(-1, 5)
        }

        fn scores(&self) -> Vec<MenteeScore> {
            self.mentors
                .iter()
                .zip([1, 2, 3])
                .map(|(m, score)| MenteeScore {
                    mentor: m.clone(),
                    score,
                })
                .collect()
        }

        fn plan(&self, choices: &[Uuid]) -> Result<Vec<ScoreBonus>, PolicyViolation> {
            plan_selection(
                &self.mentee,
                &self.cohort,
                self.scores(),
                self.mentee.user_id,
                choices,
                Utc::now(),
            )
        }

        fn ids(&self, order: [usize; 3]) -> Vec<Uuid> {
            order.iter().map(|&i| self.mentors[i].participant_id).collect()
        }
    }

    #[test]
    fn test_valid_choice_gets_positional_bonuses() {
        let f = Fixture::open();
        let choices = f.ids([0, 2, 1]);
        let plan = f.plan(&choices).unwrap();

        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].mentor_id, choices[0]);
        assert_eq!(plan[0].bonus, 10);
        assert_eq!(plan[1].bonus, 5);
        assert_eq!(plan[2].bonus, 0);
        assert!(plan.iter().all(|b| b.mentee_id == f.mentee.participant_id));
    }

    #[test]
    fn test_rejects_other_users() {
        let f = Fixture::open();
        let result = plan_selection(
            &f.mentee,
            &f.cohort,
            f.scores(),
            Uuid::new_v4(),
            &f.ids([0, 1, 2]),
            Utc::now(),
        );
        assert_eq!(result, Err(PolicyViolation::NotOwner));
    }

    #[test]
    fn test_rejects_mentors() {
        let mut f = Fixture::open();
        f.mentee.role = Role::Mentor;
        assert_eq!(f.plan(&f.ids([0, 1, 2])), Err(PolicyViolation::MentorsCannotSelect));
    }

    #[test]
    fn test_rejects_outside_window() {
        let early = Fixture::new(2, 5);
        assert_eq!(early.plan(&early.ids([0, 1, 2])), Err(PolicyViolation::MatchingNotStarted));

        let late = Fixture::new(-5, -1);
        assert_eq!(late.plan(&late.ids([0, 1, 2])), Err(PolicyViolation::MatchingFinished));
    }

    #[test]
    fn test_rejects_second_selection() {
        let mut f = Fixture::open();
        f.mentee.is_top_three_selected = true;
        assert_eq!(f.plan(&f.ids([0, 1, 2])), Err(PolicyViolation::AlreadySelected));
    }

    #[test]
    fn test_rejects_repeated_mentor() {
        let f = Fixture::open();
        assert_eq!(f.plan(&f.ids([0, 0, 1])), Err(PolicyViolation::InvalidChoices));
    }

    #[test]
    fn test_rejects_foreign_mentor_and_short_lists() {
        let f = Fixture::open();
        let mut choices = f.ids([0, 1, 2]);
        choices[2] = Uuid::new_v4();
        assert_eq!(f.plan(&choices), Err(PolicyViolation::InvalidChoices));
        assert_eq!(f.plan(&choices[..2]), Err(PolicyViolation::InvalidChoices));
    }

    #[test]
    fn test_fewer_mentors_means_fewer_choices() {
        let mut f = Fixture::open();
        f.mentors.truncate(2);
        let plan = f.plan(&[f.mentors[1].participant_id, f.mentors[0].participant_id]).unwrap();
        assert_eq!(plan.iter().map(|b| b.bonus).collect::<Vec<_>>(), vec![10, 5]);
    }

    #[test]
    fn test_nothing_to_rank() {
        let mut f = Fixture::open();
        f.mentors.clear();
        assert_eq!(f.plan(&[]), Err(PolicyViolation::InvalidChoices));
    }
}
