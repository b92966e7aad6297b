use crate::models::{MenteeScore, Participant, Role};

/// How many mentors a mentee ranks
pub const TOP_THREE: usize = 3;

/// Best-scoring mentors for a mentee, highest score first.
///
/// Returns nothing for mentors and for mentees who already submitted their
/// selection. Equal scores are ordered by mentor sign-up date, then by mentor
/// id, so the result is stable across calls.
pub fn top_three(participant: &Participant, mut scores: Vec<MenteeScore>) -> Vec<Participant> {
    match participant.role {
        Role::Mentor => return Vec::new(),
        Role::Mentee if participant.is_top_three_selected => return Vec::new(),
        Role::Mentee => {}
    }

    scores.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.mentor.sign_up_date.cmp(&b.mentor.sign_up_date))
            .then_with(|| a.mentor.participant_id.cmp(&b.mentor.participant_id))
    });
    scores.truncate(TOP_THREE);

    scores.into_iter().map(|s| s.mentor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn mentor(offset_secs: i64) -> Participant {
        Participant::new(
            Uuid::new_v4(),
            Uuid::nil(),
            Role::Mentor,
            vec![],
            Utc::now() + Duration::seconds(offset_secs),
        )
    }

    fn mentee() -> Participant {
        Participant::new(Uuid::new_v4(), Uuid::nil(), Role::Mentee, vec![], Utc::now())
    }

    fn scored(mentor: &Participant, score: i32) -> MenteeScore {
        MenteeScore {
            mentor: mentor.clone(),
            score,
        }
    }

    #[test]
    fn test_descending_by_score() {
        let (m1, m2, m3, m4) = (mentor(0), mentor(1), mentor(2), mentor(3));
        let scores = vec![scored(&m1, 1), scored(&m2, 2), scored(&m3, 3), scored(&m4, 0)];

        let top: Vec<Uuid> = top_three(&mentee(), scores)
            .iter()
            .map(|p| p.participant_id)
            .collect();

        assert_eq!(top, vec![m3.participant_id, m2.participant_id, m1.participant_id]);
    }

    #[test]
    fn test_fewer_than_three_mentors() {
        let m1 = mentor(0);
        let top = top_three(&mentee(), vec![scored(&m1, 4)]);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_ties_follow_sign_up_order() {
        let (early, late) = (mentor(-60), mentor(60));
        let top = top_three(&mentee(), vec![scored(&late, 2), scored(&early, 2)]);
        assert_eq!(top[0].participant_id, early.participant_id);
        assert_eq!(top[1].participant_id, late.participant_id);
    }

    #[test]
    fn test_empty_for_mentor() {
        let m1 = mentor(0);
        assert!(top_three(&mentor(0), vec![scored(&m1, 3)]).is_empty());
    }

    #[test]
    fn test_empty_after_selection() {
        let m1 = mentor(0);
        let mut selected = mentee();
        selected.is_top_three_selected = true;
        assert!(top_three(&selected, vec![scored(&m1, 3)]).is_empty());
    }
}
