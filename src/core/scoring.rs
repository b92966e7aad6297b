use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{MentorshipScore, Participant, Role, Tag};

/// Number of tags held by both sides, compared by tag identity
#[inline]
pub fn shared_tag_count(mentor_tags: &[Tag], mentee_tags: &[Tag]) -> i32 {
    let mentor_keys: HashSet<&str> = mentor_tags.iter().map(|t| t.key.as_str()).collect();
    let shared = mentee_tags
        .iter()
        .map(|t| t.key.as_str())
        .collect::<HashSet<_>>()
        .intersection(&mentor_keys)
        .count();

    shared as i32
}

/// Build the full mentor × mentee score matrix for one cohort.
///
/// One score per (mentor, mentee) pair, ordered mentee-major in the order the
/// participants were given. An empty side yields no scores.
pub fn score_cohort(participants: &[Participant]) -> Vec<MentorshipScore> {
    let (mentors, mentees): (Vec<&Participant>, Vec<&Participant>) = participants
        .iter()
        .partition(|p| matches!(p.role, Role::Mentor));

    let mut scores = Vec::with_capacity(mentors.len() * mentees.len());

    for mentee in &mentees {
        for mentor in &mentors {
            scores.push(MentorshipScore {
                mentorship_score_id: Uuid::new_v4(),
                mentor_id: mentor.participant_id,
                mentee_id: mentee.participant_id,
                score: shared_tag_count(&mentor.tags, &mentee.tags),
            });
        }
    }

    tracing::debug!(
        "Scored {} mentors against {} mentees ({} pairs)",
        mentors.len(),
        mentees.len(),
        scores.len()
    );

    scores
}
