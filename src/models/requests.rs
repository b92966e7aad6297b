use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to register the caller in a cohort
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(required(message = "isMentor is required"))]
    #[serde(alias = "is_mentor", rename = "isMentor", default)]
    pub is_mentor: Option<bool>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Mentee's ordered top-three choice, most preferred first
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TopThreeChoicesRequest {
    #[validate(required(message = "choices must list the top three mentors in order of preference"))]
    #[serde(default)]
    pub choices: Option<Vec<Uuid>>,
}

/// Request to create a cohort inside a programme
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCohortRequest {
    #[validate(range(min = 1))]
    #[serde(default)]
    pub cohort_size: Option<i32>,
    #[serde(default)]
    pub open_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub close_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub match_date: Option<DateTime<Utc>>,
}

/// Request to create a user account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 30))]
    #[serde(default, alias = "first_name")]
    pub first_name: String,
    #[validate(length(max = 150))]
    #[serde(default, alias = "last_name")]
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_requires_role() {
        let req: RegisterRequest = serde_json::from_str(r#"{"tags": ["rust"]}"#).unwrap();
        assert!(req.validate().is_err());

        let req: RegisterRequest = serde_json::from_str(r#"{"isMentor": false}"#).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.tags.is_empty());
    }

    #[test]
    fn test_choices_required() {
        let req: TopThreeChoicesRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_user_rejects_bad_email() {
        let req = CreateUserRequest {
            email: "not-an-email".to_string(),
            first_name: "Jo".to_string(),
            last_name: "Bloggs".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
