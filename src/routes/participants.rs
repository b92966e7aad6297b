use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::Identity;
use crate::error::MatchError;
use crate::models::{DetailResponse, ParticipantResponse, TopThreeChoicesRequest};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/participants", web::get().to(list_participants))
        .route("/participants/{participant_id}", web::get().to(get_participant))
        .route(
            "/participants/{participant_id}/top-three",
            web::get().to(get_top_three),
        )
        .route(
            "/participants/{participant_id}/top-three",
            web::post().to(set_top_three),
        );
}

/// The caller's own cohort memberships
async fn list_participants(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, MatchError> {
    let participants: Vec<ParticipantResponse> = state
        .service
        .user_participants(&identity)
        .await?
        .iter()
        .map(ParticipantResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(participants))
}

async fn get_participant(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, MatchError> {
    let participant = state
        .service
        .participant(&identity, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ParticipantResponse::from(&participant)))
}

/// Mentee's three best-scoring mentors
///
/// GET /api/v1/participants/{participantId}/top-three
async fn get_top_three(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, MatchError> {
    let view = state
        .service
        .top_three_view(&identity, path.into_inner(), Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(view))
}

/// Submit the ranked top three
///
/// POST /api/v1/participants/{participantId}/top-three
///
/// ```json
/// { "choices": ["<first mentor id>", "<second>", "<third>"] }
/// ```
async fn set_top_three(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    req: web::Json<TopThreeChoicesRequest>,
) -> Result<HttpResponse, MatchError> {
    req.validate()?;
    let choices = req.into_inner().choices.unwrap_or_default();

    state
        .service
        .submit_top_three(&identity, path.into_inner(), &choices, Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(DetailResponse {
        detail: "Top three successfully selected".to_string(),
    }))
}
