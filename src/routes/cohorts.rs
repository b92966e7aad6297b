use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::Identity;
use crate::error::MatchError;
use crate::models::{
    CohortDraft, CohortResponse, CreateCohortRequest, MatchResponse, ParticipantResponse,
    RegisterRequest,
};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/programmes/{programme_id}/cohorts",
        web::get().to(list_programme_cohorts),
    )
    .route(
        "/programmes/{programme_id}/cohorts",
        web::post().to(create_cohort),
    )
    .route(
        "/programmes/{programme_id}/cohorts/active",
        web::get().to(active_cohort),
    )
    .route("/cohorts/{cohort_id}", web::get().to(get_cohort))
    .route("/cohorts/{cohort_id}/register", web::post().to(register))
    .route("/cohorts/{cohort_id}/match", web::post().to(match_cohort));
}

async fn list_programme_cohorts(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, MatchError> {
    let now = Utc::now();
    let cohorts: Vec<CohortResponse> = state
        .service
        .programme_cohorts(path.into_inner())
        .await?
        .iter()
        .map(|c| CohortResponse::new(c, now))
        .collect();

    Ok(HttpResponse::Ok().json(cohorts))
}

/// Create a cohort (staff only)
///
/// POST /api/v1/programmes/{programmeId}/cohorts
///
/// All fields are optional; missing ones take the configured defaults.
async fn create_cohort(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    req: web::Json<CreateCohortRequest>,
) -> Result<HttpResponse, MatchError> {
    req.validate()?;

    let req = req.into_inner();
    let draft = CohortDraft {
        cohort_size: req.cohort_size,
        open_date: req.open_date,
        close_date: req.close_date,
        match_date: req.match_date,
    };

    let now = Utc::now();
    let summary = state
        .service
        .create_cohort(&identity, path.into_inner(), draft, now)
        .await?;

    Ok(HttpResponse::Created().json(CohortResponse::new(&summary, now)))
}

async fn active_cohort(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, MatchError> {
    let now = Utc::now();
    let summary = state.service.active_cohort(path.into_inner(), now).await?;
    Ok(HttpResponse::Ok().json(CohortResponse::new(&summary, now)))
}

async fn get_cohort(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, MatchError> {
    let summary = state.service.cohort(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CohortResponse::new(&summary, Utc::now())))
}

/// Register the caller in a cohort
///
/// POST /api/v1/cohorts/{cohortId}/register
///
/// ```json
/// { "isMentor": false, "tags": ["node.js", "running"] }
/// ```
async fn register(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, MatchError> {
    req.validate()?;

    let participant = state
        .service
        .register(&identity, path.into_inner(), req.is_mentor, &req.tags, Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(ParticipantResponse::from(&participant)))
}

/// Score every mentor/mentee pair of a closed cohort (staff only)
async fn match_cohort(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, MatchError> {
    let cohort_id = path.into_inner();
    let scores = state
        .service
        .match_cohort(&identity, cohort_id, Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(MatchResponse {
        cohort_id,
        scores_created: scores.len(),
    }))
}
