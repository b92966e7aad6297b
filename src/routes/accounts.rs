use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::MatchError;
use crate::models::{CreateUserRequest, HealthResponse};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/users", web::post().to(create_user))
        .route("/tags", web::get().to(list_tags));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let healthy = state.service.health().await;
    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Create a user account
///
/// POST /api/v1/users
///
/// ```json
/// { "email": "ada@example.com", "firstName": "Ada", "lastName": "Lovelace" }
/// ```
async fn create_user(
    state: web::Data<AppState>,
    req: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, MatchError> {
    req.validate()?;

    let user = state
        .service
        .create_user(&req.email, &req.first_name, &req.last_name, chrono::Utc::now())
        .await?;

    Ok(HttpResponse::Created().json(user))
}

/// List every known tag
async fn list_tags(state: web::Data<AppState>) -> Result<HttpResponse, MatchError> {
    let tags = state.service.tags().await?;
    Ok(HttpResponse::Ok().json(tags))
}
