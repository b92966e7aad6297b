// Route exports
pub mod accounts;
pub mod cohorts;
pub mod participants;

use actix_web::web;

use crate::services::MentorshipService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: MentorshipService,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(accounts::configure)
            .configure(cohorts::configure)
            .configure(participants::configure),
    );
}
