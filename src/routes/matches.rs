use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::engine::{MatchEngine, MatchError};
use crate::models::{
    CompanyMatchEntry, CompanyMatchesResponse, ErrorResponse, HealthResponse, MatchQueryRequest,
    SeekerMatchEntry, SeekerMatchesResponse,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MatchEngine>,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/seeker", web::post().to(seeker_matches))
        .route("/matches/company", web::post().to(company_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.engine.store_healthy().await;
    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn error_response(err: MatchError) -> HttpResponse {
    match err {
        MatchError::NotFound(what) => HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message: what,
            status_code: 404,
        }),
        MatchError::Validation(e) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "invalid_profile_data".to_string(),
            message: e.to_string(),
            status_code: 400,
        }),
        MatchError::Persistence(e) => {
            tracing::error!("persistence failure: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "persistence_failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

fn validation_failure(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "validation_failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Seeker-side ranking endpoint
///
/// POST /api/v1/matches/seeker
///
/// Request body:
/// ```json
/// { "profileId": 1 }
/// ```
///
/// Side effect: persists one match record per returned company.
async fn seeker_matches(
    state: web::Data<AppState>,
    req: web::Json<MatchQueryRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for seeker match request: {:?}", errors);
        return validation_failure(errors);
    }

    tracing::info!("Ranking companies for seeker {}", req.profile_id);

    match state.engine.seeker_matches(req.profile_id).await {
        Ok(outcome) => {
            let matches = outcome
                .matches
                .into_iter()
                .map(|m| {
                    let preferred_mbti = m.profile.trait_code().map(|c| c.to_string());
                    SeekerMatchEntry {
                        company_id: m.profile.id,
                        company_name: m.profile.username,
                        preferred_mbti,
                        mbti_match: m.score.mbti_match,
                        percentage_score: m.score.percentage_score,
                        question_count: m.score.question_count,
                    }
                })
                .collect();

            HttpResponse::Ok().json(SeekerMatchesResponse {
                matches,
                total_candidates: outcome.total_candidates,
            })
        }
        Err(e) => error_response(e),
    }
}

/// Company-side ranking endpoint
///
/// POST /api/v1/matches/company
///
/// Request body:
/// ```json
/// { "profileId": 2 }
/// ```
///
/// No persistence side effect.
async fn company_matches(
    state: web::Data<AppState>,
    req: web::Json<MatchQueryRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for company match request: {:?}", errors);
        return validation_failure(errors);
    }

    tracing::info!("Ranking seekers for company {}", req.profile_id);

    match state.engine.company_matches(req.profile_id).await {
        Ok(outcome) => {
            let matches = outcome
                .matches
                .into_iter()
                .map(|m| {
                    let mbti = m.profile.trait_code().map(|c| c.to_string());
                    CompanyMatchEntry {
                        username: m.profile.username,
                        email: m.profile.email,
                        mbti,
                        mbti_match: m.score.mbti_match,
                        percentage_score: m.score.percentage_score,
                        question_count: m.score.question_count,
                    }
                })
                .collect();

            HttpResponse::Ok().json(CompanyMatchesResponse {
                matches,
                total_candidates: outcome.total_candidates,
            })
        }
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use crate::models::HealthResponse;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
