//! The MediMate HTTP router.
//!
//! Routes are nested under `/api/`:
//!
//! | Route | Auth |
//! |---|---|
//! | `POST /api/symptom-checker/analyze` | optional (saves when present) |
//! | `POST /api/symptom-checker/save-assessment` | required |
//! | `GET  /api/symptom-checker/history` | required |
//! | `POST /api/symptom-checker/logout` | required |
//! | `GET  /api/symptom-checker/catalog` | none |
//! | `GET  /api/health` | none |

use axum::routing::{get, post};
use axum::Router;

use crate::context::ApiContext;
use crate::handlers;

/// Build the API router over a prepared context.
pub fn api_router(ctx: ApiContext) -> Router {
    let protected = Router::new()
        .route("/save-assessment", post(handlers::save_assessment))
        .route("/history", get(handlers::history))
        .route("/logout", post(handlers::logout))
        .route_layer(axum::middleware::from_fn_with_state(
            ctx.clone(),
            handlers::require_auth,
        ));

    let symptom_checker = Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/catalog", get(handlers::catalog))
        .merge(protected);

    Router::new()
        .route("/api/health", get(handlers::health))
        .nest("/api/symptom-checker", symptom_checker)
        .with_state(ctx)
}
