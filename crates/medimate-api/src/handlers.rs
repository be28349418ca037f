//! Endpoint handlers for `/api/symptom-checker/*` and `/api/health`.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum::{Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use medimate_contracts::{
    assessment::{AssessmentInput, AssessmentResult},
    history::{HistoryPage, UserId},
    symptom::{Symptom, SymptomCategory, SymptomId},
};
use medimate_core::traits::HistoryStore;

use crate::{config::MAX_HISTORY_LIMIT, context::ApiContext, error::ApiError, session::bearer_token};

// ── Wire types ────────────────────────────────────────────────────────────────

/// Success envelope: `{"success": true, "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self { success: true, data })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAssessmentRequest {
    #[serde(flatten)]
    pub input: AssessmentInput,
    pub results: AssessmentResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAssessmentResponse {
    pub assessment_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    pub features: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView<'a> {
    pub categories: Vec<CategoryView<'a>>,
    pub emergency_symptoms: &'a [SymptomId],
}

#[derive(Debug, Serialize)]
pub struct CategoryView<'a> {
    pub category: SymptomCategory,
    pub symptoms: Vec<&'a Symptom>,
}

/// The caller resolved by `require_auth`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

// ── Middleware ────────────────────────────────────────────────────────────────

/// Require a registered bearer token; injects `AuthenticatedUser`.
pub async fn require_auth(
    State(ctx): State<ApiContext>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = ctx.sessions.require(req.headers()).inspect_err(|_| {
        warn!(path = %req.uri().path(), "rejected unauthenticated request");
    })?;
    req.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(req).await)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_body(body: &Bytes) -> Result<Value, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("request body is not valid JSON: {e}")))
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `POST /api/symptom-checker/analyze`
///
/// Verifies the body, runs the analyzer, verifies the result. When the
/// caller presents a registered token the result is also saved to their
/// history; a failed save is logged and does not fail the request.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<AssessmentResult>>, ApiError> {
    let value = parse_body(&body)?;
    let report = ctx.analyze_verifier.verify(&value);
    if !report.passed {
        warn!(failures = report.failures.len(), "analyze request rejected");
        return Err(ApiError::Rejected(report));
    }
    let input: AssessmentInput = serde_json::from_value(value)
        .map_err(|e| ApiError::BadRequest(format!("malformed assessment: {e}")))?;

    let result = ctx.analyzer.analyze(&input);
    ctx.result_verifier.verify(&result).into_result()?;

    if let Some(user) = ctx.sessions.authenticate(&headers)? {
        match ctx.history.save(&user, &input, &result) {
            Ok(saved) => debug!(assessment_id = %saved.id, "analysis auto-saved"),
            Err(e) => warn!(error = %e, "auto-save failed; returning result unsaved"),
        }
    }

    info!(
        emergency = result.is_emergency(),
        conditions = result.possible_conditions.len(),
        "analysis served"
    );
    Ok(ApiResponse::ok(result))
}

/// `POST /api/symptom-checker/save-assessment` (authenticated)
pub async fn save_assessment(
    State(ctx): State<ApiContext>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    body: Bytes,
) -> Result<Json<ApiResponse<SaveAssessmentResponse>>, ApiError> {
    let value = parse_body(&body)?;
    let report = ctx.save_verifier.verify(&value);
    if !report.passed {
        warn!(failures = report.failures.len(), "save request rejected");
        return Err(ApiError::Rejected(report));
    }
    let request: SaveAssessmentRequest = serde_json::from_value(value)
        .map_err(|e| ApiError::BadRequest(format!("malformed assessment: {e}")))?;

    let report = ctx.result_verifier.verify(&request.results);
    if !report.passed {
        return Err(ApiError::Rejected(report));
    }

    let saved = ctx.history.save(&user, &request.input, &request.results)?;
    Ok(ApiResponse::ok(SaveAssessmentResponse {
        assessment_id: saved.id.to_string(),
        message: "Assessment saved successfully".to_string(),
    }))
}

/// `GET /api/symptom-checker/history?limit=N` (authenticated)
pub async fn history(
    State(ctx): State<ApiContext>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<HistoryPage>>, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::BadRequest(format!("invalid query string: {}", e.body_text())))?;
    let limit = query.limit.unwrap_or(ctx.history_limit).min(MAX_HISTORY_LIMIT);
    let page = ctx.history.history(&user, limit)?;
    Ok(ApiResponse::ok(page))
}

/// `POST /api/symptom-checker/logout` (authenticated)
///
/// Revokes the presented token. The user's history is kept.
pub async fn logout(
    State(ctx): State<ApiContext>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<LogoutResponse>>, ApiError> {
    if let Some(token) = bearer_token(&headers) {
        ctx.sessions.revoke(token)?;
    }
    info!(user_id = %user, "session revoked");
    Ok(ApiResponse::ok(LogoutResponse {
        message: "Logged out".to_string(),
    }))
}

/// `GET /api/symptom-checker/catalog`
pub async fn catalog(State(ctx): State<ApiContext>) -> Json<Value> {
    let catalog = ctx.catalog();
    let view = CatalogView {
        categories: SymptomCategory::ALL
            .into_iter()
            .map(|category| CategoryView {
                category,
                symptoms: catalog.symptoms_by_category(category),
            })
            .filter(|c| !c.symptoms.is_empty())
            .collect(),
        emergency_symptoms: &catalog.emergency().symptoms,
    };
    Json(serde_json::json!({ "success": true, "data": view }))
}

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        status: "healthy",
        message: "MediMate symptom checker is running",
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        features: vec!["Symptom Analysis", "Emergency Screening", "Assessment History"],
    })
}
