//! HTTP surface: `/getLottoResult`, `/recommendLotto` and `/health`.
//!
//! Both lottery endpoints are stateless and CORS-open; every request fetches
//! fresh data from upstream.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{
        header::{ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN},
        HeaderValue, StatusCode,
    },
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::aggregator::aggregate;
use crate::config::Config;
use crate::error::ApiError;
use crate::remote::DrawSource;
use crate::wire::{LottoNumber, Recommendation};

pub const MISSING_DRW_NO: &str = "drwNo parameter is required";
pub const INVALID_DRW_NO: &str = "drwNo must be a positive integer";
pub const DRW_NO_TOO_LARGE: &str = "drwNo is too large (max 4294967295)";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DrawSource>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(source: Arc<dyn DrawSource>, config: Config) -> Self {
        Self { source, config: Arc::new(config) }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/getLottoResult", get(get_lotto_result).options(preflight))
        .route("/recommendLotto", get(recommend_lotto).options(preflight))
        .route("/health", get(health))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct DrawQuery {
    #[serde(rename = "drwNo")]
    drw_no: Option<String>,
}

/// Blank counts as missing; anything else must be a positive integer that
/// fits in `u32`.
pub fn parse_draw_no(raw: Option<&str>) -> Result<u32, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation(MISSING_DRW_NO.to_string()))?;
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        Err(_) if raw.bytes().all(|b| b.is_ascii_digit()) && raw.bytes().any(|b| b != b'0') => {
            Err(ApiError::Validation(DRW_NO_TOO_LARGE.to_string()))
        }
        _ => Err(ApiError::Validation(INVALID_DRW_NO.to_string())),
    }
}

async fn get_lotto_result(
    State(state): State<AppState>,
    query: Result<Query<DrawQuery>, QueryRejection>,
) -> Result<Json<LottoNumber>, ApiError> {
    // e.g. a repeated drwNo; keep the JSON error body
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    let draw_no = parse_draw_no(query.drw_no.as_deref())?;
    let draw = state.source.fetch_draw(draw_no).await?;
    Ok(Json(LottoNumber::from(&draw)))
}

async fn recommend_lotto(State(state): State<AppState>) -> Result<Json<Recommendation>, ApiError> {
    let max_draw = state.config.max_draw_at(Utc::now());
    tracing::info!(max_draw, "recommendLotto: scanning");
    let table = aggregate(state.source.clone(), max_draw, state.config.concurrency).await?;
    Ok(Json(Recommendation::from(&table)))
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(r: Result<u32, ApiError>) -> String {
        match r {
            Err(ApiError::Validation(m)) => m,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn draw_no_parsing() {
        assert_eq!(parse_draw_no(Some("1155")).unwrap(), 1155);
        assert_eq!(parse_draw_no(Some(" 7 ")).unwrap(), 7);
        assert_eq!(message(parse_draw_no(None)), MISSING_DRW_NO);
        assert_eq!(message(parse_draw_no(Some(""))), MISSING_DRW_NO);
        assert_eq!(message(parse_draw_no(Some("abc"))), INVALID_DRW_NO);
        assert_eq!(message(parse_draw_no(Some("0"))), INVALID_DRW_NO);
        assert_eq!(message(parse_draw_no(Some("-3"))), INVALID_DRW_NO);
    }

    #[test]
    fn draw_no_overflow_has_its_own_message() {
        assert_eq!(parse_draw_no(Some("4294967295")).unwrap(), u32::MAX);
        assert_eq!(message(parse_draw_no(Some("4294967296"))), DRW_NO_TOO_LARGE);
        assert_eq!(message(parse_draw_no(Some("99999999999"))), DRW_NO_TOO_LARGE);
        assert_eq!(message(parse_draw_no(Some("00000000000"))), INVALID_DRW_NO);
    }
}
