//! HTTP façade for the hedge simulator
//!
//! `POST /hedge` runs a full fetch-simulate-export cycle and reports the
//! artifact locations; `GET /` is a liveness probe. Requests are validated
//! at the boundary; run failures surface as a single detail string, never
//! a provider stack trace.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::core::{HedgeError, HedgeResult, HedgeSummary};
use crate::run::{run_dynamic_hedge, RunConfig};

#[derive(Debug, Clone, Deserialize)]
pub struct HedgeRequest {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct HedgeResponse {
    pub message: String,
    pub excel_file: String,
    pub plot_file: String,
    pub summary: HedgeSummary,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Reject malformed tickers and inverted date ranges before any provider
/// call is made.
pub fn validate(request: &HedgeRequest) -> HedgeResult<()> {
    let ticker = request.ticker.trim();
    if ticker.is_empty()
        || ticker.len() > 12
        || !ticker.chars().all(|c| c.is_ascii_alphanumeric() || c == '.')
    {
        return Err(HedgeError::invalid_request(format!(
            "bad ticker: {:?}",
            request.ticker
        )));
    }
    if request.start_date > request.end_date {
        return Err(HedgeError::invalid_request(format!(
            "start {} is after end {}",
            request.start_date, request.end_date
        )));
    }
    Ok(())
}

/// Build the service router.
pub fn router(config: RunConfig) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/hedge", post(hedge))
        .with_state(Arc::new(config))
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Hedge API is live" }))
}

async fn hedge(
    State(config): State<Arc<RunConfig>>,
    Json(request): Json<HedgeRequest>,
) -> Result<Json<HedgeResponse>, (StatusCode, Json<ErrorBody>)> {
    if let Err(e) = validate(&request) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                detail: e.to_string(),
            }),
        ));
    }

    let run_config = config.as_ref().clone();
    let joined = tokio::task::spawn_blocking(move || {
        run_dynamic_hedge(
            &run_config,
            &request.ticker,
            request.start_date,
            request.end_date,
        )
    })
    .await;

    let artifacts = match joined {
        Ok(Ok(artifacts)) => artifacts,
        Ok(Err(e)) => {
            error!("hedge run failed: {}", e);
            let status = match e {
                HedgeError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            return Err((
                status,
                Json(ErrorBody {
                    detail: e.to_string(),
                }),
            ));
        }
        Err(e) => {
            error!("hedge task failed to complete: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    detail: "internal error".to_string(),
                }),
            ));
        }
    };

    Ok(Json(HedgeResponse {
        message: "Hedge simulation completed".to_string(),
        excel_file: artifacts.excel_path.display().to_string(),
        plot_file: artifacts.plot_path.display().to_string(),
        summary: artifacts.summary,
    }))
}
