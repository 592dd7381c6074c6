//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use log::debug;

use super::AppState;
use super::types::{DayRequest, ErrorResponse, MinutesResponse};
use crate::calc::{savings, usage, usage_for_day};
use crate::error::{DayError, EnergyError};
use crate::profile::{Day, Power, RawProfile, RawValue, SwitchState};
use crate::runner::Outcome;

type ApiResult = Result<Json<MinutesResponse>, (StatusCode, Json<ErrorResponse>)>;

fn bad_request(err: EnergyError) -> (StatusCode, Json<ErrorResponse>) {
    debug!("rejecting request: {err}");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

fn minutes(result: Result<u32, EnergyError>) -> ApiResult {
    result
        .map(|minutes| Json(MinutesResponse { minutes }))
        .map_err(bad_request)
}

/// Returns the outcome computed at startup.
///
/// `GET /outcome` → 200 + `Outcome` JSON
pub async fn get_outcome(State(state): State<Arc<AppState>>) -> Json<Outcome> {
    Json(state.outcome.clone())
}

/// `POST /usage` with a two-state profile → 200 + `{ "minutes": N }`, or 400.
pub async fn post_usage(body: String) -> ApiResult {
    minutes(
        RawProfile::from_json_str(&body)
            .and_then(RawProfile::into_profile::<Power>)
            .and_then(|profile| usage(&profile)),
    )
}

/// `POST /savings` with a three-state profile → 200 + `{ "minutes": N }`, or 400.
pub async fn post_savings(body: String) -> ApiResult {
    minutes(
        RawProfile::from_json_str(&body)
            .and_then(RawProfile::into_profile::<SwitchState>)
            .and_then(|profile| savings(&profile)),
    )
}

/// `POST /usage/day` with `{ "profile": …, "day": N }` → 200 + `{ "minutes": N }`, or 400.
///
/// The profile is validated before the day.
pub async fn post_usage_for_day(body: String) -> ApiResult {
    minutes(day_usage(&body))
}

fn day_usage(body: &str) -> Result<u32, EnergyError> {
    let request: DayRequest =
        serde_json::from_str(body).map_err(|e| EnergyError::InvalidProfile(e.to_string()))?;
    let profile = request
        .profile
        .unwrap_or_default()
        .into_profile::<Power>()?;
    let day = request
        .day
        .as_ref()
        .and_then(RawValue::as_number)
        .ok_or(DayError::NotInteger)
        .and_then(Day::from_number)?;
    usage_for_day(&profile, day)
}
