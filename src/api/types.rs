//! API request and response bodies.

use serde::{Deserialize, Serialize};

use crate::profile::{RawProfile, RawValue};

/// Body of `POST /usage/day`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DayRequest {
    /// Month-long profile.
    #[serde(default)]
    pub profile: Option<RawProfile>,
    /// Day number; validated for type, integrality, and range after the profile.
    #[serde(default)]
    pub day: Option<RawValue>,
}

/// Successful calculation result.
#[derive(Debug, Serialize)]
pub struct MinutesResponse {
    pub minutes: u32,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
