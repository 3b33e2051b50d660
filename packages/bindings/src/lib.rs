use std::collections::BTreeMap;

use napi::Result as NapiResult;
use napi_derive::napi;

use firm_roi_core::profitability::assumptions::ProjectionAssumptions;
use firm_roi_core::profitability::calculator::{self, ProjectionInput};
use firm_roi_core::profitability::profile::{FirmProfile, ProfileField};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_projection(input_json: String) -> NapiResult<String> {
    let input: ProjectionInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calculator::run_projection(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Project from raw form text, e.g. `{"partners": "2", "partnerRate": "$400"}`.
/// Values go through the same lenient parsing as the interactive form.
#[napi]
pub fn compute_projection_from_form(fields_json: String) -> NapiResult<String> {
    let fields: BTreeMap<String, String> =
        serde_json::from_str(&fields_json).map_err(to_napi_error)?;

    let mut profile = FirmProfile::default();
    for (name, raw) in &fields {
        let field: ProfileField = name.parse().map_err(to_napi_error)?;
        profile = profile.with_raw_field(field, raw);
    }

    let input = ProjectionInput {
        profile,
        assumptions: None,
    };
    let output = calculator::run_projection(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn default_assumptions() -> NapiResult<String> {
    serde_json::to_string(&ProjectionAssumptions::default()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[napi]
pub fn what_if(input_json: String) -> NapiResult<String> {
    let input: firm_roi_core::scenarios::what_if::WhatIfInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        firm_roi_core::scenarios::what_if::run_what_if(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn sensitivity(input_json: String) -> NapiResult<String> {
    let input: firm_roi_core::scenarios::sensitivity::SensitivityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = firm_roi_core::scenarios::sensitivity::run_sensitivity(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
