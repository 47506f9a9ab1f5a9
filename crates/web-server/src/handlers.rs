use crate::{error::AppError, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use core_types::{DriverRegistration, FacilityRegistration};
use database::{DriverCreation, FacilityCreation};
use serde_json::{json, Value};
use std::sync::Arc;

const DRIVER_DUPLICATE: &str = "Duplicate value detected (database constraint).";
const DRIVER_FAILED: &str = "Failed to create driver.";

const FACILITY_EXISTS: &str = "Facility name already exists (case-insensitive).";
const FACILITY_DUPLICATE: &str = "Facility name already exists.";

/// # POST /api/drivers
/// Registers a driver and links the vehicles they may drive.
/// Every validation failure is reported in one newline-separated message.
pub async fn create_driver(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DriverRegistration>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(registration) = payload?;

    let outcome = state
        .db_repo
        .create_driver(&registration)
        .await
        .map_err(|e| AppError::from_db(e, DRIVER_DUPLICATE, Some(DRIVER_FAILED)))?;

    match outcome {
        DriverCreation::Created { .. } => Ok(Json(json!({ "success": true }))),
        DriverCreation::Rejected(errors) => {
            tracing::info!(issues = errors.issues().len(), "Driver registration rejected.");
            Err(AppError::rejected(errors.to_string()))
        }
    }
}

/// # POST /api/facilities
/// Creates a facility and returns the stored row.
pub async fn create_facility(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FacilityRegistration>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(registration) = payload?;

    let outcome = state
        .db_repo
        .create_facility(&registration)
        .await
        .map_err(|e| AppError::from_db(e, FACILITY_DUPLICATE, None))?;

    match outcome {
        FacilityCreation::Created(facility) => {
            tracing::info!(facility_id = facility.id, "Facility created.");
            Ok(Json(json!({ "success": true, "facility": facility })))
        }
        FacilityCreation::DuplicateName => Err(AppError::rejected(FACILITY_EXISTS)),
    }
}
