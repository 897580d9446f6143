use axum::{
    extract::{rejection::FormRejection, Path, State},
    Form, Json,
};
use tracing::{debug, info};
use utoipa::OpenApi;

use super::{
    dto::{ErrorDto, ReadingDto, RelayOnTimeDto, StatusDto, ThresholdDto, UpdateThresholdForm},
    errors::AppError,
};
use crate::{
    db::models::{AlertStatus, RelayStatus},
    readings::ReadingStore,
    thresholds::ThresholdStore,
};

// ---------------------------------------------------------------------------
// Readings
// ---------------------------------------------------------------------------

/// Latest reading classified against the fixed 26 °C / 70 % alert limits.
#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Latest reading and its status", body = StatusDto),
        (status = 404, description = "No readings recorded yet", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
    ),
    tag = "readings"
)]
pub async fn get_status(State(store): State<ReadingStore>) -> Result<Json<StatusDto>, AppError> {
    let reading = store
        .latest()
        .await?
        .ok_or_else(|| AppError::NotFound("no sensor readings recorded".into()))?;

    let dto = StatusDto::from(reading);
    debug!(temp = dto.temp, hum = dto.hum, status = ?dto.status, "Status evaluated");
    Ok(Json(dto))
}

/// Every reading, oldest first.
#[utoipa::path(
    get,
    path = "/history",
    responses(
        (status = 200, description = "All readings ordered by id", body = Vec<ReadingDto>),
        (status = 500, description = "Internal server error", body = ErrorDto),
    ),
    tag = "readings"
)]
pub async fn get_history(
    State(store): State<ReadingStore>,
) -> Result<Json<Vec<ReadingDto>>, AppError> {
    let rows = store.history().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Time of the newest reading taken with the relay on.
#[utoipa::path(
    get,
    path = "/relay-on-time",
    responses(
        (status = 200, description = "Timestamp, or \"No ON status found\"", body = RelayOnTimeDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
    ),
    tag = "readings"
)]
pub async fn get_relay_on_time(
    State(store): State<ReadingStore>,
) -> Result<Json<RelayOnTimeDto>, AppError> {
    Ok(Json(store.last_relay_on().await?.into()))
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Replace a user's alert thresholds. Responds with plain-text `success` when
/// a row changed and `no_change` otherwise.
#[utoipa::path(
    post,
    path = "/update-threshold",
    request_body(
        content = UpdateThresholdForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (
            status = 200,
            description = "`success` or `no_change`",
            body = String,
            content_type = "text/plain"
        ),
        (status = 400, description = "Missing, non-numeric or non-finite field", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
    ),
    tag = "thresholds"
)]
pub async fn update_threshold(
    State(store): State<ThresholdStore>,
    form: Result<Form<UpdateThresholdForm>, FormRejection>,
) -> Result<&'static str, AppError> {
    let Form(form) = form?;
    if !form.temp_threshold.is_finite() || !form.hum_threshold.is_finite() {
        return Err(AppError::BadRequest(
            "temp_threshold and hum_threshold must be finite numbers".into(),
        ));
    }
    info!(user_id = form.id, "Threshold update requested");

    let outcome = store
        .update(form.id, form.temp_threshold, form.hum_threshold)
        .await?;
    Ok(outcome.as_str())
}

/// Current thresholds for one user.
#[utoipa::path(
    get,
    path = "/thresholds/{user_id}",
    params(
        ("user_id" = i64, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "Thresholds for the user", body = ThresholdDto),
        (status = 404, description = "User has no thresholds", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
    ),
    tag = "thresholds"
)]
pub async fn get_threshold(
    State(store): State<ThresholdStore>,
    Path(user_id): Path<i64>,
) -> Result<Json<ThresholdDto>, AppError> {
    let threshold = store
        .get(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no thresholds for user {user_id}")))?;
    Ok(Json(threshold.into()))
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(
        get_status,
        get_history,
        get_relay_on_time,
        update_threshold,
        get_threshold,
        health
    ),
    components(schemas(
        StatusDto,
        ReadingDto,
        RelayOnTimeDto,
        UpdateThresholdForm,
        ThresholdDto,
        ErrorDto,
        AlertStatus,
        RelayStatus
    )),
    tags(
        (name = "readings",   description = "Sensor reading endpoints"),
        (name = "thresholds", description = "Alert threshold endpoints"),
        (name = "system",     description = "System endpoints"),
    ),
    info(
        title = "Climate Monitor API",
        version = "0.1.0",
        description = "REST API for temperature/humidity readings, relay state and alert thresholds"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
