//! Authenticated endpoints that add or remove holidays.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::{delete, post};
use axum::{Json, Router, middleware};

use crate::api::auth::require_api_key;
use crate::api::dto::{
    AddHolidayParams, AddHolidayResponse, AddedDetails, RemoveHolidayParams,
    RemoveHolidayResponse, RemovedDetails,
};
use crate::app_state::AppState;
use crate::domain::dates;
use crate::error::{ErrorResponse, ServiceError};

/// `POST /feriados/agregar/`: Add a holiday.
///
/// # Errors
///
/// Returns a validation [`ServiceError`] for a bad year, date or name, a
/// year mismatch or a duplicate date, and [`ServiceError::StorageWrite`]
/// when the document cannot be saved.
#[utoipa::path(
    post,
    path = "/feriados/agregar/",
    tag = "Admin",
    summary = "Add a holiday",
    description = "Adds a holiday to the year's ledger and saves the calendar. Requires the X-API-Key header.",
    params(AddHolidayParams, ("X-API-Key" = String, Header, description = "Shared API key")),
    responses(
        (status = 200, description = "Holiday added", body = AddHolidayResponse),
        (status = 400, description = "Invalid input, year mismatch or duplicate date", body = ErrorResponse),
        (status = 403, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 500, description = "Calendar could not be saved", body = ErrorResponse),
    )
)]
pub async fn add_holiday(
    State(state): State<AppState>,
    query: Result<Query<AddHolidayParams>, QueryRejection>,
) -> Result<Json<AddHolidayResponse>, ServiceError> {
    let Query(params) = query?;
    let config = &state.config;

    dates::check_year_in_range(
        params.anio,
        state.current_year(),
        config.min_year,
        config.max_year_offset,
    )?;
    let date = dates::parse(&params.fecha)?;
    dates::check_not_before_min_year(date, config.min_year)?;
    let name = dates::check_name(&params.nombre)?;

    let outcome = state.store.add(params.anio, date, &name).await?;

    Ok(Json(AddHolidayResponse {
        mensaje: format!("Feriado '{}' agregado correctamente", outcome.record.name),
        detalles: AddedDetails {
            fecha: outcome.record.date,
            anio: params.anio,
            total_feriados_anio: outcome.ledger_len,
        },
    }))
}

/// `DELETE /feriados/eliminar/`: Remove a holiday.
///
/// # Errors
///
/// Returns a validation [`ServiceError`] for a bad year or date,
/// [`ServiceError::YearNotFound`] / [`ServiceError::DateNotFound`] when
/// there is nothing to remove, and [`ServiceError::StorageWrite`] when the
/// document cannot be saved.
#[utoipa::path(
    delete,
    path = "/feriados/eliminar/",
    tag = "Admin",
    summary = "Remove a holiday",
    description = "Removes the holiday on the given date and saves the calendar. Requires the X-API-Key header.",
    params(RemoveHolidayParams, ("X-API-Key" = String, Header, description = "Shared API key")),
    responses(
        (status = 200, description = "Holiday removed", body = RemoveHolidayResponse),
        (status = 400, description = "Invalid year or date", body = ErrorResponse),
        (status = 403, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 404, description = "Year or date not found", body = ErrorResponse),
        (status = 500, description = "Calendar could not be saved", body = ErrorResponse),
    )
)]
pub async fn remove_holiday(
    State(state): State<AppState>,
    query: Result<Query<RemoveHolidayParams>, QueryRejection>,
) -> Result<Json<RemoveHolidayResponse>, ServiceError> {
    let Query(params) = query?;
    let config = &state.config;

    dates::check_year_in_range(
        params.anio,
        state.current_year(),
        config.min_year,
        config.max_year_offset,
    )?;
    let date = dates::parse(&params.fecha)?;
    dates::check_not_before_min_year(date, config.min_year)?;

    let outcome = state.store.remove(params.anio, date).await?;

    Ok(Json(RemoveHolidayResponse {
        mensaje: "Feriado eliminado correctamente".to_string(),
        detalles: RemovedDetails {
            fecha: outcome.record.date,
            nombre: outcome.record.name,
            anio: params.anio,
            total_feriados_restantes: outcome.ledger_len,
        },
    }))
}

/// Mutating routes, guarded by [`require_api_key`].
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/feriados/agregar/", post(add_holiday))
        .route("/feriados/eliminar/", delete(remove_holiday))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ))
}
