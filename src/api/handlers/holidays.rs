//! Public read-only holiday endpoints.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{DateCheckResponse, UpcomingHolidayDto, UpcomingParams, YearHolidaysResponse};
use crate::app_state::AppState;
use crate::config::DEFAULT_UPCOMING;
use crate::domain::HolidayCalendar;
use crate::domain::dates::{self, DATE_FORMAT};
use crate::error::{ErrorResponse, ServiceError};

/// `GET /feriados/all`: Every holiday, grouped by year.
#[utoipa::path(
    get,
    path = "/feriados/all",
    tag = "Holidays",
    summary = "List all holidays",
    description = "Returns the whole calendar as an object keyed by year.",
    responses(
        (status = 200, description = "Full calendar", body = serde_json::Value),
    )
)]
pub async fn list_all(State(state): State<AppState>) -> Json<HolidayCalendar> {
    Json(state.store.get_all().await)
}

/// `GET /feriados/{anio}`: Holidays of one year.
///
/// # Errors
///
/// Returns [`ServiceError::YearOutOfRange`] outside the accepted window and
/// [`ServiceError::YearNotFound`] when the year has no data.
#[utoipa::path(
    get,
    path = "/feriados/{anio}",
    tag = "Holidays",
    summary = "List holidays of a year",
    description = "Returns the holidays of the given year in date order.",
    params(
        ("anio" = i32, Path, description = "Year, between MIN_YEAR and the current year plus MAX_YEAR_OFFSET"),
    ),
    responses(
        (status = 200, description = "Holidays of the year", body = YearHolidaysResponse),
        (status = 400, description = "Invalid or out-of-range year", body = ErrorResponse),
        (status = 404, description = "No data for the year", body = ErrorResponse),
    )
)]
pub async fn list_by_year(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<YearHolidaysResponse>, ServiceError> {
    let Path(raw) = path?;
    let year: i32 = raw
        .trim()
        .parse()
        .map_err(|_| ServiceError::InvalidRequest(format!("year must be an integer, got {raw:?}")))?;

    let config = &state.config;
    dates::check_year_in_range(
        year,
        state.current_year(),
        config.min_year,
        config.max_year_offset,
    )?;

    let ledger = state.store.get_year(year).await?;
    Ok(Json(YearHolidaysResponse {
        anio: year,
        feriados: ledger.into_records(),
    }))
}

/// `GET /feriados/consultar/{fecha}`: Is this date a holiday?
///
/// # Errors
///
/// Returns [`ServiceError::InvalidFormat`] for a malformed date and
/// [`ServiceError::DateTooEarly`] before the minimum year.
#[utoipa::path(
    get,
    path = "/feriados/consultar/{fecha}",
    tag = "Holidays",
    summary = "Check a date",
    description = "Tells whether the date is a holiday. When the year has no data at all, `mensaje` says so.",
    params(
        ("fecha" = String, Path, description = "Date in YYYY-MM-DD form"),
    ),
    responses(
        (status = 200, description = "Lookup result", body = DateCheckResponse),
        (status = 400, description = "Invalid date", body = ErrorResponse),
    )
)]
pub async fn check_date(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DateCheckResponse>, ServiceError> {
    let Path(raw) = path?;
    let date = dates::parse(&raw)?;
    dates::check_not_before_min_year(date, state.config.min_year)?;

    let check = state.store.is_holiday(date).await;
    Ok(Json(DateCheckResponse {
        fecha: date.format(DATE_FORMAT).to_string(),
        es_feriado: check.matched,
        nombre: check.name,
        mensaje: (!check.year_has_data)
            .then(|| "No hay datos de feriados para este año".to_string()),
    }))
}

/// `GET /feriados/proximos`: Next holidays from today.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidRequest`] when `cantidad` is not between 1
/// and the configured maximum.
#[utoipa::path(
    get,
    path = "/feriados/proximos",
    tag = "Holidays",
    summary = "Upcoming holidays",
    description = "Returns the next holidays on or after today, with the days remaining until each.",
    params(UpcomingParams),
    responses(
        (status = 200, description = "Upcoming holidays in date order", body = Vec<UpcomingHolidayDto>),
        (status = 400, description = "cantidad out of bounds", body = ErrorResponse),
    )
)]
pub async fn upcoming(
    State(state): State<AppState>,
    query: Result<Query<UpcomingParams>, QueryRejection>,
) -> Result<Json<Vec<UpcomingHolidayDto>>, ServiceError> {
    let Query(params) = query?;
    let count = params.cantidad.unwrap_or(DEFAULT_UPCOMING);
    let max = state.config.max_upcoming;
    if count < 1 || count > max {
        return Err(ServiceError::InvalidRequest(format!(
            "cantidad must be between 1 and {max}"
        )));
    }

    let report = state.store.upcoming(state.today(), count).await;
    Ok(Json(
        report
            .entries
            .into_iter()
            .map(UpcomingHolidayDto::from)
            .collect(),
    ))
}

/// Read-only holiday routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/feriados/all", get(list_all))
        .route("/feriados/proximos", get(upcoming))
        .route("/feriados/consultar/{fecha}", get(check_date))
        .route("/feriados/{anio}", get(list_by_year))
}
