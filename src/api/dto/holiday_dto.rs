//! Read-side DTOs: per-year listing, date lookup and upcoming holidays.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::HolidayRecord;
use crate::domain::dates::DATE_FORMAT;
use crate::service::UpcomingHoliday;

/// Response body for `GET /feriados/{anio}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct YearHolidaysResponse {
    /// Requested year.
    pub anio: i32,
    /// Holidays of that year in date order.
    pub feriados: Vec<HolidayRecord>,
}

/// Response body for `GET /feriados/consultar/{fecha}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DateCheckResponse {
    /// Queried date, `YYYY-MM-DD`.
    pub fecha: String,
    /// Whether the date is a holiday.
    pub es_feriado: bool,
    /// Holiday name when `es_feriado` is true.
    pub nombre: Option<String>,
    /// Present only when the year has no holiday data at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
}

/// Query parameters for `GET /feriados/proximos`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpcomingParams {
    /// How many holidays to return (1 to the configured maximum, default 5).
    pub cantidad: Option<usize>,
}

/// One entry of the upcoming-holidays list.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpcomingHolidayDto {
    /// Holiday date, `YYYY-MM-DD`.
    pub fecha: String,
    /// Holiday name.
    pub nombre: String,
    /// Whole days from today.
    pub dias_restantes: i64,
}

impl From<UpcomingHoliday> for UpcomingHolidayDto {
    fn from(holiday: UpcomingHoliday) -> Self {
        Self {
            fecha: holiday.date.format(DATE_FORMAT).to_string(),
            nombre: holiday.name,
            dias_restantes: holiday.days_remaining,
        }
    }
}
