//! DTOs for the authenticated add and remove endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for `POST /feriados/agregar/`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AddHolidayParams {
    /// Year the holiday is filed under.
    pub anio: i32,
    /// Holiday date, `YYYY-MM-DD`; must fall in `anio`.
    pub fecha: String,
    /// Holiday name.
    pub nombre: String,
}

/// Query parameters for `DELETE /feriados/eliminar/`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RemoveHolidayParams {
    /// Year the holiday is filed under.
    pub anio: i32,
    /// Holiday date, `YYYY-MM-DD`.
    pub fecha: String,
}

/// Details of an added holiday.
#[derive(Debug, Serialize, ToSchema)]
pub struct AddedDetails {
    /// Date of the new holiday.
    pub fecha: String,
    /// Year it was filed under.
    pub anio: i32,
    /// Number of holidays in that year after the insert.
    pub total_feriados_anio: usize,
}

/// Response body for `POST /feriados/agregar/`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AddHolidayResponse {
    /// Confirmation message.
    pub mensaje: String,
    /// What was inserted.
    pub detalles: AddedDetails,
}

/// Details of a removed holiday.
#[derive(Debug, Serialize, ToSchema)]
pub struct RemovedDetails {
    /// Date of the removed holiday.
    pub fecha: String,
    /// Name of the removed holiday.
    pub nombre: String,
    /// Year it was filed under.
    pub anio: i32,
    /// Number of holidays left in that year.
    pub total_feriados_restantes: usize,
}

/// Response body for `DELETE /feriados/eliminar/`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RemoveHolidayResponse {
    /// Confirmation message.
    pub mensaje: String,
    /// What was removed.
    pub detalles: RemovedDetails,
}
