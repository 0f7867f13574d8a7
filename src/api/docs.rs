//! OpenAPI document, served with the Swagger UI (`swagger-ui` feature) and
//! Redoc (`redoc` feature).

use axum::Router;
use utoipa::OpenApi;
use utoipa::openapi::server::Server;

use crate::api::dto::{
    AddHolidayResponse, AddedDetails, DateCheckResponse, RemoveHolidayResponse, RemovedDetails,
    UpcomingHolidayDto, YearHolidaysResponse,
};
use crate::api::handlers::{admin, holidays, system};
use crate::app_state::AppState;
use crate::config::ServiceConfig;
use crate::domain::HolidayRecord;
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI description of every route.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "API de Feriados Bursátiles Argentinos",
        description = "Argentine stock-market holidays: queries by year and date, upcoming holidays, and authenticated maintenance."
    ),
    paths(
        system::index,
        system::health,
        holidays::list_all,
        holidays::list_by_year,
        holidays::check_date,
        holidays::upcoming,
        admin::add_holiday,
        admin::remove_holiday,
    ),
    components(schemas(
        HolidayRecord,
        YearHolidaysResponse,
        DateCheckResponse,
        UpcomingHolidayDto,
        AddHolidayResponse,
        AddedDetails,
        RemoveHolidayResponse,
        RemovedDetails,
        ErrorResponse,
        ErrorBody,
        system::IndexResponse,
        system::HealthResponse,
    )),
    tags(
        (name = "Holidays", description = "Public holiday queries"),
        (name = "Admin", description = "Maintenance, requires X-API-Key"),
        (name = "System", description = "Index and health"),
    )
)]
pub struct ApiDoc;

/// Builds the document, advertising the prefix as the server base path.
#[must_use]
pub fn openapi(config: &ServiceConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if !config.api_prefix.is_empty() {
        doc.servers = Some(vec![Server::new(config.api_prefix.clone())]);
    }
    doc
}

/// Routes serving the document and whichever UIs are compiled in:
/// `{prefix}/openapi.json`, `{prefix}/docs` (Swagger UI) and
/// `{prefix}/redoc` (Redoc).
pub fn routes(config: &ServiceConfig) -> Router<AppState> {
    let router = Router::new();

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new(config.prefixed("/docs"))
            .url(config.prefixed("/openapi.json"), openapi(config)),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = {
        use axum::Json;
        use axum::routing::get;

        let doc = openapi(config);
        router.route(
            &config.prefixed("/openapi.json"),
            get(move || {
                let doc = doc.clone();
                async move { Json(doc) }
            }),
        )
    };

    #[cfg(feature = "redoc")]
    let router = {
        use utoipa_redoc::{Redoc, Servable};

        router.merge(Redoc::with_url(config.prefixed("/redoc"), openapi(config)))
    };

    router
}
