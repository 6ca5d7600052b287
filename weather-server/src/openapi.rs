use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::models::{CitySnapshot, Condition, ForecastDay, ForecastResponse, Trend, WeatherReport};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::current_weather,
        handlers::forecast,
    ),
    components(schemas(
        CitySnapshot,
        Condition,
        ForecastDay,
        ForecastResponse,
        Trend,
        WeatherReport,
    )),
    tags(
        (name = "weather", description = "Cached weather and forecast endpoints"),
    ),
)]
struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
