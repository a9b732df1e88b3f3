// File: services/agenda_backend/src/main.rs
use agenda_common::AgendaError;
use agenda_config::{load_config, AppConfig};
#[cfg(feature = "gcal")]
use agenda_gcal::routes as gcal_routes;
use axum::{routing::get, Router};
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{info, warn};

/// Landing page served next to the API in development builds.
const STATIC_DIR: &str = "public";

async fn banner() -> &'static str {
    "Agenda booking API"
}

/// Builds the `/api` router. The gateway is mounted only when `use_gcal` is set,
/// and a gateway that cannot be configured aborts start-up.
async fn api_router(config: Arc<AppConfig>) -> Result<Router, AgendaError> {
    #[allow(unused_mut)] // only mutated when the gcal feature is on
    let mut router = Router::new().route("/", get(banner));

    if config.use_gcal {
        #[cfg(feature = "gcal")]
        {
            router = router.merge(gcal_routes::routes(config.clone()).await?);
        }
        #[cfg(not(feature = "gcal"))]
        warn!("use_gcal is set but the backend was built without the gcal feature");
    } else {
        warn!("use_gcal is off; booking endpoints are not mounted");
    }

    Ok(Router::new()
        .nest("/api", router)
        .layer(CorsLayer::permissive()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    agenda_common::logging::init();
    let config = Arc::new(load_config()?);

    let mut app = api_router(config.clone()).await?;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "gcal")]
        use agenda_gcal::doc::GcalApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Agenda API",
                version = "0.1.0",
                description = "Booking gateway for counselling sessions",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        #[allow(unused_mut)]
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "gcal")]
        openapi_doc.merge(GcalApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    // Serve the landing page in dev mode
    if cfg!(debug_assertions) {
        info!("Development build, serving static files from {}", STATIC_DIR);
        app = app.fallback_service(ServeDir::new(STATIC_DIR));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_banner_without_gateway() {
        let config = Arc::new(AppConfig::default());
        let app = api_router(config).await.unwrap();

        let response = app
            .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Agenda booking API");
    }

    #[tokio::test]
    async fn test_booking_route_absent_when_gateway_off() {
        let app = api_router(Arc::new(AppConfig::default())).await.unwrap();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/crear-evento")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[cfg(feature = "gcal")]
    #[tokio::test]
    async fn test_unconfigured_gateway_refuses_to_start() {
        use agenda_common::HttpStatusCode;

        let config = Arc::new(AppConfig {
            use_gcal: true,
            ..Default::default()
        });
        let err = api_router(config).await.err().expect("start-up must fail");
        assert_eq!(err.status_code(), 503);
    }
}
