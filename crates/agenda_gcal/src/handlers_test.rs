#[cfg(test)]
mod tests {
    use crate::handlers::GcalState;
    use crate::routes::router;
    use crate::service::mock::MockCalendarService;
    use agenda_common::models::{CreateEventResponse, ErrorResponse, EventStatus, UpdateStatusResponse};
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        Router,
    };
    use chrono_tz::America::Mexico_City;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(service: Arc<MockCalendarService>) -> GcalState {
        GcalState {
            calendar_id: "agenda".to_string(),
            time_zone: Mexico_City,
            calendar: service,
        }
    }

    fn app(service: Arc<MockCalendarService>) -> Router {
        router(state(service), true)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn booking_body() -> Value {
        json!({
            "name": "Ana López",
            "email": "ana@example.com",
            "phone": "5512345678",
            "date": "2025-03-01T10:00:00-06:00",
            "duration": 30
        })
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_event_handler_success() {
        let service = Arc::new(MockCalendarService::new());
        let response = app(service.clone())
            .oneshot(json_request(Method::POST, "/crear-evento", booking_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: CreateEventResponse = read_json(response).await;
        assert_eq!(body.msg, "Éxito");

        let stored = service.events("agenda");
        assert_eq!(stored.len(), 1);
        assert_eq!(body.event_id.as_deref(), Some(stored[0].id.as_str()));
        assert!(body.link.unwrap().contains(&stored[0].id));

        let event = &stored[0].event;
        assert_eq!(event.start.to_rfc3339(), "2025-03-01T10:00:00-06:00");
        assert_eq!(event.end.to_rfc3339(), "2025-03-01T10:30:00-06:00");
        assert_eq!(event.status, EventStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_event_handler_calendar_failure() {
        let service = Arc::new(MockCalendarService::failing("Quota exceeded"));
        let response = app(service.clone())
            .oneshot(json_request(Method::POST, "/crear-evento", booking_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.msg, "Error al agendar");
        assert_eq!(body.error, "Quota exceeded");
        assert!(service.events("agenda").is_empty());
    }

    #[tokio::test]
    async fn test_create_event_handler_rejects_missing_fields() {
        let service = Arc::new(MockCalendarService::new());
        let mut body = booking_body();
        body["email"] = json!("");

        let response = app(service.clone())
            .oneshot(json_request(Method::POST, "/crear-evento", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.msg, "Error al agendar");
        assert!(body.error.contains("email"));
        assert!(service.events("agenda").is_empty());
    }

    #[tokio::test]
    async fn test_create_event_handler_rejects_malformed_body() {
        let service = Arc::new(MockCalendarService::new());
        let response = app(service.clone())
            .oneshot(json_request(
                Method::POST,
                "/crear-evento",
                json!({ "name": "Ana López", "duration": "treinta" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.msg, "Error al agendar");
        assert!(service.events("agenda").is_empty());
    }

    #[tokio::test]
    async fn test_create_event_handler_rejects_bad_date() {
        let service = Arc::new(MockCalendarService::new());
        let mut body = booking_body();
        body["date"] = json!("no-es-fecha");

        let response = app(service.clone())
            .oneshot(json_request(Method::POST, "/crear-evento", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.msg, "Error al agendar");
        assert!(!body.error.is_empty());
        assert!(service.events("agenda").is_empty());
    }

    #[tokio::test]
    async fn test_create_event_handler_rejects_unsupported_duration() {
        let service = Arc::new(MockCalendarService::new());
        let mut body = booking_body();
        body["duration"] = json!(45);

        let response = app(service.clone())
            .oneshot(json_request(Method::POST, "/crear-evento", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.msg, "Error al agendar");
        assert!(body.error.contains("unsupported session duration"));
        assert!(service.events("agenda").is_empty());
    }

    #[tokio::test]
    async fn test_update_status_handler_marks_paid() {
        let service = Arc::new(MockCalendarService::new());
        let created: CreateEventResponse = read_json(
            app(service.clone())
                .oneshot(json_request(Method::POST, "/crear-evento", booking_body()))
                .await
                .unwrap(),
        )
        .await;
        let event_id = created.event_id.unwrap();

        let response = app(service.clone())
            .oneshot(json_request(
                Method::PATCH,
                &format!("/admin/eventos/{}/estado", event_id),
                json!({ "status": "PAID" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: UpdateStatusResponse = read_json(response).await;
        assert_eq!(body.msg, "Estado actualizado");
        assert_eq!(body.event_id, event_id);
        assert_eq!(body.status, EventStatus::Paid);

        let stored = &service.events("agenda")[0];
        assert_eq!(stored.event.status.color_id(), "10");
        assert!(stored.event.description.contains("Estado: PAGADO"));
    }

    #[tokio::test]
    async fn test_update_status_handler_unknown_event() {
        let service = Arc::new(MockCalendarService::new());
        let response = app(service)
            .oneshot(json_request(
                Method::PATCH,
                "/admin/eventos/no-such-event/estado",
                json!({ "status": "PAID" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.msg, "Error al actualizar el evento");
        assert!(body.error.contains("no-such-event"));
    }

    #[tokio::test]
    async fn test_update_status_handler_rejects_unknown_status() {
        let service = Arc::new(MockCalendarService::new());
        let response = app(service)
            .oneshot(json_request(
                Method::PATCH,
                "/admin/eventos/any/estado",
                json!({ "status": "REFUNDED" }),
            ))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_status_hook_is_not_mounted_by_default() {
        let service = Arc::new(MockCalendarService::new());
        let response = router(state(service.clone()), false)
            .oneshot(json_request(
                Method::PATCH,
                "/admin/eventos/any/estado",
                json!({ "status": "PAID" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = router(state(service), false)
            .oneshot(json_request(Method::POST, "/crear-evento", booking_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
