// File: crates/agenda_gcal/src/doc.rs

#![cfg(feature = "openapi")]
use agenda_common::models::{
    CreateEventRequest, CreateEventResponse, ErrorResponse, EventStatus, UpdateStatusRequest,
    UpdateStatusResponse,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::create_event_handler,
        crate::handlers::update_event_status_handler
    ),
    components(
        schemas(
            CreateEventRequest,
            CreateEventResponse,
            ErrorResponse,
            EventStatus,
            UpdateStatusRequest,
            UpdateStatusResponse
        )
    ),
    tags(
        (name = "GCal", description = "Google Calendar booking gateway")
    ),
    servers(
        (url = "/api", description = "Booking API server")
    )
)]
pub struct GcalApiDoc;
