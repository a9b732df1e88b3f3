// File: crates/agenda_gcal/src/handlers.rs
use crate::logic::{
    create_booking_event, update_booking_status, FAILURE_MSG, STATUS_FAILURE_MSG,
    STATUS_UPDATED_MSG, SUCCESS_MSG,
};
use crate::service::DynCalendarService;
use agenda_common::models::{
    CreateEventRequest, CreateEventResponse, UpdateStatusRequest, UpdateStatusResponse,
};
use agenda_common::{validation_error, AgendaError, ApiFailure};
use agenda_config::{ConfigurationError, GcalConfig};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use chrono_tz::Tz;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info};

// Shared state needed by GCal handlers; resolved once at start-up.
#[derive(Clone)]
pub struct GcalState {
    pub calendar_id: String,
    pub time_zone: Tz,
    pub calendar: Arc<DynCalendarService>, // Share the authenticated Calendar client
}

impl GcalState {
    /// Resolves calendar id and time zone from a validated config section.
    pub fn new(
        config: &GcalConfig,
        calendar: Arc<DynCalendarService>,
    ) -> Result<Self, ConfigurationError> {
        let calendar_id = config.calendar_id()?.to_string();
        let time_zone = Tz::from_str(config.time_zone()).map_err(|e| ConfigurationError::Invalid {
            key: "gcal.time_zone",
            reason: e.to_string(),
        })?;
        Ok(Self {
            calendar_id,
            time_zone,
            calendar,
        })
    }
}

/// Every failed booking, invalid input included, answers 500 with the
/// `Error al agendar` body the landing page expects.
fn booking_failure(error: impl Into<AgendaError>) -> ApiFailure {
    ApiFailure::new(FAILURE_MSG, error).with_status(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Handler to create the calendar event for a booking.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/crear-evento",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Event created", body = CreateEventResponse),
        (status = 500, description = "Invalid booking request or calendar service failure", body = agenda_common::models::ErrorResponse)
    ),
    tag = "GCal"
))]
pub async fn create_event_handler(
    State(state): State<Arc<GcalState>>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<Json<CreateEventResponse>, ApiFailure> {
    let Json(payload) = payload.map_err(|rejection| {
        info!("Rejected booking body: {}", rejection.body_text());
        booking_failure(validation_error(rejection.body_text()))
    })?;

    info!(
        "Booking {} min for {} at {}",
        payload.duration, payload.email, payload.date
    );

    match create_booking_event(
        state.calendar.as_ref(),
        &state.calendar_id,
        &payload,
        state.time_zone,
    )
    .await
    {
        Ok(created_event) => {
            info!("Event created: {:?}", created_event.event_id);
            Ok(Json(CreateEventResponse {
                msg: SUCCESS_MSG.to_string(),
                link: created_event.html_link,
                event_id: created_event.event_id,
            }))
        }
        Err(e) => {
            error!("{}: {}", FAILURE_MSG, e);
            Err(booking_failure(e))
        }
    }
}

/// Handler for the payment-confirmation hook: swaps marker and color of an event.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    patch,
    path = "/admin/eventos/{event_id}/estado",
    params(("event_id" = String, Path, description = "Calendar event id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = UpdateStatusResponse),
        (status = 404, description = "Event not found", body = agenda_common::models::ErrorResponse),
        (status = 500, description = "Calendar service failure", body = agenda_common::models::ErrorResponse)
    ),
    tag = "GCal"
))]
pub async fn update_event_status_handler(
    State(state): State<Arc<GcalState>>,
    Path(event_id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<UpdateStatusResponse>, ApiFailure> {
    let Json(payload) = payload.map_err(|rejection| {
        ApiFailure::new(STATUS_FAILURE_MSG, validation_error(rejection.body_text()))
    })?;

    match update_booking_status(
        state.calendar.as_ref(),
        &state.calendar_id,
        &event_id,
        payload.status,
    )
    .await
    {
        Ok(_) => Ok(Json(UpdateStatusResponse {
            msg: STATUS_UPDATED_MSG.to_string(),
            event_id,
            status: payload.status,
        })),
        Err(e) => {
            error!("{} {}: {}", STATUS_FAILURE_MSG, event_id, e);
            Err(ApiFailure::new(STATUS_FAILURE_MSG, e))
        }
    }
}
