// --- File: crates/agenda_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait for Google Calendar.

use agenda_common::models::EventStatus;
use agenda_common::services::{BoxFuture, CalendarEvent, CalendarEventResult, CalendarService};
use agenda_common::{external_service_error, not_found, validation_error, AgendaError};
use chrono::Utc;
use google_calendar3::api::{Event, EventAttendee, EventDateTime, EventReminder, EventReminders};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::auth::HubType;

/// Name used when reporting calendar failures to callers.
pub const SERVICE_NAME: &str = "google_calendar";

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Calendar service error: {0}")]
    Upstream(String),
    #[error("Failed to parse time: {0}")]
    TimeParseError(String),
    #[error("Calculation error: {0}")]
    CalculationError(String),
    #[error("Invalid booking request: {0}")]
    InvalidRequest(String),
    #[error("Event not found: {0}")]
    NotFound(String),
}

impl From<GcalServiceError> for AgendaError {
    fn from(err: GcalServiceError) -> Self {
        match err {
            GcalServiceError::ApiError(e) => external_service_error(SERVICE_NAME, e),
            GcalServiceError::Upstream(message) => external_service_error(SERVICE_NAME, message),
            GcalServiceError::TimeParseError(message)
            | GcalServiceError::CalculationError(message)
            | GcalServiceError::InvalidRequest(message) => validation_error(message),
            GcalServiceError::NotFound(event_id) => not_found(format!("event {}", event_id)),
        }
    }
}

/// The calendar backend as seen by handlers and logic.
pub type DynCalendarService = dyn CalendarService<Error = GcalServiceError>;

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    pub fn new(calendar_hub: Arc<HubType>) -> Self {
        Self { calendar_hub }
    }
}

/// Maps a computed event onto the Google API resource.
fn to_google_event(event: CalendarEvent) -> Event {
    let overrides = event
        .reminders
        .iter()
        .map(|reminder| EventReminder {
            method: Some(reminder.method.as_str().to_string()),
            minutes: Some(reminder.minutes),
            ..Default::default()
        })
        .collect();

    Event {
        summary: Some(event.summary),
        description: Some(event.description),
        start: Some(EventDateTime {
            date_time: Some(event.start.with_timezone(&Utc)),
            time_zone: Some(event.time_zone.clone()),
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(event.end.with_timezone(&Utc)),
            time_zone: Some(event.time_zone),
            ..Default::default()
        }),
        attendees: Some(
            event
                .attendees
                .into_iter()
                .map(|email| EventAttendee {
                    email: Some(email),
                    ..Default::default()
                })
                .collect(),
        ),
        reminders: Some(EventReminders {
            use_default: Some(false),
            overrides: Some(overrides),
            ..Default::default()
        }),
        color_id: Some(event.status.color_id().to_string()),
        ..Default::default()
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Inserts the event in a single API call.
    ///
    /// With `notify_attendees` the request carries `sendUpdates=all`, so Google
    /// mails the invitation to the client. Failures are returned unchanged;
    /// nothing is retried.
    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
        notify_attendees: bool,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let new_event = to_google_event(event);

            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .send_updates(if notify_attendees { "all" } else { "none" })
                .doit()
                .await?;

            if created_event.id.is_none() {
                return Err(GcalServiceError::Upstream(
                    "event created without an id".to_string(),
                ));
            }
            debug!("Inserted event {:?} in {}", created_event.id, calendar_id);

            Ok(CalendarEventResult {
                event_id: created_event.id,
                html_link: created_event.html_link,
                status: created_event
                    .status
                    .unwrap_or_else(|| "confirmed".to_string()),
            })
        })
    }

    /// Reads the current description, swaps its status line and patches
    /// description and color together.
    fn update_event_status(
        &self,
        calendar_id: &str,
        event_id: &str,
        status: EventStatus,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let event_id = event_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let existing = match calendar_hub.events().get(&calendar_id, &event_id).doit().await {
                Ok((_response, event)) => event,
                Err(e) if is_not_found(&e) => {
                    return Err(GcalServiceError::NotFound(event_id));
                }
                Err(e) => return Err(GcalServiceError::ApiError(e)),
            };

            let description = status.apply_to(existing.description.as_deref().unwrap_or(""));
            let patch = Event {
                description: Some(description),
                color_id: Some(status.color_id().to_string()),
                ..Default::default()
            };

            let (_response, updated_event) = calendar_hub
                .events()
                .patch(patch, &calendar_id, &event_id)
                .send_updates("none")
                .doit()
                .await?;

            info!("Event {} marked as {}", event_id, status);

            Ok(CalendarEventResult {
                event_id: updated_event.id.or(Some(event_id)),
                html_link: updated_event.html_link,
                status: updated_event
                    .status
                    .unwrap_or_else(|| "confirmed".to_string()),
            })
        })
    }
}

/// True when Google answered 404 for the requested event, either as a raw
/// failure response or as a decoded error body.
pub(crate) fn is_not_found(err: &google_calendar3::Error) -> bool {
    match err {
        google_calendar3::Error::Failure(response) => response.status() == 404,
        google_calendar3::Error::BadRequest(body) => body["error"]["code"] == 404,
        _ => false,
    }
}
