// --- File: crates/agenda_gcal/src/logic.rs ---
use crate::service::{DynCalendarService, GcalServiceError};
use agenda_common::duration::SessionDuration;
use agenda_common::models::{CreateEventRequest, EventStatus};
use agenda_common::services::{CalendarEvent, CalendarEventResult, Reminder, ReminderMethod};
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use tracing::debug;

/// `msg` of a successful booking response.
pub const SUCCESS_MSG: &str = "Éxito";
/// `msg` of a failed booking response.
pub const FAILURE_MSG: &str = "Error al agendar";
/// `msg` of a successful status update.
pub const STATUS_UPDATED_MSG: &str = "Estado actualizado";
/// `msg` of a failed status update.
pub const STATUS_FAILURE_MSG: &str = "Error al actualizar el evento";

// Accepted when the client sends a wall-clock time without offset.
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Reminders set on every booking: a mail one day ahead, popups one hour and
/// five minutes ahead.
pub fn reminder_policy() -> Vec<Reminder> {
    vec![
        Reminder {
            method: ReminderMethod::Email,
            minutes: 24 * 60,
        },
        Reminder {
            method: ReminderMethod::Popup,
            minutes: 60,
        },
        Reminder {
            method: ReminderMethod::Popup,
            minutes: 5,
        },
    ]
}

/// Parses the requested start.
///
/// RFC 3339 input keeps its own offset. A timestamp without offset is read as
/// wall-clock time in `time_zone`; during a DST fold the earlier instant wins.
pub fn parse_start(date: &str, time_zone: Tz) -> Result<DateTime<FixedOffset>, GcalServiceError> {
    let date = date.trim();
    if let Ok(start) = DateTime::parse_from_rfc3339(date) {
        return Ok(start);
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok())
        .ok_or_else(|| GcalServiceError::TimeParseError(format!("Invalid date: {:?}", date)))?;

    time_zone
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.fixed_offset())
        .ok_or_else(|| {
            GcalServiceError::TimeParseError(format!(
                "{} does not exist in {}",
                naive,
                time_zone.name()
            ))
        })
}

/// Computes `[start, start + duration_minutes]`.
pub fn compute_window(
    start: DateTime<FixedOffset>,
    duration_minutes: i64,
) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>), GcalServiceError> {
    if duration_minutes <= 0 {
        return Err(GcalServiceError::CalculationError(
            "duration must be positive".to_string(),
        ));
    }
    let end = Duration::try_minutes(duration_minutes)
        .and_then(|duration| start.checked_add_signed(duration))
        .ok_or_else(|| {
            GcalServiceError::CalculationError(format!(
                "duration of {} minutes is out of range",
                duration_minutes
            ))
        })?;
    Ok((start, end))
}

/// Description carrying the client's contact data and the payment marker.
pub fn event_description(request: &CreateEventRequest, status: EventStatus) -> String {
    format!(
        "Cliente: {}\nEmail: {}\nTeléfono: {}\n\n{}",
        request.name.trim(),
        request.email.trim(),
        request.phone.trim(),
        status.status_line()
    )
}

fn check_contact(request: &CreateEventRequest) -> Result<(), GcalServiceError> {
    let missing: Vec<&str> = [
        ("name", &request.name),
        ("email", &request.email),
        ("phone", &request.phone),
    ]
    .iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| *field)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(GcalServiceError::InvalidRequest(format!(
            "missing required field(s): {}",
            missing.join(", ")
        )))
    }
}

/// Turns a booking request into the event to insert. Pure; no network.
///
/// Only the offered session lengths (15, 30 and 60 minutes) are accepted.
pub fn build_calendar_event(
    request: &CreateEventRequest,
    time_zone: Tz,
) -> Result<CalendarEvent, GcalServiceError> {
    check_contact(request)?;
    let duration = SessionDuration::try_from(request.duration)
        .map_err(|e| GcalServiceError::InvalidRequest(e.to_string()))?;
    let start = parse_start(&request.date, time_zone)?;
    let (start, end) = compute_window(start, duration.minutes())?;

    Ok(CalendarEvent {
        summary: format!("Cita: {}", request.name.trim()),
        description: event_description(request, EventStatus::Pending),
        start,
        end,
        time_zone: time_zone.name().to_string(),
        attendees: vec![request.email.trim().to_string()],
        reminders: reminder_policy(),
        status: EventStatus::Pending,
    })
}

// --- Booking Logic ---

/// Creates the booking event and asks the calendar to notify the attendee.
///
/// Invalid input is rejected before the calendar is contacted.
pub async fn create_booking_event(
    service: &DynCalendarService,
    calendar_id: &str,
    request: &CreateEventRequest,
    time_zone: Tz,
) -> Result<CalendarEventResult, GcalServiceError> {
    let event = build_calendar_event(request, time_zone)?;
    debug!(
        "Creating event {} - {} in {}",
        event.start.to_rfc3339(),
        event.end.to_rfc3339(),
        calendar_id
    );
    service.create_event(calendar_id, event, true).await
}

/// Marks an existing booking as pending or paid.
pub async fn update_booking_status(
    service: &DynCalendarService,
    calendar_id: &str,
    event_id: &str,
    status: EventStatus,
) -> Result<CalendarEventResult, GcalServiceError> {
    if event_id.trim().is_empty() {
        return Err(GcalServiceError::InvalidRequest(
            "event id is required".to_string(),
        ));
    }
    service
        .update_event_status(calendar_id, event_id, status)
        .await
}
