// --- File: crates/agenda_common/src/models.rs ---
//! Wire models of the gateway API, shared by the server and the booking client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of the status line inside an event description.
pub const STATUS_LINE_PREFIX: &str = "Estado: ";

/// Payment state of a booked session, carried on the calendar event as a
/// description marker plus a color.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Pending,
    Paid,
}

impl EventStatus {
    pub fn marker(self) -> &'static str {
        match self {
            EventStatus::Pending => "PENDIENTE DE PAGO",
            EventStatus::Paid => "PAGADO",
        }
    }

    /// Google Calendar color id: 9 is blue, 10 is green.
    pub fn color_id(self) -> &'static str {
        match self {
            EventStatus::Pending => "9",
            EventStatus::Paid => "10",
        }
    }

    pub fn status_line(self) -> String {
        format!("{}{}", STATUS_LINE_PREFIX, self.marker())
    }

    /// Rewrites `description` so its status line carries this status.
    ///
    /// Any existing `Estado: ` line is replaced; otherwise the line is
    /// appended after a blank line. Other lines are kept as they are.
    pub fn apply_to(self, description: &str) -> String {
        let mut replaced = false;
        let lines: Vec<String> = description
            .lines()
            .map(|line| {
                if line.starts_with(STATUS_LINE_PREFIX) {
                    replaced = true;
                    self.status_line()
                } else {
                    line.to_string()
                }
            })
            .collect();

        if replaced {
            return lines.join("\n");
        }
        if description.trim().is_empty() {
            return self.status_line();
        }
        format!("{}\n\n{}", description.trim_end(), self.status_line())
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Pending => write!(f, "PENDING"),
            EventStatus::Paid => write!(f, "PAID"),
        }
    }
}

/// Body of `POST /api/crear-evento`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Ana López"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = "ana@example.com"))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(example = "5512345678"))]
    pub phone: String,
    /// ISO-8601 start, with or without offset.
    #[cfg_attr(feature = "openapi", schema(example = "2025-03-01T10:00:00-06:00"))]
    pub date: String,
    /// Minutes.
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub duration: i64,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub msg: String,
    pub link: Option<String>,
    #[serde(rename = "eventId")]
    pub event_id: Option<String>,
}

/// Body of every failed API call.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub msg: String,
    pub error: String,
}

/// Body of `PATCH /api/admin/eventos/{event_id}/estado`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: EventStatus,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatusResponse {
    pub msg: String,
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub status: EventStatus,
}
