// --- File: crates/agenda_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! The gateway talks to the calendar only through [`CalendarService`], so
//! handlers can be exercised against an in-memory implementation.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

use crate::models::EventStatus;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Delivery channel of a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderMethod {
    Email,
    Popup,
}

impl ReminderMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ReminderMethod::Email => "email",
            ReminderMethod::Popup => "popup",
        }
    }
}

/// A reminder fired `minutes` before the event starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub method: ReminderMethod,
    pub minutes: i32,
}

/// An event to be inserted, fully computed by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    /// IANA zone name sent alongside both timestamps.
    pub time_zone: String,
    pub attendees: Vec<String>,
    pub reminders: Vec<Reminder>,
    pub status: EventStatus,
}

/// What the calendar service answered for a created or updated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEventResult {
    pub event_id: Option<String>,
    pub html_link: Option<String>,
    pub status: String,
}

/// A trait for calendar service operations.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Insert an event; with `notify_attendees` the service emails every attendee.
    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
        notify_attendees: bool,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error>;

    /// Swap the payment marker in the description and the color of an existing event.
    fn update_event_status(
        &self,
        calendar_id: &str,
        event_id: &str,
        status: EventStatus,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error>;
}
