// --- File: crates/agenda_booking/src/session.rs ---
//! The single active booking attempt and its transitions.

use crate::dispatch::{BookingDispatcher, DispatchOutcome};
use crate::error::{BookingError, MissingField, ValidationError};
use crate::phone::normalize_digits;
use crate::staging::{StagedBooking, StagingStore};
use agenda_common::duration::{Price, SessionDuration};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Where the attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    DurationSelected,
    /// The request is frozen, staged and being dispatched.
    ContactPending,
    Submitted,
}

/// Duration plus the price looked up for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSelection {
    pub duration: SessionDuration,
    pub price: Price,
}

impl From<SessionDuration> for BookingSelection {
    fn from(duration: SessionDuration) -> Self {
        Self {
            duration,
            price: duration.price(),
        }
    }
}

/// Contact fields as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Validated contact data. `phone` holds digits only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Everything the gateway needs for one booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub selection: BookingSelection,
    pub contact: ContactInfo,
    pub start: DateTime<FixedOffset>,
}

impl BookingRequest {
    pub fn duration(&self) -> SessionDuration {
        self.selection.duration
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.start + Duration::minutes(self.selection.duration.minutes())
    }
}

/// Checks the form and the selection together so every gap is reported at once.
fn validate(
    selection: Option<BookingSelection>,
    form: &ContactForm,
) -> Result<(BookingSelection, ContactInfo), ValidationError> {
    let phone = normalize_digits(&form.phone);
    let mut missing = Vec::new();
    if form.name.trim().is_empty() {
        missing.push(MissingField::Name);
    }
    if form.email.trim().is_empty() {
        missing.push(MissingField::Email);
    }
    if phone.is_empty() {
        missing.push(MissingField::Phone);
    }

    match selection {
        Some(selection) if missing.is_empty() => Ok((
            selection,
            ContactInfo {
                name: form.name.trim().to_string(),
                email: form.email.trim().to_string(),
                phone,
            },
        )),
        None => {
            missing.push(MissingField::Duration);
            Err(ValidationError { missing })
        }
        Some(_) => Err(ValidationError { missing }),
    }
}

/// One visitor's booking attempt.
#[derive(Debug)]
pub struct BookingSession {
    state: SessionState,
    selection: Option<BookingSelection>,
    request: Option<BookingRequest>,
}

impl Default for BookingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Empty,
            selection: None,
            request: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selection(&self) -> Option<BookingSelection> {
        self.selection
    }

    /// The frozen request, once a submission got past validation.
    pub fn request(&self) -> Option<&BookingRequest> {
        self.request.as_ref()
    }

    /// Selects a session length and its price.
    ///
    /// An unsupported length clears any earlier selection, leaving the
    /// session `Empty`.
    pub fn select_duration(&mut self, minutes: u32) -> Result<BookingSelection, BookingError> {
        match self.state {
            SessionState::Empty | SessionState::DurationSelected => {}
            from => {
                return Err(BookingError::InvalidTransition {
                    from,
                    action: "select a duration",
                })
            }
        }

        match SessionDuration::from_minutes(i64::from(minutes)) {
            Some(duration) => {
                let selection = BookingSelection::from(duration);
                self.selection = Some(selection);
                self.state = SessionState::DurationSelected;
                debug!("Selected {}", duration.label());
                Ok(selection)
            }
            None => {
                warn!("Rejected unsupported duration of {} minutes", minutes);
                self.selection = None;
                self.state = SessionState::Empty;
                Err(BookingError::UnsupportedDuration(minutes))
            }
        }
    }

    /// Validates, freezes, stages and dispatches the booking.
    ///
    /// Validation failures leave the session untouched. A failed dispatch
    /// returns it to `DurationSelected` with the selection kept, so the same
    /// attempt can be resubmitted.
    pub async fn submit(
        &mut self,
        form: &ContactForm,
        start: DateTime<FixedOffset>,
        store: &dyn StagingStore,
        dispatcher: &dyn BookingDispatcher,
    ) -> Result<DispatchOutcome, BookingError> {
        match self.state {
            SessionState::Empty | SessionState::DurationSelected => {}
            from => {
                return Err(BookingError::InvalidTransition {
                    from,
                    action: "submit",
                })
            }
        }

        let (selection, contact) = validate(self.selection, form)?;
        let request = BookingRequest {
            selection,
            contact,
            start,
        };

        self.state = SessionState::ContactPending;
        self.request = Some(request.clone());
        debug!(
            "Booking frozen: {} from {}",
            request.duration(),
            request.start.to_rfc3339()
        );

        if let Err(e) = store.save(&StagedBooking::new(&request, Utc::now())) {
            self.back_to_selection();
            return Err(e);
        }

        match dispatcher.dispatch(&request).await {
            Ok(outcome) => {
                self.state = SessionState::Submitted;
                if outcome.clears_staging() {
                    if let Err(e) = store.clear() {
                        warn!("Booking done but staging record not cleared: {}", e);
                    }
                }
                info!("Booking submitted for {}", request.contact.email);
                Ok(outcome)
            }
            Err(e) => {
                warn!("Booking dispatch failed: {}", e);
                self.back_to_selection();
                Err(e)
            }
        }
    }

    /// Drops the selection and any frozen request. Safe to call repeatedly.
    pub fn reset(&mut self) {
        if self.state != SessionState::Empty {
            debug!("Session reset from {:?}", self.state);
        }
        self.state = SessionState::Empty;
        self.selection = None;
        self.request = None;
    }

    /// Reads a staged record left by an interrupted attempt.
    pub fn recover(store: &dyn StagingStore) -> Result<Option<StagedBooking>, BookingError> {
        let staged = store.load()?;
        if let Some(record) = &staged {
            info!(
                "Found pending booking of {} min for {} staged at {}",
                record.selected_duration.minutes(),
                record.user_data.email,
                record.timestamp.to_rfc3339()
            );
        }
        Ok(staged)
    }

    fn back_to_selection(&mut self) {
        self.request = None;
        self.state = if self.selection.is_some() {
            SessionState::DurationSelected
        } else {
            SessionState::Empty
        };
    }
}
