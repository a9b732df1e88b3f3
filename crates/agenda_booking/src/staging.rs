// --- File: crates/agenda_booking/src/staging.rs ---
//! Local record of the last submitted booking.
//!
//! The record is written before dispatch so an interrupted flow can be
//! recognised on the next start. It carries the same keys the landing page
//! keeps under `pendingBooking`.

use crate::error::BookingError;
use crate::session::{BookingRequest, ContactInfo};
use agenda_common::duration::{Price, SessionDuration};
use agenda_config::BookingConfig;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Key of the staged record; the file store appends `.json`.
pub const STAGING_KEY: &str = "pendingBooking";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedBooking {
    pub selected_duration: SessionDuration,
    pub selected_price: Price,
    pub user_data: ContactInfo,
    /// When the record was written, stored as RFC 3339.
    pub timestamp: DateTime<Utc>,
    pub requested_start: DateTime<FixedOffset>,
}

impl StagedBooking {
    pub fn new(request: &BookingRequest, now: DateTime<Utc>) -> Self {
        Self {
            selected_duration: request.selection.duration,
            selected_price: request.selection.price,
            user_data: request.contact.clone(),
            timestamp: now,
            requested_start: request.start,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.timestamp > ttl
    }
}

/// Storage for the one staged booking.
pub trait StagingStore: Send + Sync {
    fn save(&self, record: &StagedBooking) -> Result<(), BookingError>;

    /// The staged record, or `None` when absent or expired. Expired records are removed.
    fn load(&self) -> Result<Option<StagedBooking>, BookingError>;

    /// Removes the record; clearing an empty store is not an error.
    fn clear(&self) -> Result<(), BookingError>;
}

/// Keeps the record as `<dir>/pendingBooking.json`.
pub struct FileStagingStore {
    path: PathBuf,
    ttl: Duration,
}

impl FileStagingStore {
    pub fn new(dir: impl AsRef<Path>, ttl: Duration) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", STAGING_KEY)),
            ttl,
        }
    }

    pub fn from_config(config: &BookingConfig) -> Self {
        Self::new(
            config.staging_dir(),
            Duration::hours(config.staging_ttl_hours()),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StagingStore for FileStagingStore {
    fn save(&self, record: &StagedBooking) -> Result<(), BookingError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)?;
        debug!("Staged booking at {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<StagedBooking>, BookingError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: StagedBooking = serde_json::from_str(&raw)?;
        if record.is_expired(Utc::now(), self.ttl) {
            info!("Discarding staged booking from {}", record.timestamp);
            self.clear()?;
            return Ok(None);
        }
        Ok(Some(record))
    }

    fn clear(&self) -> Result<(), BookingError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store, for callers that need no persistence.
pub struct MemoryStagingStore {
    record: Mutex<Option<StagedBooking>>,
    ttl: Duration,
}

impl MemoryStagingStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            record: Mutex::new(None),
            ttl,
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<StagedBooking>>, BookingError> {
        self.record
            .lock()
            .map_err(|_| BookingError::Staging("staging lock poisoned".to_string()))
    }
}

impl Default for MemoryStagingStore {
    fn default() -> Self {
        Self::new(Duration::hours(agenda_config::DEFAULT_STAGING_TTL_HOURS))
    }
}

impl StagingStore for MemoryStagingStore {
    fn save(&self, record: &StagedBooking) -> Result<(), BookingError> {
        *self.slot()? = Some(record.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<StagedBooking>, BookingError> {
        let mut slot = self.slot()?;
        if slot
            .as_ref()
            .is_some_and(|record| record.is_expired(Utc::now(), self.ttl))
        {
            *slot = None;
        }
        Ok(slot.clone())
    }

    fn clear(&self) -> Result<(), BookingError> {
        *self.slot()? = None;
        Ok(())
    }
}
