// --- File: crates/agenda_common/src/duration.rs ---
//! Session lengths on offer and their fixed prices.
//!
//! Shared by the booking client, which prices a selection, and the gateway,
//! which refuses any other length.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Currency every price is quoted in.
pub const CURRENCY: &str = "MXN";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unsupported session duration: {0} minutes (expected 15, 30 or 60)")]
pub struct UnsupportedDuration(pub i64);

/// A bookable session length. Prices are tied 1:1 to the length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum SessionDuration {
    Short,
    Standard,
    Extended,
}

/// A price in whole pesos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub u32);

impl SessionDuration {
    pub const ALL: [SessionDuration; 3] = [
        SessionDuration::Short,
        SessionDuration::Standard,
        SessionDuration::Extended,
    ];

    pub fn from_minutes(minutes: i64) -> Option<Self> {
        match minutes {
            15 => Some(SessionDuration::Short),
            30 => Some(SessionDuration::Standard),
            60 => Some(SessionDuration::Extended),
            _ => None,
        }
    }

    pub fn minutes(self) -> i64 {
        match self {
            SessionDuration::Short => 15,
            SessionDuration::Standard => 30,
            SessionDuration::Extended => 60,
        }
    }

    pub fn price(self) -> Price {
        match self {
            SessionDuration::Short => Price(100),
            SessionDuration::Standard => Price(200),
            SessionDuration::Extended => Price(400),
        }
    }

    /// Selection label, e.g. `30 minutos - $200 MXN`.
    pub fn label(self) -> String {
        format!("{} minutos - {}", self.minutes(), self.price())
    }
}

impl TryFrom<i64> for SessionDuration {
    type Error = UnsupportedDuration;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        SessionDuration::from_minutes(minutes).ok_or(UnsupportedDuration(minutes))
    }
}

impl From<SessionDuration> for i64 {
    fn from(duration: SessionDuration) -> Self {
        duration.minutes()
    }
}

impl fmt::Display for SessionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.minutes())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${} {}", self.0, CURRENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_follow_duration() {
        let table: Vec<(i64, u32)> = SessionDuration::ALL
            .iter()
            .map(|d| (d.minutes(), d.price().0))
            .collect();
        assert_eq!(table, vec![(15, 100), (30, 200), (60, 400)]);
    }

    #[test]
    fn unsupported_minutes_have_no_duration() {
        for minutes in [-30, 0, 10, 20, 45, 90, 120, 100_000] {
            assert!(SessionDuration::from_minutes(minutes).is_none());
        }
        assert_eq!(
            SessionDuration::try_from(45),
            Err(UnsupportedDuration(45))
        );
    }

    #[test]
    fn label_matches_selection_text() {
        assert_eq!(SessionDuration::Standard.label(), "30 minutos - $200 MXN");
        assert_eq!(SessionDuration::Extended.label(), "60 minutos - $400 MXN");
    }

    #[test]
    fn serializes_as_minutes() {
        assert_eq!(serde_json::to_string(&SessionDuration::Short).unwrap(), "15");
        let parsed: SessionDuration = serde_json::from_str("60").unwrap();
        assert_eq!(parsed, SessionDuration::Extended);
        assert!(serde_json::from_str::<SessionDuration>("45").is_err());
    }
}
