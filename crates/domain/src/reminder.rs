use crate::shared::entity::ID;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// The two reminder windows for an upcoming appointment. Each kind is
/// eligible while the hours until the appointment fall inside a half-open
/// one-hour interval: [24, 25) and [1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    TwentyFourHours,
    OneHour,
}

impl ReminderKind {
    pub fn for_hours_until(hours_until: f64) -> Option<Self> {
        if (24.0..25.0).contains(&hours_until) {
            Some(Self::TwentyFourHours)
        } else if (1.0..2.0).contains(&hours_until) {
            Some(Self::OneHour)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwentyFourHours => "24h",
            Self::OneHour => "1h",
        }
    }

    /// Human readable window label used in the reminder message.
    pub fn window_label(&self) -> &'static str {
        match self {
            Self::TwentyFourHours => "24 hours",
            Self::OneHour => "1 hour",
        }
    }
}

impl Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidReminderKindError {
    #[error("Reminder kind: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for ReminderKind {
    type Err = InvalidReminderKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(Self::TwentyFourHours),
            "1h" => Ok(Self::OneHour),
            _ => Err(InvalidReminderKindError::Unrecognized(s.to_string())),
        }
    }
}

/// One delivered appointment reminder. The store keeps at most one row per
/// (appointment, kind, calendar day); presence of a row for the current day
/// is what prevents a later scan pass from sending the reminder again.
#[derive(Debug, Clone)]
pub struct ReminderLogEntry {
    pub appointment_id: ID,
    pub patient_id: ID,
    pub kind: ReminderKind,
    /// Clinic-local calendar day the reminder went out, YYYY-MM-DD
    pub sent_on: String,
    /// Timestamp in millis
    pub sent_at: i64,
}
