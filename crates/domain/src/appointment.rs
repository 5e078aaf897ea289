use crate::shared::entity::{Entity, ID};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidStatusError {
    #[error("Appointment status: {0} is not recognized")]
    Unrecognized(String),
}

impl FromStr for AppointmentStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidStatusError::Unrecognized(s.to_string())),
        }
    }
}

/// A booked visit. Date and time are kept as the stored strings because the
/// web application writes them; reminders are only ever considered while the
/// status is `scheduled`.
#[derive(Debug, Clone)]
pub struct Appointment {
    pub id: ID,
    pub patient_id: ID,
    pub doctor_id: ID,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM, HH:MM:SS, or either with a stray fractional-seconds suffix
    pub time: String,
    /// Duration in minutes
    pub duration: i64,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn new(patient_id: ID, doctor_id: ID, date: &str, time: &str) -> Self {
        Self {
            id: Default::default(),
            patient_id,
            doctor_id,
            date: date.into(),
            time: time.into(),
            duration: 30,
            status: AppointmentStatus::Scheduled,
        }
    }

    /// The stored time string with any fractional-seconds suffix cut off.
    pub fn time_of_day(&self) -> &str {
        self.time.split('.').next().unwrap_or(&self.time)
    }

    pub fn start_datetime(&self) -> anyhow::Result<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")?;
        let time_str = self.time_of_day();
        let time = NaiveTime::parse_from_str(time_str, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(time_str, "%H:%M"))?;
        Ok(date.and_time(time))
    }
}

impl Entity for Appointment {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(date: &str, time: &str) -> Appointment {
        Appointment::new(ID::new(), ID::new(), date, time)
    }

    #[test]
    fn parses_plain_dates_and_times() {
        let start = appointment("2024-06-10", "14:00").start_datetime().unwrap();
        assert_eq!(start.to_string(), "2024-06-10 14:00:00");

        let start = appointment("2024-06-10", "14:00:30").start_datetime().unwrap();
        assert_eq!(start.to_string(), "2024-06-10 14:00:30");
    }

    #[test]
    fn truncates_fractional_seconds_suffix() {
        let start = appointment("2024-06-10", "14:00:00.000000")
            .start_datetime()
            .unwrap();
        assert_eq!(start.to_string(), "2024-06-10 14:00:00");
    }

    #[test]
    fn rejects_malformed_dates_and_times() {
        assert!(appointment("10.06.2024", "14:00").start_datetime().is_err());
        assert!(appointment("2024-06-10", "afternoon").start_datetime().is_err());
        assert!(appointment("2024-13-40", "14:00").start_datetime().is_err());
    }

    #[test]
    fn parses_status_strings() {
        assert_eq!(
            "scheduled".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::Scheduled
        );
        assert!("pending".parse::<AppointmentStatus>().is_err());
    }
}
