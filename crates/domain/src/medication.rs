use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;

/// A standing medication plan for a patient. Alert times either come from
/// an explicit comma separated list or are resolved from the times-per-day
/// defaults.
#[derive(Debug, Clone)]
pub struct MedicationSchedule {
    pub id: ID,
    pub patient_id: ID,
    pub medication_name: String,
    pub dosage: String,
    pub frequency: String,
    pub times_per_day: Option<i64>,
    /// Comma separated HH:MM entries, e.g. "08:00, 20:00"
    pub specific_times: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl MedicationSchedule {
    pub fn new(
        patient_id: ID,
        medication_name: &str,
        dosage: &str,
        frequency: &str,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Default::default(),
            patient_id,
            medication_name: medication_name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            times_per_day: None,
            specific_times: None,
            start_date,
            end_date: None,
            is_active: true,
        }
    }

    /// Whether alerts may fire on `day`: the active flag is set and the day
    /// falls inside the start/end window (no end date means open ended).
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.is_active
            && self.start_date <= day
            && self.end_date.map_or(true, |end| end >= day)
    }

    /// Clock times this schedule fires at. An explicit times list wins; an
    /// empty or missing list falls back to the times-per-day defaults, and
    /// an unmapped times-per-day count fires never.
    pub fn times_for_day(&self) -> Vec<String> {
        if let Some(times) = &self.specific_times {
            if !times.trim().is_empty() {
                return times.split(',').map(|t| t.trim().to_string()).collect();
            }
        }
        let defaults: &[&str] = match self.times_per_day {
            Some(1) => &["08:00"],
            Some(2) => &["08:00", "20:00"],
            Some(3) => &["08:00", "14:00", "20:00"],
            Some(4) => &["08:00", "12:00", "16:00", "20:00"],
            _ => &[],
        };
        defaults.iter().map(|t| t.to_string()).collect()
    }
}

impl Entity for MedicationSchedule {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn schedule() -> MedicationSchedule {
        MedicationSchedule::new(ID::new(), "Ibuprofen", "1 tablet", "Daily", date("2024-06-01"))
    }

    #[test]
    fn explicit_times_are_split_and_trimmed() {
        let mut schedule = schedule();
        schedule.specific_times = Some("08:00, 20:00".into());
        assert_eq!(schedule.times_for_day(), vec!["08:00", "20:00"]);
    }

    #[test]
    fn explicit_times_win_over_times_per_day() {
        let mut schedule = schedule();
        schedule.specific_times = Some("09:30".into());
        schedule.times_per_day = Some(3);
        assert_eq!(schedule.times_for_day(), vec!["09:30"]);
    }

    #[test]
    fn empty_explicit_times_fall_back_to_defaults() {
        let mut schedule = schedule();
        schedule.specific_times = Some("".into());
        schedule.times_per_day = Some(2);
        assert_eq!(schedule.times_for_day(), vec!["08:00", "20:00"]);
    }

    #[test]
    fn times_per_day_resolves_default_table() {
        let mut schedule = schedule();
        for (count, expected) in &[
            (1, vec!["08:00"]),
            (2, vec!["08:00", "20:00"]),
            (3, vec!["08:00", "14:00", "20:00"]),
            (4, vec!["08:00", "12:00", "16:00", "20:00"]),
        ] {
            schedule.times_per_day = Some(*count);
            assert_eq!(&schedule.times_for_day(), expected);
        }
    }

    #[test]
    fn unmapped_times_per_day_fires_never() {
        let mut schedule = schedule();
        schedule.times_per_day = Some(7);
        assert!(schedule.times_for_day().is_empty());
        schedule.times_per_day = None;
        assert!(schedule.times_for_day().is_empty());
    }

    #[test]
    fn active_window_includes_start_and_end_days() {
        let mut schedule = schedule();
        schedule.end_date = Some(date("2024-06-20"));
        assert!(!schedule.is_active_on(date("2024-05-31")));
        assert!(schedule.is_active_on(date("2024-06-01")));
        assert!(schedule.is_active_on(date("2024-06-10")));
        assert!(schedule.is_active_on(date("2024-06-20")));
        assert!(!schedule.is_active_on(date("2024-06-21")));
    }

    #[test]
    fn missing_end_date_means_open_ended() {
        let schedule = schedule();
        assert!(schedule.is_active_on(date("2030-01-01")));
    }

    #[test]
    fn inactive_flag_disables_the_schedule() {
        let mut schedule = schedule();
        schedule.is_active = false;
        assert!(!schedule.is_active_on(date("2024-06-10")));
    }
}
