use serde::{Deserialize, Serialize};

/// Values collected step by step by the medication-setup chat flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicationDraft {
    pub medication_name: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub times_per_day: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Where a recipient is in a multi-step chat flow. The store keeps at most
/// one state per recipient; no stored state means the conversation is idle.
/// Steps only advance along the transition table below, and any state can be
/// cleared back to idle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ConversationState {
    AwaitingEmail,
    AwaitingMedicationName(MedicationDraft),
    AwaitingMedicationDosage(MedicationDraft),
    AwaitingMedicationFrequency(MedicationDraft),
    AwaitingMedicationTimesPerDay(MedicationDraft),
    AwaitingMedicationStartDate(MedicationDraft),
    AwaitingMedicationEndDate(MedicationDraft),
}

impl ConversationState {
    /// Transition table: `from` of `None` is the idle state. Clearing a
    /// state is deletion and is always allowed, so it does not appear here.
    pub fn can_transition(from: Option<&ConversationState>, to: &ConversationState) -> bool {
        use ConversationState::*;
        matches!(
            (from, to),
            (None, AwaitingEmail)
                | (None, AwaitingMedicationName(_))
                | (Some(AwaitingMedicationName(_)), AwaitingMedicationDosage(_))
                | (Some(AwaitingMedicationDosage(_)), AwaitingMedicationFrequency(_))
                | (Some(AwaitingMedicationFrequency(_)), AwaitingMedicationTimesPerDay(_))
                | (Some(AwaitingMedicationTimesPerDay(_)), AwaitingMedicationStartDate(_))
                | (Some(AwaitingMedicationStartDate(_)), AwaitingMedicationEndDate(_))
        )
    }
}
