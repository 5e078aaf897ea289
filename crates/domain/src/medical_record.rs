use crate::shared::entity::{Entity, ID};

/// A doctor's record of a visit. The prescriptions text is what the
/// prescription alert scanner and the document renderer care about.
#[derive(Debug, Clone)]
pub struct MedicalRecord {
    pub id: ID,
    pub patient_id: ID,
    pub doctor_id: ID,
    /// Creation timestamp in millis
    pub created: i64,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescriptions: Option<String>,
    pub notes: Option<String>,
}

impl MedicalRecord {
    pub fn new(patient_id: ID, doctor_id: ID, created: i64) -> Self {
        Self {
            id: Default::default(),
            patient_id,
            doctor_id,
            created,
            diagnosis: None,
            treatment: None,
            prescriptions: None,
            notes: None,
        }
    }

    pub fn has_prescriptions(&self) -> bool {
        self.prescriptions
            .as_deref()
            .map_or(false, |p| !p.trim().is_empty())
    }
}

impl Entity for MedicalRecord {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
