use crate::shared::entity::ID;

/// Link between an external chat identity and a patient record. Scanners
/// only ever consider verified bindings; re-verifying with another email
/// simply overwrites the binding.
#[derive(Debug, Clone)]
pub struct ChatBinding {
    pub recipient_id: i64,
    pub email: String,
    pub patient_id: ID,
    pub is_verified: bool,
}

impl ChatBinding {
    pub fn verified(recipient_id: i64, email: &str, patient_id: ID) -> Self {
        Self {
            recipient_id,
            email: email.into(),
            patient_id,
            is_verified: true,
        }
    }
}
