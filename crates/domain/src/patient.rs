use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct Patient {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub blood_type: Option<String>,
}

impl Patient {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            id: Default::default(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            date_of_birth: None,
            phone: None,
            blood_type: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Patient {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
