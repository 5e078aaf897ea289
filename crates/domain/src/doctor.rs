use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone)]
pub struct Doctor {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub license_number: Option<String>,
    pub phone: Option<String>,
}

impl Doctor {
    pub fn new(first_name: &str, last_name: &str, specialization: &str) -> Self {
        Self {
            id: Default::default(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            specialization: specialization.into(),
            license_number: None,
            phone: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Doctor {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
