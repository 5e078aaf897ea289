use crate::preferences::dtos::NotificationPreferencesDTO;
use mediconnect_domain::NotificationPreferences;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesResponse {
    pub preferences: NotificationPreferencesDTO,
}

impl PreferencesResponse {
    pub fn new(preferences: &NotificationPreferences) -> Self {
        Self {
            preferences: NotificationPreferencesDTO::new(preferences),
        }
    }
}

pub mod get_preferences {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub recipient_id: i64,
    }

    pub type APIResponse = PreferencesResponse;
}

pub mod update_preferences {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PathParams {
        pub recipient_id: i64,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub appointment_reminders: Option<bool>,
        #[serde(default)]
        pub prescription_alerts: Option<bool>,
        #[serde(default)]
        pub medication_reminders: Option<bool>,
        #[serde(default)]
        pub general_notifications: Option<bool>,
    }

    pub type APIResponse = PreferencesResponse;
}
