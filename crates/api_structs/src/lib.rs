mod appointment;
mod binding;
mod chat;
mod doctor;
mod medication;
mod preferences;
mod prescription;
mod status;

pub mod dtos {
    pub use crate::appointment::dtos::*;
    pub use crate::binding::dtos::*;
    pub use crate::doctor::dtos::*;
    pub use crate::medication::dtos::*;
    pub use crate::preferences::dtos::*;
    pub use crate::prescription::dtos::*;
}

pub use crate::appointment::api::*;
pub use crate::binding::api::*;
pub use crate::chat::api::*;
pub use crate::medication::api::*;
pub use crate::preferences::api::*;
pub use crate::prescription::api::*;
pub use crate::status::api::*;
