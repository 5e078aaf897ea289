mod get_upcoming_appointments;

use actix_web::web;
use get_upcoming_appointments::get_upcoming_appointments_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/chat/bindings/{recipient_id}/appointments",
        web::get().to(get_upcoming_appointments_controller),
    );
}
