mod add_medication_schedule;
mod get_medication_schedules;

use actix_web::web;
use add_medication_schedule::add_medication_schedule_controller;
use get_medication_schedules::get_medication_schedules_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/chat/bindings/{recipient_id}/medications",
        web::get().to(get_medication_schedules_controller),
    );
    cfg.route(
        "/chat/bindings/{recipient_id}/medications",
        web::post().to(add_medication_schedule_controller),
    );
}
