mod get_binding;
mod verify_binding;

use actix_web::web;
use get_binding::get_binding_controller;
use verify_binding::verify_binding_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat/bindings", web::post().to(verify_binding_controller));
    cfg.route(
        "/chat/bindings/{recipient_id}",
        web::get().to(get_binding_controller),
    );
}
