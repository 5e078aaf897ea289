mod get_prescription_document;
mod get_recent_prescriptions;

use actix_web::web;
use get_prescription_document::get_prescription_document_controller;
use get_recent_prescriptions::get_recent_prescriptions_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/chat/bindings/{recipient_id}/prescriptions",
        web::get().to(get_recent_prescriptions_controller),
    );
    cfg.route(
        "/prescriptions/{record_id}/pdf",
        web::get().to(get_prescription_document_controller),
    );
}
