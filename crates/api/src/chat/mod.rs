mod handle_chat_message;

use actix_web::web;
use handle_chat_message::chat_webhook_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat/webhook", web::post().to(chat_webhook_controller));
}
