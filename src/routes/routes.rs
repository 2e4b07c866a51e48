use actix_web::web;

use crate::handlers::health_handlers::health_check;
use crate::handlers::history_handlers::{
    delete_history_index, delete_history_item, get_history, restore_history_item,
};
use crate::handlers::notification_handlers::drain_notifications;
use crate::handlers::qr_handlers::{
    discard_current, generate_qr, get_generation_state, get_options, get_preview,
    preview_locator, report_load_error, reset_generation,
};

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health/check", web::get().to(health_check))
            .route("/options", web::get().to(get_options))
            .route("/notifications", web::get().to(drain_notifications))
            // Generation and preview
            .route("/qr", web::post().to(generate_qr))
            .route("/qr/state", web::get().to(get_generation_state))
            .route("/qr/reset", web::post().to(reset_generation))
            .route("/qr/preview", web::get().to(get_preview))
            .route("/qr/current", web::delete().to(discard_current))
            .route("/qr/locator", web::post().to(preview_locator))
            .route("/qr/{id}/load-error", web::post().to(report_load_error))
            // History list
            .service(
                web::scope("/history")
                    .route("", web::get().to(get_history))
                    .route("/index/{index}", web::delete().to(delete_history_index))
                    .route("/{id}", web::delete().to(delete_history_item))
                    .route("/{id}/restore", web::post().to(restore_history_item)),
            ),
    );
}
