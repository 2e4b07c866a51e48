use actix_web::{HttpResponse, web};

use crate::state::app_state::AppState;

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    // Make sure the history backend can still be read
    let readable = match state.core() {
        Ok(core) => core.history.is_readable(),
        Err(_) => false,
    };

    if readable {
        HttpResponse::Ok().json(serde_json::json!({ "success": true }))
    } else {
        HttpResponse::InternalServerError()
            .json(serde_json::json!({ "success": false, "error": "History storage unavailable" }))
    }
}
