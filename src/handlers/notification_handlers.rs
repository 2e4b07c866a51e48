use actix_web::{HttpResponse, Responder, Result, web};

use crate::state::app_state::AppState;

/// Hand pending toasts to the UI; each one is returned once
pub async fn drain_notifications(app_state: web::Data<AppState>) -> Result<impl Responder> {
    let mut core = app_state.core()?;
    Ok(HttpResponse::Ok().json(core.notifications.drain()))
}
