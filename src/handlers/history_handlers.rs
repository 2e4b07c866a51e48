use actix_web::{HttpResponse, Responder, Result, web};

use crate::state::app_state::AppState;
use crate::structs::qr_response::history_items;

/// List generated QR codes, newest first
pub async fn get_history(app_state: web::Data<AppState>) -> Result<impl Responder> {
    let core = app_state.core()?;
    Ok(HttpResponse::Ok().json(history_items(core.history.records())))
}

/// Delete a QR code from history by id; unknown ids are ignored
pub async fn delete_history_item(
    app_state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<impl Responder> {
    let id = path.into_inner();
    let mut core = app_state.core()?;
    let mut preview = core.preview();
    let records = preview.remove_by_id(id);
    Ok(HttpResponse::Ok().json(history_items(records)))
}

/// Delete the QR code at a position in the history list
pub async fn delete_history_index(
    app_state: web::Data<AppState>,
    path: web::Path<usize>,
) -> Result<impl Responder> {
    let index = path.into_inner();
    let mut core = app_state.core()?;
    let mut preview = core.preview();
    let records = preview.remove_at(index)?;
    Ok(HttpResponse::Ok().json(history_items(records)))
}

/// Show a history entry in the preview again
pub async fn restore_history_item(
    app_state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<impl Responder> {
    let id = path.into_inner();
    let mut core = app_state.core()?;
    let mut preview = core.preview();
    preview.restore(id)?;
    Ok(HttpResponse::Ok().json(preview.view()))
}
