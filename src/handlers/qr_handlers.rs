use actix_web::{HttpResponse, Responder, Result, web};
use validator::Validate;

use crate::state::app_state::{AppState, begin_generation};
use crate::structs::qr_request::GenerateQrRequest;
use crate::structs::qr_response::{GenerateResponse, LocatorResponse, OptionsResponse};

/// Start generating a QR code; the result shows up in the preview once ready
pub async fn generate_qr(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<GenerateQrRequest>,
) -> Result<impl Responder> {
    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let params = begin_generation(&app_state, req.into_parameters())?;
    let locator = app_state.builder.build(&params);

    Ok(HttpResponse::Accepted().json(GenerateResponse::new(params, locator)))
}

/// Build the image locator for a set of parameters without generating
pub async fn preview_locator(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<GenerateQrRequest>,
) -> Result<impl Responder> {
    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let locator = app_state.builder.build(&req.into_parameters());
    Ok(HttpResponse::Ok().json(LocatorResponse { locator }))
}

pub async fn get_generation_state(app_state: web::Data<AppState>) -> Result<impl Responder> {
    let core = app_state.core()?;
    Ok(HttpResponse::Ok().json(core.controller.state()))
}

/// Dismiss a ready or failed result; ignored while generating
pub async fn reset_generation(app_state: web::Data<AppState>) -> Result<impl Responder> {
    let mut core = app_state.core()?;
    let reset = core.controller.reset();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "reset": reset,
        "state": core.controller.state(),
    })))
}

pub async fn get_preview(app_state: web::Data<AppState>) -> Result<impl Responder> {
    let mut core = app_state.core()?;
    Ok(HttpResponse::Ok().json(core.preview().view()))
}

/// Remove the previewed code from history and clear the preview; `removed`
/// is null when nothing was previewed
pub async fn discard_current(app_state: web::Data<AppState>) -> Result<impl Responder> {
    let mut core = app_state.core()?;
    let mut preview = core.preview();
    let removed = preview.discard_current();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "removed": removed,
        "preview": preview.view(),
    })))
}

/// The image widget failed to load a generated locator
pub async fn report_load_error(
    app_state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<impl Responder> {
    let id = path.into_inner();
    let mut core = app_state.core()?;
    if core.preview().report_image_error(id) {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("QR code {} not found in history", id)
        })))
    }
}

pub async fn get_options() -> HttpResponse {
    HttpResponse::Ok().json(OptionsResponse::current())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::{App, http::StatusCode, test};

    use crate::db::backend::MemoryBackend;
    use crate::db::history_store::HistoryStore;
    use crate::routes::init_routes;
    use crate::state::app_state::AppState;
    use crate::utils::generation_mode::GenerationMode;
    use crate::utils::request_builder::RequestBuilder;

    fn app_state(delay_ms: u64) -> (actix_web::web::Data<AppState>, MemoryBackend) {
        let backend = MemoryBackend::new();
        let history = HistoryStore::load(Box::new(backend.clone()), None);
        let state = AppState::new(
            history,
            RequestBuilder::default(),
            GenerationMode::Simulated {
                delay: Duration::from_millis(delay_ms),
            },
        );
        (actix_web::web::Data::new(state), backend)
    }

    #[actix_web::test]
    async fn generate_then_preview_shows_record_in_history() {
        let (state, backend) = app_state(10);
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/qr")
            .set_json(serde_json::json!({ "text": "hello" }))
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["state"]["status"], "generating");
        assert_eq!(
            resp["locator"],
            "https://api.qrserver.com/v1/create-qr-code/?size=300x300&color=000000&bgcolor=ffffff&data=hello&ecc=L&margin=4&format=png"
        );

        tokio::time::sleep(Duration::from_millis(100)).await;

        let req = test::TestRequest::get().uri("/api/qr/preview").to_request();
        let view: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["state"]["status"], "ready");
        assert_eq!(view["current"]["inputText"], "hello");
        assert_eq!(view["history"].as_array().unwrap().len(), 1);
        assert_eq!(view["canGenerate"], true);

        let stored: serde_json::Value =
            serde_json::from_slice(&backend.contents().unwrap()).unwrap();
        assert_eq!(stored[0]["inputText"], "hello");
    }

    #[actix_web::test]
    async fn second_generate_while_in_flight_is_rejected() {
        let (state, _backend) = app_state(50);
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let first = test::TestRequest::post()
            .uri("/api/qr")
            .set_json(serde_json::json!({ "text": "one" }))
            .to_request();
        assert_eq!(test::call_service(&app, first).await.status(), StatusCode::ACCEPTED);

        let second = test::TestRequest::post()
            .uri("/api/qr")
            .set_json(serde_json::json!({ "text": "two" }))
            .to_request();
        assert_eq!(test::call_service(&app, second).await.status(), StatusCode::CONFLICT);

        tokio::time::sleep(Duration::from_millis(200)).await;

        let core = state.core().unwrap();
        assert_eq!(core.history.len(), 1);
        assert_eq!(core.history.records()[0].input_text, "one");
    }

    #[actix_web::test]
    async fn invalid_request_is_rejected() {
        let (state, _backend) = app_state(10);
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/qr")
            .set_json(serde_json::json!({ "text": "" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/qr")
            .set_json(serde_json::json!({ "text": "x", "color": "red" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        assert!(!state.core().unwrap().controller.is_generating());
    }

    #[actix_web::test]
    async fn discard_current_removes_from_history() {
        let (state, backend) = app_state(1);
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::delete().uri("/api/qr/current").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["removed"].is_null());
        assert_eq!(body["preview"]["state"]["status"], "idle");
        assert!(state.core().unwrap().notifications.drain().is_empty());

        let req = test::TestRequest::post()
            .uri("/api/qr")
            .set_json(serde_json::json!({ "text": "bye" }))
            .to_request();
        test::call_service(&app, req).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        let req = test::TestRequest::delete().uri("/api/qr/current").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["removed"]["inputText"], "bye");
        assert!(body["preview"]["current"].is_null());
        assert_eq!(body["preview"]["state"]["status"], "idle");
        assert_eq!(backend.contents().as_deref(), Some(&b"[]"[..]));
    }

    #[actix_web::test]
    async fn reset_dismisses_preview_but_keeps_history() {
        let (state, _backend) = app_state(1);
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/qr")
            .set_json(serde_json::json!({ "text": "keep me" }))
            .to_request();
        test::call_service(&app, req).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        let req = test::TestRequest::get().uri("/api/qr/state").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ready");

        let req = test::TestRequest::post().uri("/api/qr/reset").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["reset"], true);
        assert_eq!(body["state"]["status"], "idle");

        assert_eq!(state.core().unwrap().history.len(), 1);
    }

    #[actix_web::test]
    async fn load_error_only_notifies() {
        let (state, _backend) = app_state(1);
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post().uri("/api/qr/42/load-error").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
        assert!(state.core().unwrap().notifications.drain().is_empty());

        let req = test::TestRequest::post()
            .uri("/api/qr")
            .set_json(serde_json::json!({ "text": "img" }))
            .to_request();
        test::call_service(&app, req).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        let id = state.core().unwrap().history.records()[0].id;
        state.core().unwrap().notifications.drain();

        let req = test::TestRequest::post()
            .uri(&format!("/api/qr/{id}/load-error"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.core().unwrap().history.len(), 1);

        let req = test::TestRequest::get().uri("/api/notifications").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["level"], "error");
        assert_eq!(body[0]["message"], "Failed to load QR code image.");
    }

    #[actix_web::test]
    async fn locator_preview_and_options() {
        let (state, _backend) = app_state(1);
        let app = test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/qr/locator")
            .set_json(serde_json::json!({ "text": "a b", "format": "svg" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["locator"].as_str().unwrap().ends_with("data=a%20b&ecc=L&margin=4&format=svg"));
        assert!(!state.core().unwrap().controller.is_generating());

        let req = test::TestRequest::get().uri("/api/options").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["sizes"][1], "300x300");
        assert_eq!(body["maxTextLength"], 300);
        assert_eq!(body["defaults"]["margin"], 4);
    }
}
