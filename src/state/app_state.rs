use std::sync::{Mutex, MutexGuard};

use actix_web::web;

use crate::config::{AppConfig, HistoryStorage};
use crate::db::backend::{FileBackend, HistoryBackend, MemoryBackend};
use crate::db::history_store::HistoryStore;
use crate::errors::{PreviewError, StateError};
use crate::models::qr_params::QrParameters;
use crate::state::generation::GenerationController;
use crate::state::notifications::Notifications;
use crate::state::preview::PreviewCoordinator;
use crate::utils::generation_mode::GenerationMode;
use crate::utils::id_source::IdSource;
use crate::utils::request_builder::RequestBuilder;

/// Generation state, history and pending notifications, guarded together.
pub struct QrCore {
    pub controller: GenerationController,
    pub history: HistoryStore,
    pub notifications: Notifications,
}

impl QrCore {
    pub fn new(history: HistoryStore, builder: RequestBuilder) -> Self {
        let ids = IdSource::starting_after(history.max_id());
        Self {
            controller: GenerationController::new(builder, ids),
            history,
            notifications: Notifications::default(),
        }
    }

    pub fn preview(&mut self) -> PreviewCoordinator<'_> {
        PreviewCoordinator::new(
            &mut self.controller,
            &mut self.history,
            &mut self.notifications,
        )
    }
}

pub struct AppState {
    core: Mutex<QrCore>,
    pub builder: RequestBuilder,
    pub mode: GenerationMode,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(history: HistoryStore, builder: RequestBuilder, mode: GenerationMode) -> Self {
        Self {
            core: Mutex::new(QrCore::new(history, builder.clone())),
            builder,
            mode,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let backend: Box<dyn HistoryBackend> = match &config.history_storage {
            HistoryStorage::File(path) => {
                log::info!("Keeping QR history in {}", path.display());
                Box::new(FileBackend::new(path))
            }
            HistoryStorage::Memory => {
                log::info!("Keeping QR history in memory only");
                Box::new(MemoryBackend::new())
            }
        };
        let history = HistoryStore::load(backend, config.history_limit);
        log::info!("Loaded {} QR codes", history.len());
        Self::new(
            history,
            RequestBuilder::new(config.api_base.clone()),
            config.generation_mode.clone(),
        )
    }

    pub fn core(&self) -> Result<MutexGuard<'_, QrCore>, StateError> {
        self.core.lock().map_err(|_| StateError::LockPoisoned)
    }
}

/// Start a generation and schedule its completion in the background.
///
/// The parameters are captured before anything is awaited, and the state lock
/// is never held across the wait.
pub fn begin_generation(
    state: &web::Data<AppState>,
    params: QrParameters,
) -> Result<QrParameters, PreviewError> {
    let captured = state.core()?.preview().start(params)?;

    let locator = state.builder.build(&captured);
    let state = state.clone();
    actix_web::rt::spawn(async move {
        let outcome = state.mode.run(&state.http, &locator).await;
        match state.core() {
            Ok(mut core) => {
                core.preview().finish(outcome);
            }
            Err(e) => log::error!("Dropping generation result: {}", e),
        }
    });

    Ok(captured)
}
