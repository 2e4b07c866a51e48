use serde::Serialize;

use crate::db::history_store::HistoryStore;
use crate::errors::{GenerationError, HistoryError, PreviewError};
use crate::models::generation::GenerationState;
use crate::models::notification::Notification;
use crate::models::qr_code::QrRecord;
use crate::models::qr_params::QrParameters;
use crate::state::generation::GenerationController;
use crate::state::notifications::Notifications;

pub const MSG_GENERATED: &str = "QR code generated!";
pub const MSG_REMOVED: &str = "QR code removed!";
pub const MSG_SAVE_FAILED: &str = "Failed to save history.";
pub const MSG_IMAGE_FAILED: &str = "Failed to load QR code image.";

/// Everything the preview and history list render from.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreviewView {
    pub state: GenerationState,
    pub current: Option<QrRecord>,
    pub history: Vec<QrRecord>,
    pub can_generate: bool,
}

/// Keeps the generation result and the history in step.
///
/// Holds no state of its own: "current" is the ready record of the
/// controller, as long as that record is still in history.
pub struct PreviewCoordinator<'a> {
    controller: &'a mut GenerationController,
    history: &'a mut HistoryStore,
    notifications: &'a mut Notifications,
}

impl<'a> PreviewCoordinator<'a> {
    pub fn new(
        controller: &'a mut GenerationController,
        history: &'a mut HistoryStore,
        notifications: &'a mut Notifications,
    ) -> Self {
        Self {
            controller,
            history,
            notifications,
        }
    }

    pub fn start(&mut self, params: QrParameters) -> Result<QrParameters, GenerationError> {
        self.controller.start(params)
    }

    /// Apply the outcome of the in-flight generation. A new record goes
    /// straight into history and becomes current.
    pub fn finish(&mut self, outcome: Result<(), String>) -> Option<QrRecord> {
        let Some(record) = self.controller.complete(outcome) else {
            if let GenerationState::Failed { reason } = self.controller.state() {
                let message = format!("QR code generation failed: {}", reason);
                self.notifications.push(Notification::error(message));
            }
            return None;
        };

        let saved = self.history.append(record.clone()).map(|_| ());
        self.note_saved(saved);
        self.notifications.push(Notification::success(MSG_GENERATED));
        Some(record)
    }

    pub fn current(&self) -> Option<&QrRecord> {
        self.controller
            .state()
            .record()
            .filter(|record| self.history.contains(record.id))
    }

    /// Remove the current record from history and clear the preview.
    pub fn discard_current(&mut self) -> Option<QrRecord> {
        let record = self.current().cloned()?;
        let saved = self.history.remove_by_id(record.id).map(|_| ());
        self.controller.reset();
        self.note_saved(saved);
        self.notifications.push(Notification::success(MSG_REMOVED));
        Some(record)
    }

    pub fn remove_by_id(&mut self, id: u64) -> &[QrRecord] {
        if self.history.contains(id) {
            let saved = self.history.remove_by_id(id).map(|_| ());
            self.note_saved(saved);
            self.notifications.push(Notification::success(MSG_REMOVED));
            self.clear_stale_current();
        }
        self.history.records()
    }

    pub fn remove_at(&mut self, index: usize) -> Result<&[QrRecord], HistoryError> {
        match self.history.remove_at(index).map(|_| ()) {
            Err(e @ HistoryError::IndexOutOfRange { .. }) => return Err(e),
            saved => self.note_saved(saved),
        }
        self.notifications.push(Notification::success(MSG_REMOVED));
        self.clear_stale_current();
        Ok(self.history.records())
    }

    /// Bring a history entry back into the preview.
    pub fn restore(&mut self, id: u64) -> Result<QrRecord, PreviewError> {
        let record = self
            .history
            .get(id)
            .cloned()
            .ok_or(HistoryError::NotFound(id))?;
        self.controller.show(record.clone())?;
        Ok(record)
    }

    /// The image widget could not load a locator. The record stays put.
    /// Returns false for ids that are not in history.
    pub fn report_image_error(&mut self, id: u64) -> bool {
        if !self.history.contains(id) {
            log::debug!("Ignoring load error for unknown QR code {}", id);
            return false;
        }
        log::warn!("Image for QR code {} failed to load", id);
        self.notifications.push(Notification::error(MSG_IMAGE_FAILED));
        true
    }

    pub fn view(&self) -> PreviewView {
        PreviewView {
            state: self.controller.state().clone(),
            current: self.current().cloned(),
            history: self.history.records().to_vec(),
            can_generate: !self.controller.is_generating(),
        }
    }

    fn clear_stale_current(&mut self) {
        let stale = self
            .controller
            .state()
            .record()
            .is_some_and(|record| !self.history.contains(record.id));
        if stale {
            self.controller.reset();
        }
    }

    fn note_saved(&mut self, saved: Result<(), HistoryError>) {
        if let Err(e) = saved {
            log::error!("History not persisted: {}", e);
            self.notifications.push(Notification::error(MSG_SAVE_FAILED));
        }
    }
}
