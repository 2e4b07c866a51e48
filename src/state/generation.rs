use crate::errors::GenerationError;
use crate::models::generation::GenerationState;
use crate::models::qr_code::QrRecord;
use crate::models::qr_params::QrParameters;
use crate::utils::id_source::IdSource;
use crate::utils::request_builder::RequestBuilder;

/// Owns the transient generation state.
///
/// Transitions:
///
/// | from                  | event                 | to                  |
/// |-----------------------|-----------------------|---------------------|
/// | Idle / Ready / Failed | `start` (text set)    | Generating          |
/// | Generating            | `start`               | rejected            |
/// | Generating            | `complete(Ok)`        | Ready(record)       |
/// | Generating            | `complete(Err)`       | Failed(reason)      |
/// | Ready / Failed        | `reset`               | Idle                |
/// | Generating            | `reset`               | unchanged           |
///
/// An in-flight generation cannot be cancelled.
pub struct GenerationController {
    state: GenerationState,
    builder: RequestBuilder,
    ids: IdSource,
}

impl GenerationController {
    pub fn new(builder: RequestBuilder, ids: IdSource) -> Self {
        Self {
            state: GenerationState::Idle,
            builder,
            ids,
        }
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn is_generating(&self) -> bool {
        self.state.is_generating()
    }

    /// Begin a generation. The parameters are captured here; later edits in
    /// the UI do not affect the record this generation produces.
    pub fn start(&mut self, params: QrParameters) -> Result<QrParameters, GenerationError> {
        if !params.can_generate() {
            return Err(GenerationError::EmptyText);
        }
        if self.is_generating() {
            log::debug!("Generation already in flight, rejecting start");
            return Err(GenerationError::AlreadyGenerating);
        }

        log::info!(
            "Generating QR code ({} chars, {}, {})",
            params.text.chars().count(),
            params.size,
            params.format
        );
        self.state = GenerationState::Generating {
            parameters: params.clone(),
        };
        Ok(params)
    }

    /// Finish the in-flight generation. Returns the new record on success;
    /// `None` when nothing was in flight or the generation failed.
    pub fn complete(&mut self, outcome: Result<(), String>) -> Option<QrRecord> {
        let params = match std::mem::take(&mut self.state) {
            GenerationState::Generating { parameters } => parameters,
            other => {
                log::warn!("Completion arrived while {}, ignoring", other.name());
                self.state = other;
                return None;
            }
        };

        let outcome = outcome.and_then(|()| {
            self.ids
                .next_id()
                .ok_or_else(|| "no record ids left".to_string())
        });

        match outcome {
            Ok(id) => {
                let record = QrRecord::new(
                    id,
                    params.text.clone(),
                    self.builder.build(&params),
                    params.size,
                    params.format,
                );
                log::info!("QR code {} ready", record.id);
                self.state = GenerationState::Ready {
                    record: record.clone(),
                };
                Some(record)
            }
            Err(reason) => {
                log::warn!("QR code generation failed: {}", reason);
                self.state = GenerationState::Failed { reason };
                None
            }
        }
    }

    /// Show an existing record as the current one.
    pub fn show(&mut self, record: QrRecord) -> Result<(), GenerationError> {
        if self.is_generating() {
            return Err(GenerationError::AlreadyGenerating);
        }
        self.state = GenerationState::Ready { record };
        Ok(())
    }

    /// Drop any ready or failed result. Has no effect while generating.
    pub fn reset(&mut self) -> bool {
        if self.is_generating() {
            return false;
        }
        self.state = GenerationState::Idle;
        true
    }
}
