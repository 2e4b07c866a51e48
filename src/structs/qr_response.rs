use serde::Serialize;

use crate::models::generation::GenerationState;
use crate::models::qr_code::QrRecord;
use crate::models::qr_params::{ErrorCorrection, ImageFormat, QrParameters, QrSize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub state: GenerationState,
    pub locator: String,
}

impl GenerateResponse {
    pub fn new(parameters: QrParameters, locator: String) -> Self {
        Self {
            state: GenerationState::Generating { parameters },
            locator,
        }
    }
}

#[derive(Serialize)]
pub struct LocatorResponse {
    pub locator: String,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItemResponse {
    pub id: u64,
    pub input_text: String,
    pub qr_code_url: String,
    pub size: QrSize,
    pub format: ImageFormat,
    pub created_at: Option<i64>,
}

impl From<&QrRecord> for HistoryItemResponse {
    fn from(record: &QrRecord) -> Self {
        Self {
            id: record.id,
            input_text: record.input_text.clone(),
            qr_code_url: record.qr_code_url.clone(),
            size: record.size,
            format: record.format,
            created_at: record.created_at().map(|t| t.timestamp_millis()),
        }
    }
}

pub fn history_items(records: &[QrRecord]) -> Vec<HistoryItemResponse> {
    records.iter().map(HistoryItemResponse::from).collect()
}

#[derive(Serialize)]
pub struct ChoiceResponse {
    pub value: &'static str,
    pub label: &'static str,
}

/// Choices and defaults for the customization drawer.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub sizes: Vec<&'static str>,
    pub error_corrections: Vec<ChoiceResponse>,
    pub formats: Vec<&'static str>,
    pub max_text_length: u64,
    pub defaults: QrParameters,
}

impl OptionsResponse {
    pub fn current() -> Self {
        Self {
            sizes: QrSize::ALL.iter().map(QrSize::as_str).collect(),
            error_corrections: ErrorCorrection::ALL
                .iter()
                .map(|ecc| ChoiceResponse {
                    value: ecc.as_str(),
                    label: ecc.label(),
                })
                .collect(),
            formats: ImageFormat::ALL.iter().map(ImageFormat::as_str).collect(),
            max_text_length: crate::models::qr_params::MAX_TEXT_CHARS,
            defaults: QrParameters::with_defaults(""),
        }
    }
}
