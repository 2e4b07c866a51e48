use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::qr_params::{ImageFormat, QrSize};

/// A generated QR code as it is kept in history.
///
/// Field names follow the persisted layout: `{id, inputText, qrCodeUrl, size, format}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QrRecord {
    pub id: u64,              // Unix millis at creation, strictly increasing
    pub input_text: String,   // The text encoded into the image
    pub qr_code_url: String,  // Locator of the rendered image
    pub size: QrSize,
    pub format: ImageFormat,
}

impl QrRecord {
    pub fn new(
        id: u64,
        input_text: String,
        qr_code_url: String,
        size: QrSize,
        format: ImageFormat,
    ) -> Self {
        Self {
            id,
            input_text,
            qr_code_url,
            size,
            format,
        }
    }

    /// Creation time recovered from the id.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.id)
            .ok()
            .and_then(DateTime::from_timestamp_millis)
    }
}
