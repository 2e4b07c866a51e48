use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::qr_params::{
    DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_MARGIN, ErrorCorrection, ImageFormat,
    QrParameters, QrSize,
};

/// Body of a generate (or locator preview) request. Omitted settings take
/// the drawer's defaults.
#[derive(Deserialize, Serialize, Validate, Debug, Clone)]
pub struct GenerateQrRequest {
    #[validate(length(min = 1, max = 300, message = "Text must be 1 to 300 characters"))]
    pub text: String,
    #[serde(default)]
    pub size: QrSize,
    #[serde(default = "default_color")]
    #[validate(custom(function = "validate_hex_color"))]
    pub color: String, // foreground, "rrggbb" or "#rrggbb"
    #[serde(default = "default_bg_color", alias = "bgColor")]
    #[validate(custom(function = "validate_hex_color"))]
    pub bg_color: String,
    #[serde(default, alias = "errorCorrection")]
    pub ecc: ErrorCorrection,
    #[serde(default = "default_margin")]
    pub margin: u32,
    #[serde(default)]
    pub format: ImageFormat,
}

impl GenerateQrRequest {
    /// Convert into generation parameters, stripping any `#` a color picker
    /// left on the colors. Call after `validate`.
    pub fn into_parameters(self) -> QrParameters {
        QrParameters {
            text: self.text,
            size: self.size,
            foreground_color: strip_hash(self.color),
            background_color: strip_hash(self.bg_color),
            error_correction: self.ecc,
            margin: self.margin,
            format: self.format,
        }
    }
}

fn strip_hash(color: String) -> String {
    match color.strip_prefix('#') {
        Some(rest) => rest.to_string(),
        None => color,
    }
}

fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("Color must be six hex digits".into());
        Err(err)
    }
}

fn default_color() -> String {
    DEFAULT_FOREGROUND.to_string()
}

fn default_bg_color() -> String {
    DEFAULT_BACKGROUND.to_string()
}

fn default_margin() -> u32 {
    DEFAULT_MARGIN
}
