use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_FOREGROUND: &str = "000000";
pub const DEFAULT_BACKGROUND: &str = "ffffff";
pub const DEFAULT_MARGIN: u32 = 4;
pub const MAX_TEXT_CHARS: u64 = 300;

/// Image dimensions offered by the customization drawer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QrSize {
    #[serde(rename = "150x150")]
    Small,
    #[default]
    #[serde(rename = "300x300")]
    Medium,
    #[serde(rename = "500x500")]
    Large,
    #[serde(rename = "700x700")]
    ExtraLarge,
}

impl QrSize {
    pub const ALL: [QrSize; 4] = [
        QrSize::Small,
        QrSize::Medium,
        QrSize::Large,
        QrSize::ExtraLarge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QrSize::Small => "150x150",
            QrSize::Medium => "300x300",
            QrSize::Large => "500x500",
            QrSize::ExtraLarge => "700x700",
        }
    }
}

impl fmt::Display for QrSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCorrection {
    #[default]
    L, // Low
    M, // Medium
    Q, // Quartile
    H, // High
}

impl ErrorCorrection {
    pub const ALL: [ErrorCorrection; 4] = [
        ErrorCorrection::L,
        ErrorCorrection::M,
        ErrorCorrection::Q,
        ErrorCorrection::H,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCorrection::L => "L",
            ErrorCorrection::M => "M",
            ErrorCorrection::Q => "Q",
            ErrorCorrection::H => "H",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ErrorCorrection::L => "Low",
            ErrorCorrection::M => "Medium",
            ErrorCorrection::Q => "Quartile",
            ErrorCorrection::H => "High",
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Gif,
    Jpeg,
    Jpg,
    Svg,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 5] = [
        ImageFormat::Png,
        ImageFormat::Gif,
        ImageFormat::Jpeg,
        ImageFormat::Jpg,
        ImageFormat::Svg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the remote service needs to render one QR image.
///
/// Colors are six hex digits without a leading `#`; they are passed to the
/// service untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct QrParameters {
    pub text: String,
    pub size: QrSize,
    pub foreground_color: String,
    pub background_color: String,
    pub error_correction: ErrorCorrection,
    pub margin: u32,
    pub format: ImageFormat,
}

impl QrParameters {
    /// Parameters for `text` with every setting at the drawer's defaults.
    pub fn with_defaults(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: QrSize::default(),
            foreground_color: DEFAULT_FOREGROUND.to_string(),
            background_color: DEFAULT_BACKGROUND.to_string(),
            error_correction: ErrorCorrection::default(),
            margin: DEFAULT_MARGIN,
            format: ImageFormat::default(),
        }
    }

    pub fn can_generate(&self) -> bool {
        !self.text.is_empty()
    }
}
