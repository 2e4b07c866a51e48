use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::models::qr_params::QrParameters;

pub const DEFAULT_API_BASE: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Characters left as-is in the `data` value, same as JavaScript's
/// `encodeURIComponent`.
const DATA_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Turns a parameter set into the locator of the rendered image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    base: Url,
}

impl RequestBuilder {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Build the image locator. Pairs are always emitted in the same order,
    /// so equal parameters give byte-identical locators.
    pub fn build(&self, params: &QrParameters) -> String {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Colors are validated hex and the rest are fixed tokens; only the
        // text needs escaping.
        format!(
            "{}?size={}&color={}&bgcolor={}&data={}&ecc={}&margin={}&format={}",
            url,
            params.size,
            params.foreground_color,
            params.background_color,
            utf8_percent_encode(&params.text, DATA_ENCODE_SET),
            params.error_correction,
            params.margin,
            params.format
        )
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_API_BASE).expect("default QR API base is a valid URL"))
    }
}
