//! Request body extraction settings for inbound HTTP adapters.
//!
//! Bodies that fail to parse are reported through the regular error envelope
//! instead of actix's plain-text default, so clients see one error shape for
//! every 400.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Largest accepted JSON body in bytes.
const MAX_BODY_BYTES: usize = 16 * 1024;

fn body_error_code(error: &JsonPayloadError) -> &'static str {
    match error {
        JsonPayloadError::ContentType => "unsupported_content_type",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "body_too_large"
        }
        JsonPayloadError::Deserialize(_) => "malformed_body",
        _ => "unreadable_body",
    }
}

pub(crate) fn json_error_handler(error: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let code = body_error_code(&error);
    debug!(path = req.path(), %error, code, "rejected request body");
    Error::invalid_request(format!("request body could not be read: {error}"))
        .with_details(json!({ "code": code }))
        .into()
}

/// JSON extractor configuration shared by every registry route.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use registry::inbound::http::validation::json_config;
///
/// let _app = App::new().app_data(json_config());
/// ```
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(json_error_handler)
}
