use serde_json::Value;

use crate::{GeneratedDocument, GenerationError};

const PREVIEW_KEY: &str = "previewHtml";
const DOWNLOAD_KEY: &str = "downloadUrl";

/// Validates the raw text body of a successful webhook response.
///
/// The body must be non-empty, parse as JSON and carry non-empty string
/// `previewHtml` and `downloadUrl` members. Extra members are ignored.
pub fn parse_generation_body(raw: &str) -> Result<GeneratedDocument, GenerationError> {
    if raw.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let value: Value =
        serde_json::from_str(raw).map_err(|_| GenerationError::MalformedResponse {
            raw: raw.to_string(),
        })?;

    let preview_html = non_empty_str(&value, PREVIEW_KEY);
    let download_url = non_empty_str(&value, DOWNLOAD_KEY);
    match (preview_html, download_url) {
        (Some(preview_html), Some(download_url)) => Ok(GeneratedDocument {
            preview_html: preview_html.to_string(),
            download_url: download_url.to_string(),
        }),
        _ => Err(GenerationError::InvalidResultShape),
    }
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
