//! Export documents and shareable links.

use jiff::Timestamp;

use crate::{
    error::{MapperError, Result},
    models::{validate_sequence, JourneyExport, Step},
};

/// Query parameter carrying the shared step sequence.
pub const SHARE_PARAM: &str = "journey";

/// Pretty-printed [`JourneyExport`] document.
pub fn export_json(context: &str, steps: &[Step], exported: Timestamp) -> Result<String> {
    let export = JourneyExport::new(context, steps, exported);
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Reads an export document back, validating its steps.
pub fn parse_export(json: &str) -> Result<JourneyExport> {
    let export: JourneyExport = serde_json::from_str(json)?;
    validate_sequence(&export.steps)?;
    Ok(export)
}

/// `{origin}?journey={url-encoded steps JSON}`.
pub fn share_url(origin: &str, steps: &[Step]) -> Result<String> {
    let json = serde_json::to_string(steps)?;
    Ok(format!(
        "{origin}?{SHARE_PARAM}={}",
        urlencoding::encode(&json)
    ))
}

/// Extracts and validates the step sequence from a share link.
///
/// # Errors
///
/// - `MapperError::InvalidInput` if the link has no `journey` parameter,
///   cannot be decoded, or breaks the parent invariant
/// - `MapperError::Serialization` if the payload is not a step list
pub fn import_shared(url: &str) -> Result<Vec<Step>> {
    let (_, query) = url
        .split_once('?')
        .ok_or_else(|| MapperError::invalid_input("url").with_reason("no query string"))?;
    let query = query.split('#').next().unwrap_or_default();

    let encoded = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(name, value)| (name == SHARE_PARAM).then_some(value))
        .ok_or_else(|| {
            MapperError::invalid_input("url")
                .with_reason(format!("missing '{SHARE_PARAM}' parameter"))
        })?;

    let json = urlencoding::decode(encoded)
        .map_err(|e| MapperError::invalid_input("url").with_reason(e.to_string()))?;
    let steps: Vec<Step> = serde_json::from_str(&json)?;
    validate_sequence(&steps)?;
    Ok(steps)
}
