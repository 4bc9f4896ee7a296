use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::ExportError;
use crate::models::{LegislatorRecord, SocialMediaRecord};

pub fn load_legislators(path: &Path) -> Result<Vec<LegislatorRecord>, ExportError> {
    let records = load_records(path)?;
    info!(path = %path.display(), records = records.len(), "loaded legislator roster");
    Ok(records)
}

pub fn load_social_media(path: &Path) -> Result<Vec<SocialMediaRecord>, ExportError> {
    let records = load_records(path)?;
    info!(path = %path.display(), records = records.len(), "loaded social media roster");
    Ok(records)
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ExportError> {
    let bytes = std::fs::read(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&bytes).map_err(|source| ExportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a YAML document whose top level is a sequence of mappings.
///
/// An empty document or a bare `null` yields no records.
pub fn parse_records<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>, serde_yaml::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let records: Option<Vec<T>> = serde_yaml::from_slice(bytes)?;
    Ok(records.unwrap_or_default())
}
