use std::path::PathBuf;

use chrono::NaiveDate;

pub const DEFAULT_LEGISLATORS_URL: &str =
    "https://raw.githubusercontent.com/unitedstates/congress-legislators/main/legislators-current.yaml";
pub const DEFAULT_SOCIAL_MEDIA_URL: &str =
    "https://raw.githubusercontent.com/unitedstates/congress-legislators/main/legislators-social-media.yaml";
pub const DEFAULT_OUTPUT: &str = "congressional_contacts.csv";

/// Reference date for the currency filter. Passed to clap as the default
/// `--as-of` value, so keep it in `YYYY-MM-DD` form.
pub const DEFAULT_AS_OF: &str = "2025-01-01";

/// Resolved settings for one export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub legislators_url: String,
    pub social_media_url: String,
    /// Where downloaded rosters are stored until the run ends.
    pub download_dir: PathBuf,
    pub output: PathBuf,
    /// Legislators whose last term ended before this date are dropped.
    pub as_of: NaiveDate,
}

impl ExportConfig {
    /// Local path a roster downloaded from `url` is stored at.
    pub fn download_path(&self, url: &str) -> PathBuf {
        self.download_dir.join(file_name_from_url(url))
    }
}

/// Final path segment of `url`, ignoring any query string or fragment.
pub fn file_name_from_url(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    match without_query.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => "download.yaml",
    }
}
