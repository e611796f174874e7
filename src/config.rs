use crate::error::{Result, TaxFollowupError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that replaces the sheet URL wholesale.
pub const CSV_URL_ENV: &str = "TAX_FOLLOWUP_CSV_URL";

const DEFAULT_PUBLISHED_ID: &str =
    "2PACX-1vS4Glk-fDP3vCXezi1JOG5LUFWCjpLFvvYzG55I-t6G346SlyAdCSj-qJ3DuhBl1w";
const DEFAULT_GID: &str = "1515609245";

/// Where the follow-up sheet is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetSource {
    /// A sheet published to the web, addressed by its publish id and tab gid.
    Published { published_id: String, gid: String },
    /// Any URL returning the CSV export directly.
    Url { url: String },
}

impl Default for SheetSource {
    fn default() -> Self {
        SheetSource::Published {
            published_id: DEFAULT_PUBLISHED_ID.to_string(),
            gid: DEFAULT_GID.to_string(),
        }
    }
}

impl SheetSource {
    pub fn published(published_id: impl Into<String>, gid: impl Into<String>) -> Self {
        SheetSource::Published {
            published_id: published_id.into(),
            gid: gid.into(),
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        SheetSource::Url { url: url.into() }
    }

    /// Uses `TAX_FOLLOWUP_CSV_URL` when set and non-empty, the default sheet
    /// otherwise.
    pub fn from_env() -> Self {
        match std::env::var(CSV_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::from_url(url.trim()),
            _ => Self::default(),
        }
    }

    /// Reads a source from a JSON file such as
    /// `{"published_id": "...", "gid": "..."}` or `{"url": "..."}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let source: SheetSource = serde_json::from_str(&text)?;
        source.validate()?;
        Ok(source)
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            SheetSource::Published { published_id, gid } => {
                if published_id.trim().is_empty() || gid.trim().is_empty() {
                    return Err(TaxFollowupError::InvalidConfig(
                        "published sheet needs both published_id and gid".to_string(),
                    ));
                }
            }
            SheetSource::Url { url } => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(TaxFollowupError::InvalidConfig(format!(
                        "sheet url must be http(s): {}",
                        url
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn csv_url(&self) -> String {
        match self {
            SheetSource::Published { published_id, gid } => format!(
                "https://docs.google.com/spreadsheets/d/e/{}/pub?gid={}&single=true&output=csv",
                published_id, gid
            ),
            SheetSource::Url { url } => url.clone(),
        }
    }
}
