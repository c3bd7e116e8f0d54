//! Dataset ingestion
//!
//! One fetch, one decode, one cleaning pass. Nothing is retried; any failure
//! here keeps the dashboard from starting.

use encoding_rs::Encoding;
use log::info;
use std::fmt;
use std::path::PathBuf;

use crate::cleaning;
use crate::domain::{CleanedTable, DashboardError, IngestError};

/// Public GSS 2018 extract the dashboard is built around.
pub const DEFAULT_DATA_URL: &str = "https://github.com/jkropko/DS-6001/raw/master/localdata/gss2018.csv";

/// Text encoding of the extract.
pub const DEFAULT_ENCODING: &str = "windows-1252";

/// Where the raw CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// `http(s)://` locations are fetched, anything else is read from disk.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_DATA_URL.to_string())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch the raw bytes of the dataset.
///
/// # Errors
/// Network failures, non-success HTTP status, or an unreadable file.
pub async fn fetch(source: &DataSource) -> Result<Vec<u8>, IngestError> {
    match source {
        DataSource::Url(url) => {
            let response = reqwest::get(url)
                .await
                .map_err(|source| IngestError::Request { url: url.clone(), source })?;
            let status = response.status();
            if !status.is_success() {
                return Err(IngestError::HttpStatus { url: url.clone(), status: status.as_u16() });
            }
            let body = response
                .bytes()
                .await
                .map_err(|source| IngestError::Request { url: url.clone(), source })?;
            Ok(body.to_vec())
        }
        DataSource::File(path) => tokio::fs::read(path)
            .await
            .map_err(|source| IngestError::Read { path: path.clone(), source }),
    }
}

/// Decode raw bytes using a WHATWG encoding label such as `windows-1252`.
///
/// # Errors
/// [`IngestError::UnknownEncoding`] for an unrecognised label and
/// [`IngestError::EncodingMismatch`] when the bytes are malformed for it.
pub fn decode(bytes: &[u8], label: &str) -> Result<String, IngestError> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| IngestError::UnknownEncoding(label.to_string()))?;
    let text = encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or(IngestError::EncodingMismatch(encoding.name()))?;
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

/// Fetch, decode and clean the dataset.
///
/// # Errors
/// Any [`IngestError`] or [`crate::domain::CleaningError`].
pub async fn load(source: &DataSource, encoding: &str) -> Result<CleanedTable, DashboardError> {
    info!("Fetching dataset from {source}");
    let bytes = fetch(source).await?;
    info!("Fetched {} bytes", bytes.len());

    let text = decode(&bytes, encoding)?;
    let table = cleaning::clean(&text)?;
    info!("Prepared {} respondents", table.len());
    Ok(table)
}
