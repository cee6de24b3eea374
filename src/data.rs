use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One row of the cleaned sales dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub publisher: String,
    pub genre: String,
    #[serde(default)]
    pub platform: String,
    pub count: f64,
}

impl Record {
    pub fn new(publisher: &str, genre: &str, platform: &str, count: f64) -> Self {
        Self {
            publisher: publisher.to_string(),
            genre: genre.to_string(),
            platform: platform.to_string(),
            count,
        }
    }
}

/// Parse a JSON array of records, keeping input order.
pub fn parse_records(json: &str) -> Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_str(json)?;
    Ok(records)
}

/// Load records from `-` (stdin), an http(s) URL, or a file path.
pub fn load_records(source: &str) -> Result<Vec<Record>> {
    let json = read_source(source)?;
    let records = parse_records(&json)?;
    tracing::info!("Loaded {} records from {}", records.len(), source);
    Ok(records)
}

fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer).map_err(Error::Stdin)?;
        return Ok(buffer);
    }

    if is_url(source) {
        return fetch(source);
    }

    let path = Path::new(source);
    std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn is_url(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn fetch(url: &str) -> Result<String> {
    tracing::debug!("Fetching dataset from {}", url);
    let fetch_err = |e: ureq::Error| Error::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    };

    let mut response = ureq::get(url).call().map_err(fetch_err)?;
    response.body_mut().read_to_string().map_err(fetch_err)
}
