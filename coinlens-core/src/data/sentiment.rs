//! Fear & greed index from alternative.me.

use super::http::HttpFetcher;
use super::provider::DataError;
use crate::domain::FearGreedReading;
use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const FEAR_GREED_URL: &str = "https://api.alternative.me/fng/";

#[derive(Debug, Deserialize)]
struct FngResponse {
    data: Vec<FngEntry>,
}

#[derive(Debug, Deserialize)]
struct FngEntry {
    value: String,
    value_classification: String,
    timestamp: String,
}

pub struct FearGreedSource {
    http: HttpFetcher,
    url: String,
}

impl FearGreedSource {
    pub fn new(http: HttpFetcher) -> Self {
        Self {
            http,
            url: FEAR_GREED_URL.to_string(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Latest reading.
    pub fn fetch(&self) -> Result<FearGreedReading, DataError> {
        let resp: FngResponse = self.http.get_json(&self.url, &[], "fear & greed index")?;
        reading_from(resp)
    }
}

/// Parse an alternative.me `fng` body; the first entry is the latest.
pub fn parse_fear_greed(body: &str) -> Result<FearGreedReading, DataError> {
    let resp: FngResponse = serde_json::from_str(body)
        .map_err(|e| DataError::ResponseFormatChanged(format!("fng: {e}")))?;
    reading_from(resp)
}

fn reading_from(resp: FngResponse) -> Result<FearGreedReading, DataError> {
    let entry = resp
        .data
        .into_iter()
        .next()
        .ok_or_else(|| DataError::ResponseFormatChanged("fng: empty data array".into()))?;

    let value = entry
        .value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|v| *v <= 100)
        .ok_or_else(|| DataError::ResponseFormatChanged(format!("fng value: {:?}", entry.value)))?;

    let secs = entry
        .timestamp
        .trim()
        .parse::<i64>()
        .map_err(|_| DataError::ResponseFormatChanged(format!("fng timestamp: {:?}", entry.timestamp)))?;
    let timestamp = DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| DataError::ResponseFormatChanged(format!("fng timestamp out of range: {secs}")))?;

    Ok(FearGreedReading {
        value,
        classification: entry.value_classification,
        timestamp,
    })
}
