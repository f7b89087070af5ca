//! # National Holiday Feed
//!
//! Client for the external public-holiday feed. The feed enriches the
//! holiday exclusion set with national holidays for a configured year and
//! country; it is best-effort only, and callers are expected to absorb any
//! error it returns (see [`crate::stats::resolve_exclusions`]).

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::{eyre, Result};
use std::time::Duration;

use crate::config::ApiConfig;

/// Source of national holiday dates.
///
/// Abstracted behind a trait so tests can substitute the network call.
#[async_trait]
pub trait NationalHolidayFeed: Send + Sync {
    /// Fetches the national holiday dates for the configured year and
    /// country.
    async fn fetch(&self) -> Result<Vec<NaiveDate>>;
}

/// HTTP implementation against a date.nager.at-style endpoint:
/// `GET {base}/{year}/{country}` returning a JSON array of objects with an
/// ISO `date` field.
pub struct HttpHolidayFeed {
    client: reqwest::Client,
    base_url: String,
    year: i32,
    country: String,
}

impl HttpHolidayFeed {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        // The timeout bounds the only network suspension point in a stats
        // computation.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.holiday_feed_timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.holiday_feed_url.clone(),
            year: config.holiday_feed_year,
            country: config.holiday_feed_country.clone(),
        })
    }
}

#[async_trait]
impl NationalHolidayFeed for HttpHolidayFeed {
    async fn fetch(&self) -> Result<Vec<NaiveDate>> {
        let url = format!("{}/{}/{}", self.base_url, self.year, self.country);
        tracing::debug!("Fetching national holidays from {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(eyre!(
                "Holiday feed returned status {}",
                response.status()
            ));
        }

        let payload: serde_json::Value = response.json().await?;
        let entries = payload
            .as_array()
            .ok_or_else(|| eyre!("Holiday feed returned a non-array payload"))?;

        // Entries without a parseable ISO date are skipped rather than
        // failing the whole fetch.
        let dates = entries
            .iter()
            .filter_map(|entry| entry.get("date").and_then(|d| d.as_str()))
            .filter_map(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
            .collect();

        Ok(dates)
    }
}
