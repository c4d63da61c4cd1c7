//! HTTP client for the NASA DONKI API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{StatusCode, Url};
use serde_json::Value;

use super::{parse_feed_body, FeedKind, FeedSource, FetchError};
use crate::config::DonkiSettings;
use crate::parsing::donki::SolarFeeds;

/// Fetches the CME, FLR and HSS feeds concurrently.
#[derive(Debug, Clone)]
pub struct DonkiClient {
    http: reqwest::Client,
    settings: DonkiSettings,
}

impl DonkiClient {
    pub fn new(settings: DonkiSettings) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &DonkiSettings {
        &self.settings
    }

    /// Request URL for one feed, including the API key.
    pub fn feed_url(&self, feed: FeedKind, start_date: NaiveDate) -> Result<Url, FetchError> {
        let base = format!(
            "{}/DONKI/{}",
            self.settings.base_url.trim_end_matches('/'),
            feed.endpoint()
        );
        Url::parse_with_params(
            &base,
            &[
                ("startDate", start_date.format("%Y-%m-%d").to_string()),
                ("api_key", self.settings.api_key.clone()),
            ],
        )
        .map_err(|e| FetchError::InvalidUrl {
            url: base.clone(),
            message: e.to_string(),
        })
    }

    async fn fetch_feed(&self, feed: FeedKind, start_date: NaiveDate) -> Result<Value, FetchError> {
        let url = self.feed_url(feed, start_date)?;
        tracing::debug!(%feed, %start_date, "Fetching DONKI feed");

        // Errors carry the request URL, which holds the API key.
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http {
                feed,
                source: e.without_url(),
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::InvalidCredentials {
                feed,
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                feed,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Http {
            feed,
            source: e.without_url(),
        })?;
        parse_feed_body(feed, &body)
    }
}

#[async_trait]
impl FeedSource for DonkiClient {
    async fn fetch_feeds(&self, start_date: NaiveDate) -> Result<SolarFeeds, FetchError> {
        let (cme, flares, high_speed_streams) = tokio::try_join!(
            self.fetch_feed(FeedKind::Cme, start_date),
            self.fetch_feed(FeedKind::Flare, start_date),
            self.fetch_feed(FeedKind::HighSpeedStream, start_date),
        )?;
        Ok(SolarFeeds::new(cme, flares, high_speed_streams))
    }
}
