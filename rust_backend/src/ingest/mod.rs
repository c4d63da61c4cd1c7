//! Feed ingestion: the collaborator that fetches raw DONKI feeds.
//!
//! The forecasting core never performs I/O. This module obtains the three raw feeds
//! (from the NASA API or from files on disk) and hands them to
//! [`SolarFeeds::into_activity`] for normalization. Failures surface as
//! [`FetchError`]; there is no retry or backoff.
//!
//! # Example
//!
//! ```no_run
//! use aurora_rust::config::DonkiSettings;
//! use aurora_rust::ingest::{fetch_solar_activity, lookback_start, DonkiClient};
//!
//! # async fn example() -> Result<(), aurora_rust::ingest::FetchError> {
//! let settings = DonkiSettings::default();
//! let start = lookback_start(chrono::Utc::now().date_naive(), settings.lookback_days);
//! let client = DonkiClient::new(settings)?;
//! let activity = fetch_solar_activity(&client, start).await?;
//! println!("{} events", activity.cme_events.len());
//! # Ok(())
//! # }
//! ```

use std::fmt;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use serde_json::Value;

use crate::core::domain::SolarActivity;
use crate::parsing::donki::SolarFeeds;

pub mod donki_client;
pub mod error;
pub mod file_source;

pub use donki_client::DonkiClient;
pub use error::FetchError;
pub use file_source::FileFeedSource;

/// One of the DONKI feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Cme,
    Flare,
    HighSpeedStream,
}

impl FeedKind {
    pub const ALL: [FeedKind; 3] = [FeedKind::Cme, FeedKind::Flare, FeedKind::HighSpeedStream];

    /// Endpoint name under `/DONKI/`.
    pub fn endpoint(self) -> &'static str {
        match self {
            FeedKind::Cme => "CME",
            FeedKind::Flare => "FLR",
            FeedKind::HighSpeedStream => "HSS",
        }
    }

    /// File name used by [`FileFeedSource`].
    pub fn file_name(self) -> &'static str {
        match self {
            FeedKind::Cme => "cme.json",
            FeedKind::Flare => "flr.json",
            FeedKind::HighSpeedStream => "hss.json",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Source of the three raw DONKI feeds.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch every feed starting at `start_date`.
    async fn fetch_feeds(&self, start_date: NaiveDate) -> Result<SolarFeeds, FetchError>;
}

/// First day of the lookback window ending at `today`.
pub fn lookback_start(today: NaiveDate, lookback_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Fetch all feeds from `source` and normalize them into a snapshot.
pub async fn fetch_solar_activity(
    source: &dyn FeedSource,
    start_date: NaiveDate,
) -> Result<SolarActivity, FetchError> {
    let feeds = source.fetch_feeds(start_date).await?;
    let activity = feeds.into_activity();

    tracing::info!(
        events = activity.cme_events.len(),
        impacts = activity.estimated_impact_times.len(),
        "Solar activity snapshot assembled"
    );
    Ok(activity)
}

/// Parse a feed body. DONKI answers an empty body when a window has no events.
pub(crate) fn parse_feed_body(feed: FeedKind, body: &str) -> Result<Value, FetchError> {
    if body.trim().is_empty() {
        return Ok(Value::Array(Vec::new()));
    }
    serde_json::from_str(body).map_err(|source| FetchError::Json { feed, source })
}
