//! Feed source reading previously saved DONKI responses from a directory.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use super::{parse_feed_body, FeedKind, FeedSource, FetchError};
use crate::parsing::donki::SolarFeeds;

/// Reads `cme.json`, `flr.json` and `hss.json` from a directory.
///
/// A missing file counts as an empty feed. The files are used as saved, so the
/// requested start date is not applied.
#[derive(Debug, Clone)]
pub struct FileFeedSource {
    dir: PathBuf,
}

impl FileFeedSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read_feed(&self, feed: FeedKind) -> Result<Value, FetchError> {
        let path = self.dir.join(feed.file_name());
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => parse_feed_body(feed, &body),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(%feed, path = %path.display(), "Feed file missing, using an empty feed");
                Ok(Value::Array(Vec::new()))
            }
            Err(source) => Err(FetchError::Io { feed, path, source }),
        }
    }
}

#[async_trait]
impl FeedSource for FileFeedSource {
    async fn fetch_feeds(&self, _start_date: NaiveDate) -> Result<SolarFeeds, FetchError> {
        let (cme, flares, high_speed_streams) = tokio::try_join!(
            self.read_feed(FeedKind::Cme),
            self.read_feed(FeedKind::Flare),
            self.read_feed(FeedKind::HighSpeedStream),
        )?;
        Ok(SolarFeeds::new(cme, flares, high_speed_streams))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fetch_solar_activity;
    use tempfile::tempdir;

    fn any_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[tokio::test]
    async fn test_reads_feeds_and_normalizes() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("cme.json"),
            r#"[{"activityID": "C1", "cmeAnalyses": [{"speed": 1100, "type": "C"}]}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("flr.json"),
            r#"[{"flrID": "F1", "classType": "M3.1", "beginTime": "2024-05-10T06:27Z"}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("hss.json"),
            r#"[{"hssID": "H1", "eventTime": "2024-05-09T12:00Z"}]"#,
        )
        .unwrap();

        let source = FileFeedSource::new(dir.path());
        let activity = fetch_solar_activity(&source, any_date()).await.unwrap();

        let labels: Vec<String> = activity.cme_events.iter().map(|e| e.label()).collect();
        assert_eq!(
            labels,
            vec![
                "C (Unknown location)",
                "Solar Flare (M3.1)",
                "High Speed Stream (Unknown location)"
            ]
        );
        assert_eq!(activity.cme_events[2].speed, 400.0);
    }

    #[tokio::test]
    async fn test_missing_files_are_empty_feeds() {
        let dir = tempdir().unwrap();
        let source = FileFeedSource::new(dir.path());
        let feeds = source.fetch_feeds(any_date()).await.unwrap();

        assert_eq!(feeds.cme, Value::Array(vec![]));
        assert!(feeds.into_activity().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_json_is_reported() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("flr.json"), "{not json").unwrap();

        let source = FileFeedSource::new(dir.path());
        let result = source.fetch_feeds(any_date()).await;
        assert!(matches!(
            result,
            Err(FetchError::Json {
                feed: FeedKind::Flare,
                ..
            })
        ));
    }
}
