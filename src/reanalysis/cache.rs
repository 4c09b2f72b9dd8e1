//! Optional on-disk cache for reanalysis responses.
//!
//! Entries are normalised [`DailySeries`] values stored as JSON, keyed by the
//! full query (coordinate, range, parameter set) and aged out by TTL. The
//! cache degrades silently: any read or write problem is logged and treated
//! as a miss, since cached responses are an optimisation, not a contract.

use crate::reanalysis::client::DailySeries;
use chrono::NaiveDate;
use log::{debug, warn};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::{fs, task};

/// Platform-default location for cached responses
/// (e.g. `~/.cache/almanac` on Linux).
pub(crate) fn default_cache_dir() -> io::Result<PathBuf> {
    dirs::cache_dir()
        .map(|base| base.join("almanac"))
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "platform has no cache directory"))
}

/// Creates the cache directory tree if it does not exist yet. A file
/// squatting on the path surfaces as the underlying `create_dir_all` error.
pub(crate) async fn prepare_cache_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path).await
}

pub(crate) struct ResponseCache {
    dir: PathBuf,
    ttl: Duration,
}

impl ResponseCache {
    pub(crate) fn new(dir: PathBuf, ttl_days: u64) -> Self {
        ResponseCache {
            dir,
            ttl: Duration::from_secs(ttl_days * 24 * 60 * 60),
        }
    }

    /// Filename-safe key over the full query envelope.
    pub(crate) fn key(
        lat: f64,
        lon: f64,
        start: NaiveDate,
        end: NaiveDate,
        parameters: &[&str],
    ) -> String {
        let coord = format!("{lat:.4}_{lon:.4}").replace('-', "m").replace('.', "p");
        format!(
            "daily-{coord}-{}-{}-{}.json",
            start.format("%Y%m%d"),
            end.format("%Y%m%d"),
            parameters.join("_")
        )
    }

    pub(crate) async fn load(&self, key: &str) -> Option<DailySeries> {
        let path = self.dir.join(key);

        let meta = fs::metadata(&path).await.ok()?;
        let age = meta.modified().ok().and_then(|m| m.elapsed().ok())?;
        if age > self.ttl {
            debug!("Cache entry {path:?} expired ({age:?} old)");
            return None;
        }

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read cache entry {path:?}: {e}");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(series) => {
                debug!("Cache hit for {key}");
                Some(series)
            }
            Err(e) => {
                warn!("Discarding unreadable cache entry {path:?}: {e}");
                None
            }
        }
    }

    /// Writes atomically: serialise to a temp file in the cache directory,
    /// then rename into place.
    pub(crate) async fn store(&self, key: &str, series: &DailySeries) {
        if let Err(e) = fs::create_dir_all(&self.dir).await {
            warn!("Failed to create cache directory {:?}: {e}", self.dir);
            return;
        }

        let path = self.dir.join(key);
        let dir = self.dir.clone();
        let payload = match serde_json::to_vec(series) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to serialise cache entry {key}: {e}");
                return;
            }
        };

        let write = task::spawn_blocking(move || -> std::io::Result<()> {
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(&payload)?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await;

        match write {
            Ok(Ok(())) => debug!("Cached reanalysis response under {key}"),
            Ok(Err(e)) => warn!("Failed to write cache entry {key}: {e}"),
            Err(e) => warn!("Cache write task failed for {key}: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn series_fixture() -> DailySeries {
        let mut days = BTreeMap::new();
        days.insert("20200615".to_string(), Some(28.5));
        days.insert("20200616".to_string(), None);
        let mut series = DailySeries::new();
        series.insert("T2M".to_string(), days);
        series
    }

    #[tokio::test]
    async fn round_trips_a_series() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), 30);
        let key = ResponseCache::key(
            -3.7319,
            -38.5267,
            NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 6, 30).unwrap(),
            &["T2M", "RH2M"],
        );

        assert!(cache.load(&key).await.is_none());
        let series = series_fixture();
        cache.store(&key, &series).await;
        assert_eq!(cache.load(&key).await, Some(series));
    }

    #[tokio::test]
    async fn expired_entries_read_as_misses() {
        let dir = tempfile::tempdir().unwrap();
        // Zero TTL: everything is already expired.
        let cache = ResponseCache::new(dir.path().to_path_buf(), 0);
        let key = "daily-test.json".to_string();
        cache.store(&key, &series_fixture()).await;
        assert!(cache.load(&key).await.is_none());
    }

    #[tokio::test]
    async fn prepare_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("cache");
        prepare_cache_dir(&target).await.unwrap();
        assert!(target.is_dir());
        // Idempotent on an existing directory.
        prepare_cache_dir(&target).await.unwrap();
    }

    #[tokio::test]
    async fn prepare_rejects_a_file_at_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("occupied");
        fs::write(&target, b"not a directory").await.unwrap();
        assert!(prepare_cache_dir(&target).await.is_err());
    }

    #[test]
    fn keys_are_filename_safe_and_distinct() {
        let start = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 6, 30).unwrap();
        let a = ResponseCache::key(-3.73, -38.52, start, end, &["T2M"]);
        let b = ResponseCache::key(3.73, -38.52, start, end, &["T2M"]);
        assert_ne!(a, b);
        assert!(!a.contains('/'));
        assert!(a.ends_with(".json"));
    }
}
