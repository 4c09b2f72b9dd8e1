//! Client for the daily reanalysis archive.
//!
//! Fetches point time-series of daily meteorology over a date range, with
//! jittered exponential-backoff retries and response sanitation: the
//! upstream's `-999` sentinel (and JSON nulls) become the semantic missing
//! variant before anything leaves this module.

use crate::reanalysis::cache::ResponseCache;
use crate::reanalysis::error::ReanalysisError;
use crate::settings::Settings;
use chrono::NaiveDate;
use log::{debug, info, warn};
use rand::Rng;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Duration;

/// Temperature at 2 m, °C.
pub const PARAM_TEMPERATURE: &str = "T2M";
/// Relative humidity at 2 m, %.
pub const PARAM_HUMIDITY: &str = "RH2M";
/// Wind speed at 10 m, m/s.
pub const PARAM_WIND: &str = "WS10M";
/// Corrected total precipitation, mm/day.
pub const PARAM_PRECIPITATION: &str = "PRECTOTCORR";

/// Upstream encodes missing observations as this sentinel.
const MISSING_SENTINEL: f64 = -999.0;

/// One map per requested parameter; per parameter, a date-ascending map of
/// `YYYYMMDD` to the observation (`None` = missing upstream).
pub type DailySeries = HashMap<String, BTreeMap<String, Option<f64>>>;

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    properties: Option<ArchiveProperties>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ArchiveProperties {
    parameter: Option<HashMap<String, BTreeMap<String, Option<f64>>>>,
}

/// Client for the daily reanalysis archive.
///
/// Holds a reference to the process-wide HTTP connection pool; constructing
/// one is cheap and per-request construction is unnecessary.
pub struct ReanalysisClient {
    http: reqwest::Client,
    base_url: String,
    retries: u32,
    backoff_base: Duration,
    cache: Option<ResponseCache>,
}

impl ReanalysisClient {
    /// Creates a client over a shared HTTP pool, without an on-disk cache.
    pub fn new(http: reqwest::Client, settings: &Settings) -> Self {
        ReanalysisClient {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            retries: settings.retries.max(1),
            backoff_base: Duration::from_millis(settings.backoff_base_ms),
            cache: None,
        }
    }

    /// Creates a client that also caches normalised responses under
    /// `cache_dir` with the TTL from `settings`.
    pub fn with_cache(http: reqwest::Client, settings: &Settings, cache_dir: &Path) -> Self {
        let mut client = Self::new(http, settings);
        client.cache = Some(ResponseCache::new(
            cache_dir.to_path_buf(),
            settings.cache_ttl_days,
        ));
        client
    }

    /// Fetches daily series for `parameters` at a point over `[start, end]`.
    ///
    /// The result has one entry per requested parameter (empty when the
    /// archive reports nothing for it); the parameter *set* is not validated
    /// beyond that, so callers may request any subset the archive knows.
    ///
    /// # Errors
    ///
    /// * [`ReanalysisError::InvalidCoordinate`] / [`ReanalysisError::InvalidRange`]
    ///   before any transport work.
    /// * [`ReanalysisError::RateLimited`] when every attempt ended in HTTP 429.
    /// * [`ReanalysisError::HttpStatus`] / [`ReanalysisError::Transport`] for
    ///   upstream failures that survived the retry budget.
    /// * [`ReanalysisError::BadResponse`] when the body is not the expected
    ///   parameter-map shape.
    pub async fn daily_series(
        &self,
        lat: f64,
        lon: f64,
        start: NaiveDate,
        end: NaiveDate,
        parameters: &[&str],
    ) -> Result<DailySeries, ReanalysisError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(ReanalysisError::InvalidCoordinate { lat, lon });
        }
        if start > end {
            return Err(ReanalysisError::InvalidRange { start, end });
        }

        let cache_key = ResponseCache::key(lat, lon, start, end, parameters);
        if let Some(cache) = &self.cache {
            if let Some(series) = cache.load(&cache_key).await {
                return Ok(series);
            }
        }

        let url = format!("{}/api/temporal/daily/point", self.base_url);
        let query = [
            ("latitude", lat.to_string()),
            ("longitude", lon.to_string()),
            ("parameters", parameters.join(",")),
            ("community", "RE".to_string()),
            ("start", start.format("%Y%m%d").to_string()),
            ("end", end.format("%Y%m%d").to_string()),
            ("format", "JSON".to_string()),
            ("time-standard", "UTC".to_string()),
        ];

        info!("Fetching reanalysis data for ({lat}, {lon}) from {start} to {end}");
        let response = self.request_with_retries(&url, &query).await?;
        let series = normalise(response, parameters)?;

        if let Some(cache) = &self.cache {
            cache.store(&cache_key, &series).await;
        }
        Ok(series)
    }

    async fn request_with_retries(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<ArchiveResponse, ReanalysisError> {
        let mut attempt = 0;
        loop {
            match self.request_once(url, query).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && attempt + 1 < self.retries => {
                    let delay = self.backoff_delay(attempt);
                    warn!(
                        "Reanalysis attempt {} failed ({err}), retrying in {delay:?}",
                        attempt + 1
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) if err.is_rate_limit() => {
                    return Err(ReanalysisError::RateLimited {
                        attempts: attempt + 1,
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn request_once(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<ArchiveResponse, ReanalysisError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| ReanalysisError::Transport(url.to_string(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReanalysisError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let body: ArchiveResponse = response
            .json()
            .await
            .map_err(|e| ReanalysisError::Transport(url.to_string(), e))?;
        debug!("Reanalysis response received from {url}");
        Ok(body)
    }

    /// `base * 2^attempt`, jittered by U(0.8, 1.2).
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let jitter: f64 = rand::rng().random_range(0.8..=1.2);
        self.backoff_base
            .mul_f64(f64::powi(2.0, attempt as i32) * jitter)
    }
}

/// Pulls the parameter maps out of the response, turns sentinels into the
/// missing variant, and guarantees one entry per requested parameter.
fn normalise(
    response: ArchiveResponse,
    parameters: &[&str],
) -> Result<DailySeries, ReanalysisError> {
    if let Some(error) = response.error {
        return Err(ReanalysisError::BadResponse(format!(
            "archive reported an error: {error}"
        )));
    }

    let parameter_maps = response
        .properties
        .and_then(|p| p.parameter)
        .ok_or_else(|| {
            ReanalysisError::BadResponse("missing properties.parameter map".to_string())
        })?;

    let mut series: DailySeries = parameter_maps
        .into_iter()
        .map(|(param, days)| {
            let cleaned = days
                .into_iter()
                .map(|(day, value)| {
                    let value = value.filter(|v| *v != MISSING_SENTINEL);
                    (day, value)
                })
                .collect();
            (param, cleaned)
        })
        .collect();

    for &param in parameters {
        series.entry(param.to_string()).or_default();
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_settings(base_url: &str) -> Settings {
        Settings::builder()
            .base_url(base_url)
            .backoff_base_ms(1)
            .build()
    }

    fn client_for(server: &MockServer) -> ReanalysisClient {
        ReanalysisClient::new(reqwest::Client::new(), &test_settings(&server.uri()))
    }

    fn archive_body() -> serde_json::Value {
        serde_json::json!({
            "properties": {
                "parameter": {
                    "T2M": {"20200614": 28.5, "20200615": -999.0},
                    "RH2M": {"20200614": 70.0, "20200615": 65.0}
                }
            }
        })
    }

    fn june_range() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2020, 6, 14).unwrap(),
            NaiveDate::from_ymd_opt(2020, 6, 15).unwrap(),
        )
    }

    #[tokio::test]
    async fn fetches_and_normalises_sentinels() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/temporal/daily/point"))
            .and(query_param("community", "RE"))
            .and(query_param("format", "JSON"))
            .and(query_param("time-standard", "UTC"))
            .respond_with(ResponseTemplate::new(200).set_body_json(archive_body()))
            .mount(&server)
            .await;

        let (start, end) = june_range();
        let series = client_for(&server)
            .daily_series(-3.7319, -38.5267, start, end, &["T2M", "RH2M"])
            .await
            .unwrap();

        assert_eq!(series["T2M"]["20200614"], Some(28.5));
        // Sentinel turned into the missing variant, key retained.
        assert_eq!(series["T2M"]["20200615"], None);
        assert_eq!(series["RH2M"]["20200615"], Some(65.0));
    }

    #[tokio::test]
    async fn requested_parameters_always_have_an_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(archive_body()))
            .mount(&server)
            .await;

        let (start, end) = june_range();
        let series = client_for(&server)
            .daily_series(0.0, 0.0, start, end, &["T2M", "WS10M"])
            .await
            .unwrap();

        // The archive said nothing about WS10M; the entry exists, empty.
        assert!(series["WS10M"].is_empty());
    }

    #[tokio::test]
    async fn retries_transient_server_errors() {
        let server = MockServer::start().await;
        // Two failures, then success: must succeed within the 3-attempt budget.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(archive_body()))
            .mount(&server)
            .await;

        let (start, end) = june_range();
        let series = client_for(&server)
            .daily_series(0.0, 0.0, start, end, &["T2M"])
            .await
            .unwrap();
        assert!(!series["T2M"].is_empty());
    }

    #[tokio::test]
    async fn surfaces_rate_limit_after_exhaustion() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let (start, end) = june_range();
        let err = client_for(&server)
            .daily_series(0.0, 0.0, start, end, &["T2M"])
            .await
            .unwrap_err();
        assert!(matches!(err, ReanalysisError::RateLimited { attempts: 3 }));
    }

    #[tokio::test]
    async fn non_retryable_status_fails_fast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let (start, end) = june_range();
        let err = client_for(&server)
            .daily_series(0.0, 0.0, start, end, &["T2M"])
            .await
            .unwrap_err();
        assert!(
            matches!(err, ReanalysisError::HttpStatus { status, .. } if status.as_u16() == 404)
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"unexpected": true})),
            )
            .mount(&server)
            .await;

        let (start, end) = june_range();
        let err = client_for(&server)
            .daily_series(0.0, 0.0, start, end, &["T2M"])
            .await
            .unwrap_err();
        assert!(matches!(err, ReanalysisError::BadResponse(_)));
    }

    #[tokio::test]
    async fn validates_inputs_before_any_transport() {
        // No server at all: validation must trip first.
        let settings = test_settings("http://127.0.0.1:9");
        let client = ReanalysisClient::new(reqwest::Client::new(), &settings);
        let (start, end) = june_range();

        assert!(matches!(
            client.daily_series(95.0, 0.0, start, end, &["T2M"]).await,
            Err(ReanalysisError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            client.daily_series(0.0, 0.0, end, start, &["T2M"]).await,
            Err(ReanalysisError::InvalidRange { .. })
        ));
    }

    #[tokio::test]
    async fn cache_short_circuits_the_second_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(archive_body()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(&server.uri());
        let client = ReanalysisClient::with_cache(reqwest::Client::new(), &settings, dir.path());

        let (start, end) = june_range();
        let first = client
            .daily_series(0.0, 0.0, start, end, &["T2M", "RH2M"])
            .await
            .unwrap();
        let second = client
            .daily_series(0.0, 0.0, start, end, &["T2M", "RH2M"])
            .await
            .unwrap();
        assert_eq!(first, second);
        server.verify().await;
    }
}
