//! HTTP client for the public fantasy API.
//!
//! Endpoints used:
//! - `bootstrap-static/` for players, clubs and periods
//! - `fixtures/` for the full fixture list
//! - `entry/{team}/event/{period}/picks/` for a manager's squad
//! - `entry/{team}/history/` for chips already played
//!
//! The bootstrap and fixture responses are large and change rarely, so both
//! are cached for `cache_ttl_secs`. Per-manager endpoints are never cached.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

use super::cache::TtlCache;
use super::dto::Bootstrap;
use crate::adapter::SourceConfig;
use crate::domain::record::{FixtureRecord, Snapshot, SquadPicks, TeamHistory};
use crate::error::{Result, UpstreamError};
use crate::port::DataSource;

pub struct FplClient {
    http: HttpClient,
    /// Always ends in `/` so relative joins keep the path.
    base_url: Url,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
    bootstrap: TtlCache<Bootstrap>,
    fixtures: TtlCache<Vec<FixtureRecord>>,
}

impl FplClient {
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!("gaffer/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        let ttl = chrono::Duration::seconds(i64::try_from(config.cache_ttl_secs).unwrap_or(i64::MAX));

        Ok(Self {
            http,
            base_url: base_url(&config.base_url)?,
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
            bootstrap: TtlCache::new(ttl),
            fixtures: TtlCache::new(ttl),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_with_retry<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            debug!(url = %url, attempt, "GET");

            let result = self.http.get(url.clone()).send().await;
            let response = match result {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(request_error(&url, err));
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                return Err(UpstreamError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                }
                .into());
            }

            match response.json::<T>().await {
                Ok(parsed) => return Ok(parsed),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(request_error(&url, err));
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }

    async fn fetch_bootstrap(&self) -> Result<Bootstrap> {
        if let Some(cached) = self.bootstrap.get(Utc::now()) {
            debug!("Bootstrap served from cache");
            return Ok(cached);
        }
        let bootstrap: Bootstrap = self.get_with_retry("bootstrap-static/").await?;
        info!(
            players = bootstrap.elements.len(),
            clubs = bootstrap.teams.len(),
            "Fetched bootstrap data"
        );
        self.bootstrap.put(bootstrap.clone(), Utc::now());
        Ok(bootstrap)
    }

    async fn fetch_fixtures(&self) -> Result<Vec<FixtureRecord>> {
        if let Some(cached) = self.fixtures.get(Utc::now()) {
            debug!("Fixtures served from cache");
            return Ok(cached);
        }
        let fixtures: Vec<FixtureRecord> = self.get_with_retry("fixtures/").await?;
        info!(fixtures = fixtures.len(), "Fetched fixtures");
        self.fixtures.put(fixtures.clone(), Utc::now());
        Ok(fixtures)
    }
}

#[async_trait]
impl DataSource for FplClient {
    fn name(&self) -> &'static str {
        "fpl"
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        let bootstrap = self.fetch_bootstrap().await?;
        let fixtures = self.fetch_fixtures().await?;
        Ok(bootstrap.into_snapshot(fixtures))
    }

    async fn squad_picks(&self, team: u32, period: u32) -> Result<SquadPicks> {
        let picks: SquadPicks = self
            .get_with_retry(&format!("entry/{team}/event/{period}/picks/"))
            .await?;
        debug!(team, period, picks = picks.picks.len(), "Fetched squad picks");
        Ok(picks)
    }

    async fn team_history(&self, team: u32) -> Result<TeamHistory> {
        let history: TeamHistory = self.get_with_retry(&format!("entry/{team}/history/")).await?;
        debug!(team, chips = history.chips.len(), "Fetched team history");
        Ok(history)
    }

    async fn refresh(&self) -> Result<()> {
        self.bootstrap.invalidate();
        self.fixtures.invalidate();
        info!("Source cache cleared");
        Ok(())
    }
}

fn base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn request_error(url: &Url, source: reqwest::Error) -> crate::error::Error {
    UpstreamError::Request {
        url: url.to_string(),
        source,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> FplClient {
        FplClient::from_config(&SourceConfig {
            base_url: base.into(),
            ..SourceConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoints_keep_the_api_path() {
        let client = client("https://fantasy.premierleague.com/api");
        assert_eq!(
            client.endpoint("bootstrap-static/").unwrap().as_str(),
            "https://fantasy.premierleague.com/api/bootstrap-static/"
        );
        assert_eq!(
            client.endpoint("entry/42/event/7/picks/").unwrap().as_str(),
            "https://fantasy.premierleague.com/api/entry/42/event/7/picks/"
        );
    }

    #[test]
    fn trailing_slash_is_not_doubled() {
        let client = client("http://localhost:8080/api/");
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
        assert_eq!(
            client.endpoint("fixtures/").unwrap().as_str(),
            "http://localhost:8080/api/fixtures/"
        );
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let result = FplClient::from_config(&SourceConfig {
            base_url: "not a url".into(),
            ..SourceConfig::default()
        });
        assert!(matches!(result, Err(crate::error::Error::Url(_))));
    }

    #[tokio::test]
    async fn refresh_clears_both_caches() {
        let client = client("http://localhost:1/api");
        let now = Utc::now();
        client.fixtures.put(Vec::new(), now);
        client.refresh().await.unwrap();
        assert!(client.fixtures.get(now).is_none());
        assert!(client.bootstrap.get(now).is_none());
    }

    #[tokio::test]
    async fn unreachable_host_is_an_upstream_error() {
        let client = FplClient::from_config(&SourceConfig {
            base_url: "http://127.0.0.1:1/api".into(),
            timeout_secs: 2,
            connect_timeout_secs: 1,
            retry_max_attempts: 1,
            ..SourceConfig::default()
        })
        .unwrap();
        let err = client.team_history(1).await.unwrap_err();
        assert!(err.is_upstream());
    }
}
