//! Periodic station feed.
//!
//! A single poller owns one resource: the station collection served by
//! `/api/v1/stations`. Each tick spawns an independent fetch, results flow back
//! to the UI loop over an mpsc channel and are folded into a [`StationFeed`].

use crate::station::StationCollection;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(180);
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(60);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const STATIONS_PATH: &str = "/api/v1/stations";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to reach station feed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("station feed responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to decode station feed: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Anything able to produce a fresh station snapshot.
pub trait StationFetcher: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<StationCollection, FetchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpStationFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpStationFetcher {
    pub fn new(api_base: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FetchError::Transport)?;
        Ok(Self {
            client,
            url: stations_url(api_base),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl StationFetcher for HttpStationFetcher {
    async fn fetch(&self) -> Result<StationCollection, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response
            .json::<StationCollection>()
            .await
            .map_err(FetchError::Decode)
    }
}

pub fn stations_url(api_base: &str) -> String {
    format!("{}{STATIONS_PATH}", api_base.trim_end_matches('/'))
}

/// Outcome of folding one resolved fetch into the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedUpdate {
    Accepted,
    Failed,
}

/// Latest snapshot plus the loading, error and staleness flags shown by the UI.
#[derive(Debug)]
pub struct StationFeed {
    snapshot: Option<StationCollection>,
    in_flight: usize,
    error: Option<String>,
    updated_at: Option<Instant>,
    stale_after: Duration,
}

impl StationFeed {
    pub const fn new(stale_after: Duration) -> Self {
        Self {
            snapshot: None,
            in_flight: 0,
            error: None,
            updated_at: None,
            stale_after,
        }
    }

    pub const fn snapshot(&self) -> Option<&StationCollection> {
        self.snapshot.as_ref()
    }

    pub const fn is_fetching(&self) -> bool {
        self.in_flight > 0
    }

    /// First load: nothing to show yet and a request is out.
    pub const fn is_loading(&self) -> bool {
        self.snapshot.is_none() && self.in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub const fn updated_at(&self) -> Option<Instant> {
        self.updated_at
    }

    pub fn is_fresh(&self, now: Instant) -> bool {
        self.updated_at
            .is_some_and(|updated| now.saturating_duration_since(updated) < self.stale_after)
    }

    pub fn begin_fetch(&mut self) {
        self.in_flight += 1;
    }

    /// Failed fetches keep the previous snapshot visible.
    pub fn apply(
        &mut self,
        result: Result<StationCollection, FetchError>,
        now: Instant,
    ) -> FeedUpdate {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(collection) => {
                info!(stations = collection.len(), "station snapshot accepted");
                let violations = collection.capacity_violations();
                if violations > 0 {
                    debug!(violations, "stations report more bikes and docks than capacity");
                }
                self.snapshot = Some(collection);
                self.error = None;
                self.updated_at = Some(now);
                FeedUpdate::Accepted
            }
            Err(error) => {
                warn!(%error, stale = self.snapshot.is_some(), "station fetch failed");
                self.error = Some(error.to_string());
                FeedUpdate::Failed
            }
        }
    }
}

impl Default for StationFeed {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_AFTER)
    }
}

#[derive(Debug)]
pub enum FeedMessage {
    Started,
    Finished(Result<StationCollection, FetchError>),
}

/// Aborts the polling loop when dropped. In-flight fetches still resolve.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
    refresh: Arc<Notify>,
}

impl PollerHandle {
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Fetches immediately, then on every `interval` tick regardless of the
/// previous outcome. Requests are never cancelled, so a slow response can land
/// after a newer one.
pub fn spawn_poller<F: StationFetcher>(
    fetcher: F,
    interval: Duration,
    tx: mpsc::Sender<FeedMessage>,
) -> PollerHandle {
    let fetcher = Arc::new(fetcher);
    let refresh = Arc::new(Notify::new());
    let wake = refresh.clone();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                () = wake.notified() => {
                    debug!("manual station refresh requested");
                }
            }

            if tx.send(FeedMessage::Started).await.is_err() {
                break;
            }

            let fetcher = fetcher.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = fetcher.fetch().await;
                let _ = tx.send(FeedMessage::Finished(result)).await;
            });
        }
    });

    PollerHandle { task, refresh }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AvailabilityStatus;
    use crate::station::fixtures::{collection, station};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fifty_stations() -> StationCollection {
        collection(
            (0..50)
                .map(|index| station(&index.to_string(), 5, AvailabilityStatus::Medium))
                .collect(),
        )
    }

    #[test]
    fn stations_url_joins_base_and_path() {
        assert_eq!(stations_url(""), "/api/v1/stations");
        assert_eq!(
            stations_url("http://localhost:8000/"),
            "http://localhost:8000/api/v1/stations"
        );
    }

    #[test]
    fn failed_fetch_keeps_previous_snapshot_and_raises_error() {
        let mut feed = StationFeed::default();
        let now = Instant::now();

        feed.begin_fetch();
        assert!(feed.is_loading());
        assert_eq!(feed.apply(Ok(fifty_stations()), now), FeedUpdate::Accepted);
        assert!(!feed.has_error());

        feed.begin_fetch();
        assert!(feed.is_fetching());
        assert!(!feed.is_loading());
        let error = FetchError::Status(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(feed.apply(Err(error), now), FeedUpdate::Failed);

        assert!(feed.has_error());
        assert_eq!(feed.snapshot().map(StationCollection::len), Some(50));
        assert!(!feed.is_fetching());
    }

    #[test]
    fn successful_fetch_clears_error() {
        let mut feed = StationFeed::default();
        let now = Instant::now();
        feed.begin_fetch();
        feed.apply(Err(FetchError::Status(reqwest::StatusCode::NOT_FOUND)), now);
        assert!(feed.error().is_some_and(|message| message.contains("404")));

        feed.begin_fetch();
        feed.apply(Ok(fifty_stations()), now);
        assert!(feed.error().is_none());
    }

    #[test]
    fn freshness_window_is_sixty_seconds() {
        let mut feed = StationFeed::default();
        let start = Instant::now();
        assert!(!feed.is_fresh(start));

        feed.begin_fetch();
        feed.apply(Ok(fifty_stations()), start);
        assert!(feed.is_fresh(start + Duration::from_secs(59)));
        assert!(!feed.is_fresh(start + Duration::from_secs(60)));
    }

    #[test]
    fn overlapping_fetches_keep_fetching_until_all_resolve() {
        let mut feed = StationFeed::default();
        let now = Instant::now();
        feed.begin_fetch();
        feed.begin_fetch();

        let mut slow = fifty_stations();
        slow.stations.truncate(10);

        feed.apply(Ok(fifty_stations()), now);
        assert!(feed.is_fetching());
        feed.apply(Ok(slow), now);
        assert!(!feed.is_fetching());
        assert_eq!(feed.snapshot().map(StationCollection::len), Some(10));
    }

    struct CountingFetcher {
        calls: Arc<AtomicUsize>,
    }

    impl StationFetcher for CountingFetcher {
        async fn fetch(&self) -> Result<StationCollection, FetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call % 2 == 0 {
                Ok(fifty_stations())
            } else {
                Err(FetchError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
            }
        }
    }

    async fn next_finished(rx: &mut mpsc::Receiver<FeedMessage>) -> Result<StationCollection, FetchError> {
        loop {
            match rx.recv().await {
                Some(FeedMessage::Finished(result)) => return result,
                Some(FeedMessage::Started) => {}
                None => panic!("poller channel closed"),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn poller_fetches_immediately_then_every_interval() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, mut rx) = mpsc::channel(16);
        let _handle = spawn_poller(
            CountingFetcher {
                calls: calls.clone(),
            },
            DEFAULT_POLL_INTERVAL,
            tx,
        );

        assert!(next_finished(&mut rx).await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // A failure does not stop the schedule.
        assert!(next_finished(&mut rx).await.is_err());
        assert!(next_finished(&mut rx).await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_now_fetches_out_of_schedule() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, mut rx) = mpsc::channel(16);
        let handle = spawn_poller(
            CountingFetcher {
                calls: calls.clone(),
            },
            Duration::from_secs(3600),
            tx,
        );

        next_finished(&mut rx).await.ok();
        let requested = tokio::time::Instant::now();
        handle.refresh_now();
        next_finished(&mut rx).await.ok();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(requested.elapsed() < Duration::from_secs(3600));
    }
}
