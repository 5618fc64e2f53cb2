//! Periodic now-playing polling.
//!
//! A [`Poller`] owns one tokio task that fetches from a [`NowPlayingSource`]
//! on a fixed interval, classifies every response into a [`PollState`] and
//! publishes it through a callback and a watch channel. The returned
//! [`CancelHandle`] is the only way to stop it; dropping the handle stops it too.

pub mod classify;
pub mod reconcile;
pub mod source;
pub mod state;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use reqwest::Url;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub use classify::classify;
pub use reconcile::Reconciler;
pub use source::{HttpOptions, HttpSource, NowPlayingSource, RawResponse, TransportError};
pub use state::{PollError, PollErrorKind, PollState};

#[derive(Debug, Error)]
pub enum PollerError {
    #[error("poll interval must be positive")]
    ZeroInterval,
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

type Completed = BoxFuture<'static, (u64, Result<RawResponse, TransportError>)>;

pub struct Poller<S> {
    source: Arc<S>,
    interval: Duration,
}

impl<S: NowPlayingSource + 'static> Poller<S> {
    pub fn new(source: S, interval: Duration) -> Result<Self, PollerError> {
        if interval.is_zero() {
            return Err(PollerError::ZeroInterval);
        }
        Ok(Self {
            source: Arc::new(source),
            interval,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawn the polling task. The first fetch goes out immediately.
    ///
    /// `on_update` runs on the polling task for every applied transition and
    /// never after [`CancelHandle::cancel`] has returned.
    pub fn start<F>(self, on_update: F) -> CancelHandle
    where
        F: FnMut(PollState) + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = Arc::new(AtomicBool::new(false));
        let (state_tx, state_rx) = watch::channel(PollState::Loading);

        let task = tokio::spawn(run(
            self.source,
            self.interval,
            token.clone(),
            Arc::clone(&cancelled),
            state_tx,
            on_update,
        ));

        CancelHandle {
            token,
            cancelled,
            state_rx,
            task,
        }
    }
}

/// Poll `endpoint` over HTTPS every `interval_ms` with default client options.
pub fn start<F>(endpoint: Url, interval_ms: u64, on_update: F) -> Result<CancelHandle, PollerError>
where
    F: FnMut(PollState) + Send + 'static,
{
    let source = HttpSource::new(endpoint, &HttpOptions::default())?;
    let poller = Poller::new(source, Duration::from_millis(interval_ms))?;
    Ok(poller.start(on_update))
}

/// One fetch, classified. No scheduling, no reconciliation.
pub async fn poll_once<S: NowPlayingSource>(source: &S) -> PollState {
    classify(source.fetch().await)
}

async fn run<S, F>(
    source: Arc<S>,
    interval: Duration,
    token: CancellationToken,
    cancelled: Arc<AtomicBool>,
    state_tx: watch::Sender<PollState>,
    mut on_update: F,
) where
    S: NowPlayingSource + 'static,
    F: FnMut(PollState) + Send + 'static,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut in_flight: FuturesUnordered<Completed> = FuturesUnordered::new();
    let mut reconciler = Reconciler::default();
    let mut next_seq: u64 = 0;

    loop {
        tokio::select! {
            biased;

            _ = token.cancelled() => {
                debug!(dropped = in_flight.len(), "poller cancelled");
                break;
            }

            Some((seq, outcome)) = in_flight.next(), if !in_flight.is_empty() => {
                let state = classify(outcome);
                if !reconciler.accept(seq) {
                    debug!(seq, state = state.label(), "discarding stale response");
                    continue;
                }
                if cancelled.load(Ordering::Acquire) {
                    break;
                }
                log_transition(&state_tx.borrow(), &state, seq);
                state_tx.send_replace(state.clone());
                on_update(state);
            }

            _ = ticker.tick() => {
                let seq = next_seq;
                next_seq += 1;
                debug!(seq, in_flight = in_flight.len(), "poll tick");

                let source = Arc::clone(&source);
                in_flight.push(async move { (seq, source.fetch().await) }.boxed());
            }
        }
    }
}

fn log_transition(previous: &PollState, next: &PollState, seq: u64) {
    match next {
        PollState::Error(err) => {
            warn!(seq, kind = ?err.kind(), error = %err, "now-playing poll failed");
        }
        PollState::Playing(track) if previous.track() != Some(track) => {
            info!(seq, title = %track.title, artist = %track.artist, "now playing");
        }
        _ if previous.label() != next.label() => {
            info!(seq, from = previous.label(), to = next.label(), "state changed");
        }
        _ => {}
    }
}

/// Owner's grip on a running poller.
pub struct CancelHandle {
    token: CancellationToken,
    cancelled: Arc<AtomicBool>,
    state_rx: watch::Receiver<PollState>,
    task: JoinHandle<()>,
}

impl CancelHandle {
    /// Stop polling. Responses still in flight are dropped unseen.
    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        self.token.cancel();
        self.task.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Latest applied state.
    pub fn state(&self) -> PollState {
        self.state_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state_rx.clone()
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
