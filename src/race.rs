//! Race an operation against a sentinel timer.
//!
//! Whichever settles first wins. The loser is never cancelled: when the timer
//! wins, the caller gets the primary back and may await it later, e.g. to
//! replace a loading placeholder with the real result.
//!
//! ```rust
//! use std::time::Duration;
//! use wave_batch::race::{race_with_sentinel, RaceOutcome};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let slow = async {
//!     tokio::time::sleep(Duration::from_millis(50)).await;
//!     "ready"
//! };
//! match race_with_sentinel(slow, Duration::from_millis(5), "loading").await {
//!     RaceOutcome::Primary(v) => println!("{v}"),
//!     RaceOutcome::Sentinel { sentinel, pending } => {
//!         println!("{sentinel}");
//!         assert_eq!(pending.await, "ready");
//!     }
//! }
//! # }
//! ```

use crate::Result;
use futures::future::{self, Either};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

pub enum RaceOutcome<T, S, P> {
    /// The primary settled first.
    Primary(T),
    /// The timer fired first; `pending` is the still-live primary.
    Sentinel { sentinel: S, pending: P },
}

// `pending` is usually an opaque future, so it is printed as `..`.
impl<T: fmt::Debug, S: fmt::Debug, P> fmt::Debug for RaceOutcome<T, S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceOutcome::Primary(v) => f.debug_tuple("Primary").field(v).finish(),
            RaceOutcome::Sentinel { sentinel, .. } => f
                .debug_struct("Sentinel")
                .field("sentinel", sentinel)
                .finish_non_exhaustive(),
        }
    }
}

impl<T, S, P> RaceOutcome<T, S, P> {
    pub fn is_primary(&self) -> bool {
        matches!(self, RaceOutcome::Primary(_))
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, RaceOutcome::Sentinel { .. })
    }

    pub fn primary(self) -> Option<T> {
        match self {
            RaceOutcome::Primary(v) => Some(v),
            RaceOutcome::Sentinel { .. } => None,
        }
    }

    pub fn into_pending(self) -> Option<P> {
        match self {
            RaceOutcome::Primary(_) => None,
            RaceOutcome::Sentinel { pending, .. } => Some(pending),
        }
    }
}

impl<T, S, P> RaceOutcome<T, S, P>
where
    P: Future<Output = T>,
{
    /// The primary's value, waiting for it if the sentinel won.
    pub async fn settle(self) -> T {
        match self {
            RaceOutcome::Primary(v) => v,
            RaceOutcome::Sentinel { pending, .. } => pending.await,
        }
    }
}

/// Race `primary` against a timer that yields `sentinel` after `delay`.
///
/// The primary is polled first, so it wins a tie. When the sentinel wins the
/// primary is handed back unpolled-to-completion; it only makes progress while
/// someone polls it. Use [`race_in_background`] for a primary that must keep
/// running on its own.
pub async fn race_with_sentinel<F, S>(
    primary: F,
    delay: Duration,
    sentinel: S,
) -> RaceOutcome<F::Output, S, Pin<Box<F>>>
where
    F: Future,
{
    let primary = Box::pin(primary);
    let timer = Box::pin(tokio::time::sleep(delay));
    match future::select(primary, timer).await {
        Either::Left((value, _)) => {
            debug!("primary settled before sentinel");
            RaceOutcome::Primary(value)
        }
        Either::Right(((), pending)) => {
            debug!(delay_ms = delay.as_millis() as u64, "sentinel fired first");
            RaceOutcome::Sentinel { sentinel, pending }
        }
    }
}

/// Handle to a primary still running on the runtime.
#[derive(Debug)]
pub struct Pending<T> {
    handle: JoinHandle<T>,
}

impl<T> Pending<T> {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle)
            .poll(cx)
            .map(|r| r.map_err(crate::Error::from))
    }
}

/// Like [`race_with_sentinel`], but the primary is spawned and keeps running
/// whether or not the returned [`Pending`] is ever awaited.
///
/// Fails only if the spawned primary panics before the timer fires.
pub async fn race_in_background<F, S>(
    primary: F,
    delay: Duration,
    sentinel: S,
) -> Result<RaceOutcome<F::Output, S, Pending<F::Output>>>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let handle = tokio::spawn(primary);
    let timer = Box::pin(tokio::time::sleep(delay));
    match future::select(handle, timer).await {
        Either::Left((joined, _)) => {
            debug!("background primary settled before sentinel");
            Ok(RaceOutcome::Primary(joined?))
        }
        Either::Right(((), handle)) => {
            debug!(delay_ms = delay.as_millis() as u64, "sentinel fired first");
            Ok(RaceOutcome::Sentinel {
                sentinel,
                pending: Pending { handle },
            })
        }
    }
}
