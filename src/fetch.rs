//! Quote and time fetching.
//!
//! WiFi and HTTP live outside this crate, behind [`SpotFeed`]. This module decides when
//! to fetch, which metal comes next and what ends up in [`AppState`].

use core::fmt;

use embassy_time::{Duration, Instant};

use crate::app::AppState;
use crate::spot::{Metal, Timestamp};
use crate::status::IndicatorStatus;
use crate::timer::IntervalTimer;

/// Time between fetches once the first one has run
pub const FETCH_PERIOD: Duration = Duration::from_secs(60);

/// Which daily price to ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QuoteField {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedError {
    /// The request did not complete
    Transport,
    /// The response was not the expected document
    Decode,
    /// The response has no price for the instrument
    MissingQuote,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FeedError::Transport => "request failed",
            FeedError::Decode => "unexpected response",
            FeedError::MissingQuote => "no quote in response",
        };
        f.write_str(msg)
    }
}

/// Source of quotes and the current date, usually an HTTP client
#[allow(async_fn_in_trait)]
pub trait SpotFeed {
    async fn timestamp(&mut self) -> Result<Timestamp, FeedError>;

    async fn quote(&mut self, metal: Metal, field: QuoteField) -> Result<f32, FeedError>;
}

/// Decides when to fetch and applies the results to the state.
///
/// The first fetch is due as soon as the link is up, later ones every
/// [`FETCH_PERIOD`]. Each fetch refreshes one metal, rotating through all three.
#[derive(Debug, Clone)]
pub struct FetchScheduler {
    timer: IntervalTimer,
    next_metal: Metal,
}

impl FetchScheduler {
    pub fn new(now: Instant) -> Self {
        Self {
            timer: IntervalTimer::due_at(FETCH_PERIOD, now),
            next_metal: Metal::Gold,
        }
    }

    /// Metal the next fetch will refresh
    pub fn next_metal(&self) -> Metal {
        self.next_metal
    }

    /// True when a fetch should start. Never due while the link is down.
    pub fn is_due(&mut self, now: Instant, link_up: bool) -> bool {
        link_up && self.timer.elapsed(now)
    }

    /// Fetch the date and one metal's open and close.
    ///
    /// Open and close are stored together, only when both arrived, so a failure never
    /// leaves a mismatched pair. A failed date fetch keeps the previous date. Returns
    /// true when the quote was updated.
    pub async fn fetch<F: SpotFeed>(&mut self, feed: &mut F, state: &mut AppState) -> bool {
        state.set_status(IndicatorStatus::FetchingData);

        match feed.timestamp().await {
            Ok(ts) => {
                debug!(
                    "Time {}-{}-{} {}:{}",
                    ts.date.year,
                    ts.date.month,
                    ts.date.day,
                    ts.hour,
                    ts.minute
                );
                state.date = Some(ts.date);
            }
            Err(e) => warn!("Time fetch failed: {}", e),
        }

        let metal = self.next_metal;
        self.next_metal = metal.next();

        match fetch_pair(feed, metal).await {
            Ok((open, close)) => {
                info!("{} open {} close {}", metal.instrument(), open, close);
                let spot = state.spot_mut(metal);
                spot.open = open;
                spot.close = close;
                state.set_status(IndicatorStatus::FetchSuccess);
                true
            }
            Err(e) => {
                warn!("{} fetch failed: {}", metal.instrument(), e);
                state.set_status(IndicatorStatus::FetchFailed);
                false
            }
        }
    }
}

async fn fetch_pair<F: SpotFeed>(feed: &mut F, metal: Metal) -> Result<(f32, f32), FeedError> {
    let open = feed.quote(metal, QuoteField::Open).await?;
    let close = feed.quote(metal, QuoteField::Close).await?;
    Ok((open, close))
}
