//! Connection and fetch status on the single indicator LED.
//!
//! Each status has a fixed pattern. Blinking statuses own their own timer, created once,
//! so switching between statuses never disturbs another pattern's phase.
//!
//! | status            | pattern                      |
//! |-------------------|------------------------------|
//! | SD card failure   | yellow / off every 250 ms    |
//! | WiFi connecting   | red / off every 250 ms       |
//! | WiFi connected    | green                        |
//! | WiFi disconnected | red                          |
//! | fetching data     | blue                         |
//! | fetch failed      | red / green every 1000 ms    |
//! | fetch success     | green / blue every 1000 ms   |

use embassy_time::{Duration, Instant};
use smart_leds::RGB8;

use crate::colour::{BLUE, GREEN, OFF, RED, YELLOW, swap_red_green};
use crate::timer::Blinker;

/// Blink period for link and storage problems
pub const FAST_BLINK: Duration = Duration::from_millis(250);

/// Blink period for fetch results
pub const SLOW_BLINK: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorStatus {
    SdCardFailure,
    WifiConnecting,
    WifiConnected,
    #[default]
    WifiDisconnected,
    FetchingData,
    FetchFailed,
    FetchSuccess,
}

/// Drives the indicator colour from the current status
#[derive(Debug, Clone)]
pub struct StatusIndicator {
    sd_failure: Blinker,
    connecting: Blinker,
    fetch_failed: Blinker,
    fetch_success: Blinker,
}

impl StatusIndicator {
    pub fn new(start: Instant) -> Self {
        Self {
            sd_failure: Blinker::new(FAST_BLINK, start),
            connecting: Blinker::new(FAST_BLINK, start),
            fetch_failed: Blinker::new(SLOW_BLINK, start),
            fetch_success: Blinker::new(SLOW_BLINK, start),
        }
    }

    /// Colour for the indicator at `now`, already corrected for the swapped LED
    pub fn colour(&mut self, status: IndicatorStatus, now: Instant) -> RGB8 {
        let colour = match status {
            IndicatorStatus::SdCardFailure => pick(self.sd_failure.poll(now), YELLOW, OFF),
            IndicatorStatus::WifiConnecting => pick(self.connecting.poll(now), RED, OFF),
            IndicatorStatus::WifiConnected => GREEN,
            IndicatorStatus::WifiDisconnected => RED,
            IndicatorStatus::FetchingData => BLUE,
            IndicatorStatus::FetchFailed => pick(self.fetch_failed.poll(now), RED, GREEN),
            IndicatorStatus::FetchSuccess => pick(self.fetch_success.poll(now), GREEN, BLUE),
        };
        swap_red_green(colour)
    }
}

fn pick(on: bool, on_colour: RGB8, off_colour: RGB8) -> RGB8 {
    if on { on_colour } else { off_colour }
}
