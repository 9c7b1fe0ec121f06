use esp_hal::rmt::{ConstChannelAccess, Tx};
use esp_hal_smartled::{SmartLedsAdapterAsync, buffer_size_async};
use smart_leds::{RGB8, SmartLedsWriteAsync};

use crate::layout::MAX_STRIP_PIXELS;

/// We must know what the LED TX buffer size is as a constant for the types involved here
pub const STRIP_BUF_LEN: usize = buffer_size_async(MAX_STRIP_PIXELS);

/// Adapter for a strip on RMT channel `CH`
pub type StripAdapter<const CH: u8> = SmartLedsAdapterAsync<ConstChannelAccess<Tx, CH>, STRIP_BUF_LEN>;

/// Holds the state needed to drive one LED strip
pub struct LedDriver<const CH: u8> {
    led: StripAdapter<CH>,
    failed: bool,
}

impl<const CH: u8> LedDriver<CH> {
    /// Wrap an adapter created with a buffer of [`STRIP_BUF_LEN`] words, e.g.
    /// `SmartLedsAdapterAsync::new(rmt.channel1, pin, [0; STRIP_BUF_LEN])`
    pub fn new(led: StripAdapter<CH>) -> Self {
        Self { led, failed: false }
    }

    /// Transmit `pixels` to the strip.
    ///
    /// Colours go out as given: levels are already chosen per pixel, so there is no
    /// gamma or global brightness pass here. A failed transfer is logged once and the
    /// next dirty frame simply tries again.
    pub async fn write_strip(&mut self, pixels: &[RGB8]) {
        match self.led.write(pixels.iter().copied()).await {
            Ok(()) => self.failed = false,
            Err(_) if !self.failed => {
                self.failed = true;
                error!("Strip on channel {} failed to update", CH);
            }
            Err(_) => {}
        }
    }
}
