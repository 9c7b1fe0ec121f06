use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Instant, Ticker};
use esp_hal::peripherals::TIMG0;
use esp_hal::timer::timg::Wdt;

use crate::TICK_PERIOD;
use crate::app::SpotClock;
use crate::drivers::neopixel::LedDriver;
use crate::layout::StripId;
use crate::tasks::button::BUTTON_STATE;

/// WiFi link level, signalled by whoever owns the network stack
pub static LINK_STATE: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// The three strip drivers, one RMT channel each
pub struct Strips {
    pub first: &'static mut LedDriver<0>,
    pub second: &'static mut LedDriver<1>,
    pub third: &'static mut LedDriver<2>,
}

impl Strips {
    /// Transmit every strip whose buffer changed since the last flush
    async fn flush(&mut self, clock: &mut SpotClock) {
        for id in StripId::ALL {
            let Some(pixels) = clock.frame_mut().strip_mut(id).take_dirty() else {
                continue;
            };
            match id {
                StripId::First => self.first.write_strip(pixels).await,
                StripId::Second => self.second.write_strip(pixels).await,
                StripId::Third => self.third.write_strip(pixels).await,
            }
        }
    }
}

/// What the display task runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// The full clock face
    Clock,
    /// Settings are unusable: only the status LED runs, forever
    StatusOnly,
}

/// Display driver main task.
///
/// Every [`TICK_PERIOD`] it applies pending button and link events, ticks the clock,
/// sends changed strips out and feeds the watchdog. Nothing in the loop waits on
/// anything but the ticker and the strip transfers.
#[embassy_executor::task]
pub async fn display_task(
    mut clock: SpotClock,
    mut strips: Strips,
    mut wdt: Wdt<TIMG0<'static>>,
    mode: DisplayMode,
) {
    let mut ticker = Ticker::every(TICK_PERIOD);
    info!("DISPLAY_TASK: Task started in {} mode", mode);
    loop {
        let now = Instant::now();
        match mode {
            DisplayMode::Clock => {
                if let Some(up) = LINK_STATE.try_take() {
                    clock.set_link(up);
                }
                if let Some(event) = BUTTON_STATE.try_take() {
                    clock.on_button(event, now);
                }
                clock.tick(now);
            }
            DisplayMode::StatusOnly => clock.tick_status_only(now),
        }
        strips.flush(&mut clock).await;
        wdt.feed();
        ticker.next().await;
    }
}
