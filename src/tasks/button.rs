use embassy_futures::select::{Either, select};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::Timer;
use esp_hal::gpio::{Input, InputConfig, Pull};
use esp_hal::peripherals::GPIO0;

use crate::drivers::button::{wait_for_press, wait_for_release};
use crate::selection::{ButtonEvent, LONG_PRESS};

/// Latest button event, picked up by the display task on its next tick
pub static BUTTON_STATE: Signal<CriticalSectionRawMutex, ButtonEvent> = Signal::new();

/// Turns the raw button into press and hold events.
///
/// A hold is reported as soon as [`LONG_PRESS`] has passed, not on release, so the
/// hold toggle is visible while the finger is still down.
#[embassy_executor::task]
pub async fn handle_button(button_pin: GPIO0<'static>) {
    let mut button = Input::new(button_pin, InputConfig::default().with_pull(Pull::Up));
    loop {
        wait_for_press(&mut button).await;
        let event = match select(wait_for_release(&mut button), Timer::after(LONG_PRESS)).await {
            Either::First(_) => ButtonEvent::Press,
            Either::Second(_) => ButtonEvent::Hold,
        };
        debug!("BUTTON_TASK: {}", event);
        BUTTON_STATE.signal(event);
        if event == ButtonEvent::Hold {
            wait_for_release(&mut button).await;
        }
    }
}
