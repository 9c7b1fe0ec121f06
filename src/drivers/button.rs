use embassy_time::Timer;
use esp_hal::gpio::Input;

use crate::DEBOUNCE;

/// Wait until the button (active low) has been down for the debounce time
pub async fn wait_for_press(button: &mut Input<'_>) {
    loop {
        button.wait_for_low().await;
        Timer::after(DEBOUNCE).await;
        if button.is_low() {
            return;
        }
    }
}

/// Wait until the button has been up for the debounce time
pub async fn wait_for_release(button: &mut Input<'_>) {
    loop {
        button.wait_for_high().await;
        Timer::after(DEBOUNCE).await;
        if button.is_high() {
            return;
        }
    }
}
