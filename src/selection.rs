//! Which metal is on the display, and when it changes.

use embassy_time::{Duration, Instant};

use crate::spot::Metal;
use crate::timer::IntervalTimer;

/// How long the button must be held before it counts as a long press
pub const LONG_PRESS: Duration = Duration::from_millis(1000);

/// Button events, already debounced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Released before [`LONG_PRESS`]
    Press,
    /// Held for at least [`LONG_PRESS`]
    Hold,
}

/// What a short press does while hold is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoldPolicy {
    /// Restart the cycle timer on a short press even while hold is on
    pub press_resets_cycle: bool,
}

impl Default for HoldPolicy {
    fn default() -> Self {
        Self {
            press_resets_cycle: true,
        }
    }
}

/// Rotates through the metals on a timer and on button presses.
///
/// Hold mode stops the automatic rotation; the button keeps working.
#[derive(Debug, Clone)]
pub struct Cycler {
    timer: IntervalTimer,
    hold: bool,
    policy: HoldPolicy,
}

impl Cycler {
    pub fn new(cycle_delay: Duration, policy: HoldPolicy, start: Instant) -> Self {
        Self {
            timer: IntervalTimer::new(cycle_delay, start),
            hold: false,
            policy,
        }
    }

    pub fn is_held(&self) -> bool {
        self.hold
    }

    /// Advance `selected` if the cycle delay has passed. Returns true on a change.
    pub fn poll(&mut self, selected: &mut Metal, now: Instant) -> bool {
        if self.timer.elapsed(now) && !self.hold {
            *selected = selected.next();
            debug!("Cycled to {}", *selected);
            return true;
        }
        false
    }

    /// Apply a button event. Returns true when the selection changed.
    pub fn on_button(&mut self, event: ButtonEvent, selected: &mut Metal, now: Instant) -> bool {
        match event {
            ButtonEvent::Press => {
                if !self.hold || self.policy.press_resets_cycle {
                    self.timer.reset(now);
                }
                *selected = selected.next();
                debug!("Selected {}", *selected);
                true
            }
            ButtonEvent::Hold => {
                self.hold = !self.hold;
                info!("Hold {}", if self.hold { "on" } else { "off" });
                false
            }
        }
    }
}
