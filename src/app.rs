//! Application state and the per-tick composition of every display component.

use embassy_time::{Duration, Instant};

use crate::config::Settings;
use crate::layout::{Frame, StripLayout};
use crate::render::Renderer;
use crate::selection::{ButtonEvent, Cycler, HoldPolicy};
use crate::spot::{Date, METAL_COUNT, Metal, MetalSpot};
use crate::status::{IndicatorStatus, StatusIndicator};

/// Everything the display shows, owned in one place and passed to each component
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub spots: [MetalSpot; METAL_COUNT],
    pub selected: Metal,
    /// Date of the last successful time fetch
    pub date: Option<Date>,
    status: IndicatorStatus,
}

impl AppState {
    pub fn new(alert_percentages: [f32; METAL_COUNT]) -> Self {
        Self {
            spots: alert_percentages.map(MetalSpot::with_alert),
            selected: Metal::default(),
            date: None,
            status: IndicatorStatus::default(),
        }
    }

    pub fn spot(&self, metal: Metal) -> &MetalSpot {
        &self.spots[metal.index()]
    }

    pub fn spot_mut(&mut self, metal: Metal) -> &mut MetalSpot {
        &mut self.spots[metal.index()]
    }

    pub fn status(&self) -> IndicatorStatus {
        self.status
    }

    /// Statuses are levels: setting the current one again is a no-op
    pub fn set_status(&mut self, status: IndicatorStatus) {
        if self.status != status {
            info!("Status {} -> {}", self.status, status);
            self.status = status;
        }
    }
}

/// Knobs taken from the settings file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockOptions {
    pub brightness: u8,
    pub cycle_delay: Duration,
    pub hold_policy: HoldPolicy,
    pub alert_percentages: [f32; METAL_COUNT],
}

impl Default for ClockOptions {
    fn default() -> Self {
        Self {
            brightness: 100,
            cycle_delay: Duration::from_secs(3),
            hold_policy: HoldPolicy::default(),
            alert_percentages: [0.0; METAL_COUNT],
        }
    }
}

impl From<&Settings> for ClockOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            brightness: settings.brightness,
            cycle_delay: settings.cycle_delay(),
            hold_policy: HoldPolicy {
                press_resets_cycle: settings.hold_resets_cycle,
            },
            alert_percentages: settings.alert_percentages(),
        }
    }
}

/// The whole clock face: state, timers and pixel buffers.
///
/// Call [`SpotClock::tick`] every loop iteration, then transmit whatever
/// [`Frame`] reports as dirty.
pub struct SpotClock {
    state: AppState,
    cycler: Cycler,
    renderer: Renderer,
    indicator: StatusIndicator,
    frame: Frame,
    link_up: Option<bool>,
}

impl SpotClock {
    pub fn new(options: ClockOptions, layout: &'static StripLayout, now: Instant) -> Self {
        Self {
            state: AppState::new(options.alert_percentages),
            cycler: Cycler::new(options.cycle_delay, options.hold_policy, now),
            renderer: Renderer::new(options.brightness, now),
            indicator: StatusIndicator::new(now),
            frame: Frame::new(layout),
            link_up: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    pub fn is_held(&self) -> bool {
        self.cycler.is_held()
    }

    /// Report the WiFi link level. Only a change of level touches the status.
    pub fn set_link(&mut self, up: bool) {
        if self.link_up == Some(up) {
            return;
        }
        self.link_up = Some(up);
        self.state.set_status(if up {
            IndicatorStatus::WifiConnected
        } else {
            IndicatorStatus::WifiDisconnected
        });
    }

    pub fn on_button(&mut self, event: ButtonEvent, now: Instant) {
        self.cycler.on_button(event, &mut self.state.selected, now);
    }

    /// Advance timers and redraw the frame
    pub fn tick(&mut self, now: Instant) {
        self.cycler.poll(&mut self.state.selected, now);
        self.renderer.render(&self.state, now, &mut self.frame);
        self.update_status(now);
    }

    /// Only drive the status LED, used when the clock cannot run
    pub fn tick_status_only(&mut self, now: Instant) {
        self.update_status(now);
    }

    fn update_status(&mut self, now: Instant) {
        let colour = self.indicator.colour(self.state.status, now);
        let run = self.frame.layout().status;
        self.frame.set_in_run(run, 0, colour);
    }
}
