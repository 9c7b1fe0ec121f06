//! Composes a full display frame from the application state.

use embassy_time::{Duration, Instant};
use smart_leds::RGB8;

use crate::app::AppState;
use crate::colour::{
    BLUE, GREEN_DIM, MAGENTA, MAGENTA_DIM, OFF, RED_DIM, pack, unpack, wheel,
};
use crate::formatter::format_or_dashes;
use crate::layout::Frame;
use crate::spot::{Date, Metal, MetalSpot, Trend};
use crate::timer::IntervalTimer;

/// Time between marquee steps
pub const MARQUEE_STEP: Duration = Duration::from_millis(25);

/// Wheel distance between neighbouring marquee pixels
pub const MARQUEE_SPACING: u8 = 10;

/// Colour of the lit metal indicator
pub const INDICATOR_COLOUR: RGB8 = BLUE;

/// Overall look of the digits for the selected metal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tint {
    /// Close is above the alert band
    Gain,
    /// Close is below the alert band
    Loss,
    /// Weekend, the market is closed
    Closed,
    /// Within the alert band
    Steady,
}

impl Tint {
    /// A weekend date wins over any price movement. Without a date yet, only the
    /// price counts.
    pub fn choose(spot: &MetalSpot, date: Option<Date>) -> Self {
        if date.is_some_and(|d| d.is_weekend()) {
            return Tint::Closed;
        }
        match spot.trend() {
            Trend::Gain => Tint::Gain,
            Trend::Loss => Tint::Loss,
            Trend::Flat => Tint::Steady,
        }
    }

    /// Segment colour. Red and green use the configured brightness because those
    /// digits share strips with the indicator LEDs and look too bright at full level.
    pub fn segment_colour(self, brightness: u8) -> RGB8 {
        match self {
            Tint::Gain => unpack(pack(0, brightness, 0)),
            Tint::Loss => unpack(pack(brightness, 0, 0)),
            Tint::Closed => MAGENTA,
            Tint::Steady => BLUE,
        }
    }

    /// The dot housing makes it stand out, so red, green and magenta get a dim variant.
    /// The dot stays dark in any other colour.
    pub fn dot_colour(self) -> RGB8 {
        match self {
            Tint::Gain => GREEN_DIM,
            Tint::Loss => RED_DIM,
            Tint::Closed => MAGENTA_DIM,
            Tint::Steady => OFF,
        }
    }
}

/// Rainbow chase on the logo pixels
#[derive(Debug, Clone)]
struct Marquee {
    timer: IntervalTimer,
    position: u8,
}

impl Marquee {
    fn colour(&mut self, pixel: usize, now: Instant) -> RGB8 {
        if pixel == 0 && self.timer.elapsed(now) {
            self.position = self.position.wrapping_add(1);
        }
        wheel(self.position.wrapping_add((pixel as u8).wrapping_mul(MARQUEE_SPACING)))
    }
}

/// Turns [`AppState`] into pixels: digits, dot, metal indicators and marquee.
///
/// The status LED is left to [`crate::status::StatusIndicator`].
#[derive(Debug, Clone)]
pub struct Renderer {
    marquee: Marquee,
    brightness: u8,
}

impl Renderer {
    pub fn new(brightness: u8, start: Instant) -> Self {
        Self {
            marquee: Marquee {
                timer: IntervalTimer::new(MARQUEE_STEP, start),
                position: 0,
            },
            brightness,
        }
    }

    pub fn render(&mut self, state: &AppState, now: Instant, frame: &mut Frame) {
        let layout = frame.layout();
        let spot = state.spot(state.selected);
        let tint = Tint::choose(spot, state.date);

        let digits = format_or_dashes(spot.close);
        frame.draw_digits(&digits, tint.segment_colour(self.brightness), tint.dot_colour());

        for (metal, run) in Metal::ALL.iter().zip(layout.metal_indicators.iter()) {
            let colour = if *metal == state.selected {
                INDICATOR_COLOUR
            } else {
                OFF
            };
            frame.fill_run(*run, colour);
        }

        for pixel in 0..layout.marquee.len {
            let colour = self.marquee.colour(pixel, now);
            frame.set_in_run(layout.marquee, pixel, colour);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::{RED, swap_red_green};
    use crate::layout::{REFERENCE_LAYOUT, StripId};

    fn ms(v: u64) -> Instant {
        Instant::from_millis(v)
    }

    fn state_with(open: f32, close: f32, date: Option<Date>) -> AppState {
        let mut state = AppState::new([0.02; 3]);
        state.spots[Metal::Gold.index()].open = open;
        state.spots[Metal::Gold.index()].close = close;
        state.date = date;
        state
    }

    const FRIDAY: Date = Date::new(2020, 8, 7);
    const SATURDAY: Date = Date::new(2020, 8, 8);

    #[test]
    fn tint_follows_alert_band() {
        let state = state_with(100.0, 105.0, Some(FRIDAY));
        assert_eq!(Tint::choose(state.spot(Metal::Gold), state.date), Tint::Gain);
        let state = state_with(100.0, 96.0, Some(FRIDAY));
        assert_eq!(Tint::choose(state.spot(Metal::Gold), state.date), Tint::Loss);
        let state = state_with(100.0, 101.0, None);
        assert_eq!(Tint::choose(state.spot(Metal::Gold), state.date), Tint::Steady);
    }

    #[test]
    fn weekend_overrides_price() {
        for close in [105.0, 96.0, 100.0] {
            let state = state_with(100.0, close, Some(SATURDAY));
            assert_eq!(Tint::choose(state.spot(Metal::Gold), state.date), Tint::Closed);
        }
    }

    #[test]
    fn gain_renders_green_digits_at_configured_level() {
        let state = state_with(100.0, 105.0, Some(FRIDAY));
        let mut frame = Frame::new(&REFERENCE_LAYOUT);
        Renderer::new(100, ms(0)).render(&state, ms(0), &mut frame);

        // "105.00": the leading 1 lights segments 3 and 4 of the first digit
        let first = frame.strip(StripId::First);
        assert_eq!(first.pixel(9), RGB8::new(0, 100, 0));
        assert_eq!(first.pixel(0), OFF);
        let dot = frame.strip(StripId::Second).pixel(2);
        assert_eq!(dot, swap_red_green(GREEN_DIM));
    }

    #[test]
    fn steady_price_leaves_dot_dark() {
        let state = state_with(100.0, 100.5, Some(FRIDAY));
        let mut frame = Frame::new(&REFERENCE_LAYOUT);
        Renderer::new(100, ms(0)).render(&state, ms(0), &mut frame);
        let second = frame.strip(StripId::Second);
        assert!(second.pixels()[..4].iter().all(|p| *p == OFF));
        // "100.50": ones digit 0 lights segment 0
        assert_eq!(second.pixel(5), BLUE);
    }

    #[test]
    fn weekend_renders_magenta() {
        let state = state_with(100.0, 96.0, Some(SATURDAY));
        let mut frame = Frame::new(&REFERENCE_LAYOUT);
        Renderer::new(100, ms(0)).render(&state, ms(0), &mut frame);
        assert_eq!(frame.strip(StripId::First).pixel(9), OFF);
        // "96.00": ones digit 6 lights segment 0
        assert_eq!(frame.strip(StripId::Second).pixel(5), MAGENTA);
        assert_ne!(frame.strip(StripId::Second).pixel(5), RED);
    }

    #[test]
    fn only_selected_metal_indicator_is_lit() {
        let mut state = state_with(100.0, 100.0, None);
        state.selected = Metal::Silver;
        let mut frame = Frame::new(&REFERENCE_LAYOUT);
        Renderer::new(100, ms(0)).render(&state, ms(0), &mut frame);
        let third = frame.strip(StripId::Third);
        let lit: [bool; 6] = core::array::from_fn(|i| third.pixel(7 + i) == INDICATOR_COLOUR);
        assert_eq!(lit, [false, false, true, true, false, false]);
    }

    #[test]
    fn unfetched_price_shows_dashes() {
        let state = AppState::new([0.02; 3]);
        let mut frame = Frame::new(&REFERENCE_LAYOUT);
        Renderer::new(100, ms(0)).render(&state, ms(0), &mut frame);
        // a dash is the last segment of each digit
        let first = frame.strip(StripId::First);
        assert_eq!(first.pixel(0), OFF);
        assert_eq!(first.pixel(18), BLUE);
    }

    #[test]
    fn marquee_steps_every_25ms() {
        let state = state_with(100.0, 100.0, None);
        let mut frame = Frame::new(&REFERENCE_LAYOUT);
        let mut renderer = Renderer::new(100, ms(0));

        renderer.render(&state, ms(0), &mut frame);
        let third = frame.strip(StripId::Third);
        assert_eq!(third.pixel(0), wheel(0));
        assert_eq!(third.pixel(1), wheel(10));
        assert_eq!(third.pixel(6), wheel(60));

        renderer.render(&state, ms(20), &mut frame);
        assert_eq!(frame.strip(StripId::Third).pixel(0), wheel(0));
        renderer.render(&state, ms(25), &mut frame);
        assert_eq!(frame.strip(StripId::Third).pixel(0), wheel(1));
        assert_eq!(frame.strip(StripId::Third).pixel(6), wheel(61));
    }

    #[test]
    fn unchanged_state_leaves_digit_strips_clean() {
        let state = state_with(100.0, 96.0, Some(FRIDAY));
        let mut frame = Frame::new(&REFERENCE_LAYOUT);
        let mut renderer = Renderer::new(100, ms(0));
        renderer.render(&state, ms(0), &mut frame);
        for id in StripId::ALL {
            frame.strip_mut(id).take_dirty();
        }
        renderer.render(&state, ms(10), &mut frame);
        assert!(!frame.strip(StripId::First).is_dirty());
        assert!(!frame.strip(StripId::Second).is_dirty());
        assert_eq!(frame.strip(StripId::Second).pixel(5), RGB8::new(100, 0, 0));
    }
}
