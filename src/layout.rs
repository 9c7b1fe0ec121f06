//! Mapping of the logical display onto the three physical strips.
//!
//! A single long strip flickers, so digits, dots and indicator pixels are spread over
//! three shorter strips, each on its own data pin. Where everything sits is described by
//! a [`StripLayout`] value rather than by code, so a different build only needs a new
//! descriptor.

use smart_leds::RGB8;

use crate::colour::{OFF, swap_red_green};
use crate::formatter::{DIGIT_COUNT, DigitFrame};
use crate::segments::{SEGMENT_COUNT, segments_for};
use crate::spot::METAL_COUNT;

/// Number of physical strips
pub const STRIP_COUNT: usize = 3;

/// Capacity of one strip buffer
pub const MAX_STRIP_PIXELS: usize = 64;

/// Pixels lit per segment
pub const PIXELS_PER_SEGMENT: usize = 3;

/// Pixels per digit
pub const PIXELS_PER_DIGIT: usize = SEGMENT_COUNT * PIXELS_PER_SEGMENT;

/// Pixels in the rainbow marquee
pub const MARQUEE_PIXELS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StripId {
    First = 0,
    Second = 1,
    Third = 2,
}

impl StripId {
    pub const ALL: [StripId; STRIP_COUNT] = [StripId::First, StripId::Second, StripId::Third];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A run of consecutive pixels on one strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRun {
    pub strip: StripId,
    pub start: usize,
    pub len: usize,
}

impl PixelRun {
    pub const fn new(strip: StripId, start: usize, len: usize) -> Self {
        Self { strip, start, len }
    }

    const fn end(&self) -> usize {
        self.start + self.len
    }

    const fn overlaps(&self, other: &PixelRun) -> bool {
        self.strip as usize == other.strip as usize
            && self.start < other.end()
            && other.start < self.end()
    }
}

/// Where every logical element of the display lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripLayout {
    pub strip_lengths: [usize; STRIP_COUNT],
    /// Digit runs, least significant digit first
    pub digits: [PixelRun; DIGIT_COUNT],
    /// Candidate decimal point pixels, indexed by [`DigitFrame::dot`]
    pub dots: PixelRun,
    pub status: PixelRun,
    pub marquee: PixelRun,
    /// Two pixels per metal, in [`crate::spot::Metal`] order
    pub metal_indicators: [PixelRun; METAL_COUNT],
}

impl StripLayout {
    const fn runs(&self) -> [PixelRun; DIGIT_COUNT + 3 + METAL_COUNT] {
        [
            self.digits[0],
            self.digits[1],
            self.digits[2],
            self.digits[3],
            self.digits[4],
            self.dots,
            self.status,
            self.marquee,
            self.metal_indicators[0],
            self.metal_indicators[1],
            self.metal_indicators[2],
        ]
    }

    /// Every run fits its strip, no two runs share a pixel and the digit runs are
    /// long enough for seven segments
    pub const fn is_consistent(&self) -> bool {
        let runs = self.runs();
        let mut i = 0;
        while i < STRIP_COUNT {
            if self.strip_lengths[i] > MAX_STRIP_PIXELS {
                return false;
            }
            i += 1;
        }
        let mut i = 0;
        while i < runs.len() {
            if runs[i].end() > self.strip_lengths[runs[i].strip as usize] {
                return false;
            }
            let mut j = i + 1;
            while j < runs.len() {
                if runs[i].overlaps(&runs[j]) {
                    return false;
                }
                j += 1;
            }
            i += 1;
        }
        let mut i = 0;
        while i < DIGIT_COUNT {
            if self.digits[i].len != PIXELS_PER_DIGIT {
                return false;
            }
            i += 1;
        }
        self.status.len == 1 && self.marquee.len == MARQUEE_PIXELS
    }
}

/// The wiring of the clock this firmware was built for
pub const REFERENCE_LAYOUT: StripLayout = StripLayout {
    strip_lengths: [42, 47, 34],
    digits: [
        PixelRun::new(StripId::Third, 13, PIXELS_PER_DIGIT),
        PixelRun::new(StripId::Second, 26, PIXELS_PER_DIGIT),
        PixelRun::new(StripId::Second, 5, PIXELS_PER_DIGIT),
        PixelRun::new(StripId::First, 21, PIXELS_PER_DIGIT),
        PixelRun::new(StripId::First, 0, PIXELS_PER_DIGIT),
    ],
    dots: PixelRun::new(StripId::Second, 0, 4),
    status: PixelRun::new(StripId::Second, 4, 1),
    marquee: PixelRun::new(StripId::Third, 0, MARQUEE_PIXELS),
    metal_indicators: [
        PixelRun::new(StripId::Third, 7, 2),
        PixelRun::new(StripId::Third, 9, 2),
        PixelRun::new(StripId::Third, 11, 2),
    ],
};

const _: () = assert!(REFERENCE_LAYOUT.is_consistent());

/// Pixel buffer for one strip, remembering whether it changed since the last transmit
#[derive(Debug, Clone)]
pub struct StripBuffer {
    pixels: heapless::Vec<RGB8, MAX_STRIP_PIXELS>,
    dirty: bool,
}

impl StripBuffer {
    /// An all-off strip. Starts dirty so the first flush clears the hardware.
    pub fn new(len: usize) -> Self {
        debug_assert!(len <= MAX_STRIP_PIXELS, "strip longer than buffer capacity");
        let mut pixels = heapless::Vec::new();
        // Release builds truncate a longer strip.
        let _ = pixels.resize(len.min(MAX_STRIP_PIXELS), OFF);
        Self {
            pixels,
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixel(&self, index: usize) -> RGB8 {
        self.pixels.get(index).copied().unwrap_or(OFF)
    }

    /// Set a pixel. Writing past the end is a bug: it asserts in debug builds and is
    /// ignored otherwise.
    pub fn set_pixel(&mut self, index: usize, colour: RGB8) {
        debug_assert!(index < self.pixels.len(), "pixel index out of range");
        if let Some(pixel) = self.pixels.get_mut(index) {
            if *pixel != colour {
                *pixel = colour;
                self.dirty = true;
            }
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Pixels to transmit if anything changed since the last call
    pub fn take_dirty(&mut self) -> Option<&[RGB8]> {
        if self.dirty {
            self.dirty = false;
            Some(self.pixels.as_slice())
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[RGB8] {
        self.pixels.as_slice()
    }
}

/// Buffers for all three strips plus the layout that addresses them
#[derive(Debug, Clone)]
pub struct Frame {
    layout: &'static StripLayout,
    strips: [StripBuffer; STRIP_COUNT],
}

impl Frame {
    pub fn new(layout: &'static StripLayout) -> Self {
        Self {
            layout,
            strips: layout.strip_lengths.map(StripBuffer::new),
        }
    }

    pub fn layout(&self) -> &'static StripLayout {
        self.layout
    }

    pub fn strip(&self, id: StripId) -> &StripBuffer {
        &self.strips[id.index()]
    }

    pub fn strip_mut(&mut self, id: StripId) -> &mut StripBuffer {
        &mut self.strips[id.index()]
    }

    pub fn is_dirty(&self) -> bool {
        self.strips.iter().any(StripBuffer::is_dirty)
    }

    /// Set pixel `offset` within a run. Offsets past the run are ignored.
    pub fn set_in_run(&mut self, run: PixelRun, offset: usize, colour: RGB8) {
        debug_assert!(offset < run.len, "offset outside pixel run");
        if offset < run.len {
            self.strip_mut(run.strip).set_pixel(run.start + offset, colour);
        }
    }

    pub fn fill_run(&mut self, run: PixelRun, colour: RGB8) {
        for offset in 0..run.len {
            self.set_in_run(run, offset, colour);
        }
    }

    /// Draw the digits in `colour` and light the decimal point in `dot_colour`.
    ///
    /// Each segment is three consecutive pixels. The dot LED has swapped red and green,
    /// which is corrected here. Every other dot candidate is turned off so a dot from the
    /// previous value never lingers.
    pub fn draw_digits(&mut self, digits: &DigitFrame, colour: RGB8, dot_colour: RGB8) {
        let layout = self.layout;
        for (run, symbol) in layout.digits.iter().zip(digits.symbols.iter()) {
            for (segment, lit) in segments_for(*symbol).into_iter().enumerate() {
                let colour = if lit { colour } else { OFF };
                for px in 0..PIXELS_PER_SEGMENT {
                    self.set_in_run(*run, segment * PIXELS_PER_SEGMENT + px, colour);
                }
            }
        }

        if let Some(dot) = digits.dot.filter(|dot| *dot >= layout.dots.len) {
            warn!("Dot position {} has no pixel", dot);
        }
        let lit = swap_red_green(dot_colour);
        for offset in 0..layout.dots.len {
            let colour = if digits.dot == Some(offset) { lit } else { OFF };
            self.set_in_run(layout.dots, offset, colour);
        }
    }
}
