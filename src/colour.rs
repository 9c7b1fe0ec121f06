//! Colour helpers for the strip LEDs and the discrete 5mm indicator LEDs.
//!
//! Colours are carried around as [`RGB8`] so they can be handed straight to the
//! `smart-leds` writers. The packed `0x00RRGGBB` form is kept for the constant tables
//! below and for anything that wants to compare colours as plain integers.

use smart_leds::RGB8;

pub const OFF: RGB8 = unpack(0x00_00_00_00);
pub const RED: RGB8 = unpack(0x00_FF_00_00);
pub const GREEN: RGB8 = unpack(0x00_00_FF_00);
pub const BLUE: RGB8 = unpack(0x00_00_00_FF);
pub const YELLOW: RGB8 = unpack(0x00_F0_F0_00);
pub const MAGENTA: RGB8 = unpack(0x00_F0_00_F0);

/// Dimmed variants used for the decimal point, which sits in a brighter housing
pub const RED_DIM: RGB8 = unpack(0x00_30_00_00);
pub const GREEN_DIM: RGB8 = unpack(0x00_00_30_00);
pub const MAGENTA_DIM: RGB8 = unpack(0x00_2F_00_2F);

/// Pack three channels into a 24 bit `0x00RRGGBB` value
pub const fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split a `0x00RRGGBB` value back into channels. The top byte is ignored.
pub const fn unpack(colour: u32) -> RGB8 {
    RGB8 {
        r: ((colour >> 16) & 0xFF) as u8,
        g: ((colour >> 8) & 0xFF) as u8,
        b: (colour & 0xFF) as u8,
    }
}

/// Subtract `amount` from every channel, stopping at zero
pub fn fade(colour: RGB8, amount: u8) -> RGB8 {
    RGB8 {
        r: colour.r.saturating_sub(amount),
        g: colour.g.saturating_sub(amount),
        b: colour.b.saturating_sub(amount),
    }
}

/// Pseudo-rainbow colour wheel.
///
/// Walks red -> green -> blue -> red over the 256 positions in three 85 wide bands,
/// so `wheel(0)` is pure red, `wheel(85)` pure green and `wheel(170)` pure blue.
/// The channels always add up to 255.
pub fn wheel(position: u8) -> RGB8 {
    let mut pos = 255 - position;
    if pos < 85 {
        return RGB8::new(255 - pos * 3, 0, pos * 3);
    }
    if pos < 170 {
        pos -= 85;
        return RGB8::new(0, pos * 3, 255 - pos * 3);
    }
    pos -= 170;
    RGB8::new(pos * 3, 255 - pos * 3, 0)
}

/// The 5mm WS2812 parts used for the dot and status LED have red and green swapped
/// relative to the strip LEDs.
pub const fn swap_red_green(colour: RGB8) -> RGB8 {
    RGB8 {
        r: colour.g,
        g: colour.r,
        b: colour.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_places_channels() {
        assert_eq!(pack(0x12, 0x34, 0x56), 0x0012_3456);
        assert_eq!(unpack(pack(1, 2, 3)), RGB8::new(1, 2, 3));
        assert_eq!(YELLOW, RGB8::new(0xF0, 0xF0, 0x00));
    }

    #[test]
    fn unpack_ignores_top_byte() {
        assert_eq!(unpack(0xFF00_00FF), BLUE);
    }

    #[test]
    fn fade_clamps_at_zero() {
        assert_eq!(fade(unpack(pack(10, 10, 10)), 20), unpack(pack(0, 0, 0)));
        assert_eq!(fade(RGB8::new(200, 15, 30), 20), RGB8::new(180, 0, 10));
        assert_eq!(fade(MAGENTA, 0), MAGENTA);
    }

    #[test]
    fn wheel_hits_primaries_on_band_edges() {
        assert_eq!(wheel(0), RED);
        assert_eq!(wheel(85), GREEN);
        assert_eq!(wheel(170), BLUE);
    }

    #[test]
    fn wheel_is_continuous_and_wraps() {
        for pos in 0..=255u8 {
            let c = wheel(pos);
            assert_eq!(c.r as u16 + c.g as u16 + c.b as u16, 255, "position {pos}");
        }
        // the marquee steps with a wrapping u8, so the cycle closes back on red
        assert_eq!(wheel(255), RED);
        assert_eq!(wheel(254), RGB8::new(252, 0, 3));
        assert_eq!(wheel(1), RGB8::new(252, 3, 0));
    }

    #[test]
    fn swap_is_an_involution() {
        for packed in [0u32, 0x00FF_0000, 0x0012_3456, 0x00F0_00F0, 0x00AB_CDEF] {
            let c = unpack(packed);
            assert_eq!(swap_red_green(swap_red_green(c)), c);
        }
        assert_eq!(swap_red_green(RED), GREEN);
        assert_eq!(swap_red_green(BLUE), BLUE);
    }
}
