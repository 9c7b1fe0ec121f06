//! Price to digit conversion.
//!
//! A price is laid out on the five digits depending on how large its integer part is:
//!
//! | integer part      | shown as  | dot |
//! |-------------------|-----------|-----|
//! | 1 - 99            | ` XX.XX`  | 2   |
//! | 100 - 999         | `XXX.XX`  | 2   |
//! | 1000 - 9999       | `XXXX.X`  | 3   |
//! | 10000 - 99999     | `XXXXX`   | -   |
//!
//! Exactly zero is shown as dashes and anything below one is left blank, which is what
//! the display shows before the first quote arrives.

use core::fmt;

use crate::segments::Symbol;

/// Number of digits on the display
pub const DIGIT_COUNT: usize = 5;

/// The five symbols to show plus the position of the decimal point.
///
/// `symbols[0]` is the least significant (rightmost) digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitFrame {
    pub symbols: [Symbol; DIGIT_COUNT],
    /// Index of the lit dot pixel, `None` when no dot is shown
    pub dot: Option<usize>,
}

impl DigitFrame {
    /// A frame with every digit set to the same symbol and no dot
    pub const fn filled(symbol: Symbol) -> Self {
        Self {
            symbols: [symbol; DIGIT_COUNT],
            dot: None,
        }
    }

    /// Symbols in reading order, leftmost first
    pub fn most_significant_first(&self) -> [Symbol; DIGIT_COUNT] {
        let mut out = self.symbols;
        out.reverse();
        out
    }

    fn from_reading_order(symbols: [Symbol; DIGIT_COUNT], dot: Option<usize>) -> Self {
        let mut symbols = symbols;
        symbols.reverse();
        Self { symbols, dot }
    }
}

/// Values the display cannot represent
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatError {
    /// Integer part needs more than five digits
    TooLarge(f32),
    /// Negative or NaN
    NotAPrice(f32),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::TooLarge(v) => write!(f, "{v} does not fit on five digits"),
            FormatError::NotAPrice(v) => write!(f, "{v} is not a displayable price"),
        }
    }
}

/// Largest integer part that still fits
const MAX_INTEGER_PART: u32 = 99_999;

/// Split a price into digits.
pub fn format(value: f32) -> Result<DigitFrame, FormatError> {
    if value.is_nan() || value < 0.0 {
        return Err(FormatError::NotAPrice(value));
    }
    if value == 0.0 {
        return Ok(DigitFrame::filled(Symbol::Dash));
    }
    if value >= (MAX_INTEGER_PART + 1) as f32 {
        return Err(FormatError::TooLarge(value));
    }

    // The band comes from the truncated integer part. Only the fraction is rounded,
    // and a fraction that rounds up to 100 shows as .00 without carrying.
    let int_part = value as u32;
    let frac_part = ((value - int_part as f32) * 100.0 + 0.5) as u32;

    let digit = |value: u32, place: u32| Symbol::ones_of(value / place);
    let frac_tens = digit(frac_part, 10);
    let frac_ones = digit(frac_part, 1);

    let frame = match int_part {
        0 => DigitFrame::filled(Symbol::Blank),
        1..=99 => DigitFrame::from_reading_order(
            [
                Symbol::Blank,
                digit(int_part, 10),
                digit(int_part, 1),
                frac_tens,
                frac_ones,
            ],
            Some(2),
        ),
        100..=999 => DigitFrame::from_reading_order(
            [
                digit(int_part, 100),
                digit(int_part, 10),
                digit(int_part, 1),
                frac_tens,
                frac_ones,
            ],
            Some(2),
        ),
        1_000..=9_999 => DigitFrame::from_reading_order(
            [
                digit(int_part, 1_000),
                digit(int_part, 100),
                digit(int_part, 10),
                digit(int_part, 1),
                frac_tens,
            ],
            Some(3),
        ),
        10_000..=MAX_INTEGER_PART => DigitFrame::from_reading_order(
            [
                digit(int_part, 10_000),
                digit(int_part, 1_000),
                digit(int_part, 100),
                digit(int_part, 10),
                digit(int_part, 1),
            ],
            None,
        ),
        _ => return Err(FormatError::TooLarge(value)),
    };
    Ok(frame)
}

/// Like [`format`] but falls back to dashes for values that cannot be shown.
pub fn format_or_dashes(value: f32) -> DigitFrame {
    match format(value) {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Cannot display price: {}", e);
            DigitFrame::filled(Symbol::Dash)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::{Blank, Dash, Digit};

    fn digits(reading: [u8; 5]) -> [Symbol; 5] {
        reading.map(Digit)
    }

    #[test]
    fn zero_is_dashes() {
        let frame = format(0.0).unwrap();
        assert_eq!(frame.symbols, [Dash; 5]);
        assert_eq!(frame.dot, None);
    }

    #[test]
    fn below_one_is_blank() {
        let frame = format(0.0001).unwrap();
        assert_eq!(frame.symbols, [Blank; 5]);
        assert_eq!(frame.dot, None);
    }

    #[test]
    fn two_digit_band() {
        let frame = format(45.67).unwrap();
        assert_eq!(
            frame.most_significant_first(),
            [Blank, Digit(4), Digit(5), Digit(6), Digit(7)]
        );
        assert_eq!(frame.dot, Some(2));
        // stored least significant first
        assert_eq!(frame.symbols[0], Digit(7));
        assert_eq!(frame.symbols[4], Blank);
    }

    #[test]
    fn three_digit_band() {
        let frame = format(456.78).unwrap();
        assert_eq!(frame.most_significant_first(), digits([4, 5, 6, 7, 8]));
        assert_eq!(frame.dot, Some(2));
    }

    #[test]
    fn four_digit_band_keeps_one_decimal() {
        let frame = format(4567.8).unwrap();
        assert_eq!(frame.most_significant_first(), digits([4, 5, 6, 7, 8]));
        assert_eq!(frame.dot, Some(3));
    }

    #[test]
    fn five_digit_band_has_no_dot() {
        let frame = format(45678.0).unwrap();
        assert_eq!(frame.most_significant_first(), digits([4, 5, 6, 7, 8]));
        assert_eq!(frame.dot, None);
    }

    #[test]
    fn small_values_keep_leading_zero_in_fraction() {
        let frame = format(7.05).unwrap();
        assert_eq!(
            frame.most_significant_first(),
            [Blank, Digit(0), Digit(7), Digit(0), Digit(5)]
        );
    }

    #[test]
    fn fraction_rounding_never_changes_band() {
        let cases: [(f32, [Symbol; 5], Option<usize>); 5] = [
            (0.996, [Blank; 5], None),
            (45.999, [Blank, Digit(4), Digit(5), Digit(0), Digit(0)], Some(2)),
            (99.996, [Blank, Digit(9), Digit(9), Digit(0), Digit(0)], Some(2)),
            (999.996, digits([9, 9, 9, 0, 0]), Some(2)),
            (9999.96, digits([9, 9, 9, 9, 9]), Some(3)),
        ];
        for (value, symbols, dot) in cases {
            let frame = format(value).unwrap();
            assert_eq!(frame.most_significant_first(), symbols, "{value}");
            assert_eq!(frame.dot, dot, "{value}");
        }
    }

    #[test]
    fn band_boundaries() {
        let cases: [(f32, [Symbol; 5], Option<usize>); 7] = [
            (99.99, [Blank, Digit(9), Digit(9), Digit(9), Digit(9)], Some(2)),
            (100.0, digits([1, 0, 0, 0, 0]), Some(2)),
            (999.99, digits([9, 9, 9, 9, 9]), Some(2)),
            (1000.0, digits([1, 0, 0, 0, 0]), Some(3)),
            (9999.9, digits([9, 9, 9, 9, 9]), Some(3)),
            (10000.0, digits([1, 0, 0, 0, 0]), None),
            (99999.99, digits([9, 9, 9, 9, 9]), None),
        ];
        for (value, symbols, dot) in cases {
            let frame = format(value).unwrap();
            assert_eq!(frame.most_significant_first(), symbols, "{value}");
            assert_eq!(frame.dot, dot, "{value}");
        }
        assert!(matches!(format(100_000.0), Err(FormatError::TooLarge(_))));
    }

    #[test]
    fn out_of_range_is_reported() {
        assert!(matches!(format(100_000.0), Err(FormatError::TooLarge(_))));
        assert!(matches!(format(-1.0), Err(FormatError::NotAPrice(_))));
        assert!(matches!(format(f32::NAN), Err(FormatError::NotAPrice(_))));
    }

    #[test]
    fn fallback_is_dashes() {
        assert_eq!(format_or_dashes(250_000.0), DigitFrame::filled(Dash));
        assert_eq!(format_or_dashes(12.5), format(12.5).unwrap());
    }
}
