//! Digit to segment encoding.
//!
//! The segments on the hand-built digits are wired in strip order, which does not follow
//! the usual a..g convention. The table below matches the physical wiring and must not
//! be reordered.

/// Number of segments in one digit
pub const SEGMENT_COUNT: usize = 7;

/// One character that can be shown on a digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    /// A decimal digit, 0 to 9
    Digit(u8),
    /// All segments off
    Blank,
    /// Centre bar only
    Dash,
}

impl Symbol {
    /// Row of [`SEGMENT_TABLE`] for this symbol
    pub fn index(self) -> usize {
        match self {
            Symbol::Digit(d) => {
                debug_assert!(d < 10, "digit out of range");
                // release builds show an eight rather than reading past the digits
                if d < 10 { usize::from(d) } else { 8 }
            }
            Symbol::Blank => 10,
            Symbol::Dash => 11,
        }
    }

    /// Least significant decimal digit of `value`
    pub fn ones_of(value: u32) -> Self {
        Symbol::Digit((value % 10) as u8)
    }
}

/// Segment states for 0-9, blank and dash, in strip order
pub const SEGMENT_TABLE: [[bool; SEGMENT_COUNT]; 12] = {
    const X: bool = true;
    const O: bool = false;
    [
        [X, X, X, X, X, X, O], // 0
        [O, O, O, X, X, O, O], // 1
        [X, O, X, X, O, X, X], // 2
        [O, O, X, X, X, X, X], // 3
        [O, X, O, X, X, O, X], // 4
        [O, X, X, O, X, X, X], // 5
        [X, X, O, O, X, X, X], // 6
        [O, O, X, X, X, O, O], // 7
        [X, X, X, X, X, X, X], // 8
        [O, X, X, X, X, O, X], // 9
        [O, O, O, O, O, O, O], // blank
        [O, O, O, O, O, O, X], // dash
    ]
};

/// Segment states for a symbol
pub fn segments_for(symbol: Symbol) -> [bool; SEGMENT_COUNT] {
    SEGMENT_TABLE[symbol.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(row: [u8; 7]) -> [bool; 7] {
        row.map(|b| b == 1)
    }

    #[test]
    fn digits_match_wiring() {
        let golden = [
            [1, 1, 1, 1, 1, 1, 0],
            [0, 0, 0, 1, 1, 0, 0],
            [1, 0, 1, 1, 0, 1, 1],
            [0, 0, 1, 1, 1, 1, 1],
            [0, 1, 0, 1, 1, 0, 1],
            [0, 1, 1, 0, 1, 1, 1],
            [1, 1, 0, 0, 1, 1, 1],
            [0, 0, 1, 1, 1, 0, 0],
            [1, 1, 1, 1, 1, 1, 1],
            [0, 1, 1, 1, 1, 0, 1],
        ];
        for (digit, row) in golden.into_iter().enumerate() {
            assert_eq!(
                segments_for(Symbol::Digit(digit as u8)),
                bits(row),
                "digit {digit}"
            );
        }
    }

    #[test]
    fn blank_and_dash() {
        assert_eq!(segments_for(Symbol::Blank), [false; 7]);
        assert_eq!(segments_for(Symbol::Dash), bits([0, 0, 0, 0, 0, 0, 1]));
    }

    #[test]
    fn ones_of_takes_last_digit() {
        assert_eq!(Symbol::ones_of(4567), Symbol::Digit(7));
        assert_eq!(Symbol::ones_of(0), Symbol::Digit(0));
    }
}
