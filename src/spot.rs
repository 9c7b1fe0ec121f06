//! Tracked metals, their last known quotes and the market calendar.

/// Number of tracked metals
pub const METAL_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Metal {
    #[default]
    Gold = 0,
    Silver = 1,
    Platinum = 2,
}

impl Metal {
    pub const ALL: [Metal; METAL_COUNT] = [Metal::Gold, Metal::Silver, Metal::Platinum];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The next metal in display order, wrapping back to gold
    pub fn next(self) -> Self {
        match self {
            Metal::Gold => Metal::Silver,
            Metal::Silver => Metal::Platinum,
            Metal::Platinum => Metal::Gold,
        }
    }

    /// Instrument code used by the quote service
    pub const fn instrument(self) -> &'static str {
        match self {
            Metal::Gold => "XAU_USD",
            Metal::Silver => "XAG_USD",
            Metal::Platinum => "XPT_USD",
        }
    }
}

/// Last known good quote for one metal.
///
/// Only a complete fetch replaces these values; a failed fetch leaves them alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MetalSpot {
    pub open: f32,
    pub close: f32,
    /// Band around the open price, as a fraction (0.02 is 2%)
    pub alert_percentage: f32,
}

/// Direction of the day's move relative to the alert band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trend {
    Gain,
    Loss,
    Flat,
}

impl MetalSpot {
    pub fn with_alert(alert_percentage: f32) -> Self {
        Self {
            alert_percentage,
            ..Self::default()
        }
    }

    /// Compare the close against `open ± open * alert_percentage`
    pub fn trend(&self) -> Trend {
        let band = self.open * self.alert_percentage;
        if self.close > self.open + band {
            Trend::Gain
        } else if self.close < self.open - band {
            Trend::Loss
        } else {
            Trend::Flat
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Date {
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Day of the week (Sakamoto's method).
    ///
    /// The month is clamped into 1..=12 so a bad date can never index out of the table.
    pub fn weekday(&self) -> Weekday {
        const OFFSETS: [u32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
        let month = self.month.clamp(1, 12);
        let mut year = u32::from(self.year);
        if month < 3 {
            year = year.saturating_sub(1);
        }
        let dow = (year + year / 4 - year / 100 + year / 400
            + OFFSETS[usize::from(month - 1)]
            + u32::from(self.day))
            % 7;
        match dow {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }

    /// Markets are closed on Saturday and Sunday
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Saturday | Weekday::Sunday)
    }
}

/// Date and wall clock time reported by the time service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp {
    pub date: Date,
    pub hour: u8,
    pub minute: u8,
}
