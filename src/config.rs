//! User settings.
//!
//! The settings live in a small JSON document (originally `wifi.txt` on the SD card):
//!
//! ```json
//! {
//!   "ssid": "network",
//!   "password": "secret",
//!   "time zone": "EST",
//!   "brightness": 100,
//!   "cycle delay": 3000,
//!   "au alert percentage": 0.01,
//!   "ag alert percentage": 0.02,
//!   "pt alert percentage": 0.02,
//!   "hold resets cycle": true
//! }
//! ```

use core::fmt;

use embassy_time::Duration;
use heapless::String;
use serde::Deserialize;

use crate::spot::{METAL_COUNT, Metal};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub ssid: String<32>,
    pub password: String<64>,
    #[serde(rename = "time zone")]
    pub time_zone: String<16>,
    /// Level used for red and green digits, which share strips with the brighter
    /// indicator LEDs
    pub brightness: u8,
    /// Milliseconds between automatic metal changes
    #[serde(rename = "cycle delay")]
    pub cycle_delay_ms: u32,
    #[serde(rename = "au alert percentage", default)]
    pub gold_alert: f32,
    #[serde(rename = "ag alert percentage", default)]
    pub silver_alert: f32,
    #[serde(rename = "pt alert percentage", default)]
    pub platinum_alert: f32,
    /// Whether a short press restarts the cycle timer while hold is on
    #[serde(rename = "hold resets cycle", default = "default_true")]
    pub hold_resets_cycle: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Not valid JSON or a field has the wrong type
    Malformed,
    /// A required key is absent or a value does not fit its field
    InvalidField,
    /// Bytes left over after the document
    TrailingData,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::Malformed => "malformed settings document",
            ConfigError::InvalidField => "settings field missing or out of range",
            ConfigError::TrailingData => "unexpected data after settings document",
        };
        f.write_str(msg)
    }
}

impl From<serde_json_core::de::Error> for ConfigError {
    fn from(e: serde_json_core::de::Error) -> Self {
        use serde_json_core::de::Error;
        match e {
            Error::CustomError => ConfigError::InvalidField,
            Error::TrailingCharacters => ConfigError::TrailingData,
            _ => ConfigError::Malformed,
        }
    }
}

impl Settings {
    /// Parse the settings document
    pub fn from_json(document: &[u8]) -> Result<Self, ConfigError> {
        let (settings, _) = serde_json_core::from_slice::<Settings>(document)?;
        Ok(settings)
    }

    pub fn cycle_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.cycle_delay_ms))
    }

    pub fn alert_percentage(&self, metal: Metal) -> f32 {
        self.alert_percentages()[metal.index()]
    }

    pub fn alert_percentages(&self) -> [f32; METAL_COUNT] {
        [self.gold_alert, self.silver_alert, self.platinum_alert]
    }
}
