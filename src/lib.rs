#![no_std]

// Must come first so the logging macros are visible to every module below
mod fmt;

pub mod app;
pub mod colour;
pub mod config;
pub mod fetch;
pub mod formatter;
pub mod layout;
pub mod render;
pub mod segments;
pub mod selection;
pub mod spot;
pub mod status;
pub mod timer;

#[cfg(feature = "esp32s3")]
pub mod drivers;
#[cfg(feature = "esp32s3")]
pub mod tasks;

use embassy_time::Duration;

/// Period of the display tick loop
pub const TICK_PERIOD: Duration = Duration::from_millis(10);

/// Time a button level must be stable before it counts
pub const DEBOUNCE: Duration = Duration::from_millis(25);
