#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_time::Instant;
use esp_hal::{
    Config,
    clock::CpuClock,
    rmt::Rmt,
    time::{Duration, Rate},
    timer::{
        systimer::SystemTimer,
        timg::{MwdtStage, TimerGroup},
    },
};
use esp_hal_smartled::SmartLedsAdapterAsync;
use esp_backtrace as _;
use panic_rtt_target as _;
use spot_clock::{
    app::{ClockOptions, SpotClock},
    config::Settings,
    drivers::neopixel::{LedDriver, STRIP_BUF_LEN},
    layout::REFERENCE_LAYOUT,
    status::IndicatorStatus,
    tasks::{DisplayMode, Strips, display_task, handle_button},
};
use static_cell::StaticCell;

/// Settings document, the same JSON the clock used to read from its SD card
static SETTINGS: &[u8] = include_bytes!("../../settings.json");

/// Our LED drivers that underlie the display task
static STRIP_1: StaticCell<LedDriver<0>> = StaticCell::new();
static STRIP_2: StaticCell<LedDriver<1>> = StaticCell::new();
static STRIP_3: StaticCell<LedDriver<2>> = StaticCell::new();

/// The watchdog must see the tick loop at least this often
const WATCHDOG_TIMEOUT: Duration = Duration::from_secs(2);

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    #[cfg(all(feature = "rtt", feature = "defmt"))]
    rtt_target::rtt_init_defmt!();

    let peripherals = esp_hal::init(Config::default().with_cpu_clock(CpuClock::max()));
    let timer0 = SystemTimer::new(peripherals.SYSTIMER);
    esp_hal_embassy::init(timer0.alarm0);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let mut wdt = timg0.wdt;
    wdt.set_timeout(MwdtStage::Stage0, WATCHDOG_TIMEOUT);
    wdt.enable();

    // One RMT channel per strip
    let rmt = Rmt::new(peripherals.RMT, Rate::from_mhz(80))
        .expect("Failed to initialise RMT")
        .into_async();
    let strips = Strips {
        first: STRIP_1.init(LedDriver::new(SmartLedsAdapterAsync::new(
            rmt.channel0,
            peripherals.GPIO4,
            [0_u32; STRIP_BUF_LEN],
        ))),
        second: STRIP_2.init(LedDriver::new(SmartLedsAdapterAsync::new(
            rmt.channel1,
            peripherals.GPIO5,
            [0_u32; STRIP_BUF_LEN],
        ))),
        third: STRIP_3.init(LedDriver::new(SmartLedsAdapterAsync::new(
            rmt.channel2,
            peripherals.GPIO6,
            [0_u32; STRIP_BUF_LEN],
        ))),
    };

    let now = Instant::now();
    let (clock, mode) = match Settings::from_json(SETTINGS) {
        Ok(settings) => {
            info!(
                "MAIN: Settings loaded, time zone {}, cycle {} ms",
                settings.time_zone.as_str(),
                settings.cycle_delay_ms
            );
            let clock = SpotClock::new(ClockOptions::from(&settings), &REFERENCE_LAYOUT, now);
            (clock, DisplayMode::Clock)
        }
        Err(e) => {
            error!("MAIN: Settings unusable: {}", e);
            let mut clock = SpotClock::new(ClockOptions::default(), &REFERENCE_LAYOUT, now);
            clock.state_mut().set_status(IndicatorStatus::SdCardFailure);
            (clock, DisplayMode::StatusOnly)
        }
    };

    spawner
        .spawn(display_task(clock, strips, wdt, mode))
        .expect("Failed to spawn display task");
    if mode == DisplayMode::Clock {
        spawner
            .spawn(handle_button(peripherals.GPIO0))
            .expect("Failed to spawn button task");
    }

    info!("MAIN: Started");
}
