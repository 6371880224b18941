//! Medication dispenser firmware.
//!
//! Runs on a Raspberry Pi Pico (RP2040). Build with
//! `cargo run --release --target thumbv6m-none-eabi --features embedded`.
#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "Single-threaded")]

use core::cell::RefCell;

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Timer};
use embedded_hal_bus::i2c::RefCellDevice;
use panic_probe as _;
use pill_dispenser::{
    CharLcd, Devices, Dispenser, Ds3231, Hardware, ModeButton, ModeButtonNotifier, Never, ONE_DAY,
    Result, TextPanel,
};
use static_cell::StaticCell;

type SharedI2c = RefCell<I2c<'static, I2C0, i2c::Blocking>>;

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    match inner_main(spawner).await {
        Ok(never) => match never {},
        Err(err) => core::panic!("{err}"),
    }
}

async fn inner_main(spawner: Spawner) -> Result<Never> {
    let hardware = Hardware::default();

    static I2C_BUS: StaticCell<SharedI2c> = StaticCell::new();
    let i2c_bus: &'static SharedI2c = I2C_BUS.init(RefCell::new(hardware.i2c));

    let mut panel = CharLcd::new(RefCellDevice::new(i2c_bus), Delay);
    panel.init().await;

    let clock = match Ds3231::new(RefCellDevice::new(i2c_bus)) {
        Ok(clock) => clock,
        Err(err) => {
            error!("RTC initialization failed! {}", defmt::Display2Format(&err));
            panel.print("RTC Error").await;
            loop {
                Timer::after(ONE_DAY).await;
            }
        }
    };

    static MODE_BUTTON_NOTIFIER: ModeButtonNotifier = ModeButton::notifier();
    let mut mode_button = ModeButton::new(hardware.mode_button, &MODE_BUTTON_NOTIFIER, spawner)?;

    let mut devices = Devices {
        panel,
        clock,
        actuator: hardware.servos,
        input: hardware.controls,
        delay: Delay,
    };
    info!("Dispenser ready");

    let mut dispenser = Dispenser::new();
    Ok(dispenser.run(&mut devices, &mut mode_button).await)
}
