//! Control logic for a three-slot medication dispenser.
//!
//! The mode controller ([`Dispenser`]) runs one of three handlers at a time: Normal (show the
//! clock, dispense when due), time-set, and schedule editing. Hardware sits behind small
//! traits ([`TextPanel`], [`ClockSource`], [`DispenseActuator`], [`InputSampler`],
//! [`ModeSwitch`]) so everything above the pins runs in host tests. The `pico1` feature adds
//! the RP2040 side.
#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

pub mod actuator;
pub mod auto_dispense;
pub mod char_lcd;
pub mod date_time;
mod devices;
pub mod dispenser;
pub mod ds3231;
mod error;
pub mod input;
pub mod mode;
mod never;
pub mod panel;
pub mod schedule;
pub mod schedule_editor;
mod shared_constants;
pub mod time_set;

#[cfg(feature = "pico1")]
pub mod button;
#[cfg(feature = "pico1")]
pub mod controls;
#[cfg(feature = "pico1")]
pub mod hardware;
#[cfg(feature = "pico1")]
pub mod mode_button;
#[cfg(feature = "pico1")]
pub mod servo;
#[cfg(feature = "pico1")]
pub mod servo_bank;

// Re-export commonly used items
pub use actuator::{DispenseActuator, ServoPosition};
pub use char_lcd::CharLcd;
pub use date_time::{ClockSource, DateTime};
pub use devices::{Devices, SessionOutcome, pause};
pub use dispenser::Dispenser;
pub use ds3231::Ds3231;
pub use error::{Error, Result};
pub use input::{InputSampler, InputSnapshot, Rail};
pub use mode::{Mode, ModeMachine, ModeSwitch, ModeSwitchDebouncer, ModeTransition};
pub use never::Never;
pub use panel::TextPanel;
pub use schedule::{Frequency, MedicationSlot, ScheduleStore};
pub use shared_constants::*;

#[cfg(feature = "pico1")]
pub use hardware::Hardware;
#[cfg(feature = "pico1")]
pub use mode_button::{ModeButton, ModeButtonNotifier};
