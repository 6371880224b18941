//! Pin map for the dispenser board.
//!
//! | Function        | Pin          |
//! |-----------------|--------------|
//! | Mode button     | GP10         |
//! | Commit button   | GP11         |
//! | Cancel button   | GP12         |
//! | Slot button     | GP13         |
//! | Joystick V / H  | GP26 / GP27  |
//! | I2C0 SDA / SCL  | GP4 / GP5    |
//! | Servos 1, 2, 3  | GP16, 18, 20 |
//!
//! Buttons short to ground. The LCD (0x27) and DS3231 (0x68) share I2C0.

use embassy_rp::adc::{self, Adc};
use embassy_rp::gpio::Pull;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::pwm::{self, Pwm};

use crate::button::{Button, PressedTo};
use crate::controls::Controls;
use crate::servo::Servo;
use crate::servo_bank::ServoBank;

/// SG90 pulse range.
const SERVO_MIN_US: u16 = 500;
const SERVO_MAX_US: u16 = 2500;

pub struct Hardware {
    pub i2c: I2c<'static, I2C0, i2c::Blocking>,
    pub mode_button: Button<'static>,
    pub controls: Controls<'static>,
    pub servos: ServoBank<'static>,
}

impl Default for Hardware {
    fn default() -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        let i2c = I2c::new_blocking(
            peripherals.I2C0,
            peripherals.PIN_5,
            peripherals.PIN_4,
            i2c::Config::default(),
        );

        let mode_button = Button::new(peripherals.PIN_10, PressedTo::Ground);

        let controls = Controls {
            commit: Button::new(peripherals.PIN_11, PressedTo::Ground),
            cancel: Button::new(peripherals.PIN_12, PressedTo::Ground),
            slot_cycle: Button::new(peripherals.PIN_13, PressedTo::Ground),
            adc: Adc::new_blocking(peripherals.ADC, adc::Config::default()),
            vertical: adc::Channel::new_pin(peripherals.PIN_26, Pull::None),
            horizontal: adc::Channel::new_pin(peripherals.PIN_27, Pull::None),
        };

        let servos = ServoBank::new([
            Servo::new(
                Pwm::new_output_a(peripherals.PWM_SLICE0, peripherals.PIN_16, pwm::Config::default()),
                SERVO_MIN_US,
                SERVO_MAX_US,
            ),
            Servo::new(
                Pwm::new_output_a(peripherals.PWM_SLICE1, peripherals.PIN_18, pwm::Config::default()),
                SERVO_MIN_US,
                SERVO_MAX_US,
            ),
            Servo::new(
                Pwm::new_output_a(peripherals.PWM_SLICE2, peripherals.PIN_20, pwm::Config::default()),
                SERVO_MIN_US,
                SERVO_MAX_US,
            ),
        ]);

        Self {
            i2c,
            mode_button,
            controls,
            servos,
        }
    }
}
