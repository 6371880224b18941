//! Hardware-PWM SG90 servo driver for RP2040 (Pico) using Embassy.
//! - 50 Hz frame (20 ms)
//! - Clock-independent: computes divider from `clk_sys` so 1 tick is about 1 µs
//! - Updates duty without reconfiguring the slice

use defmt::info;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};

pub const SERVO_PERIOD_US: u16 = 20_000; // 20 ms

/// One servo on PWM channel A of a slice.
pub struct Servo<'d> {
    pwm: Pwm<'d>,
    cfg: Config, // kept so the divider survives duty updates
    top: u16,
    min_us: u16,
    max_us: u16,
}

impl<'d> Servo<'d> {
    /// Take a channel-A output, e.g.
    /// `Servo::new(Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, Config::default()), 500, 2500)`.
    #[must_use]
    pub fn new(mut pwm: Pwm<'d>, min_us: u16, max_us: u16) -> Self {
        // Aim for 1 tick per µs: divider = clk_sys / 1 MHz.
        let clk = clk_sys_freq();
        let divider = u8::try_from((clk / 1_000_000).clamp(1, 255)).unwrap_or(u8::MAX);
        let top = SERVO_PERIOD_US - 1;

        let mut cfg = Config::default();
        cfg.top = top;
        cfg.phase_correct = false; // edge-aligned => exact 1 µs steps
        cfg.divider = divider.into();
        cfg.compare_a = min_us.midpoint(max_us);
        cfg.enable = true;
        pwm.set_config(&cfg);

        info!("servo clk={}Hz div={} top={}", clk, divider, top);

        Self {
            pwm,
            cfg,
            top,
            min_us,
            max_us,
        }
    }

    /// Set position in degrees 0..=180 (clamped) mapped into `[min_us, max_us]`.
    pub fn set_degrees(&mut self, degrees: u8) {
        let degrees = u32::from(degrees.min(180));
        let span = u32::from(self.max_us.saturating_sub(self.min_us));
        let us = u32::from(self.min_us) + degrees * span / 180;
        self.set_pulse_us(u16::try_from(us).unwrap_or(self.max_us));
    }

    /// Set raw pulse width in microseconds (clamped to the frame).
    /// Only the compare value changes; the stored config keeps the divider intact.
    pub fn set_pulse_us(&mut self, us: u16) {
        self.cfg.compare_a = us.min(self.top);
        self.pwm.set_config(&self.cfg);
    }
}
