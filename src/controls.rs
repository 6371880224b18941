use embassy_rp::adc::{self, Adc, Blocking};

use crate::button::Button;
use crate::input::{InputSampler, InputSnapshot, Rail};

/// The editing buttons and the two-axis joystick.
pub struct Controls<'d> {
    pub commit: Button<'d>,
    pub cancel: Button<'d>,
    pub slot_cycle: Button<'d>,
    pub adc: Adc<'d, Blocking>,
    pub vertical: adc::Channel<'d>,
    pub horizontal: adc::Channel<'d>,
}

impl Controls<'_> {
    // A failed conversion reads as no motion.
    fn rail(adc: &mut Adc<'_, Blocking>, channel: &mut adc::Channel<'_>) -> Rail {
        adc.blocking_read(channel)
            .map_or(Rail::Center, Rail::from_reading)
    }
}

impl InputSampler for Controls<'_> {
    fn sample(&mut self) -> InputSnapshot {
        InputSnapshot {
            commit: self.commit.is_pressed(),
            cancel: self.cancel.is_pressed(),
            slot_cycle: self.slot_cycle.is_pressed(),
            vertical: Self::rail(&mut self.adc, &mut self.vertical),
            horizontal: Self::rail(&mut self.adc, &mut self.horizontal),
        }
    }
}
