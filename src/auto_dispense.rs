//! Normal-mode tick: show the time and fire any slot that is due.

use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

use crate::actuator::{DispenseActuator, ServoPosition};
use crate::date_time::{ClockSource, DateTime};
use crate::devices::{Devices, pause};
use crate::panel::{TextPanel, format_line, show_lines};
use crate::schedule::ScheduleStore;
use crate::shared_constants::{DISPENSE_HOLD, DISPENSE_PREROLL, SLOT_COUNT};
use crate::Result;

/// Run one Normal-mode tick: redraw the clock, then dispense whatever is due.
///
/// Returns how many slots were dispensed. The caller supplies the pause between ticks.
///
/// # Errors
///
/// Fails only if the clock cannot be read or rendered; nothing is dispensed in that case.
pub async fn normal_tick<P, C, A, I, D>(
    store: &mut ScheduleStore,
    devices: &mut Devices<P, C, A, I, D>,
) -> Result<usize>
where
    P: TextPanel,
    C: ClockSource,
    A: DispenseActuator,
    D: DelayNs,
{
    let due = refresh(store, devices).await?;
    dispense_all(
        &due,
        &mut devices.panel,
        &mut devices.actuator,
        &mut devices.delay,
    )
    .await;
    Ok(due.len())
}

/// Row 0 `DD-MM-YYYY`, row 1 `HH:MM:SS`.
///
/// # Errors
///
/// Returns [`crate::Error::FormatError`] for a year that does not fit.
pub async fn show_date_time(panel: &mut impl TextPanel, now: &DateTime) -> Result<()> {
    let date = format_line(format_args!("{:02}-{:02}-{:04}", now.day, now.month, now.year))?;
    let time = format_line(format_args!(
        "{:02}:{:02}:{:02}",
        now.hour, now.minute, now.second
    ))?;
    show_lines(panel, &date, &time).await;
    Ok(())
}

/// One slot picked for dispensing on this tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DueSlot {
    pub index: usize,
    pub name: &'static str,
    pub pill_count: u8,
}

/// The slots claimed by one tick, in index order.
pub type DueSlots = Vec<DueSlot, SLOT_COUNT>;

/// Decide, for a single reading of the clock, which slots must dispense, and mark them fired.
///
/// The top-of-hour reset happens first, so a slot due at `HH:00` still fires on the reset tick.
/// A slot is marked fired before any servo moves: once claimed it can never be claimed again
/// in the same minute, even if its cycle is interrupted.
pub fn claim_due(store: &mut ScheduleStore, now: &DateTime) -> DueSlots {
    if now.is_top_of_hour() {
        store.reset_fired();
    }

    store
        .iter_mut()
        .enumerate()
        .filter(|(_, slot)| slot.is_due(now) && !slot.fired_this_minute)
        .map(|(index, slot)| {
            slot.fired_this_minute = true;
            DueSlot {
                index,
                name: slot.name,
                pill_count: slot.pill_count,
            }
        })
        .collect()
}

/// Read the clock, redraw it, and claim whatever is due. Nothing moves yet.
///
/// # Errors
///
/// Fails only if the clock cannot be read or rendered; nothing is claimed in that case.
pub async fn refresh<P, C, A, I, D>(
    store: &mut ScheduleStore,
    devices: &mut Devices<P, C, A, I, D>,
) -> Result<DueSlots>
where
    P: TextPanel,
    C: ClockSource,
{
    let now = devices.clock.now()?;
    show_date_time(&mut devices.panel, &now).await?;
    Ok(claim_due(store, &now))
}

/// Claim and dispense everything due at `now`, one slot after another.
///
/// Returns how many slots were dispensed.
pub async fn evaluate<P, A, D>(
    store: &mut ScheduleStore,
    now: &DateTime,
    panel: &mut P,
    actuator: &mut A,
    delay: &mut D,
) -> usize
where
    P: TextPanel,
    A: DispenseActuator,
    D: DelayNs,
{
    let due = claim_due(store, now);
    dispense_all(&due, panel, actuator, delay).await;
    due.len()
}

pub async fn dispense_all<P, A, D>(due: &[DueSlot], panel: &mut P, actuator: &mut A, delay: &mut D)
where
    P: TextPanel,
    A: DispenseActuator,
    D: DelayNs,
{
    for slot in due {
        dispense(slot, panel, actuator, delay).await;
    }
}

/// The full actuation cycle for one slot.
///
/// A slot index with no servo is logged and otherwise ignored.
pub async fn dispense<P, A, D>(slot: &DueSlot, panel: &mut P, actuator: &mut A, delay: &mut D)
where
    P: TextPanel,
    A: DispenseActuator,
    D: DelayNs,
{
    if slot.index >= SLOT_COUNT {
        #[cfg(feature = "defmt")]
        defmt::warn!("Invalid drug index {}", slot.index);
        return;
    }

    #[cfg(feature = "defmt")]
    defmt::info!("Dispensing {} x{}", slot.name, slot.pill_count);
    show_lines(panel, "Dispensing drug:", slot.name).await;
    pause(delay, DISPENSE_PREROLL).await;

    for _ in 0..slot.pill_count {
        move_servo(actuator, slot.index, ServoPosition::Dispense);
        pause(delay, DISPENSE_HOLD).await;
        move_servo(actuator, slot.index, ServoPosition::Rest);
        pause(delay, DISPENSE_HOLD).await;
    }
    panel.clear().await;
    #[cfg(feature = "defmt")]
    defmt::info!("{} done", slot.name);
}

fn move_servo(actuator: &mut impl DispenseActuator, index: usize, position: ServoPosition) {
    if let Err(err) = actuator.set_position(index, position) {
        #[cfg(feature = "defmt")]
        defmt::warn!("Servo move failed: {}", defmt::Display2Format(&err));
        #[cfg(not(feature = "defmt"))]
        let _ = err;
    }
}
