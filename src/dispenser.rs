//! The mode controller: runs exactly one mode handler at a time and swaps it on a mode-switch
//! press.
//!
//! The active handler is a future raced against the mode switch. When the switch wins, the
//! handler future is dropped where it stands, so an editor's unsaved working copy simply
//! disappears and nothing is written back. Handlers that finish on their own (an editor
//! committing or cancelling) return the machine to Normal.
//!
//! Dispensing is the exception. Normal mode only claims due slots inside the race; the servo
//! cycle itself runs outside it, so it always finishes with the arm at rest. A press made
//! during the cycle is taken once the cycle is over.

use embassy_futures::select::{Either, select};
use embedded_hal_async::delay::DelayNs;

use crate::actuator::DispenseActuator;
use crate::auto_dispense::{DueSlots, dispense_all, refresh};
use crate::date_time::ClockSource;
use crate::devices::{Devices, SessionOutcome, pause};
use crate::input::InputSampler;
use crate::mode::{Mode, ModeMachine, ModeSwitch, ModeTransition};
use crate::panel::{TextPanel, show_lines};
use crate::schedule::ScheduleStore;
use crate::schedule_editor::run_schedule_editor;
use crate::shared_constants::{MODE_BANNER, MODE_SETTLE, NORMAL_TICK};
use crate::time_set::run_time_set;
use crate::{Never, Result};

/// Why the active handler stopped on its own.
enum Finished {
    /// An editor session ended.
    Session,
    /// Normal mode claimed slots that now have to be dispensed.
    Due(DueSlots),
}

/// Mode state plus the volatile schedule.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Dispenser {
    machine: ModeMachine,
    store: ScheduleStore,
    edit_index: usize,
}

impl Dispenser {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            machine: ModeMachine::new(),
            store: ScheduleStore::new(),
            edit_index: 0,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.machine.mode()
    }

    #[must_use]
    pub const fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut ScheduleStore {
        &mut self.store
    }

    /// Run the controller forever.
    pub async fn run<P, C, A, I, D, S>(
        &mut self,
        devices: &mut Devices<P, C, A, I, D>,
        mode_switch: &mut S,
    ) -> Never
    where
        P: TextPanel,
        C: ClockSource,
        A: DispenseActuator,
        I: InputSampler,
        D: DelayNs,
        S: ModeSwitch,
    {
        loop {
            self.step(devices, mode_switch).await;
        }
    }

    /// Run the current mode's handler until it finishes or the mode switch is pressed,
    /// then make the resulting transition. Slots that fall due meanwhile are dispensed in full
    /// before any press is acted on.
    pub async fn step<P, C, A, I, D, S>(
        &mut self,
        devices: &mut Devices<P, C, A, I, D>,
        mode_switch: &mut S,
    ) -> ModeTransition
    where
        P: TextPanel,
        C: ClockSource,
        A: DispenseActuator,
        I: InputSampler,
        D: DelayNs,
        S: ModeSwitch,
    {
        loop {
            let winner = select(self.run_active(devices), mode_switch.wait_for_press()).await;
            let transition = match winner {
                Either::First(Finished::Due(due)) => {
                    dispense_all(
                        &due,
                        &mut devices.panel,
                        &mut devices.actuator,
                        &mut devices.delay,
                    )
                    .await;
                    continue;
                }
                Either::First(Finished::Session) => self.machine.return_to_normal(),
                Either::Second(()) => self.machine.advance(),
            };
            #[cfg(feature = "defmt")]
            defmt::info!("Mode changed to: {}", transition.to.number());
            return transition;
        }
    }

    async fn run_active<P, C, A, I, D>(&mut self, devices: &mut Devices<P, C, A, I, D>) -> Finished
    where
        P: TextPanel,
        C: ClockSource,
        A: DispenseActuator,
        I: InputSampler,
        D: DelayNs,
    {
        match self.machine.mode() {
            Mode::Normal => loop {
                match refresh(&mut self.store, devices).await {
                    Ok(due) if !due.is_empty() => return Finished::Due(due),
                    Ok(_) => {}
                    Err(err) => report("Normal tick", &err),
                }
                pause(&mut devices.delay, NORMAL_TICK).await;
            },
            Mode::TimeSet => {
                show_lines(&mut devices.panel, "Mode 1: Time", "Setting...").await;
                pause(&mut devices.delay, MODE_BANNER).await;
                finish("Time set", run_time_set(devices).await);
                pause(&mut devices.delay, MODE_SETTLE).await;
                Finished::Session
            }
            Mode::Scheduling => {
                show_lines(&mut devices.panel, "Mode 2: Sched", "Drug Config...").await;
                pause(&mut devices.delay, MODE_BANNER).await;
                let outcome =
                    run_schedule_editor(&mut self.store, &mut self.edit_index, devices).await;
                finish("Schedule", outcome);
                pause(&mut devices.delay, MODE_SETTLE).await;
                Finished::Session
            }
        }
    }
}

fn finish(session: &str, outcome: Result<SessionOutcome>) {
    match outcome {
        Ok(_outcome) => {
            #[cfg(feature = "defmt")]
            defmt::info!("{} session {}", session, _outcome);
        }
        Err(err) => report(session, &err),
    }
}

fn report(context: &str, err: &crate::Error) {
    #[cfg(feature = "defmt")]
    defmt::warn!("{}: {}", context, defmt::Display2Format(err));
    #[cfg(not(feature = "defmt"))]
    let _ = (context, err);
}
