//! The mode-switch button, polled by its own task so it keeps working while a mode handler
//! is mid-edit or mid-dispense.

use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Instant, Timer};

use crate::button::Button;
use crate::mode::{ModeSwitch, ModeSwitchDebouncer};
use crate::shared_constants::MODE_POLL;
use crate::{Error, Result};

/// Notifier type for the `ModeButton` device abstraction.
pub type ModeButtonNotifier = Signal<CriticalSectionRawMutex, ()>;

/// Debounced presses of the mode-switch button.
pub struct ModeButton {
    notifier: &'static ModeButtonNotifier,
}

impl ModeButton {
    /// Create `ModeButton` resources
    #[must_use]
    pub const fn notifier() -> ModeButtonNotifier {
        Signal::new()
    }

    /// Start polling `button` every [`MODE_POLL`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskSpawn`] if the polling task is already running.
    pub fn new(
        button: Button<'static>,
        notifier: &'static ModeButtonNotifier,
        spawner: Spawner,
    ) -> Result<Self> {
        let token = mode_button_task(button, notifier);
        spawner.spawn(token).map_err(Error::TaskSpawn)?;
        Ok(Self { notifier })
    }
}

impl ModeSwitch for ModeButton {
    async fn wait_for_press(&mut self) {
        self.notifier.wait().await;
    }
}

#[embassy_executor::task]
async fn mode_button_task(button: Button<'static>, notifier: &'static ModeButtonNotifier) -> ! {
    let mut debouncer = ModeSwitchDebouncer::new();
    loop {
        if debouncer.poll(button.is_pressed(), Instant::now()) {
            notifier.signal(());
        }
        Timer::after(MODE_POLL).await;
    }
}
