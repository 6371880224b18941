use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

/// The peripherals the mode handlers drive. Only the active handler touches them.
pub struct Devices<P, C, A, I, D> {
    pub panel: P,
    pub clock: C,
    pub actuator: A,
    pub input: I,
    /// Every wait goes through here so other tasks keep running.
    pub delay: D,
}

/// How an editor session ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionOutcome {
    Committed,
    Cancelled,
}

/// Yield for `duration`.
pub async fn pause(delay: &mut impl DelayNs, duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    delay.delay_ms(millis).await;
}
