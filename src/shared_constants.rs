use embassy_time::Duration;

/// Number of medication slots (and servos).
pub const SLOT_COUNT: usize = 3;

/// Display names of the slots, by index.
pub const SLOT_NAMES: [&str; SLOT_COUNT] = ["Drug1", "Drug2", "Drug3"];

/// Full-scale reading of the 12-bit joystick ADC.
pub const ADC_FULL_SCALE: u16 = 4095;

pub const ONE_SECOND: Duration = Duration::from_secs(1);
pub const ONE_DAY: Duration = Duration::from_secs(60 * 60 * 24);

/// How often the mode-switch button is sampled.
pub const MODE_POLL: Duration = Duration::from_millis(50);
/// How long the mode-switch button must read released before it can fire again.
pub const MODE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Normal mode refresh and evaluation period.
pub const NORMAL_TICK: Duration = ONE_SECOND;
pub const TIME_SET_CADENCE: Duration = Duration::from_millis(500);
pub const SCHEDULE_CADENCE: Duration = Duration::from_millis(200);
/// Guard after the slot-cycle button switches slots.
pub const SLOT_CYCLE_GUARD: Duration = Duration::from_millis(500);

/// How long "Time Updated!" and friends stay on screen.
pub const MESSAGE_HOLD: Duration = Duration::from_secs(2);
pub const MODE_BANNER: Duration = ONE_SECOND;
/// Pause after an editor session before Normal mode resumes.
pub const MODE_SETTLE: Duration = Duration::from_millis(500);

/// "Dispensing drug:" is shown this long before the first pill.
pub const DISPENSE_PREROLL: Duration = Duration::from_secs(2);
/// Hold time at each servo position, per pill.
pub const DISPENSE_HOLD: Duration = Duration::from_millis(500);

pub const SERVO_REST_DEGREES: u8 = 90;
pub const SERVO_DISPENSE_DEGREES: u8 = 0;
