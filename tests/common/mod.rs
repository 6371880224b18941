//! In-memory stand-ins for the dispenser's hardware.
#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::cell::Cell;
use std::collections::VecDeque;
use std::future::{Future, poll_fn};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use embedded_hal::i2c::{self, ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
use embedded_hal_async::delay::DelayNs;
use pill_dispenser::{
    ClockSource, DateTime, DispenseActuator, Error, InputSampler, InputSnapshot, ModeSwitch,
    Result, ServoPosition, SLOT_COUNT, TextPanel,
};

pub fn at(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> DateTime {
    DateTime::new(year, month, day, hour, minute, second).expect("valid test date")
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelOp {
    Clear,
    Cursor(u8, u8),
    Print(String),
}

/// A 16x2 character grid that also remembers every call.
pub struct GridPanel {
    grid: [[char; 16]; 2],
    column: usize,
    row: usize,
    pub ops: Vec<PanelOp>,
}

impl Default for GridPanel {
    fn default() -> Self {
        Self {
            grid: [[' '; 16]; 2],
            column: 0,
            row: 0,
            ops: Vec::new(),
        }
    }
}

impl GridPanel {
    /// Row text with trailing blanks removed.
    pub fn row(&self, row: usize) -> String {
        self.grid[row].iter().collect::<String>().trim_end().to_owned()
    }

    pub fn printed(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PanelOp::Print(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl TextPanel for GridPanel {
    async fn clear(&mut self) {
        self.grid = [[' '; 16]; 2];
        self.column = 0;
        self.row = 0;
        self.ops.push(PanelOp::Clear);
    }

    async fn set_cursor(&mut self, column: u8, row: u8) {
        self.column = usize::from(column);
        self.row = usize::from(row);
        self.ops.push(PanelOp::Cursor(column, row));
    }

    async fn print(&mut self, text: &str) {
        for ch in text.chars() {
            if self.row < 2 && self.column < 16 {
                self.grid[self.row][self.column] = ch;
            }
            self.column += 1;
        }
        self.ops.push(PanelOp::Print(text.to_owned()));
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

pub struct FakeClock {
    pub now: DateTime,
    pub writes: Vec<DateTime>,
    pub readable: bool,
}

impl FakeClock {
    pub fn at(now: DateTime) -> Self {
        Self {
            now,
            writes: Vec::new(),
            readable: true,
        }
    }
}

impl ClockSource for FakeClock {
    fn now(&mut self) -> Result<DateTime> {
        if self.readable {
            Ok(self.now)
        } else {
            Err(Error::ClockBus)
        }
    }

    fn set(&mut self, date_time: &DateTime) -> Result<()> {
        self.writes.push(*date_time);
        self.now = *date_time;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Actuator
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingActuator {
    pub moves: Vec<(usize, ServoPosition)>,
}

impl RecordingActuator {
    /// Number of completed dispense strokes for `slot`.
    pub fn strokes(&self, slot: usize) -> usize {
        self.moves
            .iter()
            .filter(|(index, position)| *index == slot && *position == ServoPosition::Dispense)
            .count()
    }
}

impl DispenseActuator for RecordingActuator {
    fn set_position(&mut self, slot: usize, position: ServoPosition) -> Result<()> {
        if slot >= SLOT_COUNT {
            return Err(Error::InvalidSlotIndex(slot));
        }
        self.moves.push((slot, position));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Plays back snapshots in order, then repeats `idle` forever.
#[derive(Default)]
pub struct ScriptedInput {
    pub script: VecDeque<InputSnapshot>,
    pub idle: InputSnapshot,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            script: script.into_iter().collect(),
            idle: InputSnapshot::default(),
        }
    }
}

impl InputSampler for ScriptedInput {
    fn sample(&mut self) -> InputSnapshot {
        self.script.pop_front().unwrap_or(self.idle)
    }
}

// ---------------------------------------------------------------------------
// Delay
// ---------------------------------------------------------------------------

/// Pending once, then ready. Lets `select` poll its other branch at every pause.
#[derive(Default)]
struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Records every millisecond pause and counts all waits in a shared tick counter.
#[derive(Default)]
pub struct CountingDelay {
    pub pauses_ms: Vec<u32>,
    pub elapsed_ns: u64,
    pub ticks: Rc<Cell<usize>>,
}

impl CountingDelay {
    fn tick(&mut self, ns: u64) {
        self.elapsed_ns += ns;
        self.ticks.set(self.ticks.get() + 1);
    }
}

impl DelayNs for CountingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.tick(u64::from(ns));
        YieldNow::default().await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.pauses_ms.push(ms);
        self.tick(u64::from(ms) * 1_000_000);
        YieldNow::default().await;
    }
}

// ---------------------------------------------------------------------------
// Mode switch
// ---------------------------------------------------------------------------

/// Fires once the shared tick counter reaches `at_tick`.
pub struct ScriptedSwitch {
    pub ticks: Rc<Cell<usize>>,
    pub at_tick: usize,
}

impl ScriptedSwitch {
    /// Never fires.
    pub fn never(ticks: Rc<Cell<usize>>) -> Self {
        Self {
            ticks,
            at_tick: usize::MAX,
        }
    }

    /// Fires at the first pause.
    pub fn now(ticks: Rc<Cell<usize>>) -> Self {
        Self { ticks, at_tick: 0 }
    }
}

impl ModeSwitch for ScriptedSwitch {
    async fn wait_for_press(&mut self) {
        let ticks = Rc::clone(&self.ticks);
        let at_tick = self.at_tick;
        poll_fn(|_| {
            if ticks.get() >= at_tick {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await;
    }
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

pub type TestDevices =
    pill_dispenser::Devices<GridPanel, FakeClock, RecordingActuator, ScriptedInput, CountingDelay>;

pub fn devices(now: DateTime, input: ScriptedInput) -> TestDevices {
    pill_dispenser::Devices {
        panel: GridPanel::default(),
        clock: FakeClock::at(now),
        actuator: RecordingActuator::default(),
        input,
        delay: CountingDelay::default(),
    }
}

// ---------------------------------------------------------------------------
// I2C
// ---------------------------------------------------------------------------

/// A bus with one register-file device on it (a DS3231 when `address` is 0x68).
pub struct RegisterBus {
    pub address: u8,
    pub registers: [u8; 0x13],
    pointer: usize,
    pub present: bool,
    pub writes: Vec<Vec<u8>>,
}

impl RegisterBus {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            registers: [0; 0x13],
            pointer: 0,
            present: true,
            writes: Vec::new(),
        }
    }

    /// Every byte written to the device, in order.
    pub fn written_bytes(&self) -> Vec<u8> {
        self.writes.iter().flatten().copied().collect()
    }
}

impl ErrorType for RegisterBus {
    type Error = ErrorKind;
}

impl i2c::I2c for RegisterBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> core::result::Result<(), Self::Error> {
        if !self.present || address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    self.writes.push(bytes.to_vec());
                    if let Some((first, rest)) = bytes.split_first() {
                        self.pointer = usize::from(*first);
                        for byte in rest {
                            if let Some(slot) = self.registers.get_mut(self.pointer) {
                                *slot = *byte;
                            }
                            self.pointer += 1;
                        }
                    }
                }
                Operation::Read(buffer) => {
                    for byte in buffer.iter_mut() {
                        *byte = self.registers.get(self.pointer).copied().unwrap_or(0);
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}
