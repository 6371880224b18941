//! Host-level tests for the schedule editor.

mod common;

use common::{ScriptedInput, at, devices};
use embassy_futures::block_on;
use pill_dispenser::schedule_editor::{EditBuffer, ScheduleField, run_schedule_editor};
use pill_dispenser::{Frequency, InputSnapshot, Rail, ScheduleStore, SessionOutcome};

const FIELDS: [ScheduleField; 5] = [
    ScheduleField::Frequency,
    ScheduleField::Day,
    ScheduleField::Hour,
    ScheduleField::Minute,
    ScheduleField::PillCount,
];

fn joystick(vertical: Rail, horizontal: Rail) -> InputSnapshot {
    InputSnapshot {
        vertical,
        horizontal,
        ..InputSnapshot::default()
    }
}

const UP: InputSnapshot = InputSnapshot {
    commit: false,
    cancel: false,
    slot_cycle: false,
    vertical: Rail::High,
    horizontal: Rail::Center,
};

fn slot_cycle() -> InputSnapshot {
    InputSnapshot {
        slot_cycle: true,
        ..InputSnapshot::default()
    }
}

fn commit() -> InputSnapshot {
    InputSnapshot {
        commit: true,
        ..InputSnapshot::default()
    }
}

fn cancel() -> InputSnapshot {
    InputSnapshot {
        cancel: true,
        ..InputSnapshot::default()
    }
}

fn store_with_slot0(frequency: Frequency, pill_count: u8) -> ScheduleStore {
    let mut store = ScheduleStore::new();
    let slot = store.get_mut(0).expect("slot");
    slot.frequency = frequency;
    slot.hour = 8;
    slot.pill_count = pill_count;
    store
}

fn move_to(buffer: &mut EditBuffer, field: ScheduleField) {
    while buffer.field() != field {
        buffer.apply(&joystick(Rail::Center, Rail::Low));
    }
}

#[test]
fn pill_count_clamps_at_ten_and_shows_it() {
    let mut store = store_with_slot0(Frequency::Daily, 10);
    // High horizontal moves left, from Freq round to Pills.
    let script = [joystick(Rail::High, Rail::High), cancel()];
    let mut devices = devices(at(2025, 1, 1, 0, 0, 0), ScriptedInput::new(script));
    let mut index = 0;

    let outcome = block_on(run_schedule_editor(&mut store, &mut index, &mut devices))
        .expect("valid slot");

    assert_eq!(outcome, SessionOutcome::Cancelled);
    assert_eq!(devices.panel.row(0), "Drug 1");
    assert_eq!(devices.panel.row(1), "Pills: 10");
}

#[test]
fn frequency_clamps_at_three() {
    let store = store_with_slot0(Frequency::Monthly, 1);
    let mut buffer = EditBuffer::load(&store, 0).expect("valid slot");

    buffer.increment();
    assert_eq!(buffer.value(ScheduleField::Frequency), 3);
}

#[test]
fn every_field_clamps_at_both_bounds() {
    let store = ScheduleStore::new();
    let mut buffer = EditBuffer::load(&store, 0).expect("valid slot");
    for field in FIELDS {
        move_to(&mut buffer, field);
        let (min, max) = field.bounds();
        for _ in 0..70 {
            buffer.increment();
        }
        assert_eq!(buffer.value(field), max, "{field:?}");
        for _ in 0..70 {
            buffer.decrement();
        }
        assert_eq!(buffer.value(field), min, "{field:?}");
    }
}

#[test]
fn increment_then_decrement_restores_inside_bounds() {
    let mut store = store_with_slot0(Frequency::Weekly, 5);
    let slot = store.get_mut(0).expect("slot");
    slot.day = 3;
    slot.minute = 20;
    let mut buffer = EditBuffer::load(&store, 0).expect("valid slot");

    for field in FIELDS {
        move_to(&mut buffer, field);
        let before = buffer;
        buffer.increment();
        buffer.decrement();
        assert_eq!(buffer, before, "{field:?} up/down");
        buffer.decrement();
        buffer.increment();
        assert_eq!(buffer, before, "{field:?} down/up");
    }
}

#[test]
fn unscheduled_slot_frequency_enters_range_on_first_adjustment() {
    let store = ScheduleStore::new();
    let mut buffer = EditBuffer::load(&store, 1).expect("valid slot");
    assert_eq!(buffer.value(ScheduleField::Frequency), 0);

    buffer.decrement();
    assert_eq!(buffer.value(ScheduleField::Frequency), 1);
}

#[test]
fn commit_saves_buffer_into_slot() {
    let mut store = ScheduleStore::new();
    let script = [
        UP,                                // Freq 0 -> 1
        joystick(Rail::High, Rail::Low),   // Day 0 -> 1
        joystick(Rail::High, Rail::Low),   // Hour 0 -> 1
        joystick(Rail::Center, Rail::Low), // Min
        joystick(Rail::High, Rail::Low),   // Pills 1 -> 2
        commit(),
    ];
    let mut devices = devices(at(2025, 1, 1, 0, 0, 0), ScriptedInput::new(script));
    let mut index = 0;

    let outcome = block_on(run_schedule_editor(&mut store, &mut index, &mut devices))
        .expect("valid slot");

    assert_eq!(outcome, SessionOutcome::Committed);
    let slot = store.get(0).expect("slot");
    assert_eq!(slot.frequency, Frequency::Daily);
    assert_eq!((slot.day, slot.hour, slot.minute, slot.pill_count), (1, 1, 0, 2));
    assert_eq!(devices.delay.pauses_ms, vec![200; 5]);
}

#[test]
fn cancel_discards_buffer() {
    let mut store = store_with_slot0(Frequency::Daily, 3);
    let before = store.clone();
    let script = [UP, UP, cancel()];
    let mut devices = devices(at(2025, 1, 1, 0, 0, 0), ScriptedInput::new(script));
    let mut index = 0;

    block_on(run_schedule_editor(&mut store, &mut index, &mut devices)).expect("valid slot");

    assert_eq!(store, before);
}

#[test]
fn slot_cycle_press_advances_and_reloads() {
    let mut store = store_with_slot0(Frequency::Daily, 3);
    store.get_mut(1).expect("slot").pill_count = 7;
    let script = [
        UP, // unsaved change to slot 0
        slot_cycle(),
        slot_cycle(), // read after the guard, still held
        slot_cycle(), // still held: no second advance
        InputSnapshot::default(),
        commit(),
    ];
    let mut devices = devices(at(2025, 1, 1, 0, 0, 0), ScriptedInput::new(script));
    let mut index = 0;

    block_on(run_schedule_editor(&mut store, &mut index, &mut devices)).expect("valid slot");

    assert_eq!(index, 1);
    assert_eq!(store.get(0).expect("slot").frequency, Frequency::Daily);
    // Slot 1 was saved as loaded.
    assert_eq!(store.get(1).expect("slot").pill_count, 7);
    assert_eq!(devices.delay.pauses_ms, vec![200, 500, 200, 200, 200]);
    assert_eq!(devices.panel.row(0), "Drug 2");
}

#[test]
fn slot_cycle_wraps_after_third_slot() {
    let mut store = ScheduleStore::new();
    let script = [
        slot_cycle(),
        InputSnapshot::default(),
        slot_cycle(),
        InputSnapshot::default(),
        slot_cycle(),
        InputSnapshot::default(),
        cancel(),
    ];
    let mut devices = devices(at(2025, 1, 1, 0, 0, 0), ScriptedInput::new(script));
    let mut index = 1;

    block_on(run_schedule_editor(&mut store, &mut index, &mut devices)).expect("valid slot");

    assert_eq!(index, 1);
}

#[test]
fn joystick_is_read_again_after_slot_guard() {
    let mut store = ScheduleStore::new();
    // Joystick held up as slot-cycle is pressed, released by the end of the guard.
    let stale = InputSnapshot {
        slot_cycle: true,
        vertical: Rail::High,
        ..InputSnapshot::default()
    };
    let script = [stale, InputSnapshot::default(), commit()];
    let mut devices = devices(at(2025, 1, 1, 0, 0, 0), ScriptedInput::new(script));
    let mut index = 0;

    block_on(run_schedule_editor(&mut store, &mut index, &mut devices)).expect("valid slot");

    assert_eq!(index, 1);
    assert_eq!(store.get(1).expect("slot").frequency, Frequency::None);
    assert_eq!(devices.panel.row(1), "Freq: 0");
    assert_eq!(devices.delay.pauses_ms, vec![500, 200]);
}

#[test]
fn joystick_after_slot_guard_edits_new_slot() {
    let mut store = ScheduleStore::new();
    let script = [slot_cycle(), UP, commit()];
    let mut devices = devices(at(2025, 1, 1, 0, 0, 0), ScriptedInput::new(script));
    let mut index = 0;

    block_on(run_schedule_editor(&mut store, &mut index, &mut devices)).expect("valid slot");

    assert_eq!(store.get(1).expect("slot").frequency, Frequency::Daily);
    assert_eq!(store.get(0).expect("slot").frequency, Frequency::None);
}

#[test]
fn buffer_save_reports_what_was_written() {
    let mut store = ScheduleStore::new();
    let mut buffer = EditBuffer::load(&store, 2).expect("valid slot");
    buffer.apply(&joystick(Rail::High, Rail::Center));
    buffer.apply(&joystick(Rail::High, Rail::Center));

    let saved = buffer.save(&mut store).expect("valid slot");

    assert_eq!(saved.index, 2);
    assert_eq!(saved.frequency, Frequency::Weekly);
    assert_eq!(store.get(2).expect("slot").frequency, Frequency::Weekly);
}

#[test]
fn out_of_range_slot_is_rejected() {
    let store = ScheduleStore::new();
    assert!(EditBuffer::load(&store, 3).is_err());
}
