//! End-to-end flows through `Panel::tick`.

use panel_core::hal::mock::MockMachine;
use panel_core::{LedCadence, PanelInputs, SessionPhase};

use crate::rig::{home_button, load_button, print_button, PanelRig};

#[test]
fn click_selection_starts_print_and_blinks() {
    let mut rig = PanelRig::new(MockMachine::new());
    rig.machine.files = 3;

    // First short press mounts the card and enters selection.
    rig.press(print_button(), 0, 100);
    assert_eq!(rig.panel.session_phase(), SessionPhase::Selecting);
    assert_eq!(rig.panel.shared.cadence, LedCadence::Solid);

    // Two clicks step back from the newest file.
    rig.press(print_button(), 1000, 100);
    rig.press(print_button(), 2000, 100);
    assert_eq!(rig.panel.click_count(), 2);

    // Inactivity finalizes: index 3 - 1 - 2 = 0, job starts.
    rig.tick(PanelInputs::default(), 7100);
    assert_eq!(rig.machine.selected, Some(0));
    assert!(rig.machine.opened);
    assert!(rig.machine.job_active);
    assert_eq!(rig.panel.session_phase(), SessionPhase::Printing);
    assert_eq!(rig.panel.shared.cadence, LedCadence::Printing);

    // The LED picks the printing cadence up on the following tick and
    // blinks at the 400 ms floor interval for 100% feedrate.
    rig.tick(PanelInputs::default(), 7110);
    assert!(rig.led.lit);
    rig.tick(PanelInputs::default(), 7600);
    assert!(!rig.led.lit);
}

#[test]
fn park_resume_park_cycle() {
    let mut rig = PanelRig::new(MockMachine::printing());

    rig.press(print_button(), 0, 100);
    assert_eq!(rig.panel.session_phase(), SessionPhase::ResumePending);
    assert_eq!(rig.panel.shared.cadence, LedCadence::Attention);
    assert_eq!(
        rig.machine.last_injected(),
        Some("M201 X500 Y500\nM203 X60 Y60\nM125\nM25\nM0")
    );

    // The mainboard reaches the hold and flags the pause.
    rig.machine.paused_externally = true;

    rig.press(print_button(), 1000, 100);
    assert!(!rig.machine.paused_externally);
    assert_eq!(
        rig.machine.last_injected(),
        Some("M201 X1500 Y1500\nM203 X300 Y300\nM108\nM24")
    );
    assert_eq!(rig.panel.shared.cadence, LedCadence::Printing);

    // And the job can be parked again.
    rig.press(print_button(), 2000, 100);
    assert_eq!(rig.panel.session_phase(), SessionPhase::ResumePending);
    assert_eq!(rig.machine.injected.len(), 3);
}

#[test]
fn long_press_aborts_and_led_goes_dark() {
    let mut rig = PanelRig::new(MockMachine::printing());

    rig.press(print_button(), 0, 2000);
    assert_eq!(rig.machine.aborts, 1);
    assert!(!rig.machine.job_active);
    assert_eq!(rig.machine.sync_calls, 1);
    assert!(rig.machine.steppers_disabled);
    assert_eq!(rig.panel.session_phase(), SessionPhase::Idle);
    assert_eq!(rig.panel.shared.cadence, LedCadence::Off);

    rig.tick(PanelInputs::default(), 2100);
    assert!(!rig.led.lit);
}

#[test]
fn filament_load_heats_then_extrudes() {
    let mut rig = PanelRig::new(MockMachine::new());

    rig.tick(load_button(), 0);
    rig.tick(load_button(), 20);
    assert_eq!(rig.machine.hotend_target, 230);
    assert_eq!(rig.panel.shared.cadence, LedCadence::Attention);

    // Still cold: nothing extrudes.
    rig.tick(load_button(), 3000);
    assert!(rig.machine.injected.is_empty());

    rig.machine.hotend_temp = 230;
    rig.tick(load_button(), 6000);
    assert_eq!(rig.panel.shared.cadence, LedCadence::Filament);
    rig.tick(load_button(), 6010);
    assert_eq!(
        rig.machine.last_injected(),
        Some("G91\nG0 E540 F2000\nG0 E60 F120\nG90\nM400\nM104 S0")
    );

    // Release stops the move and kills the heater.
    rig.tick(PanelInputs::default(), 6100);
    assert_eq!(rig.machine.quickstops, 1);
    assert!(rig.machine.heaters_disabled);
    assert_eq!(rig.panel.shared.cadence, LedCadence::Off);
}

#[test]
fn filament_buttons_inert_during_print() {
    let mut rig = PanelRig::new(MockMachine::printing());

    rig.tick(load_button(), 0);
    rig.tick(load_button(), 20);
    rig.tick(load_button(), 40);
    assert_eq!(rig.machine.hotend_target, 0);
    assert!(rig.machine.injected.is_empty());
}

#[test]
fn home_button_steps_feedrate_during_print() {
    let mut rig = PanelRig::new(MockMachine::printing());

    rig.press(home_button(), 0, 100);
    assert_eq!(rig.machine.last_injected(), Some("M220 S160"));
    rig.press(home_button(), 1000, 100);
    assert_eq!(rig.machine.last_injected(), Some("M220 S200"));
}

#[test]
fn home_button_homes_when_idle() {
    let mut rig = PanelRig::new(MockMachine::new());

    rig.press(home_button(), 0, 100);
    assert_eq!(rig.machine.last_injected(), Some("G28"));
}

#[test]
fn adjustment_during_print_updates_flow() {
    let mut rig = PanelRig::new(MockMachine::printing());
    let flow_up = PanelInputs {
        flow_up: true,
        ..PanelInputs::default()
    };

    rig.press(flow_up, 0, 100);
    assert_eq!(rig.panel.shared.flow_percent, 105);
    assert_eq!(rig.machine.last_injected(), Some("M221 S105"));
}
