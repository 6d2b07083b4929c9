//! Press-length classification at the panel level.

use rstest::rstest;

use panel_core::hal::mock::MockMachine;
use panel_core::SessionPhase;

use crate::rig::{print_button, PanelRig};

// Short iff sustained-down time stays below long_press - debounce
// (1200 - 20 ms with the stock config).
#[rstest]
#[case(100, true)]
#[case(500, true)]
#[case(1179, true)]
#[case(1180, false)]
#[case(1200, false)]
#[case(3000, false)]
fn press_length_selects_branch(#[case] held_ms: u64, #[case] expect_short: bool) {
    let mut rig = PanelRig::new(MockMachine::new());
    rig.machine.files = 1;

    rig.press(print_button(), 0, held_ms);
    if expect_short {
        // Short press while idle enters file selection.
        assert_eq!(rig.panel.session_phase(), SessionPhase::Selecting);
        assert!(rig.machine.injected.is_empty());
    } else {
        // Long press while idle raises the head instead.
        assert_eq!(rig.panel.session_phase(), SessionPhase::Idle);
        assert_eq!(
            rig.machine.last_injected(),
            Some("M201 X800 Y800\nG91\nG1 Z20 F600\nG90")
        );
    }
}

// Presses shorter than the debounce window never register at all.
#[rstest]
#[case(1)]
#[case(10)]
#[case(19)]
fn sub_debounce_press_is_ignored(#[case] held_ms: u64) {
    let mut rig = PanelRig::new(MockMachine::new());
    rig.machine.files = 1;

    rig.tick(print_button(), 0);
    rig.tick(panel_core::PanelInputs::default(), held_ms);
    // A later idle sample collapses the pending press.
    rig.tick(panel_core::PanelInputs::default(), held_ms + 100);
    assert_eq!(rig.panel.session_phase(), SessionPhase::Idle);
    assert!(rig.machine.injected.is_empty());
    assert!(!rig.machine.listed);
}
