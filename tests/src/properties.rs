//! Property tests for the debounce primitive and the bounded adjusters.

use proptest::prelude::*;

use panel_core::hal::mock::MockMachine;
use panel_core::hal::{Duration, Instant};
use panel_core::{
    AdjustButton, AdjustKind, ButtonChannel, DebouncePhase, PanelConfig, PanelShared,
};

fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

proptest! {
    // No sample pattern inside the debounce window can confirm a press.
    #[test]
    fn no_confirmation_inside_window(samples in prop::collection::vec(any::<bool>(), 1..32)) {
        let mut ch = ButtonChannel::new(Duration::from_millis(20));
        ch.poll(true, at(0));
        for (i, raw) in samples.iter().enumerate() {
            // Timestamps stay strictly inside the 20 ms window.
            let ms = 1 + (i as u64 * 18) / samples.len() as u64;
            prop_assert_ne!(ch.poll(*raw, at(ms)), DebouncePhase::Confirmed);
        }
    }

    // Whatever happened during the window, the first sample at or past
    // its end decides the press, and a confirmed press stays confirmed.
    #[test]
    fn window_end_sample_decides(bounce in prop::collection::vec(any::<bool>(), 0..16), settled: bool) {
        let mut ch = ButtonChannel::new(Duration::from_millis(20));
        ch.poll(true, at(0));
        for (i, raw) in bounce.iter().enumerate() {
            ch.poll(*raw, at(1 + i as u64 % 19));
        }
        let phase = ch.poll(settled, at(20));
        if settled {
            prop_assert_eq!(phase, DebouncePhase::Confirmed);
            prop_assert_eq!(ch.poll(false, at(30)), DebouncePhase::Confirmed);
        } else {
            prop_assert_eq!(phase, DebouncePhase::Idle);
        }
    }

    // Flow override stays inside its clamp band under any press mix.
    #[test]
    fn flow_percent_stays_bounded(ups in prop::collection::vec(any::<bool>(), 0..64)) {
        let config = PanelConfig::default();
        let mut shared = PanelShared::default();
        let mut machine = MockMachine::printing();
        let mut up = AdjustButton::new(AdjustKind::FlowUp, &config);
        let mut down = AdjustButton::new(AdjustKind::FlowDown, &config);

        for (i, is_up) in ups.iter().enumerate() {
            let t = i as u64 * 100;
            let btn = if *is_up { &mut up } else { &mut down };
            btn.tick(true, &mut shared, &mut machine, at(t), &config);
            btn.tick(true, &mut shared, &mut machine, at(t + 20), &config);
            btn.tick(false, &mut shared, &mut machine, at(t + 40), &config);
            prop_assert!((50..=200).contains(&shared.flow_percent));
        }
    }
}
