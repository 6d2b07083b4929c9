//! Integration tests driving the whole panel through [`panel_core::Panel`].
//!
//! Unit tests live next to each controller in `panel-core`; this crate
//! covers the cross-controller flows on the host, with synthetic time
//! and the mock machine from `panel_core::hal::mock`.

#[cfg(test)]
mod press_timing;
#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;

#[cfg(test)]
pub(crate) mod rig {
    use panel_core::hal::mock::{MockDelay, MockLed, MockMachine};
    use panel_core::hal::Instant;
    use panel_core::{Panel, PanelConfig, PanelInputs};

    /// One panel plus its collaborators, driven by explicit timestamps
    pub struct PanelRig {
        pub panel: Panel,
        pub machine: MockMachine,
        pub led: MockLed,
        pub delay: MockDelay,
    }

    impl PanelRig {
        pub fn new(machine: MockMachine) -> Self {
            Self {
                panel: Panel::new(PanelConfig::default()),
                machine,
                led: MockLed::new(),
                delay: MockDelay::new(),
            }
        }

        pub fn tick(&mut self, inputs: PanelInputs, ms: u64) {
            self.panel.tick(
                &inputs,
                &mut self.machine,
                &mut self.led,
                &mut self.delay,
                Instant::from_millis(ms),
            );
        }

        /// Press/release cycle on one button, held for `held` ms
        pub fn press(&mut self, inputs: PanelInputs, start: u64, held: u64) {
            self.tick(inputs, start);
            self.tick(inputs, start + 20);
            if held > 20 {
                self.tick(inputs, start + held - 1);
            }
            self.tick(PanelInputs::default(), start + held);
        }
    }

    pub fn print_button() -> PanelInputs {
        PanelInputs {
            print: true,
            ..PanelInputs::default()
        }
    }

    pub fn load_button() -> PanelInputs {
        PanelInputs {
            load: true,
            ..PanelInputs::default()
        }
    }

    pub fn home_button() -> PanelInputs {
        PanelInputs {
            home: true,
            ..PanelInputs::default()
        }
    }
}
