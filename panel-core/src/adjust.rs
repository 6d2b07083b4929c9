//! Axis/adjustment buttons
//!
//! Four near-identical one-shot buttons that jog to a preset position
//! while idle and adjust a live parameter while a job runs, plus the
//! home/speed button which additionally disambiguates press length
//! while idle.

use core::fmt::Write as _;

use heapless::String;

use crate::debounce::{ButtonChannel, DebouncePhase};
use crate::hal::{Instant, Machine};
use crate::types::{PanelConfig, PanelShared};

const FLOW_STEP: u8 = 5;
const FLOW_MIN: u8 = 50;
const FLOW_MAX: u8 = 200;
const TEMP_STEP: i16 = 5;

pub(crate) const HOME_SEQUENCE: &str = "G28";
/// MPC autotune + save, the idle long-press calibration macro
pub(crate) const CALIBRATION_SEQUENCE: &str = "M306 T\nM500";

/// Which live parameter a button adjusts, and its idle jog target
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdjustKind {
    FlowUp,
    FlowDown,
    TempUp,
    TempDown,
}

impl AdjustKind {
    /// Fixed positioning sequence injected when no job is active
    pub const fn park_sequence(&self) -> &'static str {
        match self {
            AdjustKind::FlowUp => "G0 Z20\nG0 X124 Y115 F3000\nG0 Z30",
            AdjustKind::FlowDown => "G0 Z5\nG0 X107 Y7 F3000\nG0 Z0",
            AdjustKind::TempUp => "G0 Z5\nG0 X107 Y105 F3000\nG0 Z0",
            AdjustKind::TempDown => "G0 Z5\nG0 X7 Y105 F3000\nG0 Z0",
        }
    }
}

pub struct AdjustButton {
    kind: AdjustKind,
    channel: ButtonChannel,
}

impl AdjustButton {
    pub fn new(kind: AdjustKind, config: &PanelConfig) -> Self {
        Self {
            kind,
            channel: ButtonChannel::new(config.debounce),
        }
    }

    pub fn kind(&self) -> AdjustKind {
        self.kind
    }

    pub fn tick<M: Machine>(
        &mut self,
        raw_pressed: bool,
        shared: &mut PanelShared,
        machine: &mut M,
        now: Instant,
        config: &PanelConfig,
    ) {
        if self.channel.poll(raw_pressed, now) != DebouncePhase::Confirmed || raw_pressed {
            return;
        }
        self.channel.reset();

        if machine.is_job_active() || machine.is_paused_externally() {
            self.adjust(shared, machine, config);
        } else {
            machine.inject(self.kind.park_sequence());
        }
    }

    fn adjust<M: Machine>(&self, shared: &mut PanelShared, machine: &mut M, config: &PanelConfig) {
        let mut cmd: String<16> = String::new();
        match self.kind {
            AdjustKind::FlowUp => {
                shared.flow_percent = (shared.flow_percent + FLOW_STEP).min(FLOW_MAX);
                let _ = write!(cmd, "M221 S{}", shared.flow_percent);
            }
            AdjustKind::FlowDown => {
                shared.flow_percent = shared.flow_percent.saturating_sub(FLOW_STEP).max(FLOW_MIN);
                let _ = write!(cmd, "M221 S{}", shared.flow_percent);
            }
            AdjustKind::TempUp => {
                let temp = (machine.target_temp() + TEMP_STEP).clamp(0, config.max_temp);
                let _ = write!(cmd, "M104 S{}", temp);
            }
            AdjustKind::TempDown => {
                let temp = (machine.target_temp() - TEMP_STEP).clamp(0, config.max_temp);
                let _ = write!(cmd, "M104 S{}", temp);
            }
        }
        machine.inject(&cmd);
    }
}

/// Home button doubling as the feedrate-override stepper while a job
/// runs. Idle short press homes; idle long press runs calibration.
pub struct HomeSpeedButton {
    channel: ButtonChannel,
}

impl HomeSpeedButton {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            channel: ButtonChannel::new(config.debounce),
        }
    }

    pub fn tick<M: Machine>(
        &mut self,
        raw_pressed: bool,
        shared: &mut PanelShared,
        machine: &mut M,
        now: Instant,
        config: &PanelConfig,
    ) {
        if self.channel.poll(raw_pressed, now) != DebouncePhase::Confirmed || raw_pressed {
            return;
        }
        let held = self.channel.held_for(now);
        self.channel.reset();

        if machine.is_job_active() || machine.is_paused_externally() {
            shared.feedrate_index = (shared.feedrate_index + 1) % config.feedrate_steps.len();
            let mut cmd: String<16> = String::new();
            let _ = write!(cmd, "M220 S{}", config.feedrate_steps[shared.feedrate_index]);
            machine.inject(&cmd);
        } else if held < config.short_press_window() {
            machine.inject(HOME_SEQUENCE);
        } else {
            machine.inject(CALIBRATION_SEQUENCE);
        }
    }
}
