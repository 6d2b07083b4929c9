//! Filament maintenance controller
//!
//! Four-stage sequence behind the load/unload button chord: detect,
//! heat, wait for temperature, run the extrusion move. Releasing the
//! chord cancels from any stage.

use crate::hal::{Instant, Machine};
use crate::types::{FilamentAction, FilamentPhase, LedCadence, PanelConfig, PanelShared};

pub(crate) const LOAD_SEQUENCE: &str = "G91\nG0 E540 F2000\nG0 E60 F120\nG90\nM400\nM104 S0";
pub(crate) const UNLOAD_SEQUENCE: &str =
    "G91\nG1 E3 F180\nG1 E-40 F3000\nG1 E-560 F1000\nG90\nM400\nM104 S0";

pub struct FilamentController {
    phase: FilamentPhase,
    action: FilamentAction,
    chord_since: Option<Instant>,
    injected: bool,
}

impl FilamentController {
    pub fn new() -> Self {
        Self {
            phase: FilamentPhase::Idle,
            action: FilamentAction::Load,
            chord_since: None,
            injected: false,
        }
    }

    pub fn phase(&self) -> FilamentPhase {
        self.phase
    }

    /// Direction latched when the extrusion sequence was injected
    pub fn action(&self) -> FilamentAction {
        self.action
    }

    pub fn tick<M: Machine>(
        &mut self,
        load: bool,
        unload: bool,
        shared: &mut PanelShared,
        machine: &mut M,
        now: Instant,
        config: &PanelConfig,
    ) {
        // Inert while a job runs unpaused; an externally-declared pause
        // re-enables filament maintenance.
        if machine.is_job_active() && !machine.is_paused_externally() {
            return;
        }

        // Either button of the chord counts as pressed.
        let chord = load || unload;

        match self.phase {
            FilamentPhase::Idle => {
                if chord {
                    self.chord_since = Some(now);
                    self.phase = FilamentPhase::Pressed;
                }
            }
            FilamentPhase::Pressed => {
                let elapsed = match self.chord_since {
                    Some(at) => now.duration_since(at),
                    None => config.debounce,
                };
                if elapsed >= config.debounce {
                    if chord {
                        machine.set_target_temp(config.load_temp);
                        shared.cadence = LedCadence::Attention;
                        self.phase = FilamentPhase::Heating;
                    } else {
                        self.phase = FilamentPhase::Idle;
                    }
                }
            }
            FilamentPhase::Heating => {
                if !chord {
                    shared.cadence = LedCadence::Off;
                    machine.disable_all_heaters();
                    self.phase = FilamentPhase::Idle;
                } else if machine.current_temp() >= config.load_temp {
                    shared.cadence = LedCadence::Filament;
                    self.phase = FilamentPhase::Proceeding;
                }
            }
            FilamentPhase::Proceeding => {
                if !chord {
                    self.injected = false;
                    self.phase = FilamentPhase::Idle;
                    machine.quickstop();
                    machine.disable_all_heaters();
                    shared.cadence = LedCadence::Off;
                } else if !self.injected {
                    // One-shot latch: the sequence goes out exactly once
                    // per Proceeding entry.
                    self.injected = true;
                    self.action = if load {
                        FilamentAction::Load
                    } else {
                        FilamentAction::Unload
                    };
                    machine.inject(match self.action {
                        FilamentAction::Load => LOAD_SEQUENCE,
                        FilamentAction::Unload => UNLOAD_SEQUENCE,
                    });
                }
            }
        }
    }
}

impl Default for FilamentController {
    fn default() -> Self {
        Self::new()
    }
}
