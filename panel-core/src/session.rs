//! Print session controller
//!
//! One physical button carries three concerns: job start with
//! click-counted file selection, pause/resume of a running job, and a
//! resume path for externally-signaled pauses. Press length picks
//! between the short-press actions and the long-press abort.

use embedded_hal::delay::DelayNs;

use crate::debounce::{ButtonChannel, DebouncePhase};
use crate::hal::{Instant, Machine, StatusLed};
use crate::types::{LedCadence, PanelConfig, PanelShared, SessionPhase};

/// Restore full acceleration/speed limits and continue playback
pub(crate) const RESUME_SEQUENCE: &str = "M201 X1500 Y1500\nM203 X300 Y300\nM108\nM24";
/// Soft parking: limited acceleration and speed, park, pause, hold
pub(crate) const PARK_SEQUENCE: &str = "M201 X500 Y500\nM203 X60 Y60\nM125\nM25\nM0";
/// Lift the head clear of the bed
pub(crate) const RAISE_SEQUENCE: &str = "M201 X800 Y800\nG91\nG1 Z20 F600\nG90";

pub struct PrintSessionController {
    channel: ButtonChannel,
    phase: SessionPhase,
    click_count: u8,
    file_count: u16,
    last_click: Option<Instant>,
}

impl PrintSessionController {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            channel: ButtonChannel::new(config.debounce),
            phase: SessionPhase::Idle,
            click_count: 0,
            file_count: 0,
            last_click: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn click_count(&self) -> u8 {
        self.click_count
    }

    pub fn file_count(&self) -> u16 {
        self.file_count
    }

    pub fn tick<M, L, D>(
        &mut self,
        raw_pressed: bool,
        shared: &mut PanelShared,
        machine: &mut M,
        led: &mut L,
        delay: &mut D,
        now: Instant,
        config: &PanelConfig,
    ) where
        M: Machine,
        L: StatusLed,
        D: DelayNs,
    {
        // Selection finalizes by inactivity, independent of the button.
        if self.phase == SessionPhase::Selecting {
            if let Some(last) = self.last_click {
                if now.duration_since(last) >= config.click_timeout {
                    self.finish_selection(shared, machine);
                }
            }
        }

        if self.channel.poll(raw_pressed, now) != DebouncePhase::Confirmed || raw_pressed {
            return;
        }

        // Release commits the press; its sustained-down time picks the
        // branch.
        let held = self.channel.held_for(now);
        self.channel.reset();
        if held < config.short_press_window() {
            self.short_press(shared, machine, led, delay, now, config);
        } else {
            self.long_press(shared, machine);
        }
    }

    /// Newest-first pick: each click steps one file further back.
    fn finish_selection<M: Machine>(&mut self, shared: &mut PanelShared, machine: &mut M) {
        let index = i32::from(self.file_count) - 1 - i32::from(self.click_count);
        let index = index.max(0) as u16;

        machine.clear_external_pause();
        self.phase = SessionPhase::Printing;
        machine.select_file_by_index(index);
        machine.open_and_print_selected();
        shared.cadence = LedCadence::Printing;
        self.click_count = 0;
        self.last_click = None;
    }

    fn short_press<M, L, D>(
        &mut self,
        shared: &mut PanelShared,
        machine: &mut M,
        led: &mut L,
        delay: &mut D,
        now: Instant,
        config: &PanelConfig,
    ) where
        M: Machine,
        L: StatusLed,
        D: DelayNs,
    {
        // An in-progress external pause takes priority: resume.
        if machine.is_paused_externally() {
            shared.cadence = LedCadence::Printing;
            machine.clear_external_pause();
            machine.inject(RESUME_SEQUENCE);
            self.phase = SessionPhase::PausedByUser;
            return;
        }

        if !machine.is_job_active() && self.phase.accepts_selection() {
            if self.phase != SessionPhase::Selecting {
                if !machine.mount() {
                    return;
                }
                machine.refresh_file_list();
                self.file_count = machine.file_count();
                if self.file_count == 0 {
                    return;
                }
                self.phase = SessionPhase::Selecting;
                self.click_count = 0;
                shared.cadence = LedCadence::Solid;
            } else {
                self.click_count = (self.click_count + 1) % 5;
                // Synchronous off-flash as click feedback; bounded, and
                // the steady-on render recovers on the next tick.
                led.set_lit(false).ok();
                delay.delay_ms(config.click_flash.as_millis() as u32);
            }
            self.last_click = Some(now);
            return;
        }

        if machine.is_job_active() && self.phase != SessionPhase::ResumePending {
            shared.cadence = LedCadence::Attention;
            machine.inject(PARK_SEQUENCE);
            self.phase = SessionPhase::ResumePending;
        }
    }

    fn long_press<M: Machine>(&mut self, shared: &mut PanelShared, machine: &mut M) {
        if machine.is_job_active()
            || machine.is_paused_externally()
            || self.phase == SessionPhase::Selecting
        {
            machine.abort_print_soon();
            machine.clear_external_pause();
            self.click_count = 0;
            self.last_click = None;
            shared.cadence = LedCadence::Off;
        } else if self.phase == SessionPhase::Idle {
            machine.inject(RAISE_SEQUENCE);
            shared.cadence = LedCadence::Solid;
        }

        // Every long press ends with a drained queue, released motors
        // and the phase back at the start state.
        machine.synchronize();
        machine.disable_steppers();
        self.phase = SessionPhase::Idle;
    }
}
