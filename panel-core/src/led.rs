//! Status LED scheduler
//!
//! Renders the cadence requested by the other controllers. Runs first
//! in the tick order, so each render reflects the previous tick's
//! request (intentional one-tick latency).

use crate::hal::{Instant, JobStatus, StatusLed};
use crate::types::{LedCadence, PanelConfig};

pub struct LedScheduler {
    last_cadence: LedCadence,
    wave_start: Option<Instant>,
}

impl LedScheduler {
    pub fn new() -> Self {
        Self {
            last_cadence: LedCadence::Off,
            wave_start: None,
        }
    }

    /// Render one tick of the requested cadence.
    ///
    /// Blinking cadences produce a triangle wave: lit for one interval,
    /// dark for one interval. The wave phase resets when the requested
    /// cadence changes; the feedrate-derived interval of the `Printing`
    /// cadence is recomputed every tick without resetting phase.
    pub fn render<L, M>(
        &mut self,
        cadence: LedCadence,
        led: &mut L,
        machine: &M,
        now: Instant,
        config: &PanelConfig,
    ) where
        L: StatusLed,
        M: JobStatus + ?Sized,
    {
        match cadence {
            LedCadence::Off => {
                led.set_lit(false).ok();
                return;
            }
            LedCadence::Solid => {
                led.set_lit(true).ok();
                return;
            }
            _ => {}
        }

        if self.last_cadence != cadence || self.wave_start.is_none() {
            self.last_cadence = cadence;
            self.wave_start = Some(now);
        }

        let interval = if cadence == LedCadence::Printing && machine.is_job_active() {
            config.printing_interval_ms(machine.feedrate_percent())
        } else {
            cadence.interval_ms()
        } as u64;

        let Some(start) = self.wave_start else { return };
        let elapsed = now.duration_since(start).as_millis();
        if elapsed < interval {
            led.set_lit(true).ok();
        } else if elapsed < interval * 2 {
            led.set_lit(false).ok();
        } else {
            self.wave_start = Some(now);
        }
    }
}

impl Default for LedScheduler {
    fn default() -> Self {
        Self::new()
    }
}
