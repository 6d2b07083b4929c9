//! Owning context and tick entry point
//!
//! All controller state lives here; an external scheduler calls
//! [`Panel::tick`] at a high, bounded rate. The LED renders first so it
//! always reflects the cadence requested by the previous tick, then the
//! buttons poll in fixed order. That order is the single-writer
//! discipline for [`PanelShared`]: no locks, one thread of control.

use embedded_hal::delay::DelayNs;

use crate::adjust::{AdjustButton, AdjustKind, HomeSpeedButton};
use crate::filament::FilamentController;
use crate::hal::{InputButton, Instant, Machine, StatusLed};
use crate::led::LedScheduler;
use crate::session::PrintSessionController;
use crate::types::{FilamentPhase, PanelConfig, PanelInputs, PanelShared, SessionPhase};

pub struct Panel {
    config: PanelConfig,
    pub shared: PanelShared,
    led: LedScheduler,
    filament: FilamentController,
    session: PrintSessionController,
    home: HomeSpeedButton,
    flow_up: AdjustButton,
    flow_down: AdjustButton,
    temp_up: AdjustButton,
    temp_down: AdjustButton,
}

impl Panel {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            shared: PanelShared::default(),
            led: LedScheduler::new(),
            filament: FilamentController::new(),
            session: PrintSessionController::new(&config),
            home: HomeSpeedButton::new(&config),
            flow_up: AdjustButton::new(AdjustKind::FlowUp, &config),
            flow_down: AdjustButton::new(AdjustKind::FlowDown, &config),
            temp_up: AdjustButton::new(AdjustKind::TempUp, &config),
            temp_down: AdjustButton::new(AdjustKind::TempDown, &config),
            config,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn session_phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn filament_phase(&self) -> FilamentPhase {
        self.filament.phase()
    }

    pub fn click_count(&self) -> u8 {
        self.session.click_count()
    }

    /// Advance every state machine by one scheduler tick
    pub fn tick<M, L, D>(
        &mut self,
        inputs: &PanelInputs,
        machine: &mut M,
        led: &mut L,
        delay: &mut D,
        now: Instant,
    ) where
        M: Machine,
        L: StatusLed,
        D: DelayNs,
    {
        self.led
            .render(self.shared.cadence, led, machine, now, &self.config);
        self.filament.tick(
            inputs.load,
            inputs.unload,
            &mut self.shared,
            machine,
            now,
            &self.config,
        );
        self.session.tick(
            inputs.print,
            &mut self.shared,
            machine,
            led,
            delay,
            now,
            &self.config,
        );
        self.home
            .tick(inputs.home, &mut self.shared, machine, now, &self.config);
        self.flow_up
            .tick(inputs.flow_up, &mut self.shared, machine, now, &self.config);
        self.flow_down.tick(
            inputs.flow_down,
            &mut self.shared,
            machine,
            now,
            &self.config,
        );
        self.temp_up
            .tick(inputs.temp_up, &mut self.shared, machine, now, &self.config);
        self.temp_down.tick(
            inputs.temp_down,
            &mut self.shared,
            machine,
            now,
            &self.config,
        );
    }
}

/// The eight physical buttons, sampled once per tick
pub struct PanelButtons<BP, BH, BL, BU, B1, B2, B3, B4> {
    pub print: BP,
    pub home: BH,
    pub load: BL,
    pub unload: BU,
    pub flow_up: B1,
    pub flow_down: B2,
    pub temp_up: B3,
    pub temp_down: B4,
}

impl<BP, BH, BL, BU, B1, B2, B3, B4> PanelButtons<BP, BH, BL, BU, B1, B2, B3, B4>
where
    BP: InputButton,
    BH: InputButton,
    BL: InputButton,
    BU: InputButton,
    B1: InputButton,
    B2: InputButton,
    B3: InputButton,
    B4: InputButton,
{
    /// Take one raw sample of every button. A failed pin read counts as
    /// released; nothing here may halt the control loop.
    pub fn sample(&mut self) -> PanelInputs {
        PanelInputs {
            print: self.print.is_pressed().unwrap_or(false),
            home: self.home.is_pressed().unwrap_or(false),
            load: self.load.is_pressed().unwrap_or(false),
            unload: self.unload.is_pressed().unwrap_or(false),
            flow_up: self.flow_up.is_pressed().unwrap_or(false),
            flow_down: self.flow_down.is_pressed().unwrap_or(false),
            temp_up: self.temp_up.is_pressed().unwrap_or(false),
            temp_down: self.temp_down.is_pressed().unwrap_or(false),
        }
    }
}

/// Async driver polling the panel at a fixed period
#[cfg(feature = "embassy-time")]
pub async fn panel_loop<M, L, D, BP, BH, BL, BU, B1, B2, B3, B4>(
    mut panel: Panel,
    mut buttons: PanelButtons<BP, BH, BL, BU, B1, B2, B3, B4>,
    mut machine: M,
    mut led: L,
    mut delay: D,
    period: crate::hal::Duration,
) -> !
where
    M: Machine,
    L: StatusLed,
    D: DelayNs,
    BP: InputButton,
    BH: InputButton,
    BL: InputButton,
    BU: InputButton,
    B1: InputButton,
    B2: InputButton,
    B3: InputButton,
    B4: InputButton,
{
    use embassy_time::Ticker;

    let mut ticker = Ticker::every(period);
    loop {
        let inputs = buttons.sample();
        panel.tick(&inputs, &mut machine, &mut led, &mut delay, Instant::now());

        #[cfg(feature = "defmt")]
        defmt::trace!("session: {}", panel.session_phase());

        ticker.next().await;
    }
}
