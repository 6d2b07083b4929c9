//! Core data types for the panel control logic

use crate::hal::Duration;

/// Status LED cadences requested by the controllers.
///
/// Each cadence maps to a blink half-period in milliseconds; `Off` and
/// `Solid` are steady-state sentinels.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedCadence {
    /// Steady dark
    Off,
    /// Steady lit
    Solid,
    /// Standard print in progress; scaled by feedrate while a job runs
    Printing,
    /// Filament moving
    Filament,
    /// Heating / urgent attention
    Attention,
}

impl LedCadence {
    /// Blink half-period in milliseconds
    pub const fn interval_ms(&self) -> u16 {
        match self {
            LedCadence::Off => 0,
            LedCadence::Solid => 4000,
            LedCadence::Printing => 1000,
            LedCadence::Filament => 300,
            LedCadence::Attention => 50,
        }
    }

    /// Returns true for the steady (non-blinking) cadences
    pub const fn is_steady(&self) -> bool {
        matches!(self, LedCadence::Off | LedCadence::Solid)
    }
}

/// Print-session lifecycle phases
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionPhase {
    /// No session; the start state
    Idle,
    /// Click-counting through the file list, finalized by timeout
    Selecting,
    /// Job underway; a short press soft-parks it
    Printing,
    /// Job resumed after an external pause; behaves like `Printing`
    PausedByUser,
    /// Soft-parked by the user, waiting for a resume press
    ResumePending,
}

impl SessionPhase {
    /// Phases from which a short press may enter or continue selection
    pub const fn accepts_selection(&self) -> bool {
        matches!(self, SessionPhase::Idle | SessionPhase::Selecting)
    }
}

/// Filament load/unload sequence phases
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilamentPhase {
    Idle,
    /// Chord seen, debounce window running
    Pressed,
    /// Hotend heating toward the load setpoint
    Heating,
    /// At temperature, extrusion sequence injected
    Proceeding,
}

/// Direction of the filament move, latched when the sequence is injected
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilamentAction {
    Load,
    Unload,
}

/// Panel configuration parameters
#[derive(Copy, Clone, Debug)]
pub struct PanelConfig {
    /// Debounce window applied to every button
    pub debounce: Duration,
    /// Sustained-down time at which a press classifies as long
    pub long_press: Duration,
    /// Inactivity window that finalizes file selection
    pub click_timeout: Duration,
    /// Synchronous LED-off flash acknowledging a selection click
    pub click_flash: Duration,
    /// Hotend setpoint for filament load/unload
    pub load_temp: i16,
    /// Ceiling for the temperature adjustment buttons
    pub max_temp: i16,
    /// Feedrate override steps cycled by the speed button, percent
    pub feedrate_steps: [u16; 4],
    /// Printing-blink affine coefficients: half-period is
    /// `intercept - feedrate * slope_tenths / 10` above nominal
    /// feedrate, `floor` at or below it. Observed firmware values.
    pub blink_speed_intercept: u16,
    pub blink_speed_slope_tenths: u16,
    pub blink_speed_floor: u16,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(20),
            long_press: Duration::from_millis(1200),
            click_timeout: Duration::from_millis(5000),
            click_flash: Duration::from_millis(60),
            load_temp: 230,
            max_temp: 250,
            feedrate_steps: [100, 125, 160, 200],
            blink_speed_intercept: 740,
            blink_speed_slope_tenths: 34,
            blink_speed_floor: 400,
        }
    }
}

impl PanelConfig {
    /// Create a configuration with validated timing parameters
    pub fn new(
        debounce_ms: u64,
        long_press_ms: u64,
        click_timeout_ms: u64,
    ) -> Result<Self, &'static str> {
        if debounce_ms == 0 || debounce_ms > 100 {
            return Err("Debounce must be 1..=100 ms");
        }
        if long_press_ms <= debounce_ms {
            return Err("Long press must exceed the debounce window");
        }
        if click_timeout_ms < long_press_ms {
            return Err("Click timeout must not undercut the long press");
        }

        Ok(Self {
            debounce: Duration::from_millis(debounce_ms),
            long_press: Duration::from_millis(long_press_ms),
            click_timeout: Duration::from_millis(click_timeout_ms),
            ..Self::default()
        })
    }

    /// Maximum held time still classified as a short press.
    ///
    /// The debounce window is part of the sustained-down time, so it is
    /// subtracted from the long-press threshold.
    pub fn short_press_window(&self) -> Duration {
        Duration::from_millis(self.long_press.as_millis() - self.debounce.as_millis())
    }

    /// Effective printing-blink half-period for a feedrate percentage
    pub fn printing_interval_ms(&self, feedrate_percent: u16) -> u16 {
        if feedrate_percent > 100 {
            self.blink_speed_intercept
                .saturating_sub(feedrate_percent.saturating_mul(self.blink_speed_slope_tenths) / 10)
        } else {
            self.blink_speed_floor
        }
    }
}

/// Shared values written by the controllers and read when rendering the
/// LED or formatting parameter commands. Single writer per tick,
/// enforced by the fixed polling order.
#[derive(Copy, Clone, Debug)]
pub struct PanelShared {
    /// Cadence the LED scheduler renders on the next tick
    pub cadence: LedCadence,
    /// Extrusion flow override, percent
    pub flow_percent: u8,
    /// Index into [`PanelConfig::feedrate_steps`]
    pub feedrate_index: usize,
}

impl Default for PanelShared {
    fn default() -> Self {
        Self {
            cadence: LedCadence::Off,
            flow_percent: 100,
            feedrate_index: 1,
        }
    }
}

/// One raw pin sample per physical button, true = pressed.
///
/// The caller owns the active-low conversion (see
/// [`crate::hal::ActiveLowButton`]).
#[derive(Copy, Clone, Default, Debug)]
pub struct PanelInputs {
    pub print: bool,
    pub home: bool,
    pub load: bool,
    pub unload: bool,
    pub flow_up: bool,
    pub flow_down: bool,
    pub temp_up: bool,
    pub temp_down: bool,
}
