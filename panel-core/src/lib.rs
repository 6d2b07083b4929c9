//! Control core for a compact 3D printer front panel.
//!
//! Eight buttons and one status LED drive a set of cooperating state
//! machines: print session lifecycle (select, print, pause, resume,
//! abort), filament load/unload behind a heated chord, live flow and
//! temperature adjustment, and a feedrate-aware LED blink scheduler.
//!
//! The crate is `no_std` and hardware-agnostic. Everything the panel
//! touches on the printer side goes through the traits in [`hal`];
//! time is passed in as an explicit [`hal::Instant`] so every state
//! machine is testable with synthetic clocks. Firmware crates wire up
//! real pins and drive [`panel::Panel::tick`] from a periodic task.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod adjust;
pub mod debounce;
pub mod filament;
pub mod hal;
pub mod led;
pub mod panel;
pub mod session;
pub mod types;

pub use adjust::{AdjustButton, AdjustKind, HomeSpeedButton};
pub use debounce::{ButtonChannel, DebouncePhase};
pub use filament::FilamentController;
pub use hal::{
    ActiveLowButton, ActiveLowLed, CommandSink, Duration, HalError, Hotend, InputButton, Instant,
    JobStatus, Machine, MotionControl, StatusLed, StorageCard,
};
pub use led::LedScheduler;
pub use panel::{Panel, PanelButtons};
pub use session::PrintSessionController;
pub use types::{
    FilamentAction, FilamentPhase, LedCadence, PanelConfig, PanelInputs, PanelShared, SessionPhase,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stock configuration for the reference panel hardware
pub fn default_config() -> PanelConfig {
    PanelConfig::default()
}
