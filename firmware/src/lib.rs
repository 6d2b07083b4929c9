//! Firmware support crate for the front panel.
//!
//! All control logic lives in [`panel_core`]; this crate adds the
//! board wiring (pins, executor tasks) for STM32F1-class controllers.
//! The `embedded` feature pulls in embassy-stm32 and the runtime; the
//! default host build exposes only the re-exports so workspace tests
//! compile without a cross toolchain.

#![no_std]

pub use panel_core;

#[cfg(feature = "embedded")]
pub mod board;
#[cfg(feature = "embedded")]
pub mod tasks;
