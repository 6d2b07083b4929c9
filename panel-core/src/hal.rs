//! Hardware abstraction and collaborator seams for the panel core

// Re-export time types based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
pub use self::mock_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
mod mock_time {
    /// Millisecond instant standing in for `embassy_time::Instant` on the host
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Instant(u64);

    impl Instant {
        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub fn duration_since(&self, other: Instant) -> Duration {
            Duration::from_millis(self.0.saturating_sub(other.0))
        }

        pub fn as_millis(&self) -> u64 {
            self.0
        }
    }

    /// Millisecond duration standing in for `embassy_time::Duration`
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Duration(u64);

    impl Duration {
        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub const fn as_millis(&self) -> u64 {
            self.0
        }
    }
}

use embedded_hal::digital::{InputPin, OutputPin};

/// Error types for pin adaptor operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Invalid configuration
    InvalidConfig,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Trait for sampling one physical panel button
pub trait InputButton {
    type Error: From<HalError>;

    /// Check if the button is currently held down
    fn is_pressed(&mut self) -> Result<bool, Self::Error>;
}

/// Trait for the single status LED
pub trait StatusLed {
    type Error: From<HalError>;

    /// Set LED output state (true = lit)
    fn set_lit(&mut self, lit: bool) -> Result<(), Self::Error>;
}

/// Adaptor for embedded-hal input pins wired active-low (pull-up,
/// grounded when pressed).
pub struct ActiveLowButton<P> {
    pin: P,
}

impl<P> ActiveLowButton<P>
where
    P: InputPin,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P> InputButton for ActiveLowButton<P>
where
    P: InputPin,
{
    type Error = HalError;

    fn is_pressed(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_low().map_err(|_| HalError::GpioError)
    }
}

/// Adaptor for embedded-hal output pins driving an active-low LED
/// (logic high = dark).
pub struct ActiveLowLed<P> {
    pin: P,
}

impl<P> ActiveLowLed<P>
where
    P: OutputPin,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P> StatusLed for ActiveLowLed<P>
where
    P: OutputPin,
{
    type Error = HalError;

    fn set_lit(&mut self, lit: bool) -> Result<(), Self::Error> {
        let result = if lit {
            self.pin.set_low()
        } else {
            self.pin.set_high()
        };
        result.map_err(|_| HalError::GpioError)
    }
}

/// Sink for textual command lines executed asynchronously by the
/// machine's interpreter.
pub trait CommandSink {
    /// Enqueue one or more newline-separated command lines.
    ///
    /// Fire-and-forget: no completion status is reported, but ordering
    /// among the lines injected by this core is preserved.
    fn inject(&mut self, commands: &str);
}

/// Job and pause state observed from the surrounding firmware
pub trait JobStatus {
    fn is_job_active(&self) -> bool;

    /// Pause raised outside this core (e.g. a mid-print user-required
    /// G-code). The core may observe and clear it but never sets it.
    fn is_paused_externally(&self) -> bool;

    fn clear_external_pause(&mut self);

    /// Current feedrate override in percent (100 = nominal)
    fn feedrate_percent(&self) -> u16;
}

/// Storage medium holding printable files, newest listed last
pub trait StorageCard {
    /// Attempt to mount the medium; false when no usable medium is present
    fn mount(&mut self) -> bool;

    /// Rebuild the file listing from the mounted medium
    fn refresh_file_list(&mut self);

    fn file_count(&self) -> u16;

    fn select_file_by_index(&mut self, index: u16);

    /// Open the selected file and begin printing from it
    fn open_and_print_selected(&mut self);

    /// Request that storage playback stop at the next safe point
    fn abort_print_soon(&mut self);
}

/// Hotend thermal state and control
pub trait Hotend {
    fn current_temp(&self) -> i16;

    fn target_temp(&self) -> i16;

    fn set_target_temp(&mut self, deg: i16);

    fn disable_all_heaters(&mut self);
}

/// Motion planner and stepper driver control
pub trait MotionControl {
    /// Blocking barrier: returns once all queued motion has drained
    fn synchronize(&mut self);

    /// Immediately stop and flush in-flight motion
    fn quickstop(&mut self);

    /// De-energize the stepper drivers, where the board supports it
    fn disable_steppers(&mut self);
}

/// The complete collaborator surface the panel core talks to
pub trait Machine: CommandSink + JobStatus + StorageCard + Hotend + MotionControl {}

impl<T: CommandSink + JobStatus + StorageCard + Hotend + MotionControl> Machine for T {}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock collaborators for testing

    use super::*;
    use embedded_hal::delay::DelayNs;
    use heapless::{String, Vec};

    /// Recording machine stand-in. State fields are public so tests can
    /// stage job/pause/thermal conditions directly.
    #[derive(Debug)]
    pub struct MockMachine {
        pub job_active: bool,
        pub paused_externally: bool,
        pub hotend_temp: i16,
        pub hotend_target: i16,
        pub feedrate: u16,
        pub mount_ok: bool,
        pub files: u16,
        pub listed: bool,
        pub selected: Option<u16>,
        pub opened: bool,
        pub aborts: u32,
        pub sync_calls: u32,
        pub quickstops: u32,
        pub steppers_disabled: bool,
        pub heaters_disabled: bool,
        pub injected: Vec<String<96>, 16>,
    }

    impl MockMachine {
        pub fn new() -> Self {
            Self {
                job_active: false,
                paused_externally: false,
                hotend_temp: 25,
                hotend_target: 0,
                feedrate: 100,
                mount_ok: true,
                files: 0,
                listed: false,
                selected: None,
                opened: false,
                aborts: 0,
                sync_calls: 0,
                quickstops: 0,
                steppers_disabled: false,
                heaters_disabled: false,
                injected: Vec::new(),
            }
        }

        /// Machine with an active, unpaused job
        pub fn printing() -> Self {
            Self {
                job_active: true,
                ..Self::new()
            }
        }

        pub fn last_injected(&self) -> Option<&str> {
            self.injected.last().map(|s| s.as_str())
        }
    }

    impl Default for MockMachine {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CommandSink for MockMachine {
        fn inject(&mut self, commands: &str) {
            let mut line: String<96> = String::new();
            line.push_str(commands).ok();
            self.injected.push(line).ok();
        }
    }

    impl JobStatus for MockMachine {
        fn is_job_active(&self) -> bool {
            self.job_active
        }

        fn is_paused_externally(&self) -> bool {
            self.paused_externally
        }

        fn clear_external_pause(&mut self) {
            self.paused_externally = false;
        }

        fn feedrate_percent(&self) -> u16 {
            self.feedrate
        }
    }

    impl StorageCard for MockMachine {
        fn mount(&mut self) -> bool {
            self.mount_ok
        }

        fn refresh_file_list(&mut self) {
            self.listed = true;
        }

        fn file_count(&self) -> u16 {
            self.files
        }

        fn select_file_by_index(&mut self, index: u16) {
            self.selected = Some(index);
        }

        fn open_and_print_selected(&mut self) {
            self.opened = true;
            self.job_active = true;
        }

        fn abort_print_soon(&mut self) {
            self.aborts += 1;
            self.job_active = false;
        }
    }

    impl Hotend for MockMachine {
        fn current_temp(&self) -> i16 {
            self.hotend_temp
        }

        fn target_temp(&self) -> i16 {
            self.hotend_target
        }

        fn set_target_temp(&mut self, deg: i16) {
            self.hotend_target = deg;
            self.heaters_disabled = false;
        }

        fn disable_all_heaters(&mut self) {
            self.hotend_target = 0;
            self.heaters_disabled = true;
        }
    }

    impl MotionControl for MockMachine {
        fn synchronize(&mut self) {
            self.sync_calls += 1;
        }

        fn quickstop(&mut self) {
            self.quickstops += 1;
        }

        fn disable_steppers(&mut self) {
            self.steppers_disabled = true;
        }
    }

    /// Mock status LED recording the last write
    #[derive(Debug, Default)]
    pub struct MockLed {
        pub lit: bool,
        pub writes: u32,
    }

    impl MockLed {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl StatusLed for MockLed {
        type Error = HalError;

        fn set_lit(&mut self, lit: bool) -> Result<(), Self::Error> {
            self.lit = lit;
            self.writes += 1;
            Ok(())
        }
    }

    /// Counting delay provider; the click-feedback flash shows up here
    #[derive(Debug, Default)]
    pub struct MockDelay {
        pub slept_ns: u64,
    }

    impl MockDelay {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn slept_ms(&self) -> u64 {
            self.slept_ns / 1_000_000
        }
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.slept_ns += ns as u64;
        }
    }

    /// Mock panel button
    #[derive(Debug, Default)]
    pub struct MockButton {
        pub pressed: bool,
    }

    impl InputButton for MockButton {
        type Error = HalError;

        fn is_pressed(&mut self) -> Result<bool, Self::Error> {
            Ok(self.pressed)
        }
    }
}
