//! Pin assignments and machine-side stubs for the reference board.

use embassy_stm32::gpio::{AnyPin, Input, Level, Output, Pin, Pull, Speed};
use embassy_stm32::Peripherals;

use panel_core::hal::{ActiveLowButton, ActiveLowLed};
use panel_core::{CommandSink, Hotend, JobStatus, MotionControl, PanelButtons, StorageCard};

pub type Button = ActiveLowButton<Input<'static>>;
pub type Led = ActiveLowLed<Output<'static>>;
pub type Buttons = PanelButtons<Button, Button, Button, Button, Button, Button, Button, Button>;

pub struct Board {
    pub buttons: Buttons,
    pub led: Led,
}

/// Wire up the panel header. Buttons are active-low with internal
/// pull-ups; the LED sinks current through the output pin.
pub fn init(p: Peripherals) -> Board {
    fn button(pin: AnyPin) -> Button {
        ActiveLowButton::new(Input::new(pin, Pull::Up))
    }

    Board {
        buttons: PanelButtons {
            print: button(p.PA0.degrade()),
            home: button(p.PA1.degrade()),
            load: button(p.PA2.degrade()),
            unload: button(p.PA3.degrade()),
            flow_up: button(p.PA4.degrade()),
            flow_down: button(p.PA5.degrade()),
            temp_up: button(p.PA6.degrade()),
            temp_down: button(p.PA7.degrade()),
        },
        led: ActiveLowLed::new(Output::new(p.PB0, Level::High, Speed::Low)),
    }
}

/// Placeholder machine bridge until the motherboard link lands.
///
/// Injected commands are logged over RTT instead of being queued, and
/// job status reads as permanently idle. Replace with the serial bridge
/// when the UART protocol to the mainboard is defined.
pub struct LogMachine {
    target: i16,
}

impl LogMachine {
    pub fn new() -> Self {
        Self { target: 0 }
    }
}

impl Default for LogMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandSink for LogMachine {
    fn inject(&mut self, gcode: &str) {
        #[cfg(feature = "defmt")]
        defmt::info!("inject: {}", gcode);
        #[cfg(not(feature = "defmt"))]
        let _ = gcode;
    }
}

impl JobStatus for LogMachine {
    fn is_job_active(&self) -> bool {
        false
    }

    fn is_paused_externally(&self) -> bool {
        false
    }

    fn clear_external_pause(&mut self) {}

    fn feedrate_percent(&self) -> u16 {
        100
    }
}

impl StorageCard for LogMachine {
    fn mount(&mut self) -> bool {
        false
    }

    fn refresh_file_list(&mut self) {}

    fn file_count(&self) -> u16 {
        0
    }

    fn select_file_by_index(&mut self, _index: u16) {}

    fn open_and_print_selected(&mut self) {}

    fn abort_print_soon(&mut self) {}
}

impl Hotend for LogMachine {
    fn current_temp(&self) -> i16 {
        25
    }

    fn target_temp(&self) -> i16 {
        self.target
    }

    fn set_target_temp(&mut self, temp: i16) {
        self.target = temp;
    }

    fn disable_all_heaters(&mut self) {
        self.target = 0;
    }
}

impl MotionControl for LogMachine {
    fn synchronize(&mut self) {}

    fn quickstop(&mut self) {}

    fn disable_steppers(&mut self) {}
}
