#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;

use easypanel_firmware::{board, tasks};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_stm32::init(Default::default());

    #[cfg(feature = "defmt")]
    defmt::info!("easypanel {}", easypanel_firmware::panel_core::VERSION);

    let board = board::init(p);
    spawner.must_spawn(tasks::panel_task(board));
}
