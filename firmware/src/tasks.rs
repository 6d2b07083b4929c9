//! Executor tasks driving the panel.

use embassy_time::{Delay, Duration};

use panel_core::{Panel, PanelConfig};

use crate::board::{Board, LogMachine};

/// Polling period for the control loop. Well under the debounce window
/// so no press can slip between samples.
const TICK_PERIOD: Duration = Duration::from_millis(10);

#[embassy_executor::task]
pub async fn panel_task(board: Board) -> ! {
    let panel = Panel::new(PanelConfig::default());
    panel_core::panel::panel_loop(
        panel,
        board.buttons,
        LogMachine::new(),
        board.led,
        Delay,
        TICK_PERIOD,
    )
    .await
}
