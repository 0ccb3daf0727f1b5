/*
 * Console Configuration
 *
 * Compile-time capacities and the runtime knobs of the console line
 * discipline. The input line capacity and the history entry capacity are
 * independent values.
 */

use crate::scheduler::IoChannel;

/// Capacity of the circular input buffer (bytes shared by reader and ISR).
pub const INPUT_BUF_SIZE: usize = 128;

// The buffer cursors wrap around usize; indices stay consistent only for
// power-of-two sizes.
const _: () = assert!(INPUT_BUF_SIZE.is_power_of_two());

/// Number of committed lines kept for recall.
pub const MAX_HISTORY: usize = 16;

/// Longest line a history slot can hold. Longer lines are truncated.
pub const HISTORY_LINE_MAX: usize = 128;

/// Maximum number of rows in a process status report.
pub const NPROC: usize = 64;

/// Maximum length of a process name in a status report.
pub const PROC_NAME_MAX: usize = 16;

/// Command word whose invocations are never recorded in the history.
pub const HISTORY_KEYWORD: &str = "history";

/// Runtime configuration of a console instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Echo typed bytes back to the terminal.
    pub echo: bool,
    /// Lines exactly equal to this keyword are not recorded in the history.
    pub history_keyword: &'static str,
    /// Wait channel the reader sleeps on.
    pub channel: IoChannel,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            echo: true,
            history_keyword: HISTORY_KEYWORD,
            channel: IoChannel::Serial(0),
        }
    }
}
