/*
 * Console Line Discipline (TTY0)
 *
 * Canonical input for the serial console. Bytes arrive one at a time from
 * the UART receive interrupt and are edited into lines; read() hands out
 * complete lines to processes.
 *
 * Special input bytes:
 *   newline / CR  end of line
 *   control-H/DEL backspace
 *   control-U     kill line
 *   control-D     end of file
 *   control-P     print process list
 *   ESC [ A/B     recall older/newer history line
 *
 * All console state lives in one `ConsoleState` behind one lock. The
 * interrupt path takes the lock for the whole byte; history replay feeds the
 * recalled bytes back through `Discipline::inject` on the already-locked
 * state. read() is the only place that sleeps, and it drops the lock to do so.
 */

pub mod escape;
pub mod history;
pub mod input;
pub mod line_editor;
pub mod recall;

use core::fmt;

use crate::arch::IrqMutex;
use crate::config::{ConsoleConfig, HISTORY_LINE_MAX, INPUT_BUF_SIZE, MAX_HISTORY};
use crate::drivers::ByteSink;
use crate::io::{CopyIn, CopyOut, Device, Errno, S_IFCHR, Stat};
use crate::scheduler::Scheduler;
use crate::utils::writer::SinkWriter;

use escape::{ArrowKey, EscapeRecognizer, Recognized};
use history::{HistoryEntry, HistoryStore};
use input::InputBuffer;
use line_editor::{CTRL_D, CTRL_H, CTRL_P, CTRL_U, DEL, ESC, Insert, LineEditor};
use recall::HistoryNavigator;

pub use escape::EscapeState;
pub use recall::RecallError;

/// Everything the console lock protects.
struct ConsoleState {
    input: InputBuffer<INPUT_BUF_SIZE>,
    history: HistoryStore<MAX_HISTORY, HISTORY_LINE_MAX>,
    nav: HistoryNavigator,
    escape: EscapeRecognizer,
}

impl ConsoleState {
    fn new() -> Self {
        Self {
            input: InputBuffer::new(),
            history: HistoryStore::new(),
            nav: HistoryNavigator::new(),
            escape: EscapeRecognizer::new(),
        }
    }
}

/// The console device.
///
/// `U` transmits bytes to the terminal, `S` supplies sleep/wakeup, the kill
/// check and the process dump.
pub struct Console<U: ByteSink, S: Scheduler> {
    state: IrqMutex<ConsoleState>,
    uart: U,
    sched: S,
    config: ConsoleConfig,
}

impl<U: ByteSink, S: Scheduler> Console<U, S> {
    pub fn new(uart: U, sched: S) -> Self {
        Self::with_config(uart, sched, ConsoleConfig::default())
    }

    pub fn with_config(uart: U, sched: S, config: ConsoleConfig) -> Self {
        log::info!(
            "console: {} byte input buffer, {} history slots on {:?}",
            INPUT_BUF_SIZE,
            MAX_HISTORY,
            config.channel
        );
        Self {
            state: IrqMutex::new(ConsoleState::new()),
            uart,
            sched,
            config,
        }
    }

    pub fn uart(&self) -> &U {
        &self.uart
    }

    pub fn scheduler(&self) -> &S {
        &self.sched
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Formatter that prints straight to the terminal.
    pub fn writer(&self) -> SinkWriter<'_, U> {
        SinkWriter::new(&self.uart)
    }

    /// User write()s to the console go here.
    ///
    /// Stops at the first byte that cannot be copied in and returns the
    /// number of bytes sent.
    pub fn write<B: CopyIn + ?Sized>(&self, src: &B) -> usize {
        let mut sent = 0;
        while sent < src.len() {
            match src.copy_in(sent) {
                Ok(byte) => self.uart.put(byte),
                Err(_) => break,
            }
            sent += 1;
        }
        sent
    }

    /// User read()s from the console go here.
    ///
    /// Copies (up to) one whole input line into `dst`, sleeping until the
    /// interrupt handler commits one. Control-D ends the read without being
    /// copied; if bytes were already copied it is left in the buffer so the
    /// next read returns 0. Fails with `EINTR` if the caller is killed while
    /// waiting.
    pub fn read<B: CopyOut + ?Sized>(&self, dst: &mut B) -> Result<usize, Errno> {
        let target = dst.len();
        let mut filled = 0;

        let mut state = self.state.lock();
        while filled < target {
            // Wait until the interrupt handler has committed some input.
            while !state.input.has_committed() {
                if self.sched.current_killed() {
                    log::debug!("console: reader killed while waiting");
                    return Err(Errno::EINTR);
                }
                let ticket = self.sched.prepare_to_wait(self.config.channel);
                drop(state);
                self.sched.block(ticket);
                state = self.state.lock();
            }

            let Some(byte) = state.input.pop_committed() else {
                continue;
            };

            if byte == CTRL_D {
                if filled > 0 {
                    // Save ^D for next time so the caller sees a 0-byte read.
                    state.input.unread();
                }
                break;
            }

            if dst.copy_out(filled, byte).is_err() {
                state.input.unread();
                break;
            }
            filled += 1;

            if byte == b'\n' {
                break;
            }
        }
        Ok(filled)
    }

    /// The console input interrupt handler.
    ///
    /// The UART driver calls this for every received byte.
    pub fn interrupt(&self, byte: u8) {
        let mut state = self.state.lock();
        let mut line = Discipline {
            state: &mut *state,
            uart: &self.uart,
            sched: &self.sched,
            config: &self.config,
        };
        line.receive(byte);
    }

    /// Print every recorded line followed by the one in slot `id` to `out`.
    ///
    /// Fails with `EINVAL`, printing nothing, if `id` is not a history slot.
    pub fn history(&self, id: isize, out: &mut dyn fmt::Write) -> Result<(), Errno> {
        let id = usize::try_from(id).map_err(|_| Errno::EINVAL)?;
        self.state.lock().history.query(id, out)
    }

    /// `history` printed on the console itself.
    pub fn print_history(&self, id: isize) -> Result<(), Errno> {
        let mut out = self.writer();
        self.history(id, &mut out)
    }

    /// Number of recorded history lines.
    pub fn history_len(&self) -> usize {
        self.state.lock().history.len()
    }

    /// Copy of the history entry in `slot`.
    pub fn history_entry(&self, slot: usize) -> Option<HistoryEntry<HISTORY_LINE_MAX>> {
        self.state.lock().history.get(slot).cloned()
    }

    /// Recall the next older history line into the edit region.
    pub fn recall_up(&self) -> Result<(), RecallError> {
        self.recall(ArrowKey::Up)
    }

    /// Recall the next newer history line into the edit region.
    pub fn recall_down(&self) -> Result<(), RecallError> {
        self.recall(ArrowKey::Down)
    }

    fn recall(&self, key: ArrowKey) -> Result<(), RecallError> {
        let mut state = self.state.lock();
        let mut line = Discipline {
            state: &mut *state,
            uart: &self.uart,
            sched: &self.sched,
            config: &self.config,
        };
        line.recall(key)
    }

    pub fn escape_state(&self) -> EscapeState {
        self.state.lock().escape.state()
    }
}

/// The console with its lock held, for the duration of one input byte.
struct Discipline<'a, U: ByteSink, S: Scheduler> {
    state: &'a mut ConsoleState,
    uart: &'a U,
    sched: &'a S,
    config: &'a ConsoleConfig,
}

impl<U: ByteSink, S: Scheduler> Discipline<'_, U, S> {
    fn editor(&mut self) -> LineEditor<'_, U, INPUT_BUF_SIZE> {
        LineEditor::new(&mut self.state.input, self.uart, self.config.echo)
    }

    /// A byte from the hardware.
    fn receive(&mut self, byte: u8) {
        match self.state.escape.feed(byte) {
            Recognized::Swallowed => {}
            Recognized::Arrow(key) => {
                if let Err(err) = self.recall(key) {
                    log::trace!("console: {:?} ignored: {}", key, err);
                }
            }
            Recognized::Byte(byte) => self.dispatch(byte),
        }
    }

    /// A byte replayed from history. Skips escape recognition.
    fn inject(&mut self, byte: u8) {
        self.dispatch(byte);
    }

    fn dispatch(&mut self, byte: u8) {
        match byte {
            CTRL_P => self.sched.procdump(),
            CTRL_U => {
                self.editor().kill_line();
            }
            CTRL_H | DEL => {
                self.editor().erase_char();
            }
            ESC => self.state.escape.begin(),
            _ => {
                if self.editor().insert(byte) == Insert::LineReady {
                    self.end_line();
                }
            }
        }
    }

    /// Record the finished line and wake up read().
    fn end_line(&mut self) {
        let pending = self.state.input.pending_line();
        let line = match pending.last() {
            Some(&b'\n') | Some(&CTRL_D) => &pending[..pending.len() - 1],
            _ => &pending[..],
        };

        if line != self.config.history_keyword.as_bytes() {
            let slot = self.state.history.append(line);
            self.state.nav.on_append(slot);
            log::trace!("console: recorded {} byte line in slot {}", line.len(), slot);
        }

        self.state.input.commit();
        self.sched.wake_io_waiters(self.config.channel);
    }

    /// Replace the line being edited with a history line.
    ///
    /// Leaves everything untouched if there is nothing to recall. The replay
    /// keeps one byte of the buffer free, so a recalled line is never
    /// submitted until the user ends it.
    fn recall(&mut self, key: ArrowKey) -> Result<(), RecallError> {
        let len = self.state.history.len();
        let capacity = self.state.history.capacity();
        let slot = match key {
            ArrowKey::Up => self.state.nav.up(len, capacity)?,
            ArrowKey::Down => self.state.nav.down(len, capacity)?,
        };

        self.editor().kill_line();

        let entry = self.state.history.get(slot).cloned().unwrap_or_default();
        let fits = entry.len().min(self.state.input.room().saturating_sub(1));
        if fits < entry.len() {
            log::trace!("console: recalled line cut to {} of {} bytes", fits, entry.len());
        }
        for &byte in &entry.as_bytes()[..fits] {
            self.inject(byte);
        }
        Ok(())
    }
}

impl<U: ByteSink, S: Scheduler> Device for Console<U, S> {
    fn read(&self, dst: &mut dyn CopyOut) -> Result<usize, Errno> {
        Console::read(self, dst)
    }

    fn write(&self, src: &dyn CopyIn) -> Result<usize, Errno> {
        Ok(Console::write(self, src))
    }

    fn ioctl(&self, request: u32, _arg: usize) -> Result<i32, Errno> {
        match request {
            // The console is always canonical with echo; report that.
            TCGETS => Ok(0),
            _ => Err(Errno::EINVAL),
        }
    }

    fn is_tty(&self) -> bool {
        true
    }

    fn stat(&self) -> Stat {
        Stat {
            st_mode: S_IFCHR | 0o666, // Character device, rw-rw-rw-
            ..Stat::default()
        }
    }
}

// ioctl request codes (termios)
const TCGETS: u32 = 0x5401; // Get termios attributes
