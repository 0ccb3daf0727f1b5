/*
 * Kernel Logging System
 *
 * `log` backend for the console kernel. Records are printed as
 * `[LEVEL] message` lines on a byte sink, normally the debug serial port
 * (COM2), so they never mix with the console the user types on.
 *
 * The sink is registered once by `init`. Records logged before that are
 * dropped.
 */

use core::fmt::{self, Write};

use log::{LevelFilter, Metadata, Record, SetLoggerError};
use spin::Once;

use crate::drivers::ByteSink;
use crate::utils::writer::SinkWriter;

struct ConsoleLogger {
    sink: Once<&'static dyn ByteSink>,
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(sink) = self.sink.get() {
            let _ = write_record(&mut SinkWriter::new(*sink), record);
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger { sink: Once::new() };

/// Formats one record the way the kernel prints it.
fn write_record(out: &mut dyn Write, record: &Record) -> fmt::Result {
    writeln!(out, "[{}] {}", record.level(), record.args())
}

/// Installs the kernel logger, printing to `sink` from now on.
///
/// Fails if a logger is already installed.
pub fn init(sink: &'static dyn ByteSink, level: LevelFilter) -> Result<(), SetLoggerError> {
    LOGGER.sink.call_once(|| sink);
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    log::info!("Logger initialized correctly");
    Ok(())
}
