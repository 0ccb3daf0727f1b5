/*
 * Process Status Report
 *
 * Snapshot of the process table handed out by the `top` query: uptime,
 * process counts and one row per used slot. The scheduler fills it through
 * the `ProcessTable` trait; the console never looks inside.
 */

use core::fmt;

use heapless::{String, Vec};

use crate::config::{NPROC, PROC_NAME_MAX};
use crate::io::Errno;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProcState {
    #[default]
    Unused,
    Used,
    Sleeping,
    Runnable,
    Running,
    Zombie,
}

impl ProcState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcState::Unused => "UNUSED",
            ProcState::Used => "USED",
            ProcState::Sleeping => "SLEEPING",
            ProcState::Runnable => "RUNNABLE",
            ProcState::Running => "RUNNING",
            ProcState::Zombie => "ZOMBIE",
        }
    }
}

impl fmt::Display for ProcState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcEntry {
    pub name: String<PROC_NAME_MAX>,
    pub pid: u32,
    pub ppid: u32,
    pub state: ProcState,
}

impl ProcEntry {
    /// Names longer than `PROC_NAME_MAX` bytes are cut short.
    pub fn new(name: &str, pid: u32, ppid: u32, state: ProcState) -> Self {
        let mut short = String::new();
        for ch in name.chars() {
            if short.push(ch).is_err() {
                break;
            }
        }
        Self {
            name: short,
            pid,
            ppid,
            state,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TopReport {
    pub uptime_secs: u64,
    pub total: usize,
    pub running: usize,
    pub sleeping: usize,
    pub entries: Vec<ProcEntry, NPROC>,
}

impl TopReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a process and count it.
    ///
    /// Unused slots are not recorded.
    pub fn record(&mut self, entry: ProcEntry) -> Result<(), Errno> {
        let state = entry.state;
        if state == ProcState::Unused {
            return Ok(());
        }
        self.entries.push(entry).map_err(|_| Errno::EINVAL)?;
        self.total += 1;
        match state {
            ProcState::Running => self.running += 1,
            ProcState::Sleeping => self.sleeping += 1,
            _ => {}
        }
        Ok(())
    }
}

impl fmt::Display for TopReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "uptime : {} seconds", self.uptime_secs)?;
        writeln!(f, "total process : {}", self.total)?;
        writeln!(f, "running process : {}", self.running)?;
        writeln!(f, "sleeping process : {}", self.sleeping)?;
        writeln!(f, "process data : ")?;
        writeln!(f, "name        PID        PPID        state")?;
        for entry in self.entries.iter() {
            if entry.state == ProcState::Unused {
                break;
            }
            writeln!(
                f,
                "{}        {}        {}        {}",
                entry.name, entry.pid, entry.ppid, entry.state
            )?;
        }
        Ok(())
    }
}

/// Source of process status, implemented by the scheduler.
pub trait ProcessTable: Sync {
    fn top(&self, report: &mut TopReport) -> Result<(), Errno>;
}

impl<P: ProcessTable + ?Sized> ProcessTable for &P {
    fn top(&self, report: &mut TopReport) -> Result<(), Errno> {
        (**self).top(report)
    }
}
