/*
 * CLUU Shell
 *
 * A minimal kernel shell on the serial console. Reads one line at a time
 * through the console line discipline and runs it:
 *
 *   help          list commands
 *   history <id>  print the command history and entry <id>
 *   top           print the process status table
 *   echo <text>   print <text>
 */

use core::fmt::Write;
use core::str::SplitWhitespace;

use crate::components::top::{ProcessTable, TopReport};
use crate::components::tty::Console;
use crate::config::INPUT_BUF_SIZE;
use crate::drivers::ByteSink;
use crate::io::Errno;
use crate::scheduler::Scheduler;

pub struct KShell<'a, U: ByteSink, S: Scheduler, P: ProcessTable + ?Sized> {
    console: &'a Console<U, S>,
    procs: &'a P,
}

impl<'a, U: ByteSink, S: Scheduler, P: ProcessTable + ?Sized> KShell<'a, U, S, P> {
    pub fn new(console: &'a Console<U, S>, procs: &'a P) -> Self {
        Self { console, procs }
    }

    /// Read and run commands until end of file.
    pub fn run(&self) -> Result<(), Errno> {
        log::info!("Shell: started");
        while self.run_once()? {}
        log::info!("Shell: end of input");
        Ok(())
    }

    /// Prompt, read one line and run it.
    ///
    /// Returns `Ok(false)` at end of file. Command failures are reported on
    /// the console and do not end the shell.
    pub fn run_once(&self) -> Result<bool, Errno> {
        self.print_prompt();

        let mut buf = [0u8; INPUT_BUF_SIZE];
        let n = self.console.read(&mut buf[..])?;
        if n == 0 {
            return Ok(false);
        }

        match core::str::from_utf8(&buf[..n]) {
            Ok(line) => {
                if let Err(err) = self.execute(line) {
                    log::debug!("Shell: {:?} failed: {}", line.trim(), err);
                }
            }
            Err(_) => self.print(format_args!("Invalid input\n")),
        }
        Ok(true)
    }

    fn print_prompt(&self) {
        self.print(format_args!("$ "));
    }

    fn print(&self, args: core::fmt::Arguments<'_>) {
        let _ = self.console.writer().write_fmt(args);
    }

    pub fn execute(&self, line: &str) -> Result<(), Errno> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");

        match command {
            "help" => {
                self.cmd_help();
                Ok(())
            }
            "history" => self.cmd_history(parts),
            "top" => self.cmd_top(),
            "echo" => {
                self.cmd_echo(parts);
                Ok(())
            }
            _ => {
                self.print(format_args!(
                    "Unknown command: {}\nType 'help' for available commands.\n",
                    command
                ));
                Err(Errno::ENOSYS)
            }
        }
    }

    fn cmd_help(&self) {
        let commands = [
            ("help", "Show this help message"),
            ("history <id>", "Show command history and entry <id>"),
            ("top", "Show process status"),
            ("echo <text>", "Echo text to console"),
        ];

        self.print(format_args!("Available commands:\n"));
        for (cmd, desc) in &commands {
            self.print(format_args!("  {} - {}\n", cmd, desc));
        }
    }

    fn cmd_history(&self, mut args: SplitWhitespace) -> Result<(), Errno> {
        let Some(id) = args.next().and_then(|arg| arg.parse::<isize>().ok()) else {
            self.print(format_args!("usage: history <id>\n"));
            return Err(Errno::EINVAL);
        };

        self.console.print_history(id).inspect_err(|err| {
            self.print(format_args!("history: {}\n", err));
        })
    }

    fn cmd_top(&self) -> Result<(), Errno> {
        let mut report = TopReport::new();
        if let Err(err) = self.procs.top(&mut report) {
            self.print(format_args!("top: {}\n", err));
            return Err(err);
        }
        self.print(format_args!("{}", report));
        Ok(())
    }

    fn cmd_echo(&self, args: SplitWhitespace) {
        let mut first = true;
        for arg in args {
            if !first {
                self.print(format_args!(" "));
            }
            self.print(format_args!("{}", arg));
            first = false;
        }
        self.print(format_args!("\n"));
    }
}
