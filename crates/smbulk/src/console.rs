//! Terminal implementation of the workflow console.
//!
//! On a TTY prompts go through dialoguer and rpassword. With piped stdin
//! both fall back to plain line reads, so the workflow can be scripted.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Input;
use owo_colors::OwoColorize;
use secrecy::SecretString;

use smbulk_core::Console;

pub struct TerminalConsole {
    interactive: bool,
    color: bool,
}

impl TerminalConsole {
    pub fn new(color: bool) -> Self {
        Self {
            interactive: io::stdin().is_terminal() && io::stdout().is_terminal(),
            color,
        }
    }

    fn read_line(message: &str) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{message}: ")?;
        stdout.flush()?;
        drop(stdout);

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed while waiting for input",
            ));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

impl Console for TerminalConsole {
    fn prompt(&mut self, message: &str) -> io::Result<String> {
        if !self.interactive {
            return Self::read_line(message);
        }
        Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| io::Error::other(e.to_string()))
    }

    fn prompt_secret(&mut self, message: &str) -> io::Result<SecretString> {
        let raw = if self.interactive {
            rpassword::prompt_password(format!("{message}: "))?
        } else {
            Self::read_line(message)?
        };
        Ok(SecretString::from(raw))
    }

    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn success(&mut self, line: &str) {
        if self.color {
            println!("{}", line.green());
        } else {
            println!("{line}");
        }
    }

    fn failure(&mut self, line: &str) {
        if self.color {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }

    fn warn(&mut self, line: &str) {
        if self.color {
            println!("{}", line.yellow());
        } else {
            println!("{line}");
        }
    }
}
