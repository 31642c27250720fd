// Shared fixtures for workflow tests: a console that replays canned
// answers and records every line printed.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;

use secrecy::SecretString;
use wiremock::MockServer;

use smbulk_core::{Console, SessionConfig};

#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    fn next_answer(&mut self, message: &str) -> io::Result<String> {
        self.prompts.push(message.to_owned());
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no scripted answer for {message:?}"),
            )
        })
    }

    pub fn printed(&self, line: &str) -> bool {
        self.output.iter().any(|l| l == line)
    }

    pub fn printed_containing(&self, needle: &str) -> bool {
        self.output.iter().any(|l| l.contains(needle))
    }

    pub fn unanswered(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn prompt(&mut self, message: &str) -> io::Result<String> {
        self.next_answer(message)
    }

    fn prompt_secret(&mut self, message: &str) -> io::Result<SecretString> {
        self.next_answer(message).map(SecretString::from)
    }

    fn say(&mut self, line: &str) {
        self.output.push(line.to_owned());
    }
}

/// Session settings pointing at a mock server with the username pre-filled.
pub fn config_for(server: &MockServer) -> SessionConfig {
    SessionConfig {
        host: Some(server.uri()),
        username: Some("admin".into()),
        ..SessionConfig::default()
    }
}

pub fn api(suffix: &str) -> String {
    format!("/securitymanager/api/{suffix}")
}
