//! JSON envelopes written for every command.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::io::{self, Write};
use std::process::ExitCode;
use taskboard::shared::ErrorKind;

/// Rejected or failed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: ErrorKind, message: impl fmt::Display) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }
}

/// Result of dispatching one command.
pub type Outcome = Result<Value, Failure>;

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Envelope<'a> {
    Success { data: &'a Value },
    Fail { kind: ErrorKind, message: &'a str },
    Error { kind: ErrorKind, message: &'a str },
}

impl<'a> From<&'a Outcome> for Envelope<'a> {
    fn from(outcome: &'a Outcome) -> Self {
        match outcome {
            Ok(data) => Self::Success { data },
            Err(failure) if failure.kind.is_client_error() => Self::Fail {
                kind: failure.kind,
                message: &failure.message,
            },
            Err(failure) => Self::Error {
                kind: failure.kind,
                message: &failure.message,
            },
        }
    }
}

/// Writes the envelope for `outcome` as one line of JSON.
pub fn write_envelope(writer: &mut impl Write, outcome: &Outcome) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, &Envelope::from(outcome))?;
    writeln!(writer)
}

/// Maps an outcome to the process exit status.
pub fn exit_code(outcome: &Outcome) -> ExitCode {
    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(failure) if failure.kind.is_client_error() => ExitCode::from(1),
        Err(_) => ExitCode::from(2),
    }
}
