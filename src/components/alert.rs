//! Transient notifications. Errors and warnings go to stderr, everything else
//! to stdout.

use colored::Colorize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: AlertKind,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Warning, message)
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Info, message)
    }

    /// Prints the notice on the stream matching its kind.
    pub fn emit(&self) {
        match self.kind {
            AlertKind::Success | AlertKind::Info => println!("{self}"),
            AlertKind::Error | AlertKind::Warning => eprintln!("{self}"),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.kind {
            AlertKind::Success => "✓".green().bold(),
            AlertKind::Error => "✗".red().bold(),
            AlertKind::Warning => "⚠".yellow().bold(),
            AlertKind::Info => "ℹ".blue().bold(),
        };
        write!(f, "{icon} {}", self.message)
    }
}
