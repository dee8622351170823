//! Record levels, their display labels and default colors.

use std::fmt;
use std::str::FromStr;

use crossterm::style::Color;
use serde::Deserialize;

use crate::error::BoxlogError;

/// Label shown on the first row of carried context.
pub const CONTEXT_LABEL: &str = "context";

/// The fixed set of record levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Error,
    Message,
    Success,
    Debug,
    Warning,
    Data,
    /// Raw notification, the level used for records forwarded to the remote sink
    Notify,
}

impl Level {
    pub const ALL: [Level; 8] = [
        Level::Info,
        Level::Error,
        Level::Message,
        Level::Success,
        Level::Debug,
        Level::Warning,
        Level::Data,
        Level::Notify,
    ];

    /// Text shown in the label column on the first row of a record.
    pub fn label(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Error => "error",
            Level::Message => "message",
            Level::Success => "success",
            Level::Debug => "debug",
            Level::Warning => "warning",
            Level::Data => "data",
            Level::Notify => "notify",
        }
    }

    /// Chars needed by the widest label, the context marker included.
    pub fn longest_label() -> usize {
        Level::ALL
            .iter()
            .map(|l| l.label().chars().count())
            .chain(std::iter::once(CONTEXT_LABEL.chars().count()))
            .max()
            .unwrap_or(0)
    }

    pub fn default_color(self) -> Color {
        match self {
            Level::Info | Level::Warning => Color::Yellow,
            Level::Error => Color::Red,
            Level::Message => Color::White,
            Level::Success => Color::Green,
            Level::Debug => Color::Cyan,
            Level::Data => Color::Magenta,
            Level::Notify => Color::Blue,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = BoxlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Level::Info),
            "error" => Ok(Level::Error),
            "message" | "msg" => Ok(Level::Message),
            "success" | "succes" => Ok(Level::Success),
            "debug" => Ok(Level::Debug),
            "warning" | "warn" => Ok(Level::Warning),
            "data" => Ok(Level::Data),
            "notify" | "bot" => Ok(Level::Notify),
            other => Err(BoxlogError::Config(format!("unknown level '{}'", other))),
        }
    }
}
