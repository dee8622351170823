//! Box frame formatting.
//!
//! Everything here is pure string building. Writing the result anywhere is
//! the dispatcher's job.
//!
//! ```text
//! ┌──────────┬────────────┐
//! │ error    │ boom       │
//! ├──────────┼────────────┤
//! │          │ retry=3    │
//! └──────────┴────────────┘
//! ```

use crossterm::style::{style, Color, Stylize};

use crate::config::EngineConfig;
use crate::level::{Level, CONTEXT_LABEL};
use crate::wrap::pad;

const H: &str = "─";
const V: &str = "│";

/// What the label column of a row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelCell {
    /// The record's level label
    Level,
    /// Blank padding of the same width
    Blank,
    /// The `context` marker
    Context,
}

/// Border and row formatter for one width configuration.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    label_width: usize,
    width: usize,
}

impl Frame {
    /// Widths are taken as is; [`EngineConfig::validate`] bounds them.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            label_width: config.label_width,
            width: config.width,
        }
    }

    fn rule(&self, left: &str, mid: &str, right: &str) -> String {
        format!(
            "{}{}{}{}{}",
            left,
            H.repeat(self.label_width + 1),
            mid,
            H.repeat(self.width + 2),
            right
        )
    }

    pub fn top(&self) -> String {
        self.rule("┌", "┬", "┐")
    }

    pub fn divider(&self) -> String {
        self.rule("├", "┼", "┤")
    }

    pub fn footer(&self) -> String {
        self.rule("└", "┴", "┘")
    }

    /// Label column text, always `label_width + 1` chars wide.
    pub fn label_cell(&self, cell: LabelCell, level: Level) -> String {
        let text = match cell {
            LabelCell::Level => level.label(),
            LabelCell::Context => CONTEXT_LABEL,
            LabelCell::Blank => "",
        };
        format!(" {:<w$}", text, w = self.label_width)
    }

    /// A complete bordered row.
    pub fn row(&self, label_cell: &str, text: &str) -> String {
        format!("{}{}{}{}{}", V, label_cell, V, pad(text, self.width), V)
    }
}

/// Applies level colors to rendered lines.
#[derive(Debug, Clone, Copy)]
pub struct Painter<'a> {
    config: &'a EngineConfig,
}

impl<'a> Painter<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn paint(&self, level: Level, text: &str) -> String {
        self.paint_color(self.config.palette.color(level), text)
    }

    pub fn paint_color(&self, color: Color, text: &str) -> String {
        if self.config.color {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }
}
