//! Records and the row layout state machine.
//!
//! A record's fields are wrapped one after another into rows. The label
//! column carries the level label exactly once, on the very first row of the
//! record. Every later row is blank, except the first row of a carried
//! context field, which shows `context` when it is not the record's first
//! row.
//!
//! | state              | event                        | label   | next state       |
//! |--------------------|------------------------------|---------|------------------|
//! | `AwaitingFirstRow` | row                          | level   | `LabelShown`     |
//! | `LabelShown`       | first row of a context field | context | `LabelBlanked`   |
//! | `LabelShown`       | any other row                | blank   | `LabelBlanked`   |
//! | `LabelBlanked`     | first row of a context field | context | `LabelBlanked`   |
//! | `LabelBlanked`     | any other row                | blank   | `LabelBlanked`   |
//! | any                | footer                       |         | `Done`           |

use crate::error::{BoxlogError, BoxlogResult};
use crate::field::Field;
use crate::frame::{Frame, LabelCell};
use crate::level::Level;
use crate::wrap::{pad, wrap};

/// One logging call.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub level: Level,
    pub fields: Vec<Field>,
    /// Also queue the plain text for the remote sink
    pub remote: bool,
}

impl Record {
    pub fn new<I>(level: Level, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        Self {
            level,
            fields: fields.into_iter().map(Into::into).collect(),
            remote: false,
        }
    }

    /// Mark the record for remote delivery.
    pub fn remote(mut self) -> Self {
        self.remote = true;
        self
    }

    /// Printable text of every field, in order.
    pub fn texts(&self) -> BoxlogResult<Vec<FieldText>> {
        self.fields
            .iter()
            .map(|field| {
                Ok(FieldText {
                    text: field.to_text()?,
                    context: field.is_context(),
                })
            })
            .collect()
    }

    /// Lay the record out as frame lines.
    pub fn layout(&self, width: usize) -> BoxlogResult<Vec<Line>> {
        layout(&self.texts()?, width)
    }
}

/// A field after serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldText {
    pub text: String,
    pub context: bool,
}

impl FieldText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: false,
        }
    }

    pub fn context(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: true,
        }
    }
}

/// One bordered content row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: LabelCell,
    /// Unpadded chunk text
    pub text: String,
    /// Index of the field the row came from
    pub field: usize,
}

/// A physical line of a rendered record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Top,
    Row(Row),
    Divider,
    Footer,
}

impl Line {
    /// Draw the line without color.
    pub fn draw(&self, frame: &Frame, level: Level) -> String {
        match self {
            Line::Top => frame.top(),
            Line::Divider => frame.divider(),
            Line::Footer => frame.footer(),
            Line::Row(row) => frame.row(&frame.label_cell(row.label, level), &row.text),
        }
    }

    /// Label and content only, no borders, trailing blanks trimmed.
    /// `None` for border lines.
    pub fn plain(&self, frame: &Frame, level: Level, width: usize) -> Option<String> {
        match self {
            Line::Row(row) => {
                let line = format!(
                    "{}{}",
                    frame.label_cell(row.label, level),
                    pad(&row.text, width)
                );
                Some(line.trim_end().to_string())
            }
            _ => None,
        }
    }
}

/// Where the label column stands within one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    AwaitingFirstRow,
    LabelShown,
    LabelBlanked,
    Done,
}

/// Label state machine for a single record.
#[derive(Debug)]
pub struct Renderer {
    state: RenderState,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            state: RenderState::AwaitingFirstRow,
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Label for the next row, advancing the state.
    pub fn next_label(&mut self, first_row_of_field: bool, is_context: bool) -> LabelCell {
        match self.state {
            RenderState::AwaitingFirstRow => {
                self.state = RenderState::LabelShown;
                LabelCell::Level
            }
            RenderState::LabelShown | RenderState::LabelBlanked => {
                self.state = RenderState::LabelBlanked;
                if first_row_of_field && is_context {
                    LabelCell::Context
                } else {
                    LabelCell::Blank
                }
            }
            RenderState::Done => {
                debug_assert!(false, "row requested after the footer");
                LabelCell::Blank
            }
        }
    }

    pub fn finish(&mut self) {
        self.state = RenderState::Done;
    }
}

/// Lay out already-serialized fields as frame lines: one top border, the
/// rows of each field with a divider between fields, one footer.
pub fn layout(fields: &[FieldText], width: usize) -> BoxlogResult<Vec<Line>> {
    if fields.is_empty() {
        return Err(BoxlogError::EmptyRecord);
    }

    let mut renderer = Renderer::new();
    let mut lines = vec![Line::Top];

    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            lines.push(Line::Divider);
        }
        for (n, chunk) in wrap(&field.text, width).enumerate() {
            let label = renderer.next_label(n == 0, field.context);
            lines.push(Line::Row(Row {
                label,
                text: chunk.text.to_string(),
                field: index,
            }));
        }
    }

    lines.push(Line::Footer);
    renderer.finish();
    Ok(lines)
}
