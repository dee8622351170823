//! Writers: one per logical unit of work.
//!
//! A writer announces itself with a START line, draws every record it is
//! given, and on close persists its buffer (if asked to) and prints an END
//! line. Dropping a writer closes it, so the buffer is written on every exit
//! path, early returns and `?` included.

use std::path::PathBuf;

use crossterm::style::Color;

use crate::context::Scope;
use crate::dispatch::Dispatch;
use crate::error::{BoxlogError, BoxlogResult};
use crate::field::Field;
use crate::frame::Painter;
use crate::level::Level;
use crate::persist::persist;
use crate::record::Record;

/// Column budget the START/END name is centered in.
const BANNER_WIDTH: usize = 90;

/// Records for one named unit of work.
pub struct Writer {
    name: String,
    save_dir: PathBuf,
    context: Option<String>,
    dispatch: Dispatch,
    closed: bool,
}

impl Writer {
    pub(crate) fn open(name: String, save_dir: PathBuf, dispatch: Dispatch) -> Self {
        let mut writer = Self {
            name,
            save_dir,
            context: None,
            dispatch,
            closed: false,
        };
        writer.announce(true);
        writer
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The carried context appended to every later record, if any.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Carry `scope`'s context into every later record.
    ///
    /// An empty scope still attaches the not-found marker. Calling this
    /// again adds to the carried text.
    pub fn from_scope(&mut self, scope: &Scope) -> &mut Self {
        if !self.dispatch.config().features.context {
            tracing::debug!(writer = %self.name, "context disabled, scope ignored");
            return self;
        }
        let value = scope.read();
        self.context = Some(match self.context.take() {
            Some(prior) => format!("{}, {}", prior, value),
            None => value,
        });
        self
    }

    /// Draw a record, with the carried context as its trailing field.
    pub fn emit(&mut self, mut record: Record) -> BoxlogResult<()> {
        if record.fields.is_empty() {
            return Err(BoxlogError::EmptyRecord);
        }
        if let Some(context) = &self.context {
            record.fields.push(Field::Context(context.clone()));
        }
        self.dispatch.emit(&record)
    }

    fn level<I>(&mut self, level: Level, fields: I) -> BoxlogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        self.emit(Record::new(level, fields))
    }

    /// Yellow.
    pub fn info<I>(&mut self, fields: I) -> BoxlogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        self.level(Level::Info, fields)
    }

    /// Red.
    pub fn error<I>(&mut self, fields: I) -> BoxlogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        self.level(Level::Error, fields)
    }

    /// White.
    pub fn message<I>(&mut self, fields: I) -> BoxlogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        self.level(Level::Message, fields)
    }

    /// Same as [`message`](Self::message).
    pub fn write<I>(&mut self, fields: I) -> BoxlogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        self.level(Level::Message, fields)
    }

    /// Green.
    pub fn success<I>(&mut self, fields: I) -> BoxlogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        self.level(Level::Success, fields)
    }

    /// Cyan.
    pub fn debug<I>(&mut self, fields: I) -> BoxlogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        self.level(Level::Debug, fields)
    }

    /// Yellow.
    pub fn warning<I>(&mut self, fields: I) -> BoxlogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        self.level(Level::Warning, fields)
    }

    /// Magenta.
    pub fn data<I>(&mut self, fields: I) -> BoxlogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        self.level(Level::Data, fields)
    }

    /// Blue, and forwarded as plain text to the remote sink.
    pub fn send<I>(&mut self, fields: I) -> BoxlogResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        self.emit(Record::new(Level::Notify, fields).remote())
    }

    /// Persist the buffer (if enabled) and print the END line.
    ///
    /// Returns the file written, if any. A persistence failure is drawn as an
    /// error record and does not stop the close.
    pub fn close(mut self) -> Option<PathBuf> {
        self.finish()
    }

    fn finish(&mut self) -> Option<PathBuf> {
        if self.closed {
            return None;
        }
        self.closed = true;

        let mut written = None;
        if let Some(buffer) = self.dispatch.take_buffer() {
            match persist(&self.save_dir, &self.name, &buffer) {
                Ok(path) => {
                    tracing::debug!(writer = %self.name, path = %path.display(), "persisted");
                    written = Some(path);
                }
                Err(e) => {
                    tracing::warn!(writer = %self.name, error = %e, "persistence failed");
                    self.dispatch.report(format!("persistence failed: {}", e));
                }
            }
        }

        self.announce(false);
        written
    }

    fn announce(&mut self, start: bool) {
        let config = self.dispatch.config().clone();
        let painter = Painter::new(&config);
        let action = if start {
            painter.paint_color(Color::Green, ":: START ::")
        } else {
            painter.paint_color(Color::Red, "::  END  ::")
        };
        let title = painter.paint_color(
            Color::Magenta,
            &format!("---> {} <---", centered_name(&self.name)),
        );
        self.dispatch
            .write_line(&format!("{} {}", action, title), false);
        self.dispatch.flush_console();
    }
}

impl Drop for Writer {
    fn drop(&mut self) {
        self.finish();
    }
}

fn centered_name(name: &str) -> String {
    let mut pad = BANNER_WIDTH.saturating_sub(name.chars().count()) / 2;
    if pad % 2 != 0 {
        pad += 1;
    }
    format!("{0}{1}{0}", " ".repeat(pad), name)
}
