//! Fan-out of rendered records.
//!
//! Every line goes to the console. When the writer persists, the same line is
//! appended to an in-memory buffer that is written out on close. Records
//! flagged for remote delivery also build a plain-text payload (labels and
//! content, no borders, no colors) that is sliced and sent after the record
//! is drawn. All of it happens inline on the calling thread.

use std::io::Write;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::{BoxlogResult, RemoteError};
use crate::frame::{Frame, Painter};
use crate::level::Level;
use crate::record::Record;
use crate::remote::RemoteTarget;

/// Live console destination.
pub type Console = Box<dyn Write + Send>;

/// Split `text` into consecutive slices of at most `ceiling` chars.
///
/// Concatenating the slices gives back `text`; an empty text gives no slices.
pub fn chunk_payload(text: &str, ceiling: usize) -> Vec<&str> {
    let ceiling = ceiling.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let cut = rest
            .char_indices()
            .nth(ceiling)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        chunks.push(&rest[..cut]);
        rest = &rest[cut..];
    }
    chunks
}

/// The destinations of one writer.
pub struct Dispatch {
    config: Arc<EngineConfig>,
    namespace: Option<String>,
    console: Console,
    file: Option<String>,
    remote: Option<RemoteTarget>,
}

impl Dispatch {
    pub fn new(
        config: Arc<EngineConfig>,
        namespace: Option<String>,
        console: Console,
        persist: bool,
        remote: Option<RemoteTarget>,
    ) -> Self {
        Self {
            config,
            namespace,
            console,
            file: persist.then(String::new),
            remote,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Draw a record to every active destination.
    ///
    /// Layout and serialization run before anything is written, so a failing
    /// record leaves no partial box behind.
    pub fn emit(&mut self, record: &Record) -> BoxlogResult<()> {
        let config = Arc::clone(&self.config);
        let lines = record.layout(config.width)?;
        let frame = Frame::new(&config);
        let painter = Painter::new(&config);

        let mut payload: Vec<String> = Vec::new();
        for line in &lines {
            let drawn = line.draw(&frame, record.level);
            self.write_line(&painter.paint(record.level, &drawn), true);
            if record.remote {
                if let Some(plain) = line.plain(&frame, record.level, config.width) {
                    payload.push(plain);
                }
            }
        }
        self.flush_console();

        if record.remote {
            if config.features.remote {
                self.deliver(&payload.join("\n"));
            } else {
                tracing::debug!("remote delivery disabled, payload dropped");
            }
        }

        Ok(())
    }

    /// Write one already-drawn line with the timestamp and namespace prefix.
    pub fn write_line(&mut self, text: &str, to_file: bool) {
        let line = format!("{}{}\n", self.prefix(), text);

        if let Err(e) = self.console.write_all(line.as_bytes()) {
            tracing::warn!(error = %e, "console write failed");
        }
        if to_file {
            if let Some(buffer) = self.file.as_mut() {
                buffer.push_str(&line);
            }
        }
    }

    pub fn flush_console(&mut self) {
        if let Err(e) = self.console.flush() {
            tracing::warn!(error = %e, "console flush failed");
        }
    }

    fn prefix(&self) -> String {
        let mut prefix = String::new();
        if self.config.timestamps {
            let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            prefix.push_str(&format!("[{}] ", now));
        }
        if let Some(ns) = &self.namespace {
            let painter = Painter::new(&self.config);
            prefix.push_str(&painter.paint(Level::Message, &format!("| {} |", ns)));
            prefix.push(' ');
        }
        prefix
    }

    /// Take the accumulated file buffer, leaving persistence off.
    pub fn take_buffer(&mut self) -> Option<String> {
        self.file.take()
    }

    fn deliver(&mut self, payload: &str) {
        let Some(target) = self.remote.clone() else {
            self.report(format!(
                "remote delivery failed: {}",
                RemoteError::Transport("no remote sink configured".into())
            ));
            return;
        };

        let ceiling = self
            .config
            .chunk_ceiling
            .min(target.sink.max_message_len());

        for (index, chunk) in chunk_payload(payload, ceiling).into_iter().enumerate() {
            tracing::debug!(
                recipient = target.recipient,
                index,
                len = chunk.chars().count(),
                "delivering remote chunk"
            );
            if let Err(e) = target.sink.deliver(target.recipient, chunk) {
                self.report(format!("remote delivery failed: {}", e));
            }
        }
    }

    /// Draw a local error record. Never forwarded to the remote sink.
    pub fn report(&mut self, message: String) {
        let record = Record::new(Level::Error, [message]);
        if let Err(e) = self.emit(&record) {
            tracing::warn!(error = %e, "could not report failure");
        }
    }
}
