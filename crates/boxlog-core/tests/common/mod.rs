//! Shared test fixtures: an in-memory console and scripted remote sinks.

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use boxlog_core::{
    EngineConfig, Logger, LoggerConfig, RemoteError, RemoteSink, RemoteTarget,
};

/// Console target whose output can be read back after the writer is gone.
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// Only the lines that belong to a box.
    pub fn box_lines(&self) -> Vec<String> {
        self.text()
            .lines()
            .filter(|l| l.starts_with(['┌', '│', '├', '└']))
            .map(str::to_string)
            .collect()
    }

    pub fn console(&self) -> boxlog_core::Console {
        Box::new(self.clone())
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Remote sink that records every message, failing the ones listed.
#[derive(Default)]
pub struct RecordingSink {
    pub max_len: usize,
    pub fail_calls: Vec<usize>,
    pub messages: Mutex<Vec<(i64, String)>>,
    calls: Mutex<usize>,
}

impl RecordingSink {
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len,
            ..Self::default()
        }
    }

    pub fn failing_on(max_len: usize, fail_calls: Vec<usize>) -> Self {
        Self {
            max_len,
            fail_calls,
            ..Self::default()
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .map(|(_, t)| t.clone())
            .collect()
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl RemoteSink for RecordingSink {
    fn max_message_len(&self) -> usize {
        self.max_len
    }

    fn deliver(&self, recipient: i64, text: &str) -> Result<(), RemoteError> {
        let mut calls = self.calls.lock().unwrap();
        let index = *calls;
        *calls += 1;

        assert!(text.chars().count() <= self.max_len, "oversized message");
        if self.fail_calls.contains(&index) {
            return Err(RemoteError::Rejected(format!("call {} refused", index)));
        }
        self.messages
            .lock()
            .unwrap()
            .push((recipient, text.to_string()));
        Ok(())
    }
}

/// Plain (uncolored, untimestamped) engine at the given width.
pub fn plain_engine(width: usize) -> EngineConfig {
    EngineConfig::default().with_width(width).plain()
}

pub fn logger(engine: EngineConfig) -> Logger {
    Logger::with_remote(
        LoggerConfig {
            engine,
            ..LoggerConfig::default()
        },
        None,
    )
    .unwrap()
}

pub fn logger_with_sink(engine: EngineConfig, sink: Arc<RecordingSink>) -> Logger {
    Logger::with_remote(
        LoggerConfig {
            engine,
            ..LoggerConfig::default()
        },
        Some(RemoteTarget::new(sink, 1234)),
    )
    .unwrap()
}
