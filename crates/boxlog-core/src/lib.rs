//! boxlog core library
//!
//! Renders log records as fixed-width, box-bordered, color-coded blocks on
//! the console, optionally keeps a copy for a file and forwards a plain-text
//! copy to a chat-based notification sink.
//!
//! ## Overview
//!
//! ```text
//! Writer ──► Record ──► wrap ──► Frame ──► Dispatch ─┬─► console
//!   ▲                                                ├─► file buffer (on close)
//!   └── Scope (carried context)                      └─► remote sink (chunked)
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use boxlog_core::{Logger, LoggerConfig, Scope};
//!
//! fn main() -> Result<(), boxlog_core::BoxlogError> {
//!     let logger = Logger::new(LoggerConfig::default())?;
//!
//!     let scope = Scope::new().attach(["req=42"]).attach(["user=7"]);
//!
//!     let mut w = logger.writer("repository.create", true);
//!     w.from_scope(&scope);
//!     w.info(["creating record"])?;
//!     w.error(["boom", "retry=3"])?;
//!     if let Some(path) = w.close() {
//!         println!("saved to {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod banner;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod field;
pub mod frame;
pub mod level;
pub mod logger;
pub mod persist;
pub mod record;
pub mod remote;
pub mod wrap;
pub mod writer;

// Re-exports
pub use config::{EngineConfig, Features, Palette};
pub use context::{Scope, NOT_FOUND};
pub use dispatch::{chunk_payload, Console, Dispatch};
pub use error::{BoxlogError, BoxlogResult, RemoteError};
pub use field::Field;
pub use frame::{Frame, LabelCell, Painter};
pub use level::Level;
pub use logger::{Logger, LoggerConfig, RemoteCredentials};
pub use record::{layout, FieldText, Line, Record, RenderState, Renderer, Row};
pub use remote::{BotUser, RemoteSink, RemoteTarget, TelegramSink};
pub use wrap::{wrap, Break, Chunk};
pub use writer::Writer;
