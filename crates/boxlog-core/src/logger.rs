//! Top-level logger configuration and writer factory.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;

use crate::banner;
use crate::config::EngineConfig;
use crate::dispatch::{Console, Dispatch};
use crate::error::{BoxlogError, BoxlogResult, RemoteError};
use crate::field::Field;
use crate::frame::Painter;
use crate::level::Level;
use crate::record::Record;
use crate::remote::{BotUser, RemoteSink, RemoteTarget, TelegramSink};
use crate::writer::Writer;

/// Telegram bot token and the chat every `send` goes to.
#[derive(Debug, Clone)]
pub struct RemoteCredentials {
    pub token: String,
    pub recipient: i64,
}

/// Everything needed to build a [`Logger`].
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Rendered as `| ns |` in front of every line
    pub namespace: Option<String>,
    /// Print the logo on startup
    pub banner: bool,
    pub remote: Option<RemoteCredentials>,
    pub engine: EngineConfig,
    /// Where persisted writers put their files
    pub save_dir: PathBuf,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            banner: false,
            remote: None,
            engine: EngineConfig::default(),
            save_dir: PathBuf::from("."),
        }
    }
}

/// Hands out [`Writer`]s sharing one immutable configuration.
#[derive(Debug, Clone)]
pub struct Logger {
    engine: Arc<EngineConfig>,
    namespace: Option<String>,
    remote: Option<RemoteTarget>,
    save_dir: PathBuf,
}

impl Logger {
    /// Build a logger, connecting to Telegram when credentials are set.
    ///
    /// The banner (if enabled) comes first. A rejected token or unreachable
    /// chat is a configuration error: it is drawn as an error record and
    /// returned.
    pub fn new(config: LoggerConfig) -> BoxlogResult<Self> {
        Self::start(config, Box::new(io::stdout()), |creds| {
            let (sink, user) = TelegramSink::connect(&creds.token)?;
            sink.greet(creds.recipient)?;
            Ok((Arc::new(sink) as Arc<dyn RemoteSink>, user))
        })
    }

    /// Build a logger around an already connected remote target (or none).
    pub fn with_remote(config: LoggerConfig, remote: Option<RemoteTarget>) -> BoxlogResult<Self> {
        config.engine.validate()?;
        if config.banner {
            show_banner(&config.engine, &mut io::stdout())?;
        }
        Ok(Self::assemble(config, remote))
    }

    /// Validate, show the banner on `console`, then connect through `connect`.
    fn start<C>(config: LoggerConfig, mut console: Console, connect: C) -> BoxlogResult<Self>
    where
        C: FnOnce(&RemoteCredentials) -> Result<(Arc<dyn RemoteSink>, BotUser), RemoteError>,
    {
        config.engine.validate()?;
        if config.banner {
            show_banner(&config.engine, &mut console)?;
        }

        let remote = match &config.remote {
            Some(creds) => {
                let mut startup = Dispatch::new(
                    Arc::new(config.engine.clone()),
                    config.namespace.clone(),
                    console,
                    false,
                    None,
                );
                match connect(creds) {
                    Ok((sink, user)) => {
                        let who = Field::from(json!({
                            "bot": user.first_name,
                            "username": user.username,
                            "id": user.id,
                        }));
                        startup.emit(&Record::new(
                            Level::Debug,
                            [Field::from("remote sink ready"), who],
                        ))?;
                        Some(RemoteTarget::new(sink, creds.recipient))
                    }
                    Err(e) => {
                        let message = format!("remote sink unavailable: {}", e);
                        startup.report(message.clone());
                        return Err(BoxlogError::Config(message));
                    }
                }
            }
            None => None,
        };

        Ok(Self::assemble(config, remote))
    }

    fn assemble(config: LoggerConfig, remote: Option<RemoteTarget>) -> Self {
        Self {
            engine: Arc::new(config.engine),
            namespace: config.namespace,
            remote,
            save_dir: config.save_dir,
        }
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// A writer drawing to stdout.
    pub fn writer(&self, name: impl Into<String>, persist: bool) -> Writer {
        self.writer_with_console(name, persist, Box::new(io::stdout()))
    }

    /// A writer drawing to any console target.
    pub fn writer_with_console(
        &self,
        name: impl Into<String>,
        persist: bool,
        console: Console,
    ) -> Writer {
        let dispatch = Dispatch::new(
            Arc::clone(&self.engine),
            self.namespace.clone(),
            console,
            persist,
            self.remote.clone(),
        );
        Writer::open(name.into(), self.save_dir.clone(), dispatch)
    }
}

fn show_banner(engine: &EngineConfig, out: &mut dyn Write) -> BoxlogResult<()> {
    banner::show(out, &Painter::new(engine))?;
    Ok(())
}
