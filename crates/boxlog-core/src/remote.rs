//! Remote notification sink.
//!
//! The dispatcher only needs [`RemoteSink`]. [`TelegramSink`] implements it
//! over the Telegram Bot API with a blocking HTTP agent; every call is a
//! synchronous round trip on the calling thread.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use ureq::Agent;

use crate::error::RemoteError;

/// Telegram's hard limit for one text message.
pub const TELEGRAM_MAX_MESSAGE_LEN: usize = 4096;

const TELEGRAM_API: &str = "https://api.telegram.org";

const GREETING: &str = "👋 Hello from boxlog!";

/// A chat-style destination accepting bounded text messages.
pub trait RemoteSink: Send + Sync {
    /// Largest text, in chars, accepted by one [`deliver`](Self::deliver) call.
    fn max_message_len(&self) -> usize;

    /// Send one message to `recipient`.
    fn deliver(&self, recipient: i64, text: &str) -> Result<(), RemoteError>;
}

/// A sink paired with the recipient every message goes to.
#[derive(Clone)]
pub struct RemoteTarget {
    pub sink: Arc<dyn RemoteSink>,
    pub recipient: i64,
}

impl RemoteTarget {
    pub fn new(sink: Arc<dyn RemoteSink>, recipient: i64) -> Self {
        Self { sink, recipient }
    }
}

impl std::fmt::Debug for RemoteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteTarget")
            .field("recipient", &self.recipient)
            .finish_non_exhaustive()
    }
}

/// The bot account behind a token, as returned by `getMe`.
#[derive(Debug, Clone, Deserialize)]
pub struct BotUser {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API client.
pub struct TelegramSink {
    agent: Agent,
    endpoint: String,
}

impl TelegramSink {
    pub fn new(token: &str) -> Self {
        Self::with_api_base(TELEGRAM_API, token)
    }

    /// Point the client at another Bot API server.
    pub fn with_api_base(base: &str, token: &str) -> Self {
        // Telegram reports failures as JSON bodies with non-2xx statuses;
        // read them instead of turning them into transport errors.
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            endpoint: format!("{}/bot{}", base.trim_end_matches('/'), token),
        }
    }

    /// Build a client and check the token with `getMe`.
    pub fn connect(token: &str) -> Result<(Self, BotUser), RemoteError> {
        let sink = Self::new(token);
        let user = sink.get_me()?;
        tracing::debug!(bot = %user.first_name, id = user.id, "Telegram token accepted");
        Ok((sink, user))
    }

    pub fn get_me(&self) -> Result<BotUser, RemoteError> {
        self.call("getMe", &json!({}))
    }

    /// Send the greeting that proves the recipient is reachable.
    pub fn greet(&self, recipient: i64) -> Result<(), RemoteError> {
        self.deliver(recipient, GREETING)
    }

    fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<T, RemoteError> {
        let url = format!("{}/{}", self.endpoint, method);
        let mut response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send(body.to_string())
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        parse_response(&text)
    }
}

fn parse_response<T: DeserializeOwned>(text: &str) -> Result<T, RemoteError> {
    let parsed: ApiResponse<T> = serde_json::from_str(text)
        .map_err(|e| RemoteError::Transport(format!("unreadable response: {}", e)))?;

    if !parsed.ok {
        return Err(RemoteError::Rejected(
            parsed
                .description
                .unwrap_or_else(|| "no description".to_string()),
        ));
    }

    parsed
        .result
        .ok_or_else(|| RemoteError::Rejected("missing result".to_string()))
}

impl RemoteSink for TelegramSink {
    fn max_message_len(&self) -> usize {
        TELEGRAM_MAX_MESSAGE_LEN
    }

    fn deliver(&self, recipient: i64, text: &str) -> Result<(), RemoteError> {
        let len = text.chars().count();
        if len > TELEGRAM_MAX_MESSAGE_LEN {
            return Err(RemoteError::TooLong {
                len,
                max: TELEGRAM_MAX_MESSAGE_LEN,
            });
        }
        let _: serde_json::Value =
            self.call("sendMessage", &json!({ "chat_id": recipient, "text": text }))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get_me() {
        let user: BotUser = parse_response(
            r#"{"ok":true,"result":{"id":42,"is_bot":true,"first_name":"boxbot","username":"box_bot"}}"#,
        )
        .unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.username.as_deref(), Some("box_bot"));
    }

    #[test]
    fn test_parse_rejection() {
        let err = parse_response::<serde_json::Value>(
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RemoteError::Rejected(ref d) if d.contains("chat not found")));
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_response::<serde_json::Value>("<html>").unwrap_err();
        assert!(matches!(err, RemoteError::Transport(_)));
    }

    #[test]
    fn test_deliver_rejects_oversized_text_locally() {
        // Unroutable base: the length check must fail before any request.
        let sink = TelegramSink::with_api_base("http://127.0.0.1:9", "token");
        let text = "x".repeat(TELEGRAM_MAX_MESSAGE_LEN + 1);
        let err = sink.deliver(1, &text).unwrap_err();
        assert!(matches!(err, RemoteError::TooLong { len: 4097, max: 4096 }));
    }
}
