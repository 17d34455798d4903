//! Telegram update handlers.
//!
//! Each handler builds the transport-agnostic `IncomingMessage`, asks the
//! core command layer for the reply text, and sends it through the
//! messaging port.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::warn;

use stb_core::{
    domain::{ChatId, UserId},
    messaging::types::IncomingMessage,
};

use crate::router::AppState;

mod commands;
mod text;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(raw) = msg.text() else {
        return Ok(());
    };

    let incoming = IncomingMessage {
        chat_id: ChatId(msg.chat.id.0),
        user_id: UserId(user.id.0 as i64),
        display_name: user.first_name.clone(),
        text: raw.to_string(),
    };

    if incoming.text.starts_with('/') {
        commands::handle_command(&state, incoming).await;
    } else {
        text::handle_text(&state, incoming).await;
    }

    Ok(())
}

/// Send one reply, splitting below Telegram's 4096 char limit.
async fn send_html_split(state: &AppState, chat_id: ChatId, html: &str) {
    let limit = state.cfg.telegram_safe_limit.max(200);
    for chunk in split_message(html, limit) {
        if let Err(e) = state.messenger.send_html(chat_id, &chunk).await {
            warn!("send failed: {e}");
        }
    }
}

/// Split long text, preferring newline or space boundaries and walking back
/// to a valid UTF-8 char boundary so slicing doesn't panic.
fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + max_len).min(text.len());
        while end > start && !text.is_char_boundary(end) {
            end -= 1;
        }
        let actual_end = if end < text.len() {
            text[start..end]
                .rfind('\n')
                .or_else(|| text[start..end].rfind(' '))
                .map(|pos| start + pos + 1)
                .unwrap_or(end)
        } else {
            end
        };

        chunks.push(text[start..actual_end].to_string());
        start = actual_end;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use stb_core::{
        audit::AuditLogger,
        commands::{ACCESS_DENIED, SECURITY_NUDGE},
        config::Config,
        domain::{MessageId, MessageRef},
        messaging::{port::MessagingPort, types::MenuCommand},
        state::BotState,
        Result,
    };

    struct RecordingMessenger {
        sent: Mutex<Vec<(i64, String)>>,
    }

    #[async_trait]
    impl MessagingPort for RecordingMessenger {
        async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef> {
            self.sent
                .lock()
                .unwrap()
                .push((chat_id.0, html.to_string()));
            Ok(MessageRef {
                chat_id,
                message_id: MessageId(1),
            })
        }

        async fn set_command_menu(&self, _menu: &[MenuCommand]) -> Result<()> {
            Ok(())
        }
    }

    fn test_state(admin_ids: Vec<i64>) -> (Arc<AppState>, Arc<RecordingMessenger>) {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let audit_path = PathBuf::from(format!("/tmp/stb-handlers-{}-{ts}.log", std::process::id()));

        let messenger = Arc::new(RecordingMessenger {
            sent: Mutex::new(Vec::new()),
        });
        let state = Arc::new(AppState {
            cfg: Arc::new(Config {
                bot_token: "test-token".to_string(),
                admin_ids,
                audit_log_path: audit_path.clone(),
                audit_log_json: true,
                telegram_safe_limit: 4000,
            }),
            bot_state: Arc::new(BotState::new()),
            messenger: messenger.clone(),
            audit: Arc::new(AuditLogger::new(audit_path, true)),
        });
        (state, messenger)
    }

    fn incoming(user_id: i64, text: &str) -> IncomingMessage {
        IncomingMessage {
            chat_id: ChatId(10),
            user_id: UserId(user_id),
            display_name: "Ana".to_string(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn advertised_but_unbound_commands_stay_silent() {
        let (state, messenger) = test_state(vec![111]);
        for cmd in ["/logs ssh 20", "/scan 10.0.0.1", "/explain 7", "/bogus"] {
            commands::handle_command(&state, incoming(111, cmd)).await;
        }
        assert!(messenger.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_admin_alerts_sends_exactly_the_denial() {
        let (state, messenger) = test_state(vec![111]);
        state.bot_state.record_alert("intrusion attempt");

        commands::handle_command(&state, incoming(222, "/alerts")).await;

        let sent = messenger.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, ACCESS_DENIED);
        assert_eq!(state.bot_state.alert_count(), 1);
    }

    #[tokio::test]
    async fn admin_alerts_sends_the_listing() {
        let (state, messenger) = test_state(vec![111]);
        state.bot_state.record_alert("a");
        state.bot_state.record_alert("b");

        commands::handle_command(&state, incoming(111, "/alerts")).await;

        let sent = messenger.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.contains("• a"));
        assert!(sent[0].1.contains("• b"));
        assert!(!sent[0].1.contains(ACCESS_DENIED));
    }

    #[tokio::test]
    async fn free_text_replies_only_on_the_trigger() {
        let (state, messenger) = test_state(vec![111]);

        text::handle_text(&state, incoming(5, "good morning")).await;
        assert!(messenger.sent.lock().unwrap().is_empty());

        text::handle_text(&state, incoming(5, "is security important?")).await;
        let sent = messenger.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, SECURITY_NUDGE);
    }

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_message("hello", 100), vec!["hello"]);
    }

    #[test]
    fn long_text_splits_under_limit() {
        let text = "word ".repeat(100);
        let chunks = split_message(&text, 64);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.len() <= 64));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn prefers_newline_boundaries() {
        let text = format!("{}\n{}", "a".repeat(40), "b".repeat(40));
        let chunks = split_message(&text, 50);
        assert_eq!(chunks[0], format!("{}\n", "a".repeat(40)));
    }

    #[test]
    fn never_splits_inside_a_code_point() {
        let text = "🛡️".repeat(200);
        let chunks = split_message(&text, 64);
        assert!(chunks.iter().all(|c| c.len() <= 64));
        assert_eq!(chunks.concat(), text);
    }
}
