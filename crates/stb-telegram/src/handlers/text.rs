use tracing::info;

use stb_core::{audit::AuditEvent, commands::nudge_reply, messaging::types::IncomingMessage};

use crate::router::AppState;

use super::send_html_split;

pub async fn handle_text(state: &AppState, msg: IncomingMessage) {
    if msg.text.trim().is_empty() {
        return;
    }

    let preview: String = msg.text.chars().take(50).collect();
    info!("message from {}: {preview}", msg.user_id.0);

    let reply = nudge_reply(&msg.text);
    let _ = state.audit.write(AuditEvent::message(
        msg.user_id.0,
        &msg.display_name,
        &msg.text,
        reply,
    ));

    if let Some(reply) = reply {
        send_html_split(state, msg.chat_id, reply).await;
    }
}
