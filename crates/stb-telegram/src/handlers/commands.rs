use chrono::Local;
use tracing::{debug, info};

use stb_core::{
    audit::AuditEvent,
    commands::{alerts_reply, help_reply, parse_command, status_reply, welcome_reply},
    messaging::types::IncomingMessage,
    security::is_admin,
};

use crate::router::AppState;

use super::send_html_split;

pub async fn handle_command(state: &AppState, msg: IncomingMessage) {
    let (cmd, _arg) = parse_command(&msg.text);

    let _ = state
        .audit
        .write(AuditEvent::command(msg.user_id.0, &msg.display_name, &cmd));

    match cmd.as_str() {
        "start" => {
            info!("user {} started bot", msg.user_id.0);
            send_html_split(state, msg.chat_id, &welcome_reply(&msg.display_name)).await;
        }

        "help" => {
            send_html_split(state, msg.chat_id, &help_reply()).await;
        }

        "status" => {
            info!("status check by {}", msg.user_id.0);
            let reply = status_reply(&state.bot_state, &msg.display_name, Local::now());
            send_html_split(state, msg.chat_id, &reply).await;
        }

        "alerts" => {
            let authorized = is_admin(Some(msg.user_id), &state.cfg.admin_ids);
            let _ = state.audit.write(AuditEvent::auth(
                msg.user_id.0,
                &msg.display_name,
                &cmd,
                authorized,
            ));
            if authorized {
                info!("alerts viewed by admin {}", msg.user_id.0);
            }

            let reply = alerts_reply(&state.bot_state, &state.cfg.admin_ids, Some(msg.user_id));
            send_html_split(state, msg.chat_id, &reply).await;
        }

        // Advertised in the menu and help text but not implemented.
        "logs" | "scan" | "explain" => {
            debug!("unimplemented command /{cmd} from {}", msg.user_id.0);
        }

        _ => {
            debug!("unknown command /{cmd} from {}", msg.user_id.0);
        }
    }
}
