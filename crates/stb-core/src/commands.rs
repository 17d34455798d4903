//! Reply builders for the bot's fixed command surface.
//!
//! Everything here is pure: the adapter parses the update, calls a builder,
//! and sends the returned HTML. That keeps every user-visible behavior
//! testable without a Telegram connection.

use chrono::{DateTime, Local};

use crate::domain::UserId;
use crate::formatting::escape_html;
use crate::messaging::types::MenuCommand;
use crate::security::is_admin;
use crate::state::BotState;

/// Reply for `/alerts` when the caller is not an admin.
pub const ACCESS_DENIED: &str = "❌ Access Denied";

/// Reply for `/alerts` when the list is empty.
pub const NO_ALERTS: &str = "✅ No alerts at the moment. System is secure.";

/// Reply for free text mentioning security.
pub const SECURITY_NUDGE: &str =
    "🛡️ Security is our priority! Use /help for available commands.";

/// How many entries `/alerts` shows.
const RECENT_ALERTS: usize = 10;

/// Split `/cmd@botname arg1 ...` into a lowercase command name and the
/// argument text.
pub fn parse_command(text: &str) -> (String, String) {
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

/// The command menu declared to Telegram.
///
/// `logs` and `scan` are advertised but have no bound handler; invoking them
/// produces no reply.
pub fn command_menu() -> Vec<MenuCommand> {
    vec![
        MenuCommand::new("start", "Start the bot"),
        MenuCommand::new("help", "Show help message"),
        MenuCommand::new("status", "Check bot status"),
        MenuCommand::new("alerts", "View alerts (admin)"),
        MenuCommand::new("logs", "Query logs"),
        MenuCommand::new("scan", "Security scan"),
    ]
}

pub fn welcome_reply(display_name: &str) -> String {
    format!(
        "🤖 <b>Security Telegram Bot</b>\n\n\
         Hello {}! I'm your cybersecurity assistant.\n\n\
         <b>📋 Available Commands:</b>\n\
         /start - Initialize bot\n\
         /help - Show help message\n\
         /status - Check bot and server status\n\
         /alerts - View recent security alerts\n\
         /logs - Query logs (usage: /logs ssh 50)\n\
         /scan - Trigger security scan\n\
         /explain - Explain an alert\n\n\
         <b>🔐 Security First:</b>\n\
         All operations are logged and authorized users only.",
        escape_html(display_name)
    )
}

pub fn help_reply() -> String {
    "<b>Commands:</b>\n\
     • /start - Start the bot\n\
     • /status - Show bot status\n\
     • /alerts - Recent alerts (admin only)\n\
     • /logs &lt;type&gt; [count] - View logs (ssh, web, app)\n\
     • /scan &lt;target&gt; - Scan target (admin only)\n\
     • /explain &lt;id&gt; - Explain alert\n\
     • /help - This message\n\n\
     <b>Examples:</b>\n\
     <code>/logs ssh 20</code> - Last 20 SSH logs\n\
     <code>/scan 192.168.1.100</code> - Scan server"
        .to_string()
}

/// `/status`: uptime, version, live alert count, caller, wall clock.
///
/// `now` is passed in so tests can pin it.
pub fn status_reply(state: &BotState, display_name: &str, now: DateTime<Local>) -> String {
    let uptime = now.signed_duration_since(state.started_at()).num_seconds();

    let lines = vec![
        "✅ <b>Bot Status</b>\n".to_string(),
        format!("🔋 Uptime: {}", format_duration(uptime)),
        format!("🚀 Version: {}", env!("CARGO_PKG_VERSION")),
        format!("📊 Alerts: {}", state.alert_count()),
        format!("👤 User: {}", escape_html(display_name)),
        format!("⏰ Timestamp: {}", now.format("%Y-%m-%d %H:%M:%S")),
    ];

    lines.join("\n")
}

/// `/alerts`: the one admin-gated command.
///
/// Non-admins get exactly [`ACCESS_DENIED`] and nothing else happens.
pub fn alerts_reply(state: &BotState, admin_ids: &[i64], user_id: Option<UserId>) -> String {
    if !is_admin(user_id, admin_ids) {
        return ACCESS_DENIED.to_string();
    }

    let recent = state.recent_alerts(RECENT_ALERTS);
    if recent.is_empty() {
        return NO_ALERTS.to_string();
    }

    let mut out = String::from("🔴 <b>Recent Alerts:</b>\n\n");
    for alert in &recent {
        out.push_str("• ");
        out.push_str(&escape_html(alert));
        out.push('\n');
    }
    out
}

/// Free-text handler: nudge when the message mentions security, otherwise
/// nothing.
pub fn nudge_reply(text: &str) -> Option<&'static str> {
    if text.to_lowercase().contains("security") {
        return Some(SECURITY_NUDGE);
    }
    None
}

fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        return format!("{hours}h {mins}m {secs}s");
    }
    if mins > 0 {
        return format!("{mins}m {secs}s");
    }
    format!("{secs}s")
}
