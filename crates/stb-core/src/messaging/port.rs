use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::MenuCommand,
    Result,
};

/// Cross-messenger port.
///
/// Telegram is the first implementation; the shape leaves room for other
/// chat transports behind the same interface.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef>;

    /// Declare the command menu to the transport (shown in the client UI).
    async fn set_command_menu(&self, menu: &[MenuCommand]) -> Result<()>;
}
