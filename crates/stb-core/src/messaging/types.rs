use crate::domain::{ChatId, UserId};

/// Transport-supplied view of one inbound text message.
///
/// Built by the adapter; the command layer only reads it.
#[derive(Clone, Debug)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub display_name: String,
    pub text: String,
}

/// One entry of the command menu declared to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuCommand {
    pub command: String,
    pub description: String,
}

impl MenuCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}
