//! Identities plus the two message enums that cross component boundaries:
//! events published by the message store, and intents sent to the dispatcher.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChatId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i64);

/// Identifies one message row: the chat it lives in and its id within that chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageKey {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

impl MessageKey {
    pub fn new(chat_id: i64, message_id: i64) -> Self {
        Self {
            chat_id: ChatId(chat_id),
            message_id: MessageId(message_id),
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "chat_id={}_message_id={}",
            self.chat_id.0, self.message_id.0
        )
    }
}

/// Events published by the message store to its subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Message text or content was edited
    MessageEdited { key: MessageKey },
    /// Interaction info (view counter) changed
    ViewCountChanged { key: MessageKey },
    /// A message entered or left the selection set
    SelectionChanged { key: MessageKey, selected: bool },
    /// The whole selection set was emptied
    SelectionCleared,
}

impl StoreEvent {
    /// Key of the message this event concerns, `None` for broadcasts.
    pub fn key(&self) -> Option<MessageKey> {
        match self {
            StoreEvent::MessageEdited { key }
            | StoreEvent::ViewCountChanged { key }
            | StoreEvent::SelectionChanged { key, .. } => Some(*key),
            StoreEvent::SelectionCleared => None,
        }
    }
}

/// Intents sent from a row to the command dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Add or remove a message from the selection set
    SetSelection { key: MessageKey, selected: bool },
    /// Open the composer replying to a message
    StartReply { key: MessageKey },
    /// Open the forward picker for messages of one chat
    StartForward {
        chat_id: ChatId,
        message_ids: Vec<MessageId>,
    },
    /// Open a user's profile
    SelectUser { user_id: UserId },
    /// Open a chat
    SelectChat { chat_id: ChatId },
    /// Open the media or web page preview of a message
    OpenMedia { key: MessageKey },
}
