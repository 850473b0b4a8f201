use serde::{Deserialize, Serialize};

use crate::protocol::{ChatId, MessageId, MessageKey, UserId};

/// Who posted a message. Messages without a user sender belong to their chat
/// (channel posts, anonymous group admins).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageSender {
    User(UserId),
    Chat(ChatId),
}

/// Where a forwarded message originally came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForwardOrigin {
    FromUser { user_id: UserId },
    FromChannelPost { chat_id: ChatId },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SendState {
    #[default]
    Sent,
    Pending,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Photo,
    Video,
    Document,
    Audio,
    Sticker,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub kind: MediaKind,
    pub caption: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebPage {
    pub url: String,
    pub site_name: Option<String>,
    pub title: Option<String>,
}

/// Content slots; each may be absent independently of the others.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent {
    pub text: Option<String>,
    pub media: Option<Media>,
    pub web_page: Option<WebPage>,
}

/// A message as kept by the message store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub key: MessageKey,
    pub sender: MessageSender,
    pub forward: Option<ForwardOrigin>,
    pub reply_to: Option<MessageId>,
    pub views: u32,
    /// Unix seconds of the last edit, 0 if never edited
    pub edit_date: i64,
    /// Unix seconds the message was sent
    pub date: i64,
    pub is_outgoing: bool,
    pub send_state: SendState,
    pub can_be_forwarded: bool,
    pub content: MessageContent,
}

impl MessageRecord {
    pub fn new(key: MessageKey, sender: MessageSender, date: i64) -> Self {
        Self {
            key,
            sender,
            forward: None,
            reply_to: None,
            views: 0,
            edit_date: 0,
            date,
            is_outgoing: false,
            send_state: SendState::Sent,
            can_be_forwarded: true,
            content: MessageContent::default(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.text = Some(text.into());
        self
    }

    pub fn with_forward(mut self, origin: ForwardOrigin) -> Self {
        self.forward = Some(origin);
        self
    }

    pub fn with_reply_to(mut self, message_id: MessageId) -> Self {
        self.reply_to = Some(message_id);
        self
    }

    pub fn with_media(mut self, media: Media) -> Self {
        self.content.media = Some(media);
        self
    }

    pub fn with_web_page(mut self, web_page: WebPage) -> Self {
        self.content.web_page = Some(web_page);
        self
    }

    pub fn with_views(mut self, views: u32) -> Self {
        self.views = views;
        self
    }

    pub fn outgoing(mut self, send_state: SendState) -> Self {
        self.is_outgoing = true;
        self.send_state = send_state;
        self
    }

    pub fn not_forwardable(mut self) -> Self {
        self.can_be_forwarded = false;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
}

impl UserRecord {
    pub fn new(id: i64, first_name: &str, last_name: &str) -> Self {
        Self {
            id: UserId(id),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    pub fn display_name(&self) -> String {
        match (self.first_name.trim(), self.last_name.trim()) {
            ("", "") => DELETED_ACCOUNT.to_string(),
            (first, "") => first.to_string(),
            ("", last) => last.to_string(),
            (first, last) => format!("{} {}", first, last),
        }
    }
}

pub const DELETED_ACCOUNT: &str = "Deleted Account";
pub const UNKNOWN_CHAT: &str = "Unknown chat";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: ChatId,
    pub title: String,
    /// Whether the current user may post new messages here
    pub can_send_messages: bool,
}

impl ChatRecord {
    pub fn new(id: i64, title: &str, can_send_messages: bool) -> Self {
        Self {
            id: ChatId(id),
            title: title.to_string(),
            can_send_messages,
        }
    }
}

/// Send-state summary resolved by the list before building row props
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendStateSummary {
    /// Incoming messages carry no send-state glyph
    Hidden,
    Pending,
    Failed,
    Sent { read: bool },
}

impl SendStateSummary {
    /// `unread` is the store's unread predicate for `record`.
    pub fn resolve(record: &MessageRecord, unread: bool) -> Self {
        if !record.is_outgoing {
            return SendStateSummary::Hidden;
        }
        match record.send_state {
            SendState::Pending => SendStateSummary::Pending,
            SendState::Failed => SendStateSummary::Failed,
            SendState::Sent => SendStateSummary::Sent { read: !unread },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_variants() {
        assert_eq!(UserRecord::new(1, "Ada", "Lovelace").display_name(), "Ada Lovelace");
        assert_eq!(UserRecord::new(2, "Ada", "").display_name(), "Ada");
        assert_eq!(UserRecord::new(3, "", "Lovelace").display_name(), "Lovelace");
        assert_eq!(UserRecord::new(4, " ", "").display_name(), DELETED_ACCOUNT);
    }

    #[test]
    fn test_send_state_summary() {
        let key = MessageKey::new(1, 1);
        let incoming = MessageRecord::new(key, MessageSender::User(UserId(5)), 0);
        assert_eq!(SendStateSummary::resolve(&incoming, true), SendStateSummary::Hidden);

        let pending = incoming.clone().outgoing(SendState::Pending);
        assert_eq!(SendStateSummary::resolve(&pending, true), SendStateSummary::Pending);

        let failed = incoming.clone().outgoing(SendState::Failed);
        assert_eq!(SendStateSummary::resolve(&failed, false), SendStateSummary::Failed);

        let sent = incoming.outgoing(SendState::Sent);
        assert_eq!(
            SendStateSummary::resolve(&sent, true),
            SendStateSummary::Sent { read: false }
        );
        assert_eq!(
            SendStateSummary::resolve(&sent, false),
            SendStateSummary::Sent { read: true }
        );
    }

    #[test]
    fn test_builder_defaults() {
        let record = MessageRecord::new(MessageKey::new(1, 2), MessageSender::Chat(ChatId(1)), 10)
            .with_text("hi")
            .not_forwardable();
        assert_eq!(record.content.text.as_deref(), Some("hi"));
        assert!(record.content.media.is_none());
        assert!(!record.can_be_forwarded);
        assert_eq!(record.edit_date, 0);
        assert!(record.forward.is_none());
    }
}
