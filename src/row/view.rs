//! Pure derivation of what a row shows from the record it points at.

use chrono::{Local, TimeZone};

use crate::message::{
    ForwardOrigin, Media, MessageRecord, MessageSender, SendStateSummary, WebPage,
    DELETED_ACCOUNT, UNKNOWN_CHAT,
};
use crate::protocol::{ChatId, MessageId, MessageKey, UserId};
use crate::store::MessageStore;

use super::{RenderProps, ThemeId};

/// The avatar tile and author identity of a row
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SenderTile {
    User { user_id: UserId, name: String },
    Chat { chat_id: ChatId, title: String },
}

impl SenderTile {
    pub fn name(&self) -> &str {
        match self {
            SenderTile::User { name, .. } => name,
            SenderTile::Chat { title, .. } => title,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForwardBanner {
    /// "Forwarded from {name}"
    pub label: String,
    pub origin: ForwardOrigin,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageViewModel {
    pub key: MessageKey,
    pub theme: ThemeId,
    pub selected: bool,
    pub show_unread_separator: bool,
    pub send_state: SendStateSummary,
    pub tile: SenderTile,
    /// Author line; suppressed when the forward banner takes its place
    pub author: Option<String>,
    pub forward: Option<ForwardBanner>,
    pub unread: bool,
    /// Present only for a positive view count
    pub views: Option<u32>,
    pub edited: bool,
    /// Local `HH:MM` of the send date
    pub time: String,
    /// Full local date and time of the send date, shown on hover
    pub date_hint: String,
    pub text: Option<String>,
    pub reply_to: Option<MessageId>,
    pub media: Option<Media>,
    pub web_page: Option<WebPage>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageView {
    /// The store has no record for this row
    Empty { key: MessageKey, selected: bool },
    Message(Box<MessageViewModel>),
}

impl MessageView {
    pub fn key(&self) -> MessageKey {
        match self {
            MessageView::Empty { key, .. } => *key,
            MessageView::Message(model) => model.key,
        }
    }

    pub fn model(&self) -> Option<&MessageViewModel> {
        match self {
            MessageView::Empty { .. } => None,
            MessageView::Message(model) => Some(model.as_ref()),
        }
    }
}

/// Derive the view of one row. Reads from `store` only to resolve names and
/// the unread predicate; never mutates anything.
pub fn derive(
    record: Option<&MessageRecord>,
    selected: bool,
    props: &RenderProps,
    store: &dyn MessageStore,
) -> MessageView {
    let Some(record) = record else {
        return MessageView::Empty {
            key: props.key,
            selected,
        };
    };

    let tile = match record.sender {
        MessageSender::User(user_id) => SenderTile::User {
            user_id,
            name: user_name(store, user_id),
        },
        MessageSender::Chat(chat_id) => SenderTile::Chat {
            chat_id,
            title: chat_title(store, chat_id),
        },
    };

    let forward = record.forward.map(|origin| {
        let name = match origin {
            ForwardOrigin::FromUser { user_id } => user_name(store, user_id),
            ForwardOrigin::FromChannelPost { chat_id } => chat_title(store, chat_id),
        };
        ForwardBanner {
            label: format!("Forwarded from {}", name),
            origin,
        }
    });

    let author = if forward.is_some() {
        None
    } else {
        Some(tile.name().to_string())
    };

    MessageView::Message(Box::new(MessageViewModel {
        key: props.key,
        theme: props.theme,
        selected,
        show_unread_separator: props.show_unread_separator,
        send_state: props.send_state,
        tile,
        author,
        forward,
        unread: store.is_unread(record),
        views: (record.views > 0).then_some(record.views),
        edited: record.edit_date > 0,
        time: format_time(record.date),
        date_hint: format_date_hint(record.date),
        text: record.content.text.clone(),
        reply_to: record.reply_to,
        media: record.content.media.clone(),
        web_page: record.content.web_page.clone(),
    }))
}

fn user_name(store: &dyn MessageStore, user_id: UserId) -> String {
    store
        .user(user_id)
        .map(|u| u.display_name())
        .unwrap_or_else(|| DELETED_ACCOUNT.to_string())
}

fn chat_title(store: &dyn MessageStore, chat_id: ChatId) -> String {
    store
        .chat(chat_id)
        .map(|c| c.title)
        .unwrap_or_else(|| UNKNOWN_CHAT.to_string())
}

/// Format a unix timestamp as local `HH:MM`; empty when out of range.
pub fn format_time(unix_seconds: i64) -> String {
    Local
        .timestamp_opt(unix_seconds, 0)
        .single()
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// Format a unix timestamp as a full local date, e.g.
/// `Tuesday, March 5, 2024 14:07:09`; empty when out of range.
pub fn format_date_hint(unix_seconds: i64) -> String {
    Local
        .timestamp_opt(unix_seconds, 0)
        .single()
        .map(|t| t.format("%A, %B %-d, %Y %H:%M:%S").to_string())
        .unwrap_or_default()
}
