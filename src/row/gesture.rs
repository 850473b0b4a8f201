//! Turns a click on a row into at most one intent.
//!
//! Every clickable part of a row sits inside the row, so a click on any of
//! them also lands on the row. [`PointerHit::target`] settles that overlap
//! before any rule runs, which keeps the row rule from ever seeing such clicks.

use tracing::debug;

use crate::message::{ForwardOrigin, MessageSender};
use crate::protocol::{Intent, MessageKey};
use crate::store::{ChatPolicy, MessageStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Row,
    Timestamp,
    ForwardLink,
    /// Avatar tile of the sender
    Tile,
    /// Author name line
    Author,
    /// Media attachment or web page preview
    Media,
}

/// Raw pointer interaction as reported by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerHit {
    /// The pointer was over the timestamp when clicked
    pub timestamp: bool,
    /// The pointer was over the "Forwarded from" link when clicked
    pub forward_link: bool,
    pub tile: bool,
    pub author: bool,
    pub media: bool,
    /// The surrounding view has a non-empty text selection
    pub has_text_selection: bool,
}

impl PointerHit {
    pub fn row(has_text_selection: bool) -> Self {
        Self {
            has_text_selection,
            ..Self::default()
        }
    }

    pub fn timestamp() -> Self {
        Self {
            timestamp: true,
            ..Self::default()
        }
    }

    pub fn forward_link() -> Self {
        Self {
            forward_link: true,
            ..Self::default()
        }
    }

    pub fn tile() -> Self {
        Self {
            tile: true,
            ..Self::default()
        }
    }

    pub fn author() -> Self {
        Self {
            author: true,
            ..Self::default()
        }
    }

    pub fn media() -> Self {
        Self {
            media: true,
            ..Self::default()
        }
    }

    pub fn target(&self) -> ClickTarget {
        if self.timestamp {
            ClickTarget::Timestamp
        } else if self.forward_link {
            ClickTarget::ForwardLink
        } else if self.author {
            ClickTarget::Author
        } else if self.tile {
            ClickTarget::Tile
        } else if self.media {
            ClickTarget::Media
        } else {
            ClickTarget::Row
        }
    }
}

/// Resolve a click on the row `key`. Reads the store fresh; a record that has
/// disappeared since the last render resolves to no intent.
pub fn resolve(
    hit: &PointerHit,
    key: MessageKey,
    store: &dyn MessageStore,
    policy: &dyn ChatPolicy,
) -> Option<Intent> {
    let intent = match hit.target() {
        ClickTarget::Row => resolve_row(hit.has_text_selection, key, store),
        ClickTarget::Timestamp => resolve_timestamp(key, store, policy),
        ClickTarget::ForwardLink => resolve_forward_link(key, store),
        ClickTarget::Tile | ClickTarget::Author => resolve_sender(key, store),
        ClickTarget::Media => resolve_media(key, store),
    };
    debug!(%key, target = ?hit.target(), ?intent, "resolved click");
    intent
}

fn resolve_row(has_text_selection: bool, key: MessageKey, store: &dyn MessageStore) -> Option<Intent> {
    // The user is copying text
    if has_text_selection {
        return None;
    }
    store.get(key)?;

    Some(Intent::SetSelection {
        key,
        selected: !store.is_selected(key),
    })
}

fn resolve_timestamp(
    key: MessageKey,
    store: &dyn MessageStore,
    policy: &dyn ChatPolicy,
) -> Option<Intent> {
    let record = store.get(key)?;

    if policy.can_compose_messages(key.chat_id) {
        Some(Intent::StartReply { key })
    } else if record.can_be_forwarded {
        Some(Intent::StartForward {
            chat_id: key.chat_id,
            message_ids: vec![key.message_id],
        })
    } else {
        None
    }
}

fn resolve_forward_link(key: MessageKey, store: &dyn MessageStore) -> Option<Intent> {
    let origin = store.get(key)?.forward?;

    Some(match origin {
        ForwardOrigin::FromUser { user_id } => Intent::SelectUser { user_id },
        ForwardOrigin::FromChannelPost { chat_id } => Intent::SelectChat { chat_id },
    })
}

fn resolve_sender(key: MessageKey, store: &dyn MessageStore) -> Option<Intent> {
    Some(match store.get(key)?.sender {
        MessageSender::User(user_id) => Intent::SelectUser { user_id },
        MessageSender::Chat(chat_id) => Intent::SelectChat { chat_id },
    })
}

fn resolve_media(key: MessageKey, store: &dyn MessageStore) -> Option<Intent> {
    let record = store.get(key)?;
    if record.content.media.is_none() && record.content.web_page.is_none() {
        return None;
    }
    Some(Intent::OpenMedia { key })
}
