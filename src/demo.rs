//! Sample chat used by the binary.

use chrono::Utc;

use crate::message::{
    ChatRecord, ForwardOrigin, Media, MediaKind, MessageRecord, MessageSender, SendState,
    UserRecord, WebPage,
};
use crate::protocol::{ChatId, MessageId, MessageKey, UserId};
use crate::store::InMemoryStore;

pub const DEMO_CHAT: ChatId = ChatId(1);
pub const DEMO_CHANNEL: ChatId = ChatId(-1001);
const ME: UserId = UserId(1);

/// Fill `store` with a small group chat and return its id.
pub fn seed(store: &InMemoryStore) -> ChatId {
    let now = Utc::now().timestamp();
    let key = |id| MessageKey {
        chat_id: DEMO_CHAT,
        message_id: MessageId(id),
    };

    store.insert_user(UserRecord::new(ME.0, "You", ""));
    store.insert_user(UserRecord::new(42, "Ada", "Lovelace"));
    store.insert_user(UserRecord::new(43, "Grace", "Hopper"));
    store.insert_chat(ChatRecord::new(DEMO_CHAT.0, "Compiler Club", true));
    store.insert_chat(ChatRecord::new(DEMO_CHANNEL.0, "Rust News", false));

    store.insert_message(
        MessageRecord::new(key(1), MessageSender::User(UserId(42)), now - 3600)
            .with_text("Has anyone tried the new borrow checker diagnostics?"),
    );
    store.insert_message(
        MessageRecord::new(key(2), MessageSender::User(ME), now - 3500)
            .with_text("Yes, the suggestions are much better now.")
            .with_reply_to(MessageId(1))
            .outgoing(SendState::Sent),
    );
    let mut edited = MessageRecord::new(key(3), MessageSender::User(UserId(43)), now - 3000)
        .with_text("I wrote up some notes")
        .with_web_page(WebPage {
            url: "https://doc.rust-lang.org/book/".into(),
            site_name: Some("The Rust Book".into()),
            title: Some("Understanding Ownership".into()),
        });
    edited.edit_date = now - 2900;
    store.insert_message(edited);
    store.insert_message(
        MessageRecord::new(key(4), MessageSender::User(UserId(42)), now - 600)
            .with_forward(ForwardOrigin::FromChannelPost {
                chat_id: DEMO_CHANNEL,
            })
            .with_text("Rust 2024 edition is out!")
            .with_views(1280),
    );
    store.insert_message(
        MessageRecord::new(key(5), MessageSender::User(UserId(43)), now - 300)
            .with_forward(ForwardOrigin::FromUser { user_id: UserId(42) })
            .with_media(Media {
                kind: MediaKind::Photo,
                caption: Some("whiteboard from today".into()),
            }),
    );
    store.insert_message(
        MessageRecord::new(key(6), MessageSender::Chat(DEMO_CHAT), now - 120)
            .with_text("Pinned: meetup on Friday")
            .not_forwardable(),
    );
    store.insert_message(
        MessageRecord::new(key(7), MessageSender::User(ME), now - 30)
            .with_text("See you there")
            .outgoing(SendState::Pending),
    );

    store.mark_inbox_read(DEMO_CHAT, MessageId(3));
    store.mark_outbox_read(DEMO_CHAT, MessageId(2));

    DEMO_CHAT
}
