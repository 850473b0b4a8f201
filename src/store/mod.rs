//! Message store contract consumed by message rows.
//!
//! Rows only depend on the traits here; `InMemoryStore` is the concrete store
//! used by the demo app and the tests.

mod bus;
mod memory;

pub use bus::{EventBus, Subscription};
pub use memory::InMemoryStore;

use crate::message::{ChatRecord, MessageRecord, UserRecord};
use crate::protocol::{ChatId, MessageKey, UserId};

/// Read access to messages, their authors and the selection set, plus the
/// event stream announcing changes to them.
pub trait MessageStore {
    fn get(&self, key: MessageKey) -> Option<MessageRecord>;

    fn user(&self, id: UserId) -> Option<UserRecord>;

    fn chat(&self, id: ChatId) -> Option<ChatRecord>;

    /// Membership of `key` in the global selection set.
    fn is_selected(&self, key: MessageKey) -> bool;

    fn is_unread(&self, record: &MessageRecord) -> bool;

    fn subscribe(&self) -> Subscription;
}

/// Per-chat permissions of the current user.
pub trait ChatPolicy {
    fn can_compose_messages(&self, chat_id: ChatId) -> bool;
}
