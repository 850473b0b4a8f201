//! Single-threaded in-memory message store.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use tracing::debug;

use super::{ChatPolicy, EventBus, MessageStore, Subscription};
use crate::message::{ChatRecord, MessageRecord, UserRecord};
use crate::protocol::{ChatId, MessageId, MessageKey, StoreEvent, UserId};

#[derive(Default)]
struct StoreState {
    messages: HashMap<MessageKey, MessageRecord>,
    users: HashMap<UserId, UserRecord>,
    chats: HashMap<ChatId, ChatRecord>,
    selection: BTreeSet<MessageKey>,
    /// Last incoming message id the current user has read, per chat
    read_inbox: HashMap<ChatId, MessageId>,
    /// Last outgoing message id the peer has read, per chat
    read_outbox: HashMap<ChatId, MessageId>,
}

/// Cloneable handle; all clones share the same records and event bus.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Rc<RefCell<StoreState>>,
    bus: EventBus,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn insert_user(&self, user: UserRecord) {
        self.state.borrow_mut().users.insert(user.id, user);
    }

    pub fn insert_chat(&self, chat: ChatRecord) {
        self.state.borrow_mut().chats.insert(chat.id, chat);
    }

    pub fn insert_message(&self, record: MessageRecord) {
        self.state.borrow_mut().messages.insert(record.key, record);
    }

    /// Remove a message; a selected message also leaves the selection set.
    pub fn remove_message(&self, key: MessageKey) -> Option<MessageRecord> {
        let (removed, was_selected) = {
            let mut state = self.state.borrow_mut();
            let removed = state.messages.remove(&key);
            let was_selected = state.selection.remove(&key);
            (removed, was_selected)
        };
        if was_selected {
            self.bus.publish(StoreEvent::SelectionChanged {
                key,
                selected: false,
            });
        }
        removed
    }

    /// Replace the text of a message and stamp its edit date.
    pub fn edit_text(&self, key: MessageKey, text: &str, edit_date: i64) -> bool {
        {
            let mut state = self.state.borrow_mut();
            let Some(record) = state.messages.get_mut(&key) else {
                return false;
            };
            record.content.text = Some(text.to_string());
            record.edit_date = edit_date;
        }
        debug!(%key, "message edited");
        self.bus.publish(StoreEvent::MessageEdited { key });
        true
    }

    /// Update the view counter. Publishes only when the value changes.
    pub fn set_views(&self, key: MessageKey, views: u32) -> bool {
        {
            let mut state = self.state.borrow_mut();
            let Some(record) = state.messages.get_mut(&key) else {
                return false;
            };
            if record.views == views {
                return false;
            }
            record.views = views;
        }
        self.bus.publish(StoreEvent::ViewCountChanged { key });
        true
    }

    /// Add or remove a message from the selection set. Unknown messages cannot
    /// be selected; only real membership changes are published.
    pub fn set_selected(&self, key: MessageKey, selected: bool) -> bool {
        let changed = {
            let mut state = self.state.borrow_mut();
            if selected {
                state.messages.contains_key(&key) && state.selection.insert(key)
            } else {
                state.selection.remove(&key)
            }
        };
        if changed {
            debug!(%key, selected, "selection changed");
            self.bus
                .publish(StoreEvent::SelectionChanged { key, selected });
        }
        changed
    }

    /// Empty the selection set, broadcasting `SelectionCleared` if it was not
    /// already empty.
    pub fn clear_selection(&self) -> bool {
        let had_selection = {
            let mut state = self.state.borrow_mut();
            let had = !state.selection.is_empty();
            state.selection.clear();
            had
        };
        if had_selection {
            debug!("selection cleared");
            self.bus.publish(StoreEvent::SelectionCleared);
        }
        had_selection
    }

    pub fn selected_keys(&self) -> Vec<MessageKey> {
        self.state.borrow().selection.iter().copied().collect()
    }

    pub fn mark_inbox_read(&self, chat_id: ChatId, up_to: MessageId) {
        self.state.borrow_mut().read_inbox.insert(chat_id, up_to);
    }

    pub fn mark_outbox_read(&self, chat_id: ChatId, up_to: MessageId) {
        self.state.borrow_mut().read_outbox.insert(chat_id, up_to);
    }

    /// Messages of one chat in id order.
    pub fn messages_in_chat(&self, chat_id: ChatId) -> Vec<MessageRecord> {
        let state = self.state.borrow();
        let mut messages: Vec<MessageRecord> = state
            .messages
            .values()
            .filter(|m| m.key.chat_id == chat_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.key.message_id);
        messages
    }
}

impl MessageStore for InMemoryStore {
    fn get(&self, key: MessageKey) -> Option<MessageRecord> {
        self.state.borrow().messages.get(&key).cloned()
    }

    fn user(&self, id: UserId) -> Option<UserRecord> {
        self.state.borrow().users.get(&id).cloned()
    }

    fn chat(&self, id: ChatId) -> Option<ChatRecord> {
        self.state.borrow().chats.get(&id).cloned()
    }

    fn is_selected(&self, key: MessageKey) -> bool {
        self.state.borrow().selection.contains(&key)
    }

    fn is_unread(&self, record: &MessageRecord) -> bool {
        let state = self.state.borrow();
        let watermarks = if record.is_outgoing {
            &state.read_outbox
        } else {
            &state.read_inbox
        };
        watermarks
            .get(&record.key.chat_id)
            .map_or(true, |last_read| record.key.message_id > *last_read)
    }

    fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }
}

impl ChatPolicy for InMemoryStore {
    fn can_compose_messages(&self, chat_id: ChatId) -> bool {
        self.state
            .borrow()
            .chats
            .get(&chat_id)
            .is_some_and(|chat| chat.can_send_messages)
    }
}
