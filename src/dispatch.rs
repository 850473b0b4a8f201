//! Command dispatching: rows emit [`Intent`]s, the applier turns them into
//! store mutations and navigation changes.

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, warn};

use crate::protocol::{ChatId, Intent, MessageId, MessageKey, UserId};
use crate::store::InMemoryStore;

/// Accepts intents produced by gestures.
pub trait CommandDispatcher {
    fn dispatch(&self, intent: Intent);
}

/// Dispatcher that queues intents on a channel for the applier to drain.
#[derive(Clone)]
pub struct ChannelDispatcher {
    tx: Sender<Intent>,
}

impl ChannelDispatcher {
    /// Create a dispatcher together with the receiving end of its queue.
    pub fn channel() -> (Self, Receiver<Intent>) {
        let (tx, rx) = unbounded::<Intent>();
        (Self { tx }, rx)
    }
}

impl CommandDispatcher for ChannelDispatcher {
    fn dispatch(&self, intent: Intent) {
        if let Err(e) = self.tx.send(intent) {
            warn!(intent = ?e.into_inner(), "intent dropped, applier is gone");
        }
    }
}

/// What the surrounding chat screen should show next.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigation {
    /// Message the composer is replying to
    pub reply_to: Option<MessageKey>,
    /// Messages waiting for a forward destination
    pub forward: Option<ForwardDraft>,
    /// Profile or chat the user asked to open
    pub open: Option<OpenTarget>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForwardDraft {
    pub chat_id: ChatId,
    pub message_ids: Vec<MessageId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenTarget {
    User(UserId),
    Chat(ChatId),
    /// Media viewer for one message
    Media(MessageKey),
}

/// Drains queued intents and applies them to the store.
pub struct IntentApplier {
    rx: Receiver<Intent>,
    pub navigation: Navigation,
}

impl IntentApplier {
    pub fn new(rx: Receiver<Intent>) -> Self {
        Self {
            rx,
            navigation: Navigation::default(),
        }
    }

    /// Apply every queued intent in arrival order. Returns how many were applied.
    pub fn apply_pending(&mut self, store: &InMemoryStore) -> usize {
        let mut applied = 0;
        while let Ok(intent) = self.rx.try_recv() {
            self.apply(intent, store);
            applied += 1;
        }
        applied
    }

    pub fn apply(&mut self, intent: Intent, store: &InMemoryStore) {
        debug!(?intent, "applying intent");
        match intent {
            Intent::SetSelection { key, selected } => {
                store.set_selected(key, selected);
            }
            Intent::StartReply { key } => {
                store.clear_selection();
                self.navigation.forward = None;
                self.navigation.reply_to = Some(key);
            }
            Intent::StartForward {
                chat_id,
                message_ids,
            } => {
                store.clear_selection();
                self.navigation.reply_to = None;
                self.navigation.forward = Some(ForwardDraft {
                    chat_id,
                    message_ids,
                });
            }
            Intent::SelectUser { user_id } => {
                self.navigation.open = Some(OpenTarget::User(user_id));
            }
            Intent::SelectChat { chat_id } => {
                self.navigation.open = Some(OpenTarget::Chat(chat_id));
            }
            Intent::OpenMedia { key } => {
                self.navigation.open = Some(OpenTarget::Media(key));
            }
        }
    }
}

/// Dispatcher that only records what it was given.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingDispatcher {
    pub intents: std::cell::RefCell<Vec<Intent>>,
}

#[cfg(test)]
impl CommandDispatcher for RecordingDispatcher {
    fn dispatch(&self, intent: Intent) {
        self.intents.borrow_mut().push(intent);
    }
}
