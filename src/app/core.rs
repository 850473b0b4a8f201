//! Core MessageListApp struct and row list reconciliation

use eframe::egui;
use tracing::{debug, info};

use crate::config::Settings;
use crate::dispatch::{ChannelDispatcher, IntentApplier};
use crate::message::{MessageRecord, SendStateSummary};
use crate::protocol::ChatId;
use crate::row::{MessageRow, RenderProps};
use crate::store::{InMemoryStore, MessageStore};
use crate::ui;

pub struct MessageListApp {
    pub store: InMemoryStore,

    /// Chat whose messages are listed
    pub chat_id: ChatId,

    /// One row per message, in message id order
    pub rows: Vec<MessageRow>,

    // Intent queue: rows dispatch, the applier drains into the store
    pub dispatcher: ChannelDispatcher,
    pub applier: IntentApplier,

    pub settings: Settings,
}

impl MessageListApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: InMemoryStore,
        chat_id: ChatId,
        settings: Settings,
    ) -> Self {
        cc.egui_ctx.set_visuals(ui::theme::visuals(settings.theme));
        Self::with_store(store, chat_id, settings)
    }

    /// Build the app without a window; rows are created and activated.
    pub fn with_store(store: InMemoryStore, chat_id: ChatId, settings: Settings) -> Self {
        let (dispatcher, rx) = ChannelDispatcher::channel();
        let mut app = Self {
            store,
            chat_id,
            rows: Vec::new(),
            dispatcher,
            applier: IntentApplier::new(rx),
            settings,
        };
        app.sync_rows();
        info!(chat = app.chat_id.0, rows = app.rows.len(), "message list ready");
        app
    }

    /// Props for every message of the chat, in display order.
    pub fn build_props(&self) -> Vec<RenderProps> {
        let messages = self.store.messages_in_chat(self.chat_id);
        let first_unread = messages
            .iter()
            .find(|m| !m.is_outgoing && self.store.is_unread(m))
            .map(|m| m.key);

        messages
            .iter()
            .map(|record| RenderProps {
                theme: self.settings.theme,
                key: record.key,
                send_state: self.send_state_of(record),
                show_unread_separator: self.settings.show_unread_separator
                    && first_unread == Some(record.key),
            })
            .collect()
    }

    fn send_state_of(&self, record: &MessageRecord) -> SendStateSummary {
        SendStateSummary::resolve(record, self.store.is_unread(record))
    }

    /// Reconcile rows with the chat's messages: keep rows whose message is
    /// still listed, create and activate new ones, drop the rest.
    pub fn sync_rows(&mut self) {
        let props = self.build_props();
        let mut previous = std::mem::take(&mut self.rows);

        for p in props {
            match previous.iter().position(|row| row.key() == p.key) {
                Some(idx) => {
                    let mut row = previous.swap_remove(idx);
                    row.set_props(p);
                    self.rows.push(row);
                }
                None => {
                    let mut row = MessageRow::new(p);
                    row.activate(&self.store);
                    self.rows.push(row);
                }
            }
        }

        for mut row in previous {
            debug!(key = %row.key(), "row left the list");
            row.deactivate();
        }
    }

    pub fn toggle_theme(&mut self) {
        self.settings.theme = match self.settings.theme {
            crate::row::ThemeId::Dark => crate::row::ThemeId::Light,
            crate::row::ThemeId::Light => crate::row::ThemeId::Dark,
        };
    }

    pub fn apply_theme(&self, ctx: &egui::Context) {
        ctx.set_visuals(ui::theme::visuals(self.settings.theme));
    }
}
