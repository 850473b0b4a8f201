//! Main update loop and shortcuts

use eframe::egui;
use std::time::Duration;
use tracing::warn;

use super::MessageListApp;
use crate::config::save_settings;
use crate::dispatch::OpenTarget;
use crate::store::MessageStore;
use crate::ui;

impl eframe::App for MessageListApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_events();

        ctx.input(|i| {
            // Esc: clear the selection
            if i.key_pressed(egui::Key::Escape) {
                self.store.clear_selection();
            }
            // Ctrl+E: edit the selected messages
            if i.modifiers.ctrl && i.key_pressed(egui::Key::E) {
                self.edit_selected();
            }
            // Ctrl+U: bump view counters of the selected messages
            if i.modifiers.ctrl && i.key_pressed(egui::Key::U) {
                self.bump_selected_views();
            }
            // Ctrl+T: switch theme
            if i.modifiers.ctrl && i.key_pressed(egui::Key::T) {
                self.toggle_theme();
                if let Err(e) = save_settings(&self.settings) {
                    warn!(error = %e, "failed to save settings");
                }
            }
        });
        self.apply_theme(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));

        self.render_status_bar(ctx);

        let theme = ui::theme::RowTheme::for_id(self.settings.theme);
        let mut clicks = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for (idx, row) in self.rows.iter().enumerate() {
                        let Some(view) = row.view() else { continue };
                        if let Some(hit) = ui::render_row(ui, view, &theme) {
                            clicks.push((idx, hit));
                        }
                        ui.add_space(2.0);
                    }
                });
        });

        for (idx, hit) in clicks {
            self.handle_click(idx, hit);
        }
    }
}

impl MessageListApp {
    fn render_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let title = self
                    .store
                    .chat(self.chat_id)
                    .map(|c| c.title)
                    .unwrap_or_default();
                ui.strong(title);
                ui.separator();

                let selected = self.store.selected_keys().len();
                if selected > 0 {
                    ui.label(format!("{} selected (Esc to clear)", selected));
                    ui.separator();
                }

                let nav = &self.applier.navigation;
                if let Some(key) = nav.reply_to {
                    ui.label(format!("Replying to #{}", key.message_id.0));
                }
                if let Some(draft) = &nav.forward {
                    ui.label(format!("Forwarding {} message(s)", draft.message_ids.len()));
                }
                match nav.open {
                    Some(OpenTarget::User(user_id)) => {
                        let name = self
                            .store
                            .user(user_id)
                            .map(|u| u.display_name())
                            .unwrap_or_default();
                        ui.label(format!("Opened profile: {}", name));
                    }
                    Some(OpenTarget::Chat(chat_id)) => {
                        let title = self
                            .store
                            .chat(chat_id)
                            .map(|c| c.title)
                            .unwrap_or_default();
                        ui.label(format!("Opened chat: {}", title));
                    }
                    Some(OpenTarget::Media(key)) => {
                        ui.label(format!("Opened media of #{}", key.message_id.0));
                    }
                    None => {}
                }
            });
        });
    }

    pub(crate) fn edit_selected(&self) {
        let now = chrono::Utc::now().timestamp();
        for key in self.store.selected_keys() {
            if let Some(record) = self.store.get(key) {
                let text = record.content.text.unwrap_or_default();
                self.store.edit_text(key, &format!("{} (edited)", text), now);
            }
        }
    }

    pub(crate) fn bump_selected_views(&self) {
        for key in self.store.selected_keys() {
            if let Some(record) = self.store.get(key) {
                self.store.set_views(key, record.views.saturating_add(1));
            }
        }
    }
}
