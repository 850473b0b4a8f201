//! egui rendering of a derived message view.
//!
//! Draws whatever the view-model says is present and reports clicks back as a
//! [`PointerHit`]; deciding what a click means is left to the row.

use eframe::egui::{self, Color32, RichText};

use crate::message::{Media, MediaKind, SendStateSummary, WebPage};
use crate::row::gesture::PointerHit;
use crate::row::view::{MessageView, MessageViewModel};

use super::theme::{name_color, RowTheme};

const AVATAR_SIZE: f32 = 32.0;

/// Render one row. Returns the pointer interaction if the row was clicked.
pub fn render_row(ui: &mut egui::Ui, view: &MessageView, theme: &RowTheme) -> Option<PointerHit> {
    match view {
        MessageView::Empty { .. } => {
            render_placeholder(ui, theme);
            None
        }
        MessageView::Message(model) => render_message(ui, model, theme),
    }
}

fn render_placeholder(ui: &mut egui::Ui, theme: &RowTheme) {
    ui.horizontal(|ui| {
        ui.add_space(AVATAR_SIZE + 20.0);
        ui.label(
            RichText::new("Message unavailable")
                .size(12.0)
                .italics()
                .color(theme.text_muted),
        );
    });
}

fn render_message(
    ui: &mut egui::Ui,
    model: &MessageViewModel,
    theme: &RowTheme,
) -> Option<PointerHit> {
    if model.show_unread_separator {
        render_unread_separator(ui, theme);
    }

    let fill = if model.selected {
        theme.surface_selected
    } else {
        theme.surface
    };

    let inner = egui::Frame::default()
        .fill(fill)
        .inner_margin(6.0)
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_top(|ui| {
                let tile = render_tile(ui, model.tile.name());
                ui.add_space(8.0);
                ui.vertical(|ui| {
                    let header = render_header(ui, model, theme);
                    let media = render_body(ui, model, theme);
                    let timestamp = render_meta(ui, model, theme);
                    RowRegions {
                        timestamp,
                        forward_link: header.forward_link,
                        tile,
                        author: header.author,
                        media,
                    }
                })
                .inner
            })
            .inner
        });

    let regions = inner.inner;
    let row = inner.response.interact(egui::Sense::click());
    if !(row.clicked() || regions.any_clicked()) {
        return None;
    }

    // Child regions overlap the row, so test the press position against each
    let pos = ui.ctx().input(|i| i.pointer.interact_pos());
    let hit = |r: &egui::Response| r.clicked() || pos.is_some_and(|p| r.rect.contains(p));
    let has_text_selection =
        egui::text_selection::LabelSelectionState::load(ui.ctx()).has_selection();

    Some(PointerHit {
        timestamp: hit(&regions.timestamp),
        forward_link: regions.forward_link.as_ref().is_some_and(hit),
        tile: hit(&regions.tile),
        author: regions.author.as_ref().is_some_and(hit),
        media: regions.media.iter().any(hit),
        has_text_selection,
    })
}

/// Clickable parts inside a row.
struct RowRegions {
    timestamp: egui::Response,
    forward_link: Option<egui::Response>,
    tile: egui::Response,
    author: Option<egui::Response>,
    /// Media attachment and web page preview
    media: Vec<egui::Response>,
}

impl RowRegions {
    fn any_clicked(&self) -> bool {
        [&self.timestamp, &self.tile]
            .into_iter()
            .chain(self.forward_link.as_ref())
            .chain(self.author.as_ref())
            .chain(self.media.iter())
            .any(egui::Response::clicked)
    }
}

struct HeaderRegions {
    forward_link: Option<egui::Response>,
    author: Option<egui::Response>,
}

fn render_unread_separator(ui: &mut egui::Ui, theme: &RowTheme) {
    ui.add_space(4.0);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("Unread messages")
                .size(11.0)
                .strong()
                .color(theme.accent),
        );
    });
    ui.add_space(4.0);
}

fn render_tile(ui: &mut egui::Ui, name: &str) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(AVATAR_SIZE, AVATAR_SIZE), egui::Sense::click());
    let painter = ui.painter();
    painter.circle_filled(rect.center(), AVATAR_SIZE / 2.0, name_color(name));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initials(name),
        egui::FontId::proportional(13.0),
        Color32::WHITE,
    );
    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Author line or forward banner, both clickable.
fn render_header(ui: &mut egui::Ui, model: &MessageViewModel, theme: &RowTheme) -> HeaderRegions {
    let mut regions = HeaderRegions {
        forward_link: None,
        author: None,
    };
    if let Some(banner) = &model.forward {
        let response = ui.add(
            egui::Label::new(RichText::new(&banner.label).size(12.0).color(theme.accent))
                .sense(egui::Sense::click()),
        );
        regions.forward_link = Some(response.on_hover_cursor(egui::CursorIcon::PointingHand));
    } else if let Some(author) = &model.author {
        let response = ui.add(
            egui::Label::new(
                RichText::new(author)
                    .size(13.0)
                    .strong()
                    .color(name_color(model.tile.name())),
            )
            .sense(egui::Sense::click()),
        );
        regions.author = Some(response.on_hover_cursor(egui::CursorIcon::PointingHand));
    }
    regions
}

/// Reply marker, media, text and web page. Returns the clickable media regions.
fn render_body(
    ui: &mut egui::Ui,
    model: &MessageViewModel,
    theme: &RowTheme,
) -> Vec<egui::Response> {
    if let Some(reply_to) = model.reply_to {
        ui.label(
            RichText::new(format!("↳ in reply to #{}", reply_to.0))
                .size(11.0)
                .color(theme.text_muted),
        );
    }
    let mut media_regions = Vec::new();
    if let Some(media) = &model.media {
        let response = ui.add(
            egui::Label::new(
                RichText::new(media_label(media))
                    .size(12.0)
                    .color(theme.text_secondary),
            )
            .sense(egui::Sense::click()),
        );
        media_regions.push(response.on_hover_cursor(egui::CursorIcon::PointingHand));
    }
    if let Some(text) = &model.text {
        ui.add(egui::Label::new(RichText::new(text).size(14.0).color(theme.text_primary)).wrap());
    }
    if let Some(page) = &model.web_page {
        let frame = egui::Frame::default()
            .stroke(egui::Stroke::new(1.0, theme.border_subtle))
            .inner_margin(4.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(web_page_title(page))
                        .size(12.0)
                        .strong()
                        .color(theme.accent),
                );
                ui.label(RichText::new(&page.url).size(11.0).color(theme.text_muted));
            });
        media_regions.push(
            frame
                .response
                .interact(egui::Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand),
        );
    }
    media_regions
}

/// Views, edited marker, time and send-state glyph. Returns the time region.
fn render_meta(ui: &mut egui::Ui, model: &MessageViewModel, theme: &RowTheme) -> egui::Response {
    ui.horizontal(|ui| {
        if let Some(views) = model.views {
            ui.label(
                RichText::new(format!("👁 {}", views))
                    .size(10.0)
                    .color(theme.text_muted),
            );
        }
        if model.edited {
            ui.label(RichText::new("edited").size(10.0).italics().color(theme.text_muted));
        }
        let timestamp = ui
            .add(
                egui::Label::new(RichText::new(&model.time).size(10.0).color(theme.text_muted))
                    .sense(egui::Sense::click()),
            )
            .on_hover_text(model.date_hint.as_str());
        if let Some((glyph, tone)) = status_glyph(model.send_state, model.unread) {
            let color = match tone {
                GlyphTone::Muted => theme.text_muted,
                GlyphTone::Accent => theme.accent,
                GlyphTone::Success => theme.success,
                GlyphTone::Error => theme.error,
            };
            ui.label(RichText::new(glyph).size(10.0).color(color));
        }
        timestamp
    })
    .inner
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GlyphTone {
    Muted,
    Accent,
    Success,
    Error,
}

/// Glyph shown after the time, only while the message is unread. Incoming
/// messages get a dot, outgoing ones their send state.
fn status_glyph(send_state: SendStateSummary, unread: bool) -> Option<(&'static str, GlyphTone)> {
    if !unread {
        return None;
    }
    match send_state {
        SendStateSummary::Hidden => Some(("●", GlyphTone::Accent)),
        SendStateSummary::Pending => Some(("🕓", GlyphTone::Muted)),
        SendStateSummary::Failed => Some(("⚠", GlyphTone::Error)),
        SendStateSummary::Sent { read: false } => Some(("✓", GlyphTone::Muted)),
        SendStateSummary::Sent { read: true } => Some(("✓✓", GlyphTone::Success)),
    }
}

fn media_label(media: &Media) -> String {
    let kind = match media.kind {
        MediaKind::Photo => "Photo",
        MediaKind::Video => "Video",
        MediaKind::Document => "Document",
        MediaKind::Audio => "Audio",
        MediaKind::Sticker => "Sticker",
    };
    match media.caption.as_deref() {
        Some(caption) if !caption.is_empty() => format!("[{}] {}", kind, caption),
        _ => format!("[{}]", kind),
    }
}

fn web_page_title(page: &WebPage) -> String {
    match (page.site_name.as_deref(), page.title.as_deref()) {
        (Some(site), Some(title)) => format!("{} · {}", site, title),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => page.url.clone(),
    }
}

/// Up to two initials, uppercased.
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("rust news weekly"), "RN");
        assert_eq!(initials("x"), "X");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_status_glyph() {
        assert_eq!(status_glyph(SendStateSummary::Hidden, false), None);
        assert_eq!(
            status_glyph(SendStateSummary::Hidden, true),
            Some(("●", GlyphTone::Accent))
        );
        assert_eq!(
            status_glyph(SendStateSummary::Pending, true),
            Some(("🕓", GlyphTone::Muted))
        );
        assert_eq!(
            status_glyph(SendStateSummary::Failed, true),
            Some(("⚠", GlyphTone::Error))
        );
        assert_eq!(
            status_glyph(SendStateSummary::Sent { read: false }, true),
            Some(("✓", GlyphTone::Muted))
        );
    }

    #[test]
    fn test_status_glyph_hidden_once_read() {
        for state in [
            SendStateSummary::Pending,
            SendStateSummary::Failed,
            SendStateSummary::Sent { read: false },
            SendStateSummary::Sent { read: true },
        ] {
            assert_eq!(status_glyph(state, false), None);
        }
    }

    #[test]
    fn test_media_label() {
        let photo = Media {
            kind: MediaKind::Photo,
            caption: Some("sunset".into()),
        };
        assert_eq!(media_label(&photo), "[Photo] sunset");
        let doc = Media {
            kind: MediaKind::Document,
            caption: Some(String::new()),
        };
        assert_eq!(media_label(&doc), "[Document]");
    }

    #[test]
    fn test_web_page_title() {
        let mut page = WebPage {
            url: "https://blog.rust-lang.org".into(),
            site_name: Some("Rust Blog".into()),
            title: Some("Announcing Rust".into()),
        };
        assert_eq!(web_page_title(&page), "Rust Blog · Announcing Rust");
        page.site_name = None;
        assert_eq!(web_page_title(&page), "Announcing Rust");
        page.title = None;
        assert_eq!(web_page_title(&page), "https://blog.rust-lang.org");
    }
}
