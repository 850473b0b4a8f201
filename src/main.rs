//! Message row demo: a chat screen whose rows follow an in-memory store.

use eframe::egui;
use tracing_subscriber::EnvFilter;

use message_row::app::MessageListApp;
use message_row::config::load_settings;
use message_row::demo;
use message_row::store::InMemoryStore;

fn main() -> eframe::Result<()> {
    let settings = load_settings();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let store = InMemoryStore::new();
    let chat_id = demo::seed(&store);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 720.0])
            .with_min_inner_size([360.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Message Row",
        options,
        Box::new(move |cc| Ok(Box::new(MessageListApp::new(cc, store, chat_id, settings)))),
    )
}
