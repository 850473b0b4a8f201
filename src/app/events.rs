//! Per-frame event processing

use tracing::trace;

use super::MessageListApp;
use crate::row::gesture::PointerHit;

impl MessageListApp {
    /// Apply queued intents, then let every row drain its store events and
    /// run its pass if one is due. Returns how many rows re-derived.
    pub fn process_events(&mut self) -> usize {
        let applied = self.applier.apply_pending(&self.store);
        if applied > 0 {
            trace!(applied, "intents applied");
        }

        self.sync_rows();

        let mut derived = 0;
        for row in &mut self.rows {
            row.process_events();
            if row.render_if_needed(&self.store).is_some() {
                derived += 1;
            }
        }
        derived
    }

    /// Route a click on row `index` through the gesture resolver.
    pub fn handle_click(&mut self, index: usize, hit: PointerHit) {
        if let Some(row) = self.rows.get(index) {
            row.click(&hit, &self.store, &self.store, &self.dispatcher);
        }
    }
}
