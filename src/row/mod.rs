//! A single message row kept in sync with the message store.
//!
//! - `filter`: what a store event means for this row
//! - `gate`: whether a re-derivation pass may run
//! - `view`: pure derivation of the view-model
//! - `gesture`: click to intent resolution

pub mod filter;
pub mod gate;
pub mod gesture;
pub mod view;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::dispatch::CommandDispatcher;
use crate::message::SendStateSummary;
use crate::protocol::{Intent, MessageKey, StoreEvent};
use crate::store::{ChatPolicy, MessageStore, Subscription};

use filter::{filter_event, FilterOutcome};
use gate::{should_rederive, GateState};
use gesture::PointerHit;
use view::MessageView;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Dark,
    Light,
}

/// Inputs handed to a row by the surrounding list on every pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderProps {
    pub theme: ThemeId,
    pub key: MessageKey,
    pub send_state: SendStateSummary,
    /// Draw the "unread messages" separator above this row
    pub show_unread_separator: bool,
}

pub struct MessageRow {
    props: RenderProps,
    selected: bool,
    force_update: bool,
    last_pass: Option<GateState>,
    view: Option<MessageView>,
    subscription: Option<Subscription>,
    /// Relevant events seen since activation
    scheduled: usize,
    /// Derivations actually performed
    passes: usize,
}

impl MessageRow {
    pub fn new(props: RenderProps) -> Self {
        Self {
            props,
            selected: false,
            force_update: false,
            last_pass: None,
            view: None,
            subscription: None,
            scheduled: 0,
            passes: 0,
        }
    }

    pub fn key(&self) -> MessageKey {
        self.props.key
    }

    pub fn props(&self) -> &RenderProps {
        &self.props
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// Last derived view, if any pass has run.
    pub fn view(&self) -> Option<&MessageView> {
        self.view.as_ref()
    }

    pub fn scheduled_passes(&self) -> usize {
        self.scheduled
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Subscribe to store events and run a pass. Calling it on an active row
    /// keeps the existing subscription and only runs a pass if one is due.
    ///
    /// Events published while the row was inactive never reached it, so a
    /// new subscription resyncs the selection flag from the store and forces
    /// the pass.
    pub fn activate(&mut self, store: &dyn MessageStore) {
        if self.subscription.is_none() {
            let subscription = store.subscribe();
            debug!(key = %self.props.key, subscription = subscription.id(), "row activated");
            self.subscription = Some(subscription);
            self.selected = store.is_selected(self.props.key);
            self.force_update = true;
        }
        self.render_if_needed(store);
    }

    /// Release the subscription and drop any pending pass.
    pub fn deactivate(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            debug!(key = %self.props.key, subscription = subscription.id(), "row deactivated");
        }
        self.force_update = false;
    }

    /// Drain queued store events in arrival order. Returns how many of them
    /// scheduled a pass.
    pub fn process_events(&mut self) -> usize {
        let mut scheduled = 0;
        loop {
            let Some(event) = self.subscription.as_ref().and_then(Subscription::try_recv) else {
                break;
            };
            if self.handle_event(&event) {
                scheduled += 1;
            }
        }
        scheduled
    }

    /// Apply one store event. Returns whether it scheduled a pass; events are
    /// ignored entirely while the row is inactive.
    pub fn handle_event(&mut self, event: &StoreEvent) -> bool {
        if !self.is_active() {
            return false;
        }
        match filter_event(self.props.key, self.selected, event) {
            FilterOutcome::Ignore => {
                trace!(key = %self.props.key, ?event, "event ignored");
                false
            }
            FilterOutcome::ForceRederive => {
                self.force_update = true;
                self.scheduled += 1;
                true
            }
            FilterOutcome::SetSelected(selected) => {
                self.selected = selected;
                self.scheduled += 1;
                true
            }
        }
    }

    /// Replace the props. Returns whether the change lets a pass through.
    pub fn set_props(&mut self, props: RenderProps) -> bool {
        self.props = props;
        self.needs_render()
    }

    pub fn needs_render(&self) -> bool {
        self.force_update || should_rederive(self.last_pass.as_ref(), &self.gate_state())
    }

    /// Run a pass if one is due. Returns the new view when a pass ran.
    pub fn render_if_needed(&mut self, store: &dyn MessageStore) -> Option<&MessageView> {
        if !self.is_active() || !self.needs_render() {
            return None;
        }

        let record = store.get(self.props.key);
        let view = view::derive(record.as_ref(), self.selected, &self.props, store);
        self.last_pass = Some(self.gate_state());
        self.force_update = false;
        self.passes += 1;
        debug!(key = %self.props.key, pass = self.passes, empty = record.is_none(), "row derived");

        self.view = Some(view);
        self.view.as_ref()
    }

    /// Resolve a click and hand the intent, if any, to `dispatcher`.
    pub fn click(
        &self,
        hit: &PointerHit,
        store: &dyn MessageStore,
        policy: &dyn ChatPolicy,
        dispatcher: &dyn CommandDispatcher,
    ) -> Option<Intent> {
        let intent = gesture::resolve(hit, self.props.key, store, policy)?;
        dispatcher.dispatch(intent.clone());
        Some(intent)
    }

    fn gate_state(&self) -> GateState {
        GateState::new(&self.props, self.selected)
    }
}

impl Drop for MessageRow {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::RecordingDispatcher;
    use crate::message::{ChatRecord, MessageRecord, MessageSender};
    use crate::protocol::UserId;
    use crate::store::InMemoryStore;

    fn props(key: MessageKey) -> RenderProps {
        RenderProps {
            theme: ThemeId::Dark,
            key,
            send_state: SendStateSummary::Hidden,
            show_unread_separator: false,
        }
    }

    fn setup() -> (InMemoryStore, MessageKey, MessageRow) {
        let store = InMemoryStore::new();
        store.insert_chat(ChatRecord::new(1, "General", true));
        let key = MessageKey::new(1, 10);
        store.insert_message(
            MessageRecord::new(key, MessageSender::User(UserId(3)), 0).with_text("hi"),
        );
        let mut row = MessageRow::new(props(key));
        row.activate(&store);
        (store, key, row)
    }

    #[test]
    fn test_activate_runs_first_pass() {
        let (store, key, row) = setup();
        assert!(row.is_active());
        assert_eq!(row.passes(), 1);
        assert_eq!(row.view().unwrap().key(), key);
        assert_eq!(store.bus().subscriber_count(), 1);
    }

    #[test]
    fn test_activate_twice_keeps_one_subscription() {
        let (store, _key, mut row) = setup();
        row.activate(&store);
        assert_eq!(store.bus().subscriber_count(), 1);
        assert_eq!(row.passes(), 1);
    }

    #[test]
    fn test_unrelated_events_do_nothing() {
        let (store, _key, mut row) = setup();
        let other = MessageKey::new(1, 11);
        store.insert_message(MessageRecord::new(other, MessageSender::User(UserId(3)), 0));

        store.edit_text(other, "changed", 5);
        store.set_views(other, 3);
        store.set_selected(other, true);

        assert_eq!(row.process_events(), 0);
        assert!(row.render_if_needed(&store).is_none());
        assert_eq!(row.passes(), 1);
        assert!(!row.is_selected());
    }

    #[test]
    fn test_edit_forces_a_pass() {
        let (store, key, mut row) = setup();
        store.edit_text(key, "edited text", 100);

        assert_eq!(row.process_events(), 1);
        let view = row.render_if_needed(&store).unwrap();
        let model = view.model().unwrap();
        assert!(model.edited);
        assert_eq!(model.text.as_deref(), Some("edited text"));
        assert_eq!(row.passes(), 2);

        // Forced flag is consumed by the pass
        assert!(row.render_if_needed(&store).is_none());
    }

    #[test]
    fn test_view_count_forces_a_pass() {
        let (store, key, mut row) = setup();
        store.set_views(key, 8);
        assert_eq!(row.process_events(), 1);
        let view = row.render_if_needed(&store).unwrap();
        assert_eq!(view.model().unwrap().views, Some(8));
    }

    #[test]
    fn test_selection_changed_converges_to_store() {
        let (store, key, mut row) = setup();
        store.set_selected(key, true);
        row.process_events();
        assert!(row.is_selected());
        assert_eq!(row.is_selected(), store.is_selected(key));
        assert!(row.render_if_needed(&store).unwrap().model().unwrap().selected);

        store.set_selected(key, false);
        row.process_events();
        assert_eq!(row.is_selected(), store.is_selected(key));
    }

    #[test]
    fn test_selection_cleared_when_not_selected_is_noop() {
        let (_store, _key, mut row) = setup();
        assert!(!row.handle_event(&StoreEvent::SelectionCleared));
        assert!(!row.needs_render());
        assert_eq!(row.scheduled_passes(), 0);
    }

    #[test]
    fn test_selection_cleared_when_selected_runs_one_pass() {
        let (store, key, mut row) = setup();
        store.set_selected(key, true);
        row.process_events();
        row.render_if_needed(&store);
        let passes = row.passes();

        store.clear_selection();
        assert_eq!(row.process_events(), 1);
        assert!(!row.is_selected());
        assert!(row.render_if_needed(&store).is_some());
        assert!(row.render_if_needed(&store).is_none());
        assert_eq!(row.passes(), passes + 1);
    }

    #[test]
    fn test_gate_ignores_non_gated_record_changes() {
        let (store, key, mut row) = setup();
        // Mutated behind the row's back, no event published
        store.insert_message(
            MessageRecord::new(key, MessageSender::User(UserId(3)), 0).with_text("silent change"),
        );
        assert!(!row.set_props(props(key)));
        assert!(row.render_if_needed(&store).is_none());
        assert_eq!(
            row.view().unwrap().model().unwrap().text.as_deref(),
            Some("hi")
        );
    }

    #[test]
    fn test_prop_changes_pass_the_gate() {
        let (store, key, mut row) = setup();
        assert!(row.set_props(RenderProps {
            theme: ThemeId::Light,
            ..props(key)
        }));
        assert_eq!(
            row.render_if_needed(&store).unwrap().model().unwrap().theme,
            ThemeId::Light
        );

        assert!(row.set_props(RenderProps {
            theme: ThemeId::Light,
            show_unread_separator: true,
            ..props(key)
        }));
    }

    #[test]
    fn test_deactivate_releases_and_cancels() {
        let (store, key, mut row) = setup();
        store.edit_text(key, "pending", 1);
        row.deactivate();

        assert!(!row.is_active());
        assert_eq!(store.bus().subscriber_count(), 0);
        assert_eq!(row.process_events(), 0);
        assert!(row.render_if_needed(&store).is_none());

        // Events after deactivation never reach the row
        store.set_selected(key, true);
        assert!(!row.handle_event(&StoreEvent::SelectionChanged { key, selected: true }));
        assert!(!row.is_selected());
    }

    #[test]
    fn test_drop_releases_subscription() {
        let (store, _key, row) = setup();
        assert_eq!(store.bus().subscriber_count(), 1);
        drop(row);
        assert_eq!(store.bus().subscriber_count(), 0);
    }

    #[test]
    fn test_reactivate_resubscribes() {
        let (store, key, mut row) = setup();
        row.deactivate();
        row.activate(&store);
        assert_eq!(store.bus().subscriber_count(), 1);

        store.set_selected(key, true);
        assert_eq!(row.process_events(), 1);
        assert!(row.is_selected());
    }

    #[test]
    fn test_reactivate_resyncs_selection_missed_while_inactive() {
        let (store, key, mut row) = setup();
        store.set_selected(key, true);
        row.process_events();
        row.render_if_needed(&store);
        assert!(row.is_selected());

        row.deactivate();
        store.clear_selection();
        row.activate(&store);

        assert!(!row.is_selected());
        assert_eq!(row.is_selected(), store.is_selected(key));
        assert!(!row.view().unwrap().model().unwrap().selected);
    }

    #[test]
    fn test_reactivate_rederives_edits_missed_while_inactive() {
        let (store, key, mut row) = setup();
        let passes = row.passes();

        row.deactivate();
        store.edit_text(key, "edited while inactive", 50);
        row.activate(&store);

        assert_eq!(row.passes(), passes + 1);
        let model = row.view().unwrap().model().unwrap();
        assert_eq!(model.text.as_deref(), Some("edited while inactive"));
        assert!(model.edited);
    }

    #[test]
    fn test_first_activation_picks_up_existing_selection() {
        let store = InMemoryStore::new();
        let key = MessageKey::new(1, 10);
        store.insert_message(MessageRecord::new(key, MessageSender::User(UserId(3)), 0));
        store.set_selected(key, true);

        let mut row = MessageRow::new(props(key));
        row.activate(&store);
        assert!(row.is_selected());
        assert_eq!(row.passes(), 1);
    }

    #[test]
    fn test_missing_record_renders_placeholder() {
        let store = InMemoryStore::new();
        let key = MessageKey::new(5, 5);
        let mut row = MessageRow::new(props(key));
        row.activate(&store);
        assert_eq!(
            row.view(),
            Some(&MessageView::Empty {
                key,
                selected: false
            })
        );
    }

    #[test]
    fn test_click_dispatches_resolved_intent() {
        let (store, key, row) = setup();
        let dispatcher = RecordingDispatcher::default();

        let intent = row.click(&PointerHit::row(false), &store, &store, &dispatcher);
        assert_eq!(intent, Some(Intent::SetSelection { key, selected: true }));

        assert_eq!(row.click(&PointerHit::row(true), &store, &store, &dispatcher), None);
        assert_eq!(
            dispatcher.intents.borrow().as_slice(),
            &[Intent::SetSelection { key, selected: true }]
        );
    }
}
