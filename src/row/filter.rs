//! Decides what a store event means for one row.

use crate::protocol::{MessageKey, StoreEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Not about this row, or nothing would change
    Ignore,
    /// Record metadata changed; re-derive even though no gated field did
    ForceRederive,
    /// New local selection flag, taken verbatim from the event
    SetSelected(bool),
}

/// Classify `event` for the row identified by `key` whose local selection
/// flag is currently `selected`.
pub fn filter_event(key: MessageKey, selected: bool, event: &StoreEvent) -> FilterOutcome {
    match event {
        StoreEvent::MessageEdited { key: k } | StoreEvent::ViewCountChanged { key: k } => {
            if *k == key {
                FilterOutcome::ForceRederive
            } else {
                FilterOutcome::Ignore
            }
        }
        StoreEvent::SelectionChanged { key: k, selected: value } => {
            if *k == key {
                FilterOutcome::SetSelected(*value)
            } else {
                FilterOutcome::Ignore
            }
        }
        StoreEvent::SelectionCleared => {
            if selected {
                FilterOutcome::SetSelected(false)
            } else {
                FilterOutcome::Ignore
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: MessageKey = MessageKey {
        chat_id: crate::protocol::ChatId(1),
        message_id: crate::protocol::MessageId(10),
    };

    #[test]
    fn test_edit_and_views_match_on_full_key() {
        for selected in [false, true] {
            assert_eq!(
                filter_event(KEY, selected, &StoreEvent::MessageEdited { key: KEY }),
                FilterOutcome::ForceRederive
            );
            assert_eq!(
                filter_event(KEY, selected, &StoreEvent::ViewCountChanged { key: KEY }),
                FilterOutcome::ForceRederive
            );
        }

        // Same message id in another chat, same chat with another id
        for other in [MessageKey::new(2, 10), MessageKey::new(1, 11)] {
            assert_eq!(
                filter_event(KEY, false, &StoreEvent::MessageEdited { key: other }),
                FilterOutcome::Ignore
            );
            assert_eq!(
                filter_event(KEY, true, &StoreEvent::ViewCountChanged { key: other }),
                FilterOutcome::Ignore
            );
        }
    }

    #[test]
    fn test_selection_changed_value_is_verbatim() {
        assert_eq!(
            filter_event(KEY, false, &StoreEvent::SelectionChanged { key: KEY, selected: true }),
            FilterOutcome::SetSelected(true)
        );
        assert_eq!(
            filter_event(KEY, false, &StoreEvent::SelectionChanged { key: KEY, selected: false }),
            FilterOutcome::SetSelected(false)
        );
        assert_eq!(
            filter_event(
                KEY,
                true,
                &StoreEvent::SelectionChanged {
                    key: MessageKey::new(1, 12),
                    selected: false
                }
            ),
            FilterOutcome::Ignore
        );
    }

    #[test]
    fn test_selection_cleared_is_idempotent() {
        assert_eq!(
            filter_event(KEY, true, &StoreEvent::SelectionCleared),
            FilterOutcome::SetSelected(false)
        );
        assert_eq!(
            filter_event(KEY, false, &StoreEvent::SelectionCleared),
            FilterOutcome::Ignore
        );
    }
}
