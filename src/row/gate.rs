//! Re-render gate: decides whether a row may re-derive its view.

use crate::message::SendStateSummary;
use crate::protocol::MessageKey;

use super::{RenderProps, ThemeId};

/// The only inputs whose change lets a re-derivation through on its own.
/// Anything else reaches a row as a store event and forces the pass instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateState {
    pub theme: ThemeId,
    pub key: MessageKey,
    pub send_state: SendStateSummary,
    pub show_unread_separator: bool,
    pub selected: bool,
}

impl GateState {
    pub fn new(props: &RenderProps, selected: bool) -> Self {
        Self {
            theme: props.theme,
            key: props.key,
            send_state: props.send_state,
            show_unread_separator: props.show_unread_separator,
            selected,
        }
    }
}

/// `prev` is `None` before the first pass.
pub fn should_rederive(prev: Option<&GateState>, next: &GateState) -> bool {
    prev != Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> GateState {
        GateState {
            theme: ThemeId::Dark,
            key: MessageKey::new(1, 1),
            send_state: SendStateSummary::Hidden,
            show_unread_separator: false,
            selected: false,
        }
    }

    #[test]
    fn test_first_pass_always_runs() {
        assert!(should_rederive(None, &base()));
    }

    #[test]
    fn test_unchanged_fields_skip() {
        let prev = base();
        assert!(!should_rederive(Some(&prev), &base()));
    }

    #[test]
    fn test_each_gated_field_triggers() {
        let prev = base();
        let changes = [
            GateState { theme: ThemeId::Light, ..base() },
            GateState { key: MessageKey::new(1, 2), ..base() },
            GateState { send_state: SendStateSummary::Pending, ..base() },
            GateState { show_unread_separator: true, ..base() },
            GateState { selected: true, ..base() },
        ];
        for next in changes {
            assert!(should_rederive(Some(&prev), &next), "{:?}", next);
        }
    }
}
