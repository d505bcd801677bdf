//! Command picker state machine: `Closed -> Open -> Closed`.

use super::commands::{SlashCommand, filter_commands};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CommandPicker {
    #[default]
    Closed,
    Open {
        /// Char offset of the `/` that opened the picker.
        anchor: usize,
        /// Text typed after the slash.
        query: String,
        /// Index into the filtered command list.
        highlighted: usize,
    },
}

impl CommandPicker {
    pub fn is_open(&self) -> bool {
        matches!(self, CommandPicker::Open { .. })
    }

    pub fn anchor(&self) -> Option<usize> {
        match self {
            CommandPicker::Open { anchor, .. } => Some(*anchor),
            CommandPicker::Closed => None,
        }
    }

    /// Commands listed by the picker; empty when closed.
    pub fn matches(&self) -> Vec<&'static SlashCommand> {
        match self {
            CommandPicker::Open { query, .. } => filter_commands(query),
            CommandPicker::Closed => Vec::new(),
        }
    }

    pub fn highlighted(&self) -> Option<&'static SlashCommand> {
        match self {
            CommandPicker::Open { highlighted, .. } => self.matches().get(*highlighted).copied(),
            CommandPicker::Closed => None,
        }
    }

    pub(crate) fn open(&mut self, anchor: usize) {
        debug_assert!(!self.is_open());
        *self = CommandPicker::Open {
            anchor,
            query: String::new(),
            highlighted: 0,
        };
    }

    pub(crate) fn close(&mut self) {
        *self = CommandPicker::Closed;
    }

    /// Narrow the list to `query`. Closes the picker when nothing matches.
    pub(crate) fn set_query(&mut self, new_query: &str) {
        let CommandPicker::Open {
            query, highlighted, ..
        } = self
        else {
            return;
        };

        let count = filter_commands(new_query).len();
        if count == 0 {
            self.close();
            return;
        }
        *query = new_query.to_string();
        *highlighted = (*highlighted).min(count - 1);
    }

    /// Move the highlight, wrapping at both ends.
    pub(crate) fn cycle(&mut self, forward: bool) {
        let count = self.matches().len();
        if let CommandPicker::Open { highlighted, .. } = self {
            if count == 0 {
                return;
            }
            *highlighted = if forward {
                (*highlighted + 1) % count
            } else {
                (*highlighted + count - 1) % count
            };
        }
    }
}
