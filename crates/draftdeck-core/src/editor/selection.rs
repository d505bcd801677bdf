//! Two-phase caret restoration.
//!
//! Phase one records the intended selection when text is committed to the
//! store. Phase two runs after the view shows the new text and hands the
//! selection back, clamped to what was actually rendered.

/// Caret range in chars plus the vertical scroll offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
    pub scroll_top: u32,
}

impl Selection {
    pub fn caret(offset: usize, scroll_top: u32) -> Self {
        Self {
            start: offset,
            end: offset,
            scroll_top,
        }
    }

    pub fn clamped(self, len: usize) -> Self {
        let end = self.end.min(len);
        Self {
            start: self.start.min(end),
            end,
            scroll_top: self.scroll_top,
        }
    }
}

#[derive(Debug, Default)]
pub struct SelectionHolder {
    last: Selection,
    pending: Option<Selection>,
}

impl SelectionHolder {
    pub fn record(&mut self, selection: Selection) {
        self.last = selection;
        self.pending = Some(selection);
    }

    /// Most recent selection, whether or not it has been restored.
    pub fn last(&self) -> Selection {
        self.last
    }

    pub fn take(&mut self, rendered_len: usize) -> Option<Selection> {
        self.pending.take().map(|s| s.clamped(rendered_len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_is_one_shot_and_clamped() {
        let mut holder = SelectionHolder::default();
        holder.record(Selection {
            start: 4,
            end: 10,
            scroll_top: 120,
        });

        let restored = holder.take(6).unwrap();
        assert_eq!(restored, Selection { start: 4, end: 6, scroll_top: 120 });
        assert!(holder.take(6).is_none());
        assert_eq!(holder.last().end, 10);
    }
}
