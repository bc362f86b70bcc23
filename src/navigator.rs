use std::ops::Range;

use crate::constant::PAGE_STEP;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Up,
    Down,
    PageUp,
    PageDown,
}

impl Motion {
    fn step(self) -> usize {
        match self {
            Motion::Up | Motion::Down => 1,
            Motion::PageUp | Motion::PageDown => PAGE_STEP,
        }
    }
}

/// Selection within the entry list plus the 1-based screen row it sits on.
///
/// While the list is non-empty the viewport keeps
/// `selected < len`, `1 <= offset <= visible_rows` and `offset - 1 <= selected`,
/// so the first visible entry is always `selected - (offset - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    selected: usize,
    offset: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            selected: 0,
            offset: 1,
        }
    }
}

impl Viewport {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Moves the selection. Backward moves stop at the first entry; a forward
    /// move that would run past the last entry is dropped entirely.
    pub fn apply(&mut self, motion: Motion, len: usize, visible_rows: usize) {
        if len == 0 {
            return;
        }
        let visible_rows = visible_rows.max(1);
        let step = motion.step();

        match motion {
            Motion::Up | Motion::PageUp => {
                self.selected = self.selected.saturating_sub(step);
                self.offset = self.offset.saturating_sub(step).max(1);
            }
            Motion::Down | Motion::PageDown => {
                if self.selected + step <= len - 1 {
                    self.selected += step;
                    self.offset = (self.offset + step).min(visible_rows);
                }
            }
        }
    }

    /// Pulls the highlighted row back on screen after the row count shrinks.
    pub fn fit(&mut self, visible_rows: usize) {
        self.offset = self.offset.min(visible_rows.max(1));
    }

    pub fn first_visible(&self) -> usize {
        self.selected - (self.offset - 1)
    }

    /// 0-based screen row of the selection.
    pub fn highlighted_row(&self) -> usize {
        self.offset - 1
    }

    pub fn visible_range(&self, len: usize, visible_rows: usize) -> Range<usize> {
        let start = self.first_visible().min(len);
        let end = (start + visible_rows).min(len);
        start..end
    }
}
