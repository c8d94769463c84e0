/// Bounded position over `[0, len)` used to step through hymn slides and
/// quick-display pages. Moves past either end are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn can_go_next(&self) -> bool {
        self.index + 1 < self.len
    }

    pub fn can_go_previous(&self) -> bool {
        self.index > 0
    }

    /// Advance one step. Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.can_go_next() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Step back one. Returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        if self.can_go_previous() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub fn first(&mut self) {
        self.index = 0;
    }

    pub fn last(&mut self) {
        self.index = self.len.saturating_sub(1);
    }

    /// 1-based `(current, total)` for "N of M" indicators.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.len)
    }
}
