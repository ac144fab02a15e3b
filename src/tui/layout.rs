//! Panel geometry shared by rendering and pointer hit-testing.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::grid::{CalendarGrid, TodayJump, DAYS_PER_WEEK};

/// Terminal columns per day cell (" 16 ")
pub const CELL_WIDTH: u16 = 4;

/// Inner panel width: one row of day cells
pub const INNER_WIDTH: u16 = CELL_WIDTH * DAYS_PER_WEEK as u16;

/// Outer panel width including the border
pub const PANEL_WIDTH: u16 = INNER_WIDTH + 2;

/// Header row plus weekday row, above the weeks
const HEADER_ROWS: u16 = 2;

/// Outer panel height for a grid with `weeks` rows
pub fn panel_height(weeks: usize) -> u16 {
    HEADER_ROWS + weeks as u16 + 2
}

/// Month title shown between the navigation arrows
pub fn month_title(grid: &CalendarGrid) -> String {
    grid.cursor().format("%B %Y").to_string()
}

/// Something clickable inside the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    PreviousMonth,
    NextMonth,
    Today,
    /// (week index, weekday index)
    Day(usize, usize),
}

/// Positions of the panel's controls and cells for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    inner: Rect,
}

impl PanelLayout {
    /// Layout for a bordered panel occupying `area`
    pub fn new(area: Rect) -> Self {
        let inner = Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        Self { inner }
    }

    pub fn inner(&self) -> Rect {
        self.inner
    }

    pub fn previous_button(&self) -> Rect {
        Rect::new(self.inner.x, self.inner.y, 3, 1)
    }

    pub fn next_button(&self) -> Rect {
        Rect::new(self.inner.right().saturating_sub(3), self.inner.y, 3, 1)
    }

    /// Column where a title of `title` is drawn, centered in the header
    pub fn title_x(&self, title: &str) -> u16 {
        let width = title.width() as u16;
        self.inner.x + self.inner.width.saturating_sub(width) / 2
    }

    /// The "jump to current month" marker, left of the title when the cursor
    /// is ahead of today, right of it when behind
    pub fn today_button(&self, jump: TodayJump, title: &str) -> Rect {
        let title_x = self.title_x(title);
        let x = match jump {
            TodayJump::Backward => title_x.saturating_sub(2),
            TodayJump::Forward => title_x + title.width() as u16 + 1,
        };
        Rect::new(x, self.inner.y, 1, 1)
    }

    pub fn weekday_row(&self) -> u16 {
        self.inner.y + 1
    }

    pub fn day_cell(&self, week: usize, weekday: usize) -> Rect {
        Rect::new(
            self.inner.x + weekday as u16 * CELL_WIDTH,
            self.inner.y + HEADER_ROWS + week as u16,
            CELL_WIDTH,
            1,
        )
    }

    /// What sits under the terminal position (`column`, `row`)
    pub fn hit_test(&self, column: u16, row: u16, grid: &CalendarGrid) -> Option<Target> {
        let contains = |rect: Rect| {
            column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
        };

        if contains(self.previous_button()) {
            return Some(Target::PreviousMonth);
        }
        if contains(self.next_button()) {
            return Some(Target::NextMonth);
        }
        if let Some(jump) = grid.today_jump() {
            if contains(self.today_button(jump, &month_title(grid))) {
                return Some(Target::Today);
            }
        }

        let first_row = self.inner.y + HEADER_ROWS;
        if row < first_row || column < self.inner.x {
            return None;
        }
        let week = (row - first_row) as usize;
        let weekday = ((column - self.inner.x) / CELL_WIDTH) as usize;
        let in_grid = week < grid.weeks().len()
            && weekday < DAYS_PER_WEEK
            && grid.weeks()[week].days.len() > weekday;
        in_grid.then_some(Target::Day(week, weekday))
    }
}
