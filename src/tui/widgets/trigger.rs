/// Trigger widget - the one-line button that opens and closes the panel
///
/// Shows the committed selection, or a placeholder before anything is picked.

use ratatui::{buffer::Buffer, layout::Rect, style::{Modifier, Style}, widgets::Widget};
use unicode_width::UnicodeWidthStr;

use crate::picker::{Selection, SelectionMode};

pub struct Trigger {
    label: String,
    open: bool,
}

impl Trigger {
    pub fn new(selection: Option<&Selection>, mode: SelectionMode, open: bool) -> Self {
        let label = match (selection, mode) {
            (Some(selection), _) => selection.to_string(),
            (None, SelectionMode::Single) => "Pick a date".to_string(),
            (None, SelectionMode::Range) => "Pick a date range".to_string(),
        };
        Self { label, open }
    }

    pub fn text(&self) -> String {
        let arrow = if self.open { "▴" } else { "▾" };
        format!("[ {} {} ]", self.label, arrow)
    }

    /// Columns the trigger occupies
    pub fn width(&self) -> u16 {
        self.text().width() as u16
    }
}

impl Widget for Trigger {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.open {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        buf.set_stringn(area.x, area.y, self.text(), area.width as usize, style);
    }
}
