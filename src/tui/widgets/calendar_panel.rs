/// CalendarPanel widget - the popover month grid
///
/// Renders the navigation header, weekday row and day cells inside a border.
/// Cell positions come from `PanelLayout`, the same geometry the router uses
/// for hit-testing, so what is drawn is what gets clicked.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Widget},
};

use crate::calendar;
use crate::config::ThemeConfig;
use crate::grid::{CalendarDay, CalendarGrid};
use crate::picker::SelectionContext;
use crate::tui::layout::{month_title, PanelLayout};

pub struct CalendarPanel<'a> {
    grid: &'a CalendarGrid,
    context: &'a SelectionContext,
    theme: &'a ThemeConfig,
}

impl<'a> CalendarPanel<'a> {
    pub fn new(
        grid: &'a CalendarGrid,
        context: &'a SelectionContext,
        theme: &'a ThemeConfig,
    ) -> Self {
        Self { grid, context, theme }
    }

    fn render_header(&self, layout: &PanelLayout, buf: &mut Buffer) {
        let title = month_title(self.grid);
        let inner = layout.inner();

        if inner.height > 0 {
            let prev = layout.previous_button();
            buf.set_string(prev.x + 1, prev.y, "<", Style::default());
            let next = layout.next_button();
            buf.set_string(next.x + 1, next.y, ">", Style::default());

            buf.set_string(
                layout.title_x(&title),
                inner.y,
                &title,
                Style::default().add_modifier(Modifier::BOLD),
            );

            if let Some(jump) = self.grid.today_jump() {
                let marker = layout.today_button(jump, &title);
                let style = Style::default().fg(self.theme.today_fg);
                buf.set_string(marker.x, marker.y, "•", style);
            }
        }

        if layout.weekday_row() < inner.bottom() {
            for (i, label) in self.grid.weekday_headers().iter().enumerate() {
                let cell = layout.day_cell(0, i);
                let text = format!(" {:>2} ", label);
                buf.set_string(cell.x, layout.weekday_row(), text, Style::default());
            }
        }
    }

    /// Whether the range band passes through this date
    fn in_band(&self, date: chrono::NaiveDate) -> bool {
        let has_end = self.context.range_end.is_some();
        self.context.is_range_between(date)
            || (self.context.is_range_start(date) && has_end)
            || self.context.is_range_end(date)
    }

    fn digits_style(&self, day: &CalendarDay) -> Style {
        let mut style = Style::default();
        if !day.is_current_month {
            style = style.fg(Color::DarkGray);
        }
        if self.in_band(day.date) {
            style = style.bg(self.theme.range_bg);
        }
        if day.is_today {
            style = style.fg(self.theme.today_fg).add_modifier(Modifier::UNDERLINED);
        }
        if self.context.is_range_start_or_end(day.date) {
            style = style
                .fg(Color::Black)
                .bg(self.theme.selection_fg)
                .add_modifier(Modifier::BOLD);
        }
        style
    }

    fn render_day(&self, day: &CalendarDay, cell: Rect, buf: &mut Buffer) {
        let band = Style::default().bg(self.theme.range_bg);
        let in_band = self.in_band(day.date);

        // The band stops at week edges and at the range endpoints
        let lead_banded = in_band
            && !calendar::is_monday(day.date)
            && !self.context.is_range_start(day.date);
        let trail_banded = in_band
            && !calendar::is_sunday(day.date)
            && !self.context.is_range_end(day.date);

        let lead = if lead_banded { band } else { Style::default() };
        let trail = if trail_banded { band } else { Style::default() };

        buf.set_string(cell.x, cell.y, " ", lead);
        buf.set_string(
            cell.x + 1,
            cell.y,
            format!("{:>2}", chrono::Datelike::day(&day.date)),
            self.digits_style(day),
        );
        buf.set_string(cell.x + 3, cell.y, " ", trail);
    }
}

impl Widget for CalendarPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::bordered().render(area, buf);
        let layout = PanelLayout::new(area);

        self.render_header(&layout, buf);

        for (w, week) in self.grid.weeks().iter().enumerate() {
            for (d, day) in week.days.iter().enumerate() {
                let cell = layout.day_cell(w, d);
                if cell.bottom() <= layout.inner().bottom() {
                    self.render_day(day, cell, buf);
                }
            }
        }
    }
}
