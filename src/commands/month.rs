use chrono::Datelike;

use crate::grid::CalendarGrid;
use crate::tui::layout::CELL_WIDTH;

/// Plain-text month grid in the style of `cal`
///
/// Days outside the cursor month are left blank; today is marked with `*`.
pub fn format_month(grid: &CalendarGrid) -> String {
    let headers = grid.weekday_headers();
    let width = CELL_WIDTH as usize * headers.len();
    let title = format!("{:^width$}", grid.cursor().format("%B %Y").to_string(), width = width);

    let mut lines = vec![title.trim_end().to_string()];
    let header: String = headers.iter().map(|label| format!(" {:>2} ", label)).collect();
    lines.push(header.trim_end().to_string());

    for week in grid.weeks() {
        let line: String = week
            .days
            .iter()
            .map(|day| match (day.is_current_month, day.is_today) {
                (false, _) => "    ".to_string(),
                (true, true) => format!(" {:>2}*", day.date.day()),
                (true, false) => format!(" {:>2} ", day.date.day()),
            })
            .collect();
        lines.push(line.trim_end().to_string());
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

pub fn run(grid: &CalendarGrid) {
    print!("{}", format_month(grid));
}
