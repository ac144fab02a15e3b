// Module declarations
pub mod app;
pub mod layout;
pub mod router;
pub mod widgets;

pub use app::{Action, App};
pub use router::{InteractionRouter, Routed};

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use crate::config::Config;
use crate::error::PickerResult;
use crate::grid::CalendarGrid;
use crate::picker::{Selection, SelectionMode};

/// Main entry point for interactive mode
///
/// Returns the last committed selection, if any, once the user quits.
pub async fn run(
    mode: SelectionMode,
    grid: CalendarGrid,
    config: &Config,
) -> PickerResult<Option<Selection>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(mode, grid, config.theme.clone());
    let result = event_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result.map(|_| app.selection().copied())
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> PickerResult<()> {
    loop {
        // Render first so a committed selection is on screen before its
        // notification and completion callback run
        terminal.draw(|f| app.draw(f))?;

        let processed = app.process_deferred();
        if processed > 0 {
            tracing::debug!("LOOP: Processed {} deferred effects, redrawing", processed);
            continue;
        }

        if app.should_quit() {
            tracing::debug!("LOOP: Quitting");
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Key(key) => app.handle_key(key),
                _ => {}
            }
        }

        // Next turn of the cooperative loop
        tokio::task::yield_now().await;
    }
}
