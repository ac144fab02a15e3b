use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::debug;

use crate::config::ThemeConfig;
use crate::grid::CalendarGrid;
use crate::picker::{Callback, DatePicker, Selection, SelectionMode};
use crate::tui::layout::{panel_height, PanelLayout, PANEL_WIDTH};
use crate::tui::router::{InteractionRouter, Routed};
use crate::tui::widgets::{CalendarPanel, Trigger};

/// Application-level actions, sent by picker callbacks and the consumer hook
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ClosePanel,
    SelectionChanged(Selection),
}

/// Trigger line plus popover panel around one `DatePicker`
pub struct App {
    picker: DatePicker,
    router: InteractionRouter,
    theme: ThemeConfig,
    panel_open: bool,
    selection: Option<Selection>,
    should_quit: bool,
    /// Frame area of the last draw
    screen: Option<Rect>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(mode: SelectionMode, grid: CalendarGrid, theme: ThemeConfig) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let change_tx = action_tx.clone();
        let picker = DatePicker::new(
            mode,
            grid,
            Box::new(move |selection| {
                let _ = change_tx.send(Action::SelectionChanged(selection));
            }),
        );

        Self {
            picker,
            router: InteractionRouter::new(),
            theme,
            panel_open: false,
            selection: None,
            should_quit: false,
            screen: None,
            action_tx,
            action_rx,
        }
    }

    pub fn picker(&self) -> &DatePicker {
        &self.picker
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn trigger(&self) -> Trigger {
        Trigger::new(self.selection.as_ref(), self.picker.mode(), self.panel_open)
    }

    /// Screen area of the trigger line
    pub fn trigger_area(&self) -> Rect {
        Rect::new(0, 0, self.trigger().width(), 1)
    }

    /// Screen area of the popover panel, directly under the trigger,
    /// clipped to the last drawn frame
    pub fn panel_area(&self) -> Rect {
        let full = Rect::new(0, 1, PANEL_WIDTH, panel_height(self.picker.weeks().len()));
        match self.screen {
            Some(screen) => full.intersection(screen),
            None => full,
        }
    }

    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let screen = frame.area();
        self.screen = Some(screen);
        frame.render_widget(self.trigger(), self.trigger_area().intersection(screen));
        if self.panel_open {
            let panel = CalendarPanel::new(self.picker.grid(), self.picker.context(), &self.theme);
            frame.render_widget(panel, self.panel_area());
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let trigger = self.trigger_area();
        let on_trigger = mouse.row == trigger.y
            && mouse.column >= trigger.x
            && mouse.column < trigger.right();
        if on_trigger && mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            self.toggle_panel();
            return;
        }

        if !self.panel_open {
            return;
        }

        let layout = PanelLayout::new(self.panel_area());
        let on_committed = close_callback(self.action_tx.clone());
        let routed = self
            .router
            .route(&mouse, &layout, self.picker.grid(), &on_committed);

        match routed {
            Some(Routed::Picker(event)) => self.picker.dispatch(event),
            Some(Routed::PreviousMonth) => self.picker.go_to_previous_month(),
            Some(Routed::NextMonth) => self.picker.go_to_next_month(),
            Some(Routed::Today) => self.picker.go_to_today(),
            None => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Esc if self.panel_open => self.close_panel(),
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn toggle_panel(&mut self) {
        if self.panel_open {
            self.close_panel();
        } else {
            debug!("APP: Opening panel");
            self.panel_open = true;
        }
    }

    fn close_panel(&mut self) {
        debug!("APP: Closing panel");
        self.panel_open = false;
        self.router.reset();
    }

    /// Run the picker's deferred effects, then apply the actions they sent
    ///
    /// Returns the number of deferred effects and actions processed.
    pub fn process_deferred(&mut self) -> usize {
        let mut count = self.picker.process_deferred();
        while let Ok(action) = self.action_rx.try_recv() {
            match action {
                Action::ClosePanel => self.close_panel(),
                Action::SelectionChanged(selection) => {
                    debug!("APP: Selection changed to {}", selection);
                    self.selection = Some(selection);
                }
            }
            count += 1;
        }
        count
    }
}

/// Completion hook factory: each click gets a callback that closes the panel
fn close_callback(tx: mpsc::UnboundedSender<Action>) -> impl Fn() -> Callback {
    move || {
        let tx = tx.clone();
        Box::new(move || {
            let _ = tx.send(Action::ClosePanel);
        }) as Callback
    }
}
