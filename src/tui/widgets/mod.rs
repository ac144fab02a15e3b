pub mod calendar_panel;
pub mod trigger;

pub use calendar_panel::CalendarPanel;
pub use trigger::Trigger;
