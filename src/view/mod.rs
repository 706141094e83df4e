//! Rendering
//!
//! Turns page view-models into output. Pages never render; front ends pick a
//! renderer and feed it what the pages return.

mod html;
mod terminal;

pub use html::HtmlRenderer;
pub use terminal::TerminalRenderer;

use std::io;

use crate::notice::Notice;
use crate::pages::{ChartView, ChatEntry, ReportPanel, SessionsView};

/// Output sink for page view-models
pub trait Render {
    fn chat_entry(&mut self, entry: &ChatEntry) -> io::Result<()>;

    fn notice(&mut self, notice: &Notice) -> io::Result<()>;

    fn mood_chart(&mut self, chart: &ChartView) -> io::Result<()>;

    fn sessions(&mut self, sessions: &SessionsView) -> io::Result<()>;

    fn report(&mut self, report: &ReportPanel) -> io::Result<()>;

    fn transcript(&mut self, entries: &[ChatEntry]) -> io::Result<()> {
        for entry in entries {
            self.chat_entry(entry)?;
        }
        Ok(())
    }
}
