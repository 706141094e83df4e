//! Terminal renderer

use colored::Colorize;
use std::io::{self, Write};

use super::Render;
use crate::format::format_date_time;
use crate::notice::{Notice, NoticeKind};
use crate::pages::{ChartView, ChatEntry, EntryRole, ReportPanel, SessionsView};

/// Width of a full-scale bar in the mood chart
const BAR_WIDTH: f64 = 30.0;

pub struct TerminalRenderer<W> {
    out: W,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Render for TerminalRenderer<W> {
    fn chat_entry(&mut self, entry: &ChatEntry) -> io::Result<()> {
        let who = match entry.role {
            EntryRole::User => "you".cyan().bold(),
            EntryRole::Assistant => "assistant".green().bold(),
        };
        let content = if entry.is_error {
            entry.content.red().to_string()
        } else {
            entry.content.clone()
        };
        writeln!(
            self.out,
            "{} {} {}",
            format!("[{}]", format_date_time(entry.at)).dimmed(),
            who,
            content
        )
    }

    fn notice(&mut self, notice: &Notice) -> io::Result<()> {
        let line = match notice.kind {
            NoticeKind::Success => format!("✓ {}", notice.text).green(),
            NoticeKind::Error => format!("✕ {}", notice.text).red(),
            NoticeKind::Info => format!("ℹ {}", notice.text).blue(),
        };
        writeln!(self.out, "{}", line)
    }

    fn mood_chart(&mut self, chart: &ChartView) -> io::Result<()> {
        match chart {
            ChartView::Empty => writeln!(self.out, "No mood data yet"),
            ChartView::Failed(message) => writeln!(
                self.out,
                "{}",
                format!("Failed to load: {} (make sure the backend server is running)", message).red()
            ),
            ChartView::Series {
                labels,
                scores,
                y_max,
            } => {
                writeln!(self.out, "{}", "Mood score".bold())?;
                for (label, score) in labels.iter().zip(scores) {
                    let filled = ((score / y_max).clamp(0.0, 1.0) * BAR_WIDTH).round() as usize;
                    writeln!(
                        self.out,
                        "{:<8} {} {:.1}",
                        label,
                        "█".repeat(filled).blue(),
                        score
                    )?;
                }
                Ok(())
            }
        }
    }

    fn sessions(&mut self, sessions: &SessionsView) -> io::Result<()> {
        match sessions {
            SessionsView::Empty => writeln!(self.out, "No sessions yet"),
            SessionsView::Failed(message) => {
                writeln!(self.out, "{}", format!("Failed to load: {}", message).red())
            }
            SessionsView::List(list) => {
                for session in list {
                    writeln!(self.out, "  {:<40} {}", session.name, session.created.dimmed())?;
                }
                Ok(())
            }
        }
    }

    fn report(&mut self, report: &ReportPanel) -> io::Result<()> {
        match report {
            ReportPanel::Failed => writeln!(self.out, "{}", "Failed to generate report".red()),
            ReportPanel::Ready(view) => {
                writeln!(
                    self.out,
                    "{}",
                    format!("{} to {}", view.period_start, view.period_end).bold()
                )?;
                writeln!(self.out, "  Mood trend:          {}", view.mood_summary)?;
                writeln!(self.out, "  Chats:               {}", view.chat_frequency)?;
                writeln!(self.out, "  Exercises completed: {}", view.exercises_completed)?;
                writeln!(self.out, "  Recommendations:     {}", view.recommendations)
            }
        }
    }
}
