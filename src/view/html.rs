//! HTML renderer
//!
//! Emits the chat page and dashboard markup. All backend- or user-supplied
//! text is escaped.

use std::io::{self, Write};

use super::Render;
use crate::format::{escape_html, format_date_time};
use crate::notice::{Notice, NoticeKind};
use crate::pages::{ChartView, ChatEntry, ReportPanel, SessionsView};

pub struct HtmlRenderer<W> {
    out: W,
}

impl<W: Write> HtmlRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Render for HtmlRenderer<W> {
    fn chat_entry(&mut self, entry: &ChatEntry) -> io::Result<()> {
        let class = if entry.is_error {
            format!("message {} error", entry.role.as_str())
        } else {
            format!("message {}", entry.role.as_str())
        };
        writeln!(
            self.out,
            r#"<div class="{}"><div>{}</div><div class="message-time">{}</div></div>"#,
            class,
            escape_html(&entry.content),
            format_date_time(entry.at)
        )
    }

    fn notice(&mut self, notice: &Notice) -> io::Result<()> {
        let class = match notice.kind {
            NoticeKind::Success => "success-message show",
            NoticeKind::Error => "error-message show",
            NoticeKind::Info => "info-message show",
        };
        writeln!(
            self.out,
            r#"<div class="{}" data-lifetime-ms="{}">{}</div>"#,
            class,
            notice.lifetime().as_millis(),
            escape_html(&notice.text)
        )
    }

    fn mood_chart(&mut self, chart: &ChartView) -> io::Result<()> {
        match chart {
            ChartView::Empty => writeln!(self.out, r#"<p class="chart-empty">No mood data yet</p>"#),
            ChartView::Failed(message) => writeln!(
                self.out,
                r#"<p class="chart-error">Failed to load: {}<br><small>Make sure the backend server is running</small></p>"#,
                escape_html(message)
            ),
            ChartView::Series {
                labels,
                scores,
                y_max,
            } => {
                writeln!(self.out, r#"<table class="mood-chart" data-y-max="{}">"#, y_max)?;
                writeln!(self.out, "<tr><th>Date</th><th>Mood score</th></tr>")?;
                for (label, score) in labels.iter().zip(scores) {
                    writeln!(
                        self.out,
                        "<tr><td>{}</td><td>{:.1}</td></tr>",
                        escape_html(label),
                        score
                    )?;
                }
                writeln!(self.out, "</table>")
            }
        }
    }

    fn sessions(&mut self, sessions: &SessionsView) -> io::Result<()> {
        match sessions {
            SessionsView::Empty => writeln!(self.out, "<p>No sessions yet</p>"),
            SessionsView::Failed(message) => writeln!(
                self.out,
                r#"<p class="error">Failed to load: {}</p>"#,
                escape_html(message)
            ),
            SessionsView::List(list) => {
                for session in list {
                    writeln!(
                        self.out,
                        r#"<div class="session"><a href="chat.html">{}</a><div class="session-time">{}</div></div>"#,
                        escape_html(&session.name),
                        escape_html(&session.created)
                    )?;
                }
                Ok(())
            }
        }
    }

    fn report(&mut self, report: &ReportPanel) -> io::Result<()> {
        match report {
            ReportPanel::Failed => writeln!(self.out, r#"<p class="error">Failed to generate report</p>"#),
            ReportPanel::Ready(view) => {
                writeln!(
                    self.out,
                    "<div class=\"report\"><h3>{} to {}</h3>",
                    escape_html(&view.period_start),
                    escape_html(&view.period_end)
                )?;
                writeln!(
                    self.out,
                    "<p><strong>Mood trend:</strong> {}</p>",
                    escape_html(&view.mood_summary)
                )?;
                writeln!(
                    self.out,
                    "<p><strong>Chats:</strong> {}</p>",
                    view.chat_frequency
                )?;
                writeln!(
                    self.out,
                    "<p><strong>Exercises completed:</strong> {}</p>",
                    view.exercises_completed
                )?;
                writeln!(
                    self.out,
                    "<p><strong>Recommendations:</strong> {}</p></div>",
                    escape_html(&view.recommendations)
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{ReportView, SessionSummary};

    fn render(f: impl FnOnce(&mut HtmlRenderer<Vec<u8>>) -> io::Result<()>) -> String {
        let mut renderer = HtmlRenderer::new(Vec::new());
        f(&mut renderer).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_chat_content_is_escaped() {
        let entry = ChatEntry::user("<script>alert(1)</script>");
        let html = render(|r| r.chat_entry(&entry));

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.starts_with(r#"<div class="message user">"#));
    }

    #[test]
    fn test_error_entry_class() {
        let entry = ChatEntry::error("Sorry, an error occurred: boom");
        let html = render(|r| r.chat_entry(&entry));
        assert!(html.starts_with(r#"<div class="message assistant error">"#));
    }

    #[test]
    fn test_session_names_are_escaped() {
        let view = SessionsView::List(vec![SessionSummary {
            name: "<b>mine</b>".to_string(),
            created: "just now".to_string(),
        }]);
        let html = render(|r| r.sessions(&view));
        assert!(html.contains("&lt;b&gt;mine&lt;/b&gt;"));
    }

    #[test]
    fn test_report_markup() {
        let panel = ReportPanel::Ready(ReportView {
            period_start: "2026-10-12".to_string(),
            period_end: "2026-10-19".to_string(),
            mood_summary: "Improving".to_string(),
            chat_frequency: 3,
            exercises_completed: 2,
            recommendations: "Sleep & hydrate".to_string(),
        });
        let html = render(|r| r.report(&panel));
        assert!(html.contains("<h3>2026-10-12 to 2026-10-19</h3>"));
        assert!(html.contains("Sleep &amp; hydrate"));

        let html = render(|r| r.report(&ReportPanel::Failed));
        assert!(html.contains("Failed to generate report"));
    }

    #[test]
    fn test_empty_chart() {
        let html = render(|r| r.mood_chart(&ChartView::Empty));
        assert!(html.contains("No mood data yet"));
    }
}
