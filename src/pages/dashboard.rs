//! Dashboard Page
//!
//! Mood entry, the weekly mood chart, recent sessions, exercises and reports.

use crate::api::{
    Exercise, ExerciseType, MoodEntry, MoodRecord, NewExercise, Report, Session, DEFAULT_PERIOD,
};
use crate::client::{ApiClient, Transport};
use crate::format::{format_relative_str, format_short_date};
use crate::notice::Notice;

/// Number of sessions shown in the recent list
pub const RECENT_SESSION_COUNT: usize = 5;

/// Upper bound of the mood chart's y axis
pub const MOOD_SCALE_MAX: f64 = 10.0;

/// Slider position the mood form resets to
pub const DEFAULT_MOOD_SCORE: i32 = 5;

/// Mood chart view-model
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    /// No trend data for the period
    Empty,
    Series {
        labels: Vec<String>,
        scores: Vec<f64>,
        y_max: f64,
    },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub name: String,
    /// Relative creation time ("3 hours ago"), empty when unknown
    pub created: String,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            name: session
                .session_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "New session".to_string()),
            created: session
                .created_at
                .as_deref()
                .map(format_relative_str)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionsView {
    Empty,
    List(Vec<SessionSummary>),
    Failed(String),
}

/// Report with display defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub period_start: String,
    pub period_end: String,
    pub mood_summary: String,
    pub chat_frequency: u32,
    pub exercises_completed: u32,
    pub recommendations: String,
}

impl From<Report> for ReportView {
    fn from(report: Report) -> Self {
        Self {
            period_start: report.period_start,
            period_end: report.period_end,
            mood_summary: report
                .mood_summary
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "No data yet".to_string()),
            chat_frequency: report.chat_frequency.unwrap_or(0),
            exercises_completed: report.exercises_completed.unwrap_or(0),
            recommendations: report
                .recommendations
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Keep using the platform".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportPanel {
    Ready(ReportView),
    Failed,
}

/// Page-scoped dashboard state
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Current chart; replaced on every reload
    pub chart: Option<ChartView>,
}

pub struct DashboardPage<'a, T> {
    client: &'a ApiClient<T>,
    state: DashboardState,
}

impl<'a, T: Transport> DashboardPage<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self {
            client,
            state: DashboardState::default(),
        }
    }

    pub fn chart(&self) -> Option<&ChartView> {
        self.state.chart.as_ref()
    }

    /// Record a mood entry and refresh the chart on success
    pub async fn record_mood(&mut self, score: i32, mood_type: &str, notes: &str) -> Notice {
        let entry = MoodEntry {
            mood_score: score,
            mood_type: mood_type.to_string(),
            notes: notes.to_string(),
        };

        match self.client.mood().record(&entry).await {
            Ok(_) => {
                self.load_chart().await;
                Notice::success("Mood recorded!")
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to record mood");
                Notice::error(format!("Failed to record mood: {}", e))
            }
        }
    }

    /// Load the weekly trend into the chart, replacing the previous one
    pub async fn load_chart(&mut self) -> &ChartView {
        self.load_chart_for(DEFAULT_PERIOD).await
    }

    pub async fn load_chart_for(&mut self, period: &str) -> &ChartView {
        let view = match self.client.mood().trends(period).await {
            Ok(trends) if trends.is_empty() => ChartView::Empty,
            Ok(trends) => ChartView::Series {
                labels: trends.iter().map(|t| format_short_date(&t.date)).collect(),
                scores: trends.iter().map(|t| t.average_score).collect(),
                y_max: MOOD_SCALE_MAX,
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to load mood chart");
                ChartView::Failed(e.to_string())
            }
        };

        self.state.chart.insert(view)
    }

    pub async fn mood_records(&self) -> Result<Vec<MoodRecord>, Notice> {
        self.client
            .mood()
            .records()
            .await
            .map_err(|e| Notice::error(format!("Failed to load mood records: {}", e)))
    }

    pub async fn recent_sessions(&self) -> SessionsView {
        match self.client.chat().sessions().await {
            Ok(sessions) if sessions.is_empty() => SessionsView::Empty,
            Ok(sessions) => SessionsView::List(
                sessions
                    .iter()
                    .take(RECENT_SESSION_COUNT)
                    .map(SessionSummary::from)
                    .collect(),
            ),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load recent sessions");
                SessionsView::Failed(e.to_string())
            }
        }
    }

    pub async fn exercise_types(&self) -> Result<Vec<ExerciseType>, Notice> {
        self.client
            .exercises()
            .types()
            .await
            .map_err(|e| Notice::error(format!("Failed to load exercises: {}", e)))
    }

    pub fn start_exercise(&self, exercise_type: &str) -> Notice {
        Notice::info(format!("Starting {} exercise", exercise_type))
    }

    /// Record a completed exercise
    pub async fn log_exercise(&self, exercise: &NewExercise) -> Notice {
        match self.client.exercises().create(exercise).await {
            Ok(_) => Notice::success("Exercise saved!"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to save exercise");
                Notice::error(format!("Failed to save exercise: {}", e))
            }
        }
    }

    pub async fn exercises(&self) -> Result<Vec<Exercise>, Notice> {
        self.client
            .exercises()
            .list()
            .await
            .map_err(|e| Notice::error(format!("Failed to load exercises: {}", e)))
    }

    pub async fn generate_report(&self) -> ReportPanel {
        self.generate_report_for(DEFAULT_PERIOD).await
    }

    pub async fn generate_report_for(&self, period: &str) -> ReportPanel {
        match self.client.reports().generate(period).await {
            Ok(report) => ReportPanel::Ready(report.into()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to generate report");
                ReportPanel::Failed
            }
        }
    }

    pub async fn reports(&self) -> Result<Vec<ReportView>, Notice> {
        self.client
            .reports()
            .list()
            .await
            .map(|reports| reports.into_iter().map(ReportView::from).collect())
            .map_err(|e| Notice::error(format!("Failed to load reports: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::transport::mock::MockTransport;
    use crate::client::ClientConfig;
    use serde_json::json;

    fn client(transport: MockTransport) -> ApiClient<MockTransport> {
        ApiClient::with_transport(ClientConfig::default(), transport)
    }

    #[tokio::test]
    async fn test_record_mood_reloads_chart() {
        let c = client(
            MockTransport::new()
                .reply_json(201, json!({"id": 1}))
                .reply_json(
                    200,
                    json!({"trends": [
                        {"date": "2026-10-17", "average_score": 4.0},
                        {"date": "2026-10-18", "average_score": 6.5}
                    ]}),
                ),
        );
        let mut page = DashboardPage::new(&c);

        let notice = page.record_mood(7, "happy", "").await;
        assert_eq!(notice, Notice::success("Mood recorded!"));
        assert_eq!(
            page.chart(),
            Some(&ChartView::Series {
                labels: vec!["Oct 17".to_string(), "Oct 18".to_string()],
                scores: vec![4.0, 6.5],
                y_max: 10.0,
            })
        );
        assert!(c.transport().requests()[1].url.ends_with("/mood/trends?period=week"));
    }

    #[tokio::test]
    async fn test_record_mood_failure_keeps_chart() {
        let c = client(MockTransport::new().reply_json(422, json!({"error": "mood_score out of range"})));
        let mut page = DashboardPage::new(&c);

        let notice = page.record_mood(11, "happy", "").await;
        assert!(notice.is_error());
        assert_eq!(notice.text, "Failed to record mood: mood_score out of range");
        assert!(page.chart().is_none());
        assert_eq!(c.transport().request_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_and_failed_chart() {
        let c = client(
            MockTransport::new()
                .reply_json(200, json!({"trends": []}))
                .reply_raw(500, "Internal Server Error", "oops"),
        );
        let mut page = DashboardPage::new(&c);

        assert_eq!(page.load_chart().await, &ChartView::Empty);
        assert_eq!(
            page.load_chart().await,
            &ChartView::Failed("HTTP 500: Internal Server Error".to_string())
        );
    }

    #[tokio::test]
    async fn test_recent_sessions_takes_five_with_default_names() {
        let sessions: Vec<serde_json::Value> = (1..=7)
            .map(|i| {
                if i == 2 {
                    json!({"id": i})
                } else {
                    json!({"id": i, "session_name": format!("Session {}", i)})
                }
            })
            .collect();
        let c = client(MockTransport::new().reply_json(200, json!({ "sessions": sessions })));
        let page = DashboardPage::new(&c);

        match page.recent_sessions().await {
            SessionsView::List(list) => {
                assert_eq!(list.len(), 5);
                assert_eq!(list[0].name, "Session 1");
                assert_eq!(list[1].name, "New session");
                assert_eq!(list[1].created, "");
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_report_defaults_and_failure() {
        let c = client(
            MockTransport::new()
                .reply_json(
                    200,
                    json!({"report": {"period_start": "2026-10-12", "period_end": "2026-10-19", "chat_frequency": 4}}),
                )
                .reply_json(500, json!({"error": "no data"})),
        );
        let page = DashboardPage::new(&c);

        match page.generate_report().await {
            ReportPanel::Ready(view) => {
                assert_eq!(view.chat_frequency, 4);
                assert_eq!(view.exercises_completed, 0);
                assert_eq!(view.mood_summary, "No data yet");
                assert_eq!(view.recommendations, "Keep using the platform");
            }
            ReportPanel::Failed => panic!("report should be ready"),
        }
        assert_eq!(page.generate_report().await, ReportPanel::Failed);
    }

    #[tokio::test]
    async fn test_log_exercise() {
        let c = client(MockTransport::new().reply_json(201, json!({"exercise": {"id": 1}})));
        let page = DashboardPage::new(&c);

        let exercise = NewExercise {
            exercise_type: "breathing".to_string(),
            content: "4-7-8, three rounds".to_string(),
            duration_minutes: Some(5),
        };
        assert_eq!(page.log_exercise(&exercise).await, Notice::success("Exercise saved!"));
        assert_eq!(page.start_exercise("breathing").text, "Starting breathing exercise");
    }
}
