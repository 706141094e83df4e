//! Data Transfer Objects
//!
//! Request and response types for the MoodMate REST API. Response types are
//! lenient: fields the backend may omit carry `#[serde(default)]`.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

// ============ Identifiers ============

/// Opaque identifier assigned by the backend
///
/// Kept in the wire form it arrived in (string or integer) so it is sent back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

/// Identifier of a chat session
pub type SessionId = RecordId;

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId::Text(id.into())
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

// ============ Lenient numbers ============

/// Number or numeric string; anything else is `None`
fn loose_number(value: serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(loose_number(value)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round() as u32))
}

fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    loose_number(value).ok_or_else(|| de::Error::custom("expected a number or numeric string"))
}

// ============ Config ============

/// AI provider settings stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    pub api_url: String,
    /// Responses usually omit the key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfigStatus {
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub config: Option<ApiSettings>,
}

impl ConfigStatus {
    /// The stored settings, if the backend reports any
    pub fn into_settings(self) -> Option<ApiSettings> {
        if self.exists {
            self.config
        } else {
            None
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveConfigRequest<'a> {
    pub api_url: &'a str,
    pub api_key: &'a str,
    pub model_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SaveConfigResponse {
    pub config: Option<ApiSettings>,
}

// ============ Chat ============

/// One prior turn passed along with a chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub message: &'a str,
    pub session_id: &'a SessionId,
    pub history: &'a [HistoryEntry],
}

#[derive(Debug, Deserialize)]
pub struct ChatReply {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    pub id: SessionId,
    #[serde(default)]
    pub session_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionRequest<'a> {
    pub session_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub session: Session,
}

#[derive(Debug, Deserialize)]
pub struct SessionListResponse {
    #[serde(default)]
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub session_id: Option<SessionId>,
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<&ChatMessage> for HistoryEntry {
    fn from(message: &ChatMessage) -> Self {
        HistoryEntry {
            role: message.role.clone(),
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MessageListResponse {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

// ============ Mood ============

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodEntry {
    pub mood_score: i32,
    pub mood_type: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoodRecord {
    pub mood_score: i32,
    #[serde(default)]
    pub mood_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoodRecordListResponse {
    #[serde(default)]
    pub records: Vec<MoodRecord>,
}

/// Average mood for one day of a trend period
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoodTrend {
    pub date: String,
    #[serde(deserialize_with = "lenient_score")]
    pub average_score: f64,
}

#[derive(Debug, Deserialize)]
pub struct MoodTrendResponse {
    #[serde(default)]
    pub trends: Vec<MoodTrend>,
}

// ============ Exercises ============

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExerciseType {
    #[serde(alias = "type", alias = "exercise_type")]
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ExerciseType {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }
}

#[derive(Debug, Deserialize)]
pub struct ExerciseTypeListResponse {
    #[serde(default)]
    pub types: Vec<ExerciseType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExercise {
    pub exercise_type: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Exercise {
    pub exercise_type: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseListResponse {
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

// ============ Reports ============

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Report {
    pub period_start: String,
    pub period_end: String,
    #[serde(default)]
    pub mood_summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub chat_frequency: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub exercises_completed: Option<u32>,
    #[serde(default)]
    pub recommendations: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportResponse {
    pub report: Report,
}

#[derive(Debug, Deserialize)]
pub struct ReportListResponse {
    #[serde(default)]
    pub reports: Vec<Report>,
}

// ============ Auth ============

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Kept opaque; stored as-is in the local store
    #[serde(default)]
    pub user: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_id_accepts_numbers_and_strings() {
        let s: Session = serde_json::from_value(json!({"id": 42, "session_name": "a"})).unwrap();
        assert_eq!(s.id, SessionId::from(42));
        assert_eq!(s.id.to_string(), "42");

        let s: Session = serde_json::from_value(json!({"id": "f3c1"})).unwrap();
        assert_eq!(s.id, SessionId::new("f3c1"));
        assert_eq!(s.session_name, None);
    }

    #[test]
    fn test_session_id_serializes_back_to_wire_type() {
        for wire in [json!(42), json!("42"), json!("007"), json!("f3c1")] {
            let id: SessionId = serde_json::from_value(wire.clone()).unwrap();
            assert_eq!(serde_json::to_value(&id).unwrap(), wire);
        }
    }

    #[test]
    fn test_config_status_without_config() {
        let status: ConfigStatus = serde_json::from_value(json!({"exists": false})).unwrap();
        assert!(status.into_settings().is_none());

        let status: ConfigStatus = serde_json::from_value(json!({
            "exists": true,
            "config": {"api_url": "https://llm.example", "model_name": "glm-4"}
        }))
        .unwrap();
        let settings = status.into_settings().unwrap();
        assert_eq!(settings.model_name, "glm-4");
        assert_eq!(settings.api_key, None);
    }

    #[test]
    fn test_exercise_type_key_aliases() {
        let t: ExerciseType = serde_json::from_value(json!({"type": "breathing"})).unwrap();
        assert_eq!(t.display_name(), "breathing");

        let t: ExerciseType =
            serde_json::from_value(json!({"key": "gratitude", "name": "Gratitude journal"})).unwrap();
        assert_eq!(t.display_name(), "Gratitude journal");
    }

    #[test]
    fn test_report_defaults() {
        let r: Report = serde_json::from_value(json!({
            "period_start": "2026-10-12",
            "period_end": "2026-10-19"
        }))
        .unwrap();
        assert_eq!(r.chat_frequency, None);
        assert_eq!(r.recommendations, None);
    }

    #[test]
    fn test_report_counts_accept_strings_and_floats() {
        let r: Report = serde_json::from_value(json!({
            "period_start": "2026-10-12",
            "period_end": "2026-10-19",
            "chat_frequency": "4",
            "exercises_completed": 2.0
        }))
        .unwrap();
        assert_eq!(r.chat_frequency, Some(4));
        assert_eq!(r.exercises_completed, Some(2));

        let r: Report = serde_json::from_value(json!({
            "period_start": "2026-10-12",
            "period_end": "2026-10-19",
            "chat_frequency": null,
            "exercises_completed": "n/a"
        }))
        .unwrap();
        assert_eq!(r.chat_frequency, None);
        assert_eq!(r.exercises_completed, None);
    }

    #[test]
    fn test_trend_average_accepts_numeric_string() {
        let t: MoodTrend =
            serde_json::from_value(json!({"date": "2026-10-18", "average_score": "6.50"})).unwrap();
        assert_eq!(t.average_score, 6.5);

        let bad = serde_json::from_value::<MoodTrend>(json!({"date": "2026-10-18", "average_score": "high"}));
        assert!(bad.is_err());
    }
}
