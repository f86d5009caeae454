//! Follow-up reminder models.

use serde::{Deserialize, Serialize};

/// Reminder lifecycle. Pending entries are either completed on the day or
/// marked missed; both outcomes are final.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FollowUpStatus {
    Pending,
    Completed,
    Missed,
}

impl FollowUpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUpStatus::Pending => "pending",
            FollowUpStatus::Completed => "completed",
            FollowUpStatus::Missed => "missed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(FollowUpStatus::Pending),
            "completed" => Some(FollowUpStatus::Completed),
            "missed" => Some(FollowUpStatus::Missed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, FollowUpStatus::Pending)
    }
}

/// A scheduled follow-up visit reminder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FollowUpReminder {
    /// Surrogate row id (0 until inserted)
    pub id: i64,
    pub patient_id: i64,
    pub case_id: Option<i64>,
    pub appointment_id: Option<i64>,
    /// Calendar date, `YYYY-MM-DD`
    pub follow_up_date: String,
    pub status: FollowUpStatus,
    /// Free follow-up within the paid consultation window
    pub is_free: bool,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl FollowUpReminder {
    pub fn new(patient_id: i64, follow_up_date: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            patient_id,
            case_id: None,
            appointment_id: None,
            follow_up_date,
            status: FollowUpStatus::Pending,
            is_free: false,
            notes: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
