//! Appointment models and the status machine.

use serde::{Deserialize, Serialize};

/// Appointment lifecycle. Only `Scheduled` allows further transitions;
/// the other three states are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    /// Superseded by a new appointment row (`rescheduled_from` on the new row)
    Rescheduled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Rescheduled => "rescheduled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(AppointmentStatus::Scheduled),
            "completed" => Some(AppointmentStatus::Completed),
            "cancelled" => Some(AppointmentStatus::Cancelled),
            "rescheduled" => Some(AppointmentStatus::Rescheduled),
            _ => None,
        }
    }

    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AppointmentStatus::Scheduled)
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        matches!(self, AppointmentStatus::Scheduled) && next != AppointmentStatus::Scheduled
    }
}

/// New patient visit or a follow-up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentType {
    New,
    FollowUp,
}

impl AppointmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::New => "new",
            AppointmentType::FollowUp => "followup",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(AppointmentType::New),
            "followup" => Some(AppointmentType::FollowUp),
            _ => None,
        }
    }
}

/// In-clinic or online consultation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VisitType {
    Clinic,
    Online,
}

impl VisitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitType::Clinic => "clinic",
            VisitType::Online => "online",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "clinic" => Some(VisitType::Clinic),
            "online" => Some(VisitType::Online),
            _ => None,
        }
    }
}

/// A booked appointment. Token numbers are dense per date: the Nth booking
/// for a date holds token N, whatever order dates are booked in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Surrogate row id (0 until inserted)
    pub id: i64,
    pub patient_id: i64,
    /// Calendar date, `YYYY-MM-DD`
    pub appointment_date: String,
    /// Clock time, e.g. `10:30`
    pub appointment_time: String,
    /// Per-date queue ordinal, assigned at booking
    pub token_no: i64,
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub visit_type: VisitType,
    pub reason: Option<String>,
    /// Id of the appointment this one replaces, if any
    pub rescheduled_from: Option<i64>,
    pub cancelled_at: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Booking form input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub patient_id: i64,
    pub appointment_date: String,
    pub appointment_time: String,
    pub appointment_type: AppointmentType,
    pub visit_type: VisitType,
    pub reason: Option<String>,
}

impl Appointment {
    /// Build a scheduled appointment row with an assigned token.
    pub fn from_request(req: &AppointmentRequest, token_no: i64) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            patient_id: req.patient_id,
            appointment_date: req.appointment_date.clone(),
            appointment_time: req.appointment_time.clone(),
            token_no,
            appointment_type: req.appointment_type,
            status: AppointmentStatus::Scheduled,
            visit_type: req.visit_type,
            reason: req.reason.clone(),
            rescheduled_from: None,
            cancelled_at: None,
            cancellation_reason: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Build the replacement row created by a reschedule. The new row stays
    /// on the same patient and appointment type and starts over as scheduled.
    pub fn reschedule_of(original: &Appointment, new_date: &str, new_time: &str, token_no: i64) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            patient_id: original.patient_id,
            appointment_date: new_date.to_string(),
            appointment_time: new_time.to_string(),
            token_no,
            appointment_type: original.appointment_type,
            status: AppointmentStatus::Scheduled,
            visit_type: original.visit_type,
            reason: original.reason.clone(),
            rescheduled_from: Some(original.id),
            cancelled_at: None,
            cancellation_reason: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!AppointmentStatus::Scheduled.is_terminal());
        assert!(AppointmentStatus::Completed.is_terminal());
        assert!(AppointmentStatus::Cancelled.is_terminal());
        assert!(AppointmentStatus::Rescheduled.is_terminal());
    }

    #[test]
    fn test_transitions_only_out_of_scheduled() {
        let s = AppointmentStatus::Scheduled;
        assert!(s.can_transition_to(AppointmentStatus::Completed));
        assert!(s.can_transition_to(AppointmentStatus::Cancelled));
        assert!(s.can_transition_to(AppointmentStatus::Rescheduled));
        assert!(!s.can_transition_to(AppointmentStatus::Scheduled));

        for terminal in [
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::Rescheduled,
        ] {
            assert!(!terminal.can_transition_to(AppointmentStatus::Completed));
            assert!(!terminal.can_transition_to(AppointmentStatus::Scheduled));
        }
    }

    #[test]
    fn test_reschedule_of_inherits_patient_and_type() {
        let req = AppointmentRequest {
            patient_id: 7,
            appointment_date: "2024-06-01".into(),
            appointment_time: "10:30".into(),
            appointment_type: AppointmentType::FollowUp,
            visit_type: VisitType::Online,
            reason: Some("fever".into()),
        };
        let mut original = Appointment::from_request(&req, 3);
        original.id = 42;

        let moved = Appointment::reschedule_of(&original, "2024-06-05", "11:00", 1);
        assert_eq!(moved.patient_id, 7);
        assert_eq!(moved.appointment_type, AppointmentType::FollowUp);
        assert_eq!(moved.visit_type, VisitType::Online);
        assert_eq!(moved.rescheduled_from, Some(42));
        assert_eq!(moved.status, AppointmentStatus::Scheduled);
        assert_eq!(moved.token_no, 1);
        assert!(moved.cancelled_at.is_none());
    }
}
