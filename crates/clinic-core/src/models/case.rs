//! Case (clinical visit) models.

use serde::{Deserialize, Serialize};

/// Prognosis trend recorded on follow-up visits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PrognosisStatus {
    Improving,
    Stable,
    Worsening,
}

impl PrognosisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrognosisStatus::Improving => "improving",
            PrognosisStatus::Stable => "stable",
            PrognosisStatus::Worsening => "worsening",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "improving" => Some(PrognosisStatus::Improving),
            "stable" => Some(PrognosisStatus::Stable),
            "worsening" => Some(PrognosisStatus::Worsening),
            _ => None,
        }
    }
}

/// A recorded clinical visit, either the initial case taking or a follow-up
/// in the chain. Case numbers are dense and 1-based per patient and are
/// never reused.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseRecord {
    /// Surrogate row id (0 until inserted)
    pub id: i64,
    pub patient_id: i64,
    pub appointment_id: Option<i64>,
    /// Prior case in the follow-up chain
    pub previous_case_id: Option<i64>,
    /// Per-patient ordinal, `count(cases for patient) + 1` at creation
    pub case_no: i64,
    pub chief_complaints: Option<String>,
    pub history: Option<String>,
    pub physical_findings: Option<String>,
    pub investigation: Option<String>,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub prognosis: Option<String>,
    /// Required when `is_follow_up`
    pub prognosis_status: Option<PrognosisStatus>,
    pub follow_up_date: Option<String>,
    pub case_notes: Option<String>,
    pub is_follow_up: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for the initial case taking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseInput {
    pub patient_id: i64,
    pub appointment_id: Option<i64>,
    pub chief_complaints: Option<String>,
    pub history: Option<String>,
    pub physical_findings: Option<String>,
    pub investigation: Option<String>,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub prognosis: Option<String>,
    pub case_notes: Option<String>,
}

/// Input for a follow-up case entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowUpCaseInput {
    pub patient_id: i64,
    pub appointment_id: Option<i64>,
    pub previous_case_id: Option<i64>,
    pub history: Option<String>,
    pub symptoms: Option<String>,
    pub prognosis_status: Option<PrognosisStatus>,
    pub follow_up_date: Option<String>,
    pub case_notes: Option<String>,
}

impl CaseRecord {
    /// Build an initial case row with an assigned case number.
    pub fn from_input(input: CaseInput, case_no: i64) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            patient_id: input.patient_id,
            appointment_id: input.appointment_id,
            previous_case_id: None,
            case_no,
            chief_complaints: input.chief_complaints,
            history: input.history,
            physical_findings: input.physical_findings,
            investigation: input.investigation,
            symptoms: input.symptoms,
            diagnosis: input.diagnosis,
            prognosis: input.prognosis,
            prognosis_status: None,
            follow_up_date: None,
            case_notes: input.case_notes,
            is_follow_up: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Build a follow-up case row with an assigned case number.
    pub fn from_follow_up_input(input: FollowUpCaseInput, case_no: i64) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            patient_id: input.patient_id,
            appointment_id: input.appointment_id,
            previous_case_id: input.previous_case_id,
            case_no,
            chief_complaints: None,
            history: input.history,
            physical_findings: None,
            investigation: None,
            symptoms: input.symptoms,
            diagnosis: None,
            prognosis: None,
            prognosis_status: input.prognosis_status,
            follow_up_date: input.follow_up_date,
            case_notes: input.case_notes,
            is_follow_up: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
