//! Patient models.

use serde::{Deserialize, Serialize};

/// Patient lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PatientStatus {
    Active,
    Inactive,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Active => "active",
            PatientStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(PatientStatus::Active),
            "inactive" => Some(PatientStatus::Inactive),
            _ => None,
        }
    }
}

/// A registered patient. The registration number is the natural key used on
/// receipts and prescriptions; the integer id is the storage key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Surrogate row id (0 until inserted)
    pub id: i64,
    /// Registration number, `PREFIX/YEAR/NNNN`, globally unique
    pub regd_no: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_no: String,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
    pub occupation: Option<String>,
    /// Who referred the patient
    pub ref_by: Option<String>,
    /// True from registration until the first non-follow-up case is recorded
    pub is_new_patient: bool,
    pub registration_date: String,
    pub notes: Option<String>,
    pub status: PatientStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Registration form input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub mobile_no: String,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
    pub occupation: Option<String>,
    pub ref_by: Option<String>,
    pub notes: Option<String>,
}

impl Patient {
    /// Build a patient row from registration input and a generated
    /// registration number. The row id is assigned by the store on insert.
    pub fn from_registration(input: NewPatient, regd_no: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            regd_no,
            first_name: input.first_name,
            last_name: input.last_name,
            mobile_no: input.mobile_no,
            email: input.email,
            gender: input.gender,
            age: input.age,
            date_of_birth: input.date_of_birth,
            address: input.address,
            city: input.city,
            pincode: input.pincode,
            occupation: input.occupation,
            ref_by: input.ref_by,
            is_new_patient: true,
            registration_date: now.clone(),
            notes: input.notes,
            status: PatientStatus::Active,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Display name for lists and receipts.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewPatient {
        NewPatient {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            mobile_no: "9876543210".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_registration() {
        let patient = Patient::from_registration(input(), "HMC/2024/0042".into());
        assert_eq!(patient.regd_no, "HMC/2024/0042");
        assert!(patient.is_new_patient);
        assert_eq!(patient.status, PatientStatus::Active);
        assert_eq!(patient.full_name(), "Asha Rao");
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(PatientStatus::parse("active"), Some(PatientStatus::Active));
        assert_eq!(PatientStatus::parse("inactive"), Some(PatientStatus::Inactive));
        assert_eq!(PatientStatus::parse("archived"), None);
        assert_eq!(PatientStatus::Active.as_str(), "active");
    }
}
