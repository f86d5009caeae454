//! Clinic and fee configuration models.

use serde::{Deserialize, Serialize};

/// Fee schedule in effect from `effective_date`. Rows are append-only:
/// updating the schedule deactivates the current row and inserts a new one,
/// so the full history stays queryable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeesSettings {
    /// Surrogate row id (0 until inserted)
    pub id: i64,
    pub new_patient_fee: i64,
    pub follow_up_fee: i64,
    pub consultation_fee: i64,
    pub advance_payment: i64,
    pub effective_date: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for publishing a new fee schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeesSettingsInput {
    pub new_patient_fee: i64,
    pub follow_up_fee: i64,
    pub consultation_fee: i64,
    pub advance_payment: i64,
}

impl FeesSettings {
    /// Build the replacement active row.
    pub fn from_input(input: FeesSettingsInput) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            new_patient_fee: input.new_patient_fee,
            follow_up_fee: input.follow_up_fee,
            consultation_fee: input.consultation_fee,
            advance_payment: input.advance_payment,
            effective_date: now.clone(),
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Clinic letterhead details. A single mutable row, edited in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicSettings {
    /// Surrogate row id (0 until inserted)
    pub id: i64,
    pub clinic_name: String,
    pub doctor_name: String,
    pub qualification: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub footer_text: Option<String>,
    pub language: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for editing clinic details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicSettingsInput {
    pub clinic_name: String,
    pub doctor_name: String,
    pub qualification: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub footer_text: Option<String>,
    pub language: Option<String>,
}

impl ClinicSettings {
    pub fn from_input(input: ClinicSettingsInput) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            clinic_name: input.clinic_name,
            doctor_name: input.doctor_name,
            qualification: input.qualification,
            address: input.address,
            phone: input.phone,
            email: input.email,
            footer_text: input.footer_text,
            language: input.language.unwrap_or_else(|| "english".to_string()),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fees_settings_from_input() {
        let settings = FeesSettings::from_input(FeesSettingsInput {
            new_patient_fee: 500,
            follow_up_fee: 200,
            consultation_fee: 300,
            advance_payment: 0,
        });
        assert!(settings.is_active);
        assert_eq!(settings.new_patient_fee, 500);
    }

    #[test]
    fn test_clinic_settings_language_default() {
        let settings = ClinicSettings::from_input(ClinicSettingsInput {
            clinic_name: "Harmony Clinic".into(),
            doctor_name: "Dr. Mehta".into(),
            qualification: None,
            address: None,
            phone: None,
            email: None,
            footer_text: None,
            language: None,
        });
        assert_eq!(settings.language, "english");
    }
}
