//! Prescription models.

use serde::{Deserialize, Serialize};

/// A prescription issued to a patient. Medicines keep their written order;
/// the prescription number is the external-facing document identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    /// Surrogate row id (0 until inserted)
    pub id: i64,
    pub patient_id: i64,
    pub case_id: Option<i64>,
    pub appointment_id: Option<i64>,
    /// Globally unique, `RX/<base36 millis>/<3 digits>`
    pub prescription_no: String,
    /// Ordered list of medicine names
    pub medicines: Vec<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub instructions: Option<String>,
    pub language: String,
    /// Flips false -> true exactly once, when first sent to print
    pub printed: bool,
    pub printed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for issuing a prescription.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrescriptionInput {
    pub patient_id: i64,
    pub case_id: Option<i64>,
    pub appointment_id: Option<i64>,
    pub medicines: Vec<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub instructions: Option<String>,
    /// Defaults to "english" when empty
    pub language: Option<String>,
}

impl Prescription {
    /// Build a prescription row with a generated document number.
    pub fn from_input(input: PrescriptionInput, prescription_no: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            patient_id: input.patient_id,
            case_id: input.case_id,
            appointment_id: input.appointment_id,
            prescription_no,
            medicines: input.medicines,
            dosage: input.dosage,
            frequency: input.frequency,
            duration: input.duration,
            instructions: input.instructions,
            language: input.language.unwrap_or_else(|| "english".to_string()),
            printed: false,
            printed_at: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_defaults() {
        let rx = Prescription::from_input(
            PrescriptionInput {
                patient_id: 1,
                medicines: vec!["Arnica 30".into(), "Nux Vomica 200".into()],
                ..Default::default()
            },
            "RX/LXK9A2/041".into(),
        );
        assert_eq!(rx.prescription_no, "RX/LXK9A2/041");
        assert_eq!(rx.medicines.len(), 2);
        assert_eq!(rx.language, "english");
        assert!(!rx.printed);
        assert!(rx.printed_at.is_none());
    }
}
