//! Prescription issue and printing.

use super::{OpsError, OpsResult, MAX_GENERATION_ATTEMPTS};
use crate::db::Database;
use crate::models::{Prescription, PrescriptionInput};
use crate::numbering;

/// Issue a prescription with a generated document number, retrying if the
/// number collides with an existing one.
pub fn create_prescription(db: &Database, input: PrescriptionInput) -> OpsResult<Prescription> {
    if input.medicines.is_empty() {
        return Err(OpsError::Validation(
            "prescription requires at least one medicine".into(),
        ));
    }
    if db.get_patient(input.patient_id)?.is_none() {
        return Err(OpsError::MissingReference {
            entity: "patient",
            id: input.patient_id,
        });
    }

    for _ in 0..MAX_GENERATION_ATTEMPTS {
        let prescription =
            Prescription::from_input(input.clone(), numbering::prescription_number());

        match db.insert_prescription(&prescription) {
            Ok(id) => {
                tracing::info!(
                    prescription_id = id,
                    prescription_no = %prescription.prescription_no,
                    "issued prescription"
                );
                return Ok(Prescription { id, ..prescription });
            }
            Err(e) if e.is_unique_violation() => {
                tracing::debug!(
                    prescription_no = %prescription.prescription_no,
                    "prescription number taken, regenerating"
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(OpsError::GenerationFailed("prescription number"))
}

/// Record that a prescription went to print. The first call stamps the
/// print time; repeats leave the stamp as it was.
pub fn mark_prescription_printed(db: &Database, id: i64) -> OpsResult<Prescription> {
    if db.get_prescription(id)?.is_none() {
        return Err(OpsError::MissingReference {
            entity: "prescription",
            id,
        });
    }

    let now = chrono::Utc::now().to_rfc3339();
    if db.mark_prescription_printed(id, &now)? {
        tracing::info!(prescription_id = id, "prescription printed");
    }

    db.get_prescription(id)?.ok_or(OpsError::MissingReference {
        entity: "prescription",
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewPatient;
    use crate::ops::register_patient;

    fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let patient = register_patient(
            &db,
            NewPatient {
                first_name: "Asha".into(),
                last_name: "Rao".into(),
                mobile_no: "9876543210".into(),
                ..Default::default()
            },
            None,
        )
        .unwrap();
        (db, patient.id)
    }

    fn input(patient_id: i64) -> PrescriptionInput {
        PrescriptionInput {
            patient_id,
            medicines: vec!["Arnica 30".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_create_assigns_number() {
        let (db, patient_id) = setup();

        let rx = create_prescription(&db, input(patient_id)).unwrap();
        assert!(rx.id > 0);
        assert!(rx.prescription_no.starts_with("RX/"));
        assert!(!rx.printed);
    }

    #[test]
    fn test_create_rejects_empty_medicines_and_unknown_patient() {
        let (db, patient_id) = setup();

        let mut empty = input(patient_id);
        empty.medicines.clear();
        assert!(matches!(
            create_prescription(&db, empty),
            Err(OpsError::Validation(_))
        ));

        assert!(matches!(
            create_prescription(&db, input(999)),
            Err(OpsError::MissingReference { entity: "patient", id: 999 })
        ));
    }

    #[test]
    fn test_printed_stamp_set_once() {
        let (db, patient_id) = setup();
        let rx = create_prescription(&db, input(patient_id)).unwrap();

        let first = mark_prescription_printed(&db, rx.id).unwrap();
        assert!(first.printed);
        let stamp = first.printed_at.clone().unwrap();

        let second = mark_prescription_printed(&db, rx.id).unwrap();
        assert_eq!(second.printed_at, Some(stamp));
    }
}
