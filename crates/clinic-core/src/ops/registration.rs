//! Patient registration.

use super::{require_non_empty, OpsError, OpsResult, MAX_GENERATION_ATTEMPTS};
use crate::db::Database;
use crate::models::{NewPatient, Patient};
use crate::numbering;

/// Register a new patient. Generates a registration number under the given
/// prefix (defaulting to [`numbering::DEFAULT_REGD_PREFIX`]) and retries on
/// the off chance the random suffix collides with an existing one.
pub fn register_patient(
    db: &Database,
    input: NewPatient,
    regd_prefix: Option<&str>,
) -> OpsResult<Patient> {
    require_non_empty("first name", &input.first_name)?;
    require_non_empty("mobile number", &input.mobile_no)?;

    let prefix = regd_prefix.unwrap_or(numbering::DEFAULT_REGD_PREFIX);

    for _ in 0..MAX_GENERATION_ATTEMPTS {
        let regd_no = numbering::registration_number(prefix);
        let patient = Patient::from_registration(input.clone(), regd_no);

        match db.insert_patient(&patient) {
            Ok(id) => {
                tracing::info!(patient_id = id, regd_no = %patient.regd_no, "registered patient");
                return Ok(Patient { id, ..patient });
            }
            Err(e) if e.is_unique_violation() => {
                tracing::debug!(regd_no = %patient.regd_no, "registration number taken, regenerating");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(OpsError::GenerationFailed("registration number"))
}

/// Edit a patient's details. The registration number and new-patient flag
/// never change through this path.
pub fn update_patient_details(db: &Database, patient: &Patient) -> OpsResult<Patient> {
    require_non_empty("first name", &patient.first_name)?;
    require_non_empty("mobile number", &patient.mobile_no)?;

    if !db.update_patient(patient)? {
        return Err(OpsError::MissingReference {
            entity: "patient",
            id: patient.id,
        });
    }

    db.get_patient(patient.id)?.ok_or(OpsError::MissingReference {
        entity: "patient",
        id: patient.id,
    })
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
    fn test_register_assigns_number_and_flag() {
        let db = Database::open_in_memory().unwrap();

        let patient = register_patient(&db, input(), None).unwrap();
        assert!(patient.id > 0);
        assert!(patient.regd_no.starts_with("HMC/"));
        assert!(patient.is_new_patient);

        let stored = db.get_patient(patient.id).unwrap().unwrap();
        assert_eq!(stored.regd_no, patient.regd_no);
    }

    #[test]
    fn test_register_with_custom_prefix() {
        let db = Database::open_in_memory().unwrap();
        let patient = register_patient(&db, input(), Some("SVC")).unwrap();
        assert!(patient.regd_no.starts_with("SVC/"));
    }

    #[test]
    fn test_register_rejects_blank_fields() {
        let db = Database::open_in_memory().unwrap();

        let mut bad = input();
        bad.first_name = "".into();
        assert!(matches!(
            register_patient(&db, bad, None),
            Err(OpsError::Validation(_))
        ));

        let mut bad = input();
        bad.mobile_no = "  ".into();
        assert!(matches!(
            register_patient(&db, bad, None),
            Err(OpsError::Validation(_))
        ));
    }

    #[test]
    fn test_update_details_keeps_regd_no() {
        let db = Database::open_in_memory().unwrap();
        let registered = register_patient(&db, input(), None).unwrap();

        let mut edited = registered.clone();
        edited.city = Some("Pune".into());
        let updated = update_patient_details(&db, &edited).unwrap();

        assert_eq!(updated.city, Some("Pune".into()));
        assert_eq!(updated.regd_no, registered.regd_no);
    }

    #[test]
    fn test_update_unknown_patient() {
        let db = Database::open_in_memory().unwrap();
        let mut ghost = Patient::from_registration(input(), "HMC/2024/0001".into());
        ghost.id = 999;

        assert!(matches!(
            update_patient_details(&db, &ghost),
            Err(OpsError::MissingReference { entity: "patient", id: 999 })
        ));
    }
}
