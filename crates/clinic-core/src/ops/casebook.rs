//! Case taking and the follow-up chain.

use super::{OpsError, OpsResult};
use crate::db::{
    count_cases_for_patient, get_case, get_patient, insert_case, mark_patient_not_new, Database,
};
use crate::models::{CaseInput, CaseRecord, FollowUpCaseInput};

/// Record the initial case for a visit. Assigns the patient's next case
/// number and clears the new-patient flag in the same transaction, so a
/// patient with any recorded case is never reported as new.
pub fn create_case(db: &mut Database, input: CaseInput) -> OpsResult<CaseRecord> {
    let patient_id = input.patient_id;

    let tx = db.immediate_transaction()?;

    if get_patient(&tx, patient_id)?.is_none() {
        return Err(OpsError::MissingReference {
            entity: "patient",
            id: patient_id,
        });
    }

    let case_no = count_cases_for_patient(&tx, patient_id)? + 1;
    let case = CaseRecord::from_input(input, case_no);
    let id = insert_case(&tx, &case)?;
    mark_patient_not_new(&tx, patient_id)?;
    tx.commit()?;

    tracing::info!(case_id = id, patient_id, case_no, "recorded case");
    Ok(CaseRecord { id, ..case })
}

/// Record a follow-up case. Continues the patient's case numbering but
/// leaves the new-patient flag alone; a prognosis trend is required.
pub fn create_follow_up_case(
    db: &mut Database,
    input: FollowUpCaseInput,
) -> OpsResult<CaseRecord> {
    if input.prognosis_status.is_none() {
        return Err(OpsError::Validation(
            "follow-up case requires a prognosis status".into(),
        ));
    }

    let patient_id = input.patient_id;

    let tx = db.immediate_transaction()?;

    if get_patient(&tx, patient_id)?.is_none() {
        return Err(OpsError::MissingReference {
            entity: "patient",
            id: patient_id,
        });
    }
    if let Some(prev_id) = input.previous_case_id {
        match get_case(&tx, prev_id)? {
            Some(prev) if prev.patient_id == patient_id => {}
            Some(_) => {
                return Err(OpsError::Validation(format!(
                    "case {} belongs to another patient",
                    prev_id
                )))
            }
            None => {
                return Err(OpsError::MissingReference {
                    entity: "case",
                    id: prev_id,
                })
            }
        }
    }

    let case_no = count_cases_for_patient(&tx, patient_id)? + 1;
    let case = CaseRecord::from_follow_up_input(input, case_no);
    let id = insert_case(&tx, &case)?;
    tx.commit()?;

    tracing::info!(case_id = id, patient_id, case_no, "recorded follow-up case");
    Ok(CaseRecord { id, ..case })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewPatient, PrognosisStatus};
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

    #[test]
    fn test_first_case_flips_new_patient_flag() {
        let (mut db, patient_id) = setup();
        assert!(db.get_patient(patient_id).unwrap().unwrap().is_new_patient);

        let case = create_case(
            &mut db,
            CaseInput {
                patient_id,
                diagnosis: Some("migraine".into()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(case.case_no, 1);
        assert!(!db.get_patient(patient_id).unwrap().unwrap().is_new_patient);
    }

    #[test]
    fn test_case_numbers_are_per_patient() {
        let (mut db, first_patient) = setup();
        let second_patient = register_patient(
            &db,
            NewPatient {
                first_name: "Ravi".into(),
                last_name: "Kumar".into(),
                mobile_no: "9000000000".into(),
                ..Default::default()
            },
            None,
        )
        .unwrap()
        .id;

        let a1 = create_case(&mut db, CaseInput { patient_id: first_patient, ..Default::default() }).unwrap();
        let a2 = create_follow_up_case(
            &mut db,
            FollowUpCaseInput {
                patient_id: first_patient,
                previous_case_id: Some(a1.id),
                prognosis_status: Some(PrognosisStatus::Stable),
                ..Default::default()
            },
        )
        .unwrap();
        let b1 = create_case(&mut db, CaseInput { patient_id: second_patient, ..Default::default() }).unwrap();

        assert_eq!(a1.case_no, 1);
        assert_eq!(a2.case_no, 2);
        assert_eq!(b1.case_no, 1);
    }

    #[test]
    fn test_follow_up_leaves_flag_and_needs_prognosis() {
        let (mut db, patient_id) = setup();

        // Follow-up recorded before any initial case: flag must survive
        let follow_up = create_follow_up_case(
            &mut db,
            FollowUpCaseInput {
                patient_id,
                prognosis_status: Some(PrognosisStatus::Improving),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(follow_up.is_follow_up);
        assert!(db.get_patient(patient_id).unwrap().unwrap().is_new_patient);

        assert!(matches!(
            create_follow_up_case(
                &mut db,
                FollowUpCaseInput {
                    patient_id,
                    ..Default::default()
                },
            ),
            Err(OpsError::Validation(_))
        ));
    }

    #[test]
    fn test_follow_up_checks_previous_case() {
        let (mut db, patient_id) = setup();

        assert!(matches!(
            create_follow_up_case(
                &mut db,
                FollowUpCaseInput {
                    patient_id,
                    previous_case_id: Some(404),
                    prognosis_status: Some(PrognosisStatus::Stable),
                    ..Default::default()
                },
            ),
            Err(OpsError::MissingReference { entity: "case", id: 404 })
        ));
    }

    #[test]
    fn test_unknown_patient() {
        let (mut db, _) = setup();
        assert!(matches!(
            create_case(&mut db, CaseInput { patient_id: 999, ..Default::default() }),
            Err(OpsError::MissingReference { entity: "patient", id: 999 })
        ));
    }
}
