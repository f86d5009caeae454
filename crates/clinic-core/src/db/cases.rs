//! Case database operations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{column_decode_error, Database, DbResult};
use crate::models::{CaseRecord, PrognosisStatus};

const CASE_COLUMNS: &str = "id, patient_id, appointment_id, previous_case_id, case_no,
       chief_complaints, history, physical_findings, investigation, symptoms,
       diagnosis, prognosis, prognosis_status, follow_up_date, case_notes,
       is_follow_up, created_at, updated_at";

fn map_case(row: &Row<'_>) -> rusqlite::Result<CaseRecord> {
    let prognosis_status = match row.get::<_, Option<String>>(12)? {
        Some(s) => Some(
            PrognosisStatus::parse(&s)
                .ok_or_else(|| column_decode_error(12, "prognosis status", &s))?,
        ),
        None => None,
    };

    Ok(CaseRecord {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        appointment_id: row.get(2)?,
        previous_case_id: row.get(3)?,
        case_no: row.get(4)?,
        chief_complaints: row.get(5)?,
        history: row.get(6)?,
        physical_findings: row.get(7)?,
        investigation: row.get(8)?,
        symptoms: row.get(9)?,
        diagnosis: row.get(10)?,
        prognosis: row.get(11)?,
        prognosis_status,
        follow_up_date: row.get(13)?,
        case_notes: row.get(14)?,
        is_follow_up: row.get(15)?,
        created_at: row.get(16)?,
        updated_at: row.get(17)?,
    })
}

/// Count cases recorded for a patient. Run inside the same transaction as
/// the insert that consumes the next case number.
pub(crate) fn count_cases_for_patient(conn: &Connection, patient_id: i64) -> DbResult<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM cases WHERE patient_id = ?",
        [patient_id],
        |row| row.get(0),
    )
    .map_err(Into::into)
}

/// Insert a case row, returning the new id.
pub(crate) fn insert_case(conn: &Connection, case: &CaseRecord) -> DbResult<i64> {
    conn.execute(
        r#"
        INSERT INTO cases (
            patient_id, appointment_id, previous_case_id, case_no,
            chief_complaints, history, physical_findings, investigation, symptoms,
            diagnosis, prognosis, prognosis_status, follow_up_date, case_notes,
            is_follow_up, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
        "#,
        params![
            case.patient_id,
            case.appointment_id,
            case.previous_case_id,
            case.case_no,
            case.chief_complaints,
            case.history,
            case.physical_findings,
            case.investigation,
            case.symptoms,
            case.diagnosis,
            case.prognosis,
            case.prognosis_status.map(|s| s.as_str()),
            case.follow_up_date,
            case.case_notes,
            case.is_follow_up,
            case.created_at,
            case.updated_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub(crate) fn get_case(conn: &Connection, id: i64) -> DbResult<Option<CaseRecord>> {
    conn.query_row(
        &format!("SELECT {} FROM cases WHERE id = ?", CASE_COLUMNS),
        [id],
        map_case,
    )
    .optional()
    .map_err(Into::into)
}

impl Database {
    /// Insert a case, returning the assigned row id.
    pub fn insert_case(&self, case: &CaseRecord) -> DbResult<i64> {
        insert_case(&self.conn, case)
    }

    /// Get a case by row id.
    pub fn get_case(&self, id: i64) -> DbResult<Option<CaseRecord>> {
        get_case(&self.conn, id)
    }

    /// List all cases for a patient in case-number order.
    pub fn list_cases_for_patient(&self, patient_id: i64) -> DbResult<Vec<CaseRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {} FROM cases
            WHERE patient_id = ?
            ORDER BY case_no
            "#,
            CASE_COLUMNS
        ))?;

        let rows = stmt.query_map([patient_id], map_case)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Count cases recorded for a patient.
    pub fn count_cases_for_patient(&self, patient_id: i64) -> DbResult<i64> {
        count_cases_for_patient(&self.conn, patient_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CaseInput, FollowUpCaseInput, NewPatient, Patient};

    fn setup_db() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let patient = Patient::from_registration(
            NewPatient {
                first_name: "Asha".into(),
                last_name: "Rao".into(),
                mobile_no: "9876543210".into(),
                ..Default::default()
            },
            "HMC/2024/0001".into(),
        );
        let patient_id = db.insert_patient(&patient).unwrap();
        (db, patient_id)
    }

    #[test]
    fn test_insert_and_get() {
        let (db, patient_id) = setup_db();

        let case = CaseRecord::from_input(
            CaseInput {
                patient_id,
                diagnosis: Some("migraine".into()),
                ..Default::default()
            },
            1,
        );
        let id = db.insert_case(&case).unwrap();

        let retrieved = db.get_case(id).unwrap().unwrap();
        assert_eq!(retrieved.case_no, 1);
        assert_eq!(retrieved.diagnosis, Some("migraine".into()));
        assert!(!retrieved.is_follow_up);
    }

    #[test]
    fn test_follow_up_round_trip() {
        let (db, patient_id) = setup_db();

        let first = db
            .insert_case(&CaseRecord::from_input(
                CaseInput {
                    patient_id,
                    ..Default::default()
                },
                1,
            ))
            .unwrap();

        let follow_up = CaseRecord::from_follow_up_input(
            FollowUpCaseInput {
                patient_id,
                previous_case_id: Some(first),
                prognosis_status: Some(PrognosisStatus::Improving),
                ..Default::default()
            },
            2,
        );
        let id = db.insert_case(&follow_up).unwrap();

        let retrieved = db.get_case(id).unwrap().unwrap();
        assert!(retrieved.is_follow_up);
        assert_eq!(retrieved.previous_case_id, Some(first));
        assert_eq!(retrieved.prognosis_status, Some(PrognosisStatus::Improving));
    }

    #[test]
    fn test_list_and_count() {
        let (db, patient_id) = setup_db();

        for case_no in 1..=3 {
            db.insert_case(&CaseRecord::from_input(
                CaseInput {
                    patient_id,
                    ..Default::default()
                },
                case_no,
            ))
            .unwrap();
        }

        assert_eq!(db.count_cases_for_patient(patient_id).unwrap(), 3);
        let cases = db.list_cases_for_patient(patient_id).unwrap();
        assert_eq!(
            cases.iter().map(|c| c.case_no).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }
}
