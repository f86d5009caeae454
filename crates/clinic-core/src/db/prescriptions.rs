//! Prescription database operations.

use rusqlite::{params, Connection, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::Prescription;

const PRESCRIPTION_COLUMNS: &str = "id, patient_id, case_id, appointment_id, prescription_no,
       medicines, dosage, frequency, duration, instructions, language,
       printed, printed_at, created_at, updated_at";

/// Intermediate row struct for database mapping.
struct PrescriptionRow {
    id: i64,
    patient_id: i64,
    case_id: Option<i64>,
    appointment_id: Option<i64>,
    prescription_no: String,
    medicines: String,
    dosage: Option<String>,
    frequency: Option<String>,
    duration: Option<String>,
    instructions: Option<String>,
    language: String,
    printed: bool,
    printed_at: Option<String>,
    created_at: String,
    updated_at: String,
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PrescriptionRow> {
    Ok(PrescriptionRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        case_id: row.get(2)?,
        appointment_id: row.get(3)?,
        prescription_no: row.get(4)?,
        medicines: row.get(5)?,
        dosage: row.get(6)?,
        frequency: row.get(7)?,
        duration: row.get(8)?,
        instructions: row.get(9)?,
        language: row.get(10)?,
        printed: row.get(11)?,
        printed_at: row.get(12)?,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

impl TryFrom<PrescriptionRow> for Prescription {
    type Error = DbError;

    fn try_from(row: PrescriptionRow) -> Result<Self, Self::Error> {
        let medicines: Vec<String> = serde_json::from_str(&row.medicines)?;

        Ok(Prescription {
            id: row.id,
            patient_id: row.patient_id,
            case_id: row.case_id,
            appointment_id: row.appointment_id,
            prescription_no: row.prescription_no,
            medicines,
            dosage: row.dosage,
            frequency: row.frequency,
            duration: row.duration,
            instructions: row.instructions,
            language: row.language,
            printed: row.printed,
            printed_at: row.printed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert a prescription row, returning the new id.
pub(crate) fn insert_prescription(conn: &Connection, rx: &Prescription) -> DbResult<i64> {
    let medicines_json = serde_json::to_string(&rx.medicines)?;

    conn.execute(
        r#"
        INSERT INTO prescriptions (
            patient_id, case_id, appointment_id, prescription_no, medicines,
            dosage, frequency, duration, instructions, language,
            printed, printed_at, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
        "#,
        params![
            rx.patient_id,
            rx.case_id,
            rx.appointment_id,
            rx.prescription_no,
            medicines_json,
            rx.dosage,
            rx.frequency,
            rx.duration,
            rx.instructions,
            rx.language,
            rx.printed,
            rx.printed_at,
            rx.created_at,
            rx.updated_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl Database {
    /// Insert a prescription, returning the assigned row id.
    pub fn insert_prescription(&self, rx: &Prescription) -> DbResult<i64> {
        insert_prescription(&self.conn, rx)
    }

    /// Get a prescription by row id.
    pub fn get_prescription(&self, id: i64) -> DbResult<Option<Prescription>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM prescriptions WHERE id = ?", PRESCRIPTION_COLUMNS),
                [id],
                map_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List prescriptions for a patient, newest first.
    pub fn list_prescriptions_for_patient(&self, patient_id: i64) -> DbResult<Vec<Prescription>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {} FROM prescriptions
            WHERE patient_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
            PRESCRIPTION_COLUMNS
        ))?;

        let rows = stmt.query_map([patient_id], map_row)?;

        let mut prescriptions = Vec::new();
        for row in rows {
            prescriptions.push(row?.try_into()?);
        }
        Ok(prescriptions)
    }

    /// Stamp the printed flag. Only flips rows still unprinted, so the
    /// first print timestamp is preserved; returns whether this call did
    /// the flip.
    pub fn mark_prescription_printed(&self, id: i64, printed_at: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE prescriptions SET
                printed = 1,
                printed_at = ?2,
                updated_at = datetime('now')
            WHERE id = ?1 AND printed = 0
            "#,
            params![id, printed_at],
        )?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewPatient, Patient, PrescriptionInput};

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

    fn make_rx(patient_id: i64, no: &str) -> Prescription {
        Prescription::from_input(
            PrescriptionInput {
                patient_id,
                medicines: vec!["Arnica 30".into(), "Nux Vomica 200".into()],
                dosage: Some("4 globules".into()),
                ..Default::default()
            },
            no.into(),
        )
    }

    #[test]
    fn test_insert_and_get_preserves_medicine_order() {
        let (db, patient_id) = setup_db();

        let id = db.insert_prescription(&make_rx(patient_id, "RX/A1/001")).unwrap();

        let retrieved = db.get_prescription(id).unwrap().unwrap();
        assert_eq!(retrieved.medicines, vec!["Arnica 30", "Nux Vomica 200"]);
        assert_eq!(retrieved.dosage, Some("4 globules".into()));
        assert!(!retrieved.printed);
    }

    #[test]
    fn test_prescription_no_unique() {
        let (db, patient_id) = setup_db();

        db.insert_prescription(&make_rx(patient_id, "RX/A1/001")).unwrap();
        let err = db
            .insert_prescription(&make_rx(patient_id, "RX/A1/001"))
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[test]
    fn test_mark_printed_only_once() {
        let (db, patient_id) = setup_db();
        let id = db.insert_prescription(&make_rx(patient_id, "RX/A1/001")).unwrap();

        assert!(db.mark_prescription_printed(id, "2024-06-01T10:00:00Z").unwrap());
        // Second call must not move the timestamp
        assert!(!db.mark_prescription_printed(id, "2024-06-02T10:00:00Z").unwrap());

        let retrieved = db.get_prescription(id).unwrap().unwrap();
        assert!(retrieved.printed);
        assert_eq!(retrieved.printed_at, Some("2024-06-01T10:00:00Z".into()));
    }
}
