//! Patient database operations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{column_decode_error, Database, DbResult};
use crate::models::{Patient, PatientStatus};

const PATIENT_COLUMNS: &str = "id, regd_no, first_name, last_name, mobile_no, email, gender, age,
       date_of_birth, address, city, pincode, occupation, ref_by,
       is_new_patient, registration_date, notes, status, created_at, updated_at";

fn map_patient(row: &Row<'_>) -> rusqlite::Result<Patient> {
    let status_str: String = row.get(17)?;
    let status = PatientStatus::parse(&status_str)
        .ok_or_else(|| column_decode_error(17, "patient status", &status_str))?;

    Ok(Patient {
        id: row.get(0)?,
        regd_no: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        mobile_no: row.get(4)?,
        email: row.get(5)?,
        gender: row.get(6)?,
        age: row.get(7)?,
        date_of_birth: row.get(8)?,
        address: row.get(9)?,
        city: row.get(10)?,
        pincode: row.get(11)?,
        occupation: row.get(12)?,
        ref_by: row.get(13)?,
        is_new_patient: row.get(14)?,
        registration_date: row.get(15)?,
        notes: row.get(16)?,
        status,
        created_at: row.get(18)?,
        updated_at: row.get(19)?,
    })
}

/// Insert a patient row, returning the new id. Callable inside a
/// transaction via deref to [`Connection`].
pub(crate) fn insert_patient(conn: &Connection, patient: &Patient) -> DbResult<i64> {
    conn.execute(
        r#"
        INSERT INTO patients (
            regd_no, first_name, last_name, mobile_no, email, gender, age,
            date_of_birth, address, city, pincode, occupation, ref_by,
            is_new_patient, registration_date, notes, status, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)
        "#,
        params![
            patient.regd_no,
            patient.first_name,
            patient.last_name,
            patient.mobile_no,
            patient.email,
            patient.gender,
            patient.age,
            patient.date_of_birth,
            patient.address,
            patient.city,
            patient.pincode,
            patient.occupation,
            patient.ref_by,
            patient.is_new_patient,
            patient.registration_date,
            patient.notes,
            patient.status.as_str(),
            patient.created_at,
            patient.updated_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Clear the new-patient flag. One-way: nothing ever sets it back.
pub(crate) fn mark_patient_not_new(conn: &Connection, patient_id: i64) -> DbResult<bool> {
    let rows_affected = conn.execute(
        "UPDATE patients SET is_new_patient = 0, updated_at = datetime('now') WHERE id = ?",
        [patient_id],
    )?;
    Ok(rows_affected > 0)
}

pub(crate) fn get_patient(conn: &Connection, id: i64) -> DbResult<Option<Patient>> {
    conn.query_row(
        &format!("SELECT {} FROM patients WHERE id = ?", PATIENT_COLUMNS),
        [id],
        map_patient,
    )
    .optional()
    .map_err(Into::into)
}

impl Database {
    /// Insert a new patient, returning the assigned row id.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<i64> {
        insert_patient(&self.conn, patient)
    }

    /// Get a patient by row id.
    pub fn get_patient(&self, id: i64) -> DbResult<Option<Patient>> {
        get_patient(&self.conn, id)
    }

    /// Get a patient by registration number.
    pub fn get_patient_by_regd_no(&self, regd_no: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM patients WHERE regd_no = ?", PATIENT_COLUMNS),
                [regd_no],
                map_patient,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Update a patient's editable details. The registration number and
    /// new-patient flag are not touched here.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                first_name = ?2,
                last_name = ?3,
                mobile_no = ?4,
                email = ?5,
                gender = ?6,
                age = ?7,
                date_of_birth = ?8,
                address = ?9,
                city = ?10,
                pincode = ?11,
                occupation = ?12,
                ref_by = ?13,
                notes = ?14,
                status = ?15,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                patient.id,
                patient.first_name,
                patient.last_name,
                patient.mobile_no,
                patient.email,
                patient.gender,
                patient.age,
                patient.date_of_birth,
                patient.address,
                patient.city,
                patient.pincode,
                patient.occupation,
                patient.ref_by,
                patient.notes,
                patient.status.as_str(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Search patients by registration number, mobile or name (substring).
    pub fn search_patients(&self, query: &str, limit: usize) -> DbResult<Vec<Patient>> {
        let pattern = format!("%{}%", query);
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {} FROM patients
            WHERE regd_no LIKE ?1 OR mobile_no LIKE ?1
               OR first_name LIKE ?1 OR last_name LIKE ?1
            ORDER BY last_name, first_name
            LIMIT ?2
            "#,
            PATIENT_COLUMNS
        ))?;

        let rows = stmt.query_map(params![pattern, limit as i64], map_patient)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List all patients.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM patients ORDER BY last_name, first_name",
            PATIENT_COLUMNS
        ))?;

        let rows = stmt.query_map([], map_patient)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Total number of registered patients.
    pub fn count_patients(&self) -> DbResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))
            .map_err(Into::into)
    }
}
