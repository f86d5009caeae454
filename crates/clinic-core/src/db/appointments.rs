//! Appointment database operations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{column_decode_error, Database, DbResult};
use crate::models::{Appointment, AppointmentStatus, AppointmentType, VisitType};

const APPOINTMENT_COLUMNS: &str = "id, patient_id, appointment_date, appointment_time, token_no,
       appointment_type, status, visit_type, reason, rescheduled_from,
       cancelled_at, cancellation_reason, created_at, updated_at";

fn map_appointment(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    let type_str: String = row.get(5)?;
    let status_str: String = row.get(6)?;
    let visit_str: String = row.get(7)?;

    Ok(Appointment {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        appointment_date: row.get(2)?,
        appointment_time: row.get(3)?,
        token_no: row.get(4)?,
        appointment_type: AppointmentType::parse(&type_str)
            .ok_or_else(|| column_decode_error(5, "appointment type", &type_str))?,
        status: AppointmentStatus::parse(&status_str)
            .ok_or_else(|| column_decode_error(6, "appointment status", &status_str))?,
        visit_type: VisitType::parse(&visit_str)
            .ok_or_else(|| column_decode_error(7, "visit type", &visit_str))?,
        reason: row.get(8)?,
        rescheduled_from: row.get(9)?,
        cancelled_at: row.get(10)?,
        cancellation_reason: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

/// Count appointments booked for a date. Run inside the same transaction as
/// the insert that consumes the next token.
pub(crate) fn count_appointments_on_date(conn: &Connection, date: &str) -> DbResult<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM appointments WHERE appointment_date = ?",
        [date],
        |row| row.get(0),
    )
    .map_err(Into::into)
}

/// Insert an appointment row, returning the new id.
pub(crate) fn insert_appointment(conn: &Connection, appointment: &Appointment) -> DbResult<i64> {
    conn.execute(
        r#"
        INSERT INTO appointments (
            patient_id, appointment_date, appointment_time, token_no,
            appointment_type, status, visit_type, reason, rescheduled_from,
            cancelled_at, cancellation_reason, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
        "#,
        params![
            appointment.patient_id,
            appointment.appointment_date,
            appointment.appointment_time,
            appointment.token_no,
            appointment.appointment_type.as_str(),
            appointment.status.as_str(),
            appointment.visit_type.as_str(),
            appointment.reason,
            appointment.rescheduled_from,
            appointment.cancelled_at,
            appointment.cancellation_reason,
            appointment.created_at,
            appointment.updated_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub(crate) fn get_appointment(conn: &Connection, id: i64) -> DbResult<Option<Appointment>> {
    conn.query_row(
        &format!("SELECT {} FROM appointments WHERE id = ?", APPOINTMENT_COLUMNS),
        [id],
        map_appointment,
    )
    .optional()
    .map_err(Into::into)
}

/// Set the status of an appointment row. Transition legality is checked by
/// the caller; cancellation details are only written for `Cancelled`.
pub(crate) fn set_appointment_status(
    conn: &Connection,
    id: i64,
    status: AppointmentStatus,
    cancellation_reason: Option<&str>,
    cancelled_at: Option<&str>,
) -> DbResult<bool> {
    let rows_affected = conn.execute(
        r#"
        UPDATE appointments SET
            status = ?2,
            cancellation_reason = ?3,
            cancelled_at = ?4,
            updated_at = datetime('now')
        WHERE id = ?1
        "#,
        params![id, status.as_str(), cancellation_reason, cancelled_at],
    )?;
    Ok(rows_affected > 0)
}

impl Database {
    /// Insert an appointment, returning the assigned row id.
    pub fn insert_appointment(&self, appointment: &Appointment) -> DbResult<i64> {
        insert_appointment(&self.conn, appointment)
    }

    /// Get an appointment by row id.
    pub fn get_appointment(&self, id: i64) -> DbResult<Option<Appointment>> {
        get_appointment(&self.conn, id)
    }

    /// List appointments for a date in token order.
    pub fn list_appointments_by_date(&self, date: &str) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {} FROM appointments
            WHERE appointment_date = ?
            ORDER BY token_no
            "#,
            APPOINTMENT_COLUMNS
        ))?;

        let rows = stmt.query_map([date], map_appointment)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List all appointments for a patient, most recent date first.
    pub fn list_appointments_for_patient(&self, patient_id: i64) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {} FROM appointments
            WHERE patient_id = ?
            ORDER BY appointment_date DESC, token_no
            "#,
            APPOINTMENT_COLUMNS
        ))?;

        let rows = stmt.query_map([patient_id], map_appointment)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Count appointments booked for a date.
    pub fn count_appointments_on_date(&self, date: &str) -> DbResult<i64> {
        count_appointments_on_date(&self.conn, date)
    }
}
