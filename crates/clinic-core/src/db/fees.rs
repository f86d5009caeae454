//! Fee database operations. Fee rows are never updated or deleted.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{column_decode_error, Database, DbResult};
use crate::models::{Fee, FeeType, PaymentMode, PaymentStatus};

const FEE_COLUMNS: &str = "id, patient_id, appointment_id, fee_type, amount, payment_mode,
       payment_status, advance_amount, due_amount, receipt_no, notes, fee_date,
       created_at, updated_at";

fn map_fee(row: &Row<'_>) -> rusqlite::Result<Fee> {
    let type_str: String = row.get(3)?;
    let mode_str: String = row.get(5)?;
    let status_str: String = row.get(6)?;

    Ok(Fee {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        appointment_id: row.get(2)?,
        fee_type: FeeType::parse(&type_str)
            .ok_or_else(|| column_decode_error(3, "fee type", &type_str))?,
        amount: row.get(4)?,
        payment_mode: PaymentMode::parse(&mode_str)
            .ok_or_else(|| column_decode_error(5, "payment mode", &mode_str))?,
        payment_status: PaymentStatus::parse(&status_str)
            .ok_or_else(|| column_decode_error(6, "payment status", &status_str))?,
        advance_amount: row.get(7)?,
        due_amount: row.get(8)?,
        receipt_no: row.get(9)?,
        notes: row.get(10)?,
        fee_date: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

/// Insert a fee row, returning the new id.
pub(crate) fn insert_fee(conn: &Connection, fee: &Fee) -> DbResult<i64> {
    conn.execute(
        r#"
        INSERT INTO fees (
            patient_id, appointment_id, fee_type, amount, payment_mode,
            payment_status, advance_amount, due_amount, receipt_no, notes,
            fee_date, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
        "#,
        params![
            fee.patient_id,
            fee.appointment_id,
            fee.fee_type.as_str(),
            fee.amount,
            fee.payment_mode.as_str(),
            fee.payment_status.as_str(),
            fee.advance_amount,
            fee.due_amount,
            fee.receipt_no,
            fee.notes,
            fee.fee_date,
            fee.created_at,
            fee.updated_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl Database {
    /// Insert a fee, returning the assigned row id.
    pub fn insert_fee(&self, fee: &Fee) -> DbResult<i64> {
        insert_fee(&self.conn, fee)
    }

    /// Get a fee by row id.
    pub fn get_fee(&self, id: i64) -> DbResult<Option<Fee>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM fees WHERE id = ?", FEE_COLUMNS),
                [id],
                map_fee,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Look up a fee by its receipt number.
    pub fn get_fee_by_receipt_no(&self, receipt_no: &str) -> DbResult<Option<Fee>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM fees WHERE receipt_no = ?", FEE_COLUMNS),
                [receipt_no],
                map_fee,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all fees collected from a patient, newest first.
    pub fn list_fees_for_patient(&self, patient_id: i64) -> DbResult<Vec<Fee>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {} FROM fees
            WHERE patient_id = ?
            ORDER BY fee_date DESC, id DESC
            "#,
            FEE_COLUMNS
        ))?;

        let rows = stmt.query_map([patient_id], map_fee)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List fees collected in a date range (inclusive), oldest first.
    pub fn list_fees_in_range(&self, from: &str, to: &str) -> DbResult<Vec<Fee>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {} FROM fees
            WHERE fee_date >= ?1 AND fee_date <= ?2
            ORDER BY fee_date, id
            "#,
            FEE_COLUMNS
        ))?;

        let rows = stmt.query_map(params![from, to], map_fee)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Total amount collected on a date.
    pub fn sum_fees_on_date(&self, date: &str) -> DbResult<i64> {
        self.conn
            .query_row(
                "SELECT COALESCE(SUM(amount), 0) FROM fees WHERE fee_date = ?",
                [date],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }
}
