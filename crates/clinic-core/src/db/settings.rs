//! Fee schedule and clinic settings database operations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::{ClinicSettings, FeesSettings};

const FEES_SETTINGS_COLUMNS: &str = "id, new_patient_fee, follow_up_fee, consultation_fee,
       advance_payment, effective_date, is_active, created_at, updated_at";

const CLINIC_SETTINGS_COLUMNS: &str = "id, clinic_name, doctor_name, qualification, address,
       phone, email, footer_text, language, created_at, updated_at";

fn map_fees_settings(row: &Row<'_>) -> rusqlite::Result<FeesSettings> {
    Ok(FeesSettings {
        id: row.get(0)?,
        new_patient_fee: row.get(1)?,
        follow_up_fee: row.get(2)?,
        consultation_fee: row.get(3)?,
        advance_payment: row.get(4)?,
        effective_date: row.get(5)?,
        is_active: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn map_clinic_settings(row: &Row<'_>) -> rusqlite::Result<ClinicSettings> {
    Ok(ClinicSettings {
        id: row.get(0)?,
        clinic_name: row.get(1)?,
        doctor_name: row.get(2)?,
        qualification: row.get(3)?,
        address: row.get(4)?,
        phone: row.get(5)?,
        email: row.get(6)?,
        footer_text: row.get(7)?,
        language: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

/// Deactivate every active fee schedule row. Run inside the same
/// transaction as the insert of the replacement row.
pub(crate) fn deactivate_fees_settings(conn: &Connection) -> DbResult<usize> {
    conn.execute(
        "UPDATE fees_settings SET is_active = 0, updated_at = datetime('now') WHERE is_active = 1",
        [],
    )
    .map_err(Into::into)
}

/// Insert a fee schedule row, returning the new id.
pub(crate) fn insert_fees_settings(conn: &Connection, settings: &FeesSettings) -> DbResult<i64> {
    conn.execute(
        r#"
        INSERT INTO fees_settings (
            new_patient_fee, follow_up_fee, consultation_fee, advance_payment,
            effective_date, is_active, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            settings.new_patient_fee,
            settings.follow_up_fee,
            settings.consultation_fee,
            settings.advance_payment,
            settings.effective_date,
            settings.is_active,
            settings.created_at,
            settings.updated_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub(crate) fn get_clinic_settings(conn: &Connection) -> DbResult<Option<ClinicSettings>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM clinic_settings ORDER BY id LIMIT 1",
            CLINIC_SETTINGS_COLUMNS
        ),
        [],
        map_clinic_settings,
    )
    .optional()
    .map_err(Into::into)
}

/// Write the clinic letterhead. Creates the row on first call and edits it
/// in place afterwards.
pub(crate) fn save_clinic_settings(
    conn: &Connection,
    settings: &ClinicSettings,
) -> DbResult<ClinicSettings> {
    match get_clinic_settings(conn)? {
        Some(existing) => {
            conn.execute(
                r#"
                UPDATE clinic_settings SET
                    clinic_name = ?2,
                    doctor_name = ?3,
                    qualification = ?4,
                    address = ?5,
                    phone = ?6,
                    email = ?7,
                    footer_text = ?8,
                    language = ?9,
                    updated_at = datetime('now')
                WHERE id = ?1
                "#,
                params![
                    existing.id,
                    settings.clinic_name,
                    settings.doctor_name,
                    settings.qualification,
                    settings.address,
                    settings.phone,
                    settings.email,
                    settings.footer_text,
                    settings.language,
                ],
            )?;
            Ok(ClinicSettings {
                id: existing.id,
                created_at: existing.created_at,
                ..settings.clone()
            })
        }
        None => {
            conn.execute(
                r#"
                INSERT INTO clinic_settings (
                    clinic_name, doctor_name, qualification, address,
                    phone, email, footer_text, language, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
                params![
                    settings.clinic_name,
                    settings.doctor_name,
                    settings.qualification,
                    settings.address,
                    settings.phone,
                    settings.email,
                    settings.footer_text,
                    settings.language,
                    settings.created_at,
                    settings.updated_at,
                ],
            )?;
            Ok(ClinicSettings {
                id: conn.last_insert_rowid(),
                ..settings.clone()
            })
        }
    }
}

impl Database {
    /// The fee schedule currently in effect, if one has been published.
    pub fn get_active_fees_settings(&self) -> DbResult<Option<FeesSettings>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM fees_settings WHERE is_active = 1 ORDER BY id DESC LIMIT 1",
                    FEES_SETTINGS_COLUMNS
                ),
                [],
                map_fees_settings,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Full fee schedule history, newest first.
    pub fn list_fees_settings_history(&self) -> DbResult<Vec<FeesSettings>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM fees_settings ORDER BY id DESC",
            FEES_SETTINGS_COLUMNS
        ))?;

        let rows = stmt.query_map([], map_fees_settings)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// The clinic letterhead row, if configured.
    pub fn get_clinic_settings(&self) -> DbResult<Option<ClinicSettings>> {
        get_clinic_settings(&self.conn)
    }

    /// Write the clinic letterhead.
    pub fn save_clinic_settings(&self, settings: &ClinicSettings) -> DbResult<ClinicSettings> {
        save_clinic_settings(&self.conn, settings)
    }
}
