//! Follow-up reminder database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{column_decode_error, Database, DbResult};
use crate::models::{FollowUpReminder, FollowUpStatus};

const FOLLOW_UP_COLUMNS: &str = "id, patient_id, case_id, appointment_id, follow_up_date,
       status, is_free, notes, created_at, updated_at";

fn map_follow_up(row: &Row<'_>) -> rusqlite::Result<FollowUpReminder> {
    let status_str: String = row.get(5)?;
    let status = FollowUpStatus::parse(&status_str)
        .ok_or_else(|| column_decode_error(5, "follow-up status", &status_str))?;

    Ok(FollowUpReminder {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        case_id: row.get(2)?,
        appointment_id: row.get(3)?,
        follow_up_date: row.get(4)?,
        status,
        is_free: row.get(6)?,
        notes: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

impl Database {
    /// Insert a follow-up reminder, returning the assigned row id.
    pub fn insert_follow_up(&self, reminder: &FollowUpReminder) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO follow_ups (
                patient_id, case_id, appointment_id, follow_up_date,
                status, is_free, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                reminder.patient_id,
                reminder.case_id,
                reminder.appointment_id,
                reminder.follow_up_date,
                reminder.status.as_str(),
                reminder.is_free,
                reminder.notes,
                reminder.created_at,
                reminder.updated_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a follow-up reminder by row id.
    pub fn get_follow_up(&self, id: i64) -> DbResult<Option<FollowUpReminder>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM follow_ups WHERE id = ?", FOLLOW_UP_COLUMNS),
                [id],
                map_follow_up,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List reminders falling on a date.
    pub fn list_follow_ups_on_date(&self, date: &str) -> DbResult<Vec<FollowUpReminder>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM follow_ups WHERE follow_up_date = ? ORDER BY id",
            FOLLOW_UP_COLUMNS
        ))?;

        let rows = stmt.query_map([date], map_follow_up)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List all pending reminders due on or before a date.
    pub fn list_pending_follow_ups(&self, up_to_date: &str) -> DbResult<Vec<FollowUpReminder>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {} FROM follow_ups
            WHERE status = 'pending' AND follow_up_date <= ?
            ORDER BY follow_up_date, id
            "#,
            FOLLOW_UP_COLUMNS
        ))?;

        let rows = stmt.query_map([up_to_date], map_follow_up)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Count reminders still pending on or before a date.
    pub fn count_pending_follow_ups(&self, up_to_date: &str) -> DbResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM follow_ups WHERE status = 'pending' AND follow_up_date <= ?",
                [up_to_date],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    /// Resolve a pending reminder. Only pending rows change, so completed
    /// and missed reminders stay as recorded.
    pub fn set_follow_up_status(&self, id: i64, status: FollowUpStatus) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE follow_ups SET
                status = ?2,
                updated_at = datetime('now')
            WHERE id = ?1 AND status = 'pending'
            "#,
            params![id, status.as_str()],
        )?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewPatient, Patient};

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
    fn test_insert_and_list_by_date() {
        let (db, patient_id) = setup_db();

        db.insert_follow_up(&FollowUpReminder::new(patient_id, "2024-06-15".into()))
            .unwrap();
        db.insert_follow_up(&FollowUpReminder::new(patient_id, "2024-06-20".into()))
            .unwrap();

        assert_eq!(db.list_follow_ups_on_date("2024-06-15").unwrap().len(), 1);
        assert_eq!(db.list_follow_ups_on_date("2024-06-16").unwrap().len(), 0);
    }

    #[test]
    fn test_pending_window() {
        let (db, patient_id) = setup_db();

        let due = db
            .insert_follow_up(&FollowUpReminder::new(patient_id, "2024-06-10".into()))
            .unwrap();
        db.insert_follow_up(&FollowUpReminder::new(patient_id, "2024-07-01".into()))
            .unwrap();

        let pending = db.list_pending_follow_ups("2024-06-15").unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, due);
        assert_eq!(db.count_pending_follow_ups("2024-07-01").unwrap(), 2);
    }

    #[test]
    fn test_status_resolution_is_final() {
        let (db, patient_id) = setup_db();
        let id = db
            .insert_follow_up(&FollowUpReminder::new(patient_id, "2024-06-10".into()))
            .unwrap();

        assert!(db.set_follow_up_status(id, FollowUpStatus::Completed).unwrap());
        // A resolved reminder cannot be flipped to missed
        assert!(!db.set_follow_up_status(id, FollowUpStatus::Missed).unwrap());

        let retrieved = db.get_follow_up(id).unwrap().unwrap();
        assert_eq!(retrieved.status, FollowUpStatus::Completed);
    }
}
