//! Day-at-a-glance dashboard stats.

use serde::{Deserialize, Serialize};

use crate::db::{Database, DbResult};

/// Counters for the dashboard, computed for one calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    /// The date the stats cover, `YYYY-MM-DD`
    pub date: String,
    pub total_patients: i64,
    pub appointments_today: i64,
    pub scheduled_today: i64,
    pub completed_today: i64,
    pub fees_collected_today: i64,
    /// Reminders still pending on or before the date
    pub pending_follow_ups: i64,
}

impl Database {
    /// Compute dashboard stats for a date.
    pub fn get_dashboard_stats(&self, date: &str) -> DbResult<DashboardStats> {
        let (appointments_today, scheduled_today, completed_today) = self.conn().query_row(
            r#"
            SELECT
                COUNT(*),
                COALESCE(SUM(CASE WHEN status = 'scheduled' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END), 0)
            FROM appointments
            WHERE appointment_date = ?
            "#,
            [date],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        Ok(DashboardStats {
            date: date.to_string(),
            total_patients: self.count_patients()?,
            appointments_today,
            scheduled_today,
            completed_today,
            fees_collected_today: self.sum_fees_on_date(date)?,
            pending_follow_ups: self.count_pending_follow_ups(date)?,
        })
    }
}
