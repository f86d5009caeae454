//! Fee aggregation and the fee register export.

use rusqlite::params;
use serde::{Deserialize, Serialize};

use crate::db::{Database, DbResult};

/// Collected totals broken down by fee type, over an optional date range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeeSummary {
    /// Inclusive range covered, if one was requested
    pub from: Option<String>,
    pub to: Option<String>,
    pub new_patient_total: i64,
    pub follow_up_total: i64,
    pub consultation_total: i64,
    pub advance_total: i64,
    pub grand_total: i64,
    pub receipt_count: i64,
}

/// One line of the fee register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeRegisterEntry {
    pub receipt_no: String,
    pub fee_date: String,
    pub regd_no: String,
    pub patient_name: String,
    pub fee_type: String,
    pub payment_mode: String,
    pub amount: i64,
}

/// The fee register for a date range: every receipt, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeRegister {
    pub from: String,
    pub to: String,
    pub entries: Vec<FeeRegisterEntry>,
    pub total_amount: i64,
}

impl FeeRegister {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("receipt_no,fee_date,regd_no,patient_name,fee_type,payment_mode,amount\n");

        for entry in &self.entries {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                escape_csv(&entry.receipt_no),
                escape_csv(&entry.fee_date),
                escape_csv(&entry.regd_no),
                escape_csv(&entry.patient_name),
                escape_csv(&entry.fee_type),
                escape_csv(&entry.payment_mode),
                entry.amount,
            ));
        }

        csv
    }
}

impl Database {
    /// Totals by fee type, optionally restricted to an inclusive date range.
    pub fn get_fees_summary(
        &self,
        from: Option<&str>,
        to: Option<&str>,
    ) -> DbResult<FeeSummary> {
        // Open ends of the range fall back to the full recorded span
        let lo = from.unwrap_or("0000-00-00");
        let hi = to.unwrap_or("9999-12-31");

        self.conn()
            .query_row(
                r#"
                SELECT
                    COALESCE(SUM(CASE WHEN fee_type = 'new_patient' THEN amount ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN fee_type = 'followup' THEN amount ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN fee_type = 'consultation' THEN amount ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN fee_type = 'advance' THEN amount ELSE 0 END), 0),
                    COALESCE(SUM(amount), 0),
                    COUNT(*)
                FROM fees
                WHERE fee_date >= ?1 AND fee_date <= ?2
                "#,
                params![lo, hi],
                |row| {
                    Ok(FeeSummary {
                        from: from.map(str::to_string),
                        to: to.map(str::to_string),
                        new_patient_total: row.get(0)?,
                        follow_up_total: row.get(1)?,
                        consultation_total: row.get(2)?,
                        advance_total: row.get(3)?,
                        grand_total: row.get(4)?,
                        receipt_count: row.get(5)?,
                    })
                },
            )
            .map_err(Into::into)
    }

    /// Build the fee register for an inclusive date range.
    pub fn get_fee_register(&self, from: &str, to: &str) -> DbResult<FeeRegister> {
        let mut stmt = self.conn().prepare(
            r#"
            SELECT f.receipt_no, f.fee_date, p.regd_no, p.first_name, p.last_name,
                   f.fee_type, f.payment_mode, f.amount
            FROM fees f
            JOIN patients p ON p.id = f.patient_id
            WHERE f.fee_date >= ?1 AND f.fee_date <= ?2
            ORDER BY f.fee_date, f.id
            "#,
        )?;

        let rows = stmt.query_map(params![from, to], |row| {
            let first_name: String = row.get(3)?;
            let last_name: String = row.get(4)?;
            Ok(FeeRegisterEntry {
                receipt_no: row.get(0)?,
                fee_date: row.get(1)?,
                regd_no: row.get(2)?,
                patient_name: format!("{} {}", first_name, last_name),
                fee_type: row.get(5)?,
                payment_mode: row.get(6)?,
                amount: row.get(7)?,
            })
        })?;

        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        let total_amount = entries.iter().map(|e| e.amount).sum();

        Ok(FeeRegister {
            from: from.to_string(),
            to: to.to_string(),
            entries,
            total_amount,
        })
    }
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Fee, FeePayment, FeeType, NewPatient, PaymentMode};
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

    fn insert_fee(db: &Database, patient_id: i64, fee_type: FeeType, amount: i64, date: &str, receipt: &str) {
        let mut fee = Fee::from_payment(
            FeePayment {
                patient_id,
                appointment_id: None,
                fee_type,
                amount,
                payment_mode: PaymentMode::Cash,
                advance_amount: 0,
                due_amount: 0,
                notes: None,
            },
            receipt.into(),
        );
        fee.fee_date = date.into();
        db.insert_fee(&fee).unwrap();
    }

    #[test]
    fn test_summary_groups_by_type() {
        let (db, patient_id) = setup();
        insert_fee(&db, patient_id, FeeType::NewPatient, 500, "2024-06-01", "RCP/T/001");
        insert_fee(&db, patient_id, FeeType::FollowUp, 200, "2024-06-02", "RCP/T/002");
        insert_fee(&db, patient_id, FeeType::FollowUp, 200, "2024-06-03", "RCP/T/003");
        insert_fee(&db, patient_id, FeeType::Consultation, 300, "2024-06-10", "RCP/T/004");

        let all = db.get_fees_summary(None, None).unwrap();
        assert_eq!(all.new_patient_total, 500);
        assert_eq!(all.follow_up_total, 400);
        assert_eq!(all.consultation_total, 300);
        assert_eq!(all.advance_total, 0);
        assert_eq!(all.grand_total, 1200);
        assert_eq!(all.receipt_count, 4);
    }

    #[test]
    fn test_summary_respects_range() {
        let (db, patient_id) = setup();
        insert_fee(&db, patient_id, FeeType::FollowUp, 200, "2024-06-02", "RCP/T/001");
        insert_fee(&db, patient_id, FeeType::Consultation, 300, "2024-06-10", "RCP/T/002");

        let june_first_week = db
            .get_fees_summary(Some("2024-06-01"), Some("2024-06-07"))
            .unwrap();
        assert_eq!(june_first_week.grand_total, 200);
        assert_eq!(june_first_week.receipt_count, 1);

        let empty = db
            .get_fees_summary(Some("2024-07-01"), Some("2024-07-31"))
            .unwrap();
        assert_eq!(empty.grand_total, 0);
        assert_eq!(empty.receipt_count, 0);
    }

    #[test]
    fn test_register_lines_and_csv() {
        let (db, patient_id) = setup();
        insert_fee(&db, patient_id, FeeType::NewPatient, 500, "2024-06-01", "RCP/T/001");
        insert_fee(&db, patient_id, FeeType::FollowUp, 200, "2024-06-02", "RCP/T/002");

        let register = db.get_fee_register("2024-06-01", "2024-06-30").unwrap();
        assert_eq!(register.entries.len(), 2);
        assert_eq!(register.total_amount, 700);
        assert_eq!(register.entries[0].patient_name, "Asha Rao");

        let csv = register.to_csv();
        assert!(csv.starts_with("receipt_no,"));
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains("RCP/T/002"));

        let json = register.to_json().unwrap();
        assert!(json.contains("\"total_amount\": 700"));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
