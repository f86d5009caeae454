//! Medicine catalog database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::Medicine;

const MEDICINE_COLUMNS: &str = "id, name, category, potency, form, manufacturer, stock,
       min_stock, unit, price, is_active, created_at, updated_at";

fn map_medicine(row: &Row<'_>) -> rusqlite::Result<Medicine> {
    Ok(Medicine {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        potency: row.get(3)?,
        form: row.get(4)?,
        manufacturer: row.get(5)?,
        stock: row.get(6)?,
        min_stock: row.get(7)?,
        unit: row.get(8)?,
        price: row.get(9)?,
        is_active: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

impl Database {
    /// Insert a medicine, returning the assigned row id.
    pub fn insert_medicine(&self, medicine: &Medicine) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO medicines (
                name, category, potency, form, manufacturer, stock,
                min_stock, unit, price, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                medicine.name,
                medicine.category,
                medicine.potency,
                medicine.form,
                medicine.manufacturer,
                medicine.stock,
                medicine.min_stock,
                medicine.unit,
                medicine.price,
                medicine.is_active,
                medicine.created_at,
                medicine.updated_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a medicine by row id.
    pub fn get_medicine(&self, id: i64) -> DbResult<Option<Medicine>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM medicines WHERE id = ?", MEDICINE_COLUMNS),
                [id],
                map_medicine,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Search active medicines by name prefix.
    pub fn search_medicines(&self, prefix: &str, limit: usize) -> DbResult<Vec<Medicine>> {
        let pattern = format!("{}%", prefix);
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {} FROM medicines
            WHERE is_active = 1 AND name LIKE ?1
            ORDER BY name
            LIMIT ?2
            "#,
            MEDICINE_COLUMNS
        ))?;

        let rows = stmt.query_map(params![pattern, limit as i64], map_medicine)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List all active medicines in name order.
    pub fn list_active_medicines(&self) -> DbResult<Vec<Medicine>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM medicines WHERE is_active = 1 ORDER BY name",
            MEDICINE_COLUMNS
        ))?;

        let rows = stmt.query_map([], map_medicine)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Active medicines at or below their reorder threshold.
    pub fn list_medicines_needing_restock(&self) -> DbResult<Vec<Medicine>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM medicines WHERE is_active = 1 AND stock <= min_stock ORDER BY name",
            MEDICINE_COLUMNS
        ))?;

        let rows = stmt.query_map([], map_medicine)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Adjust stock by a signed delta. Errors if the adjustment would take
    /// stock below zero.
    pub fn adjust_medicine_stock(&self, id: i64, delta: i64) -> DbResult<Medicine> {
        let medicine = self
            .get_medicine(id)?
            .ok_or_else(|| DbError::NotFound(format!("medicine {}", id)))?;

        let new_stock = medicine.stock + delta;
        if new_stock < 0 {
            return Err(DbError::Constraint(format!(
                "stock for {} cannot go below zero (have {}, delta {})",
                medicine.name, medicine.stock, delta
            )));
        }

        self.conn.execute(
            "UPDATE medicines SET stock = ?2, updated_at = datetime('now') WHERE id = ?1",
            params![id, new_stock],
        )?;

        Ok(Medicine {
            stock: new_stock,
            ..medicine
        })
    }

    /// Soft-delete a medicine from the catalog.
    pub fn deactivate_medicine(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE medicines SET is_active = 0, updated_at = datetime('now') WHERE id = ?",
            [id],
        )?;
        Ok(rows_affected > 0)
    }
}
