//! Medicine catalog upkeep.

use super::{require_non_empty, OpsError, OpsResult};
use crate::db::Database;
use crate::models::Medicine;

/// Add a medicine to the catalog.
pub fn add_medicine(db: &Database, medicine: Medicine) -> OpsResult<Medicine> {
    require_non_empty("medicine name", &medicine.name)?;

    let id = db.insert_medicine(&medicine)?;
    tracing::info!(medicine_id = id, name = %medicine.name, "added medicine");
    Ok(Medicine { id, ..medicine })
}

/// Receive or dispense stock by a signed delta.
pub fn adjust_stock(db: &Database, id: i64, delta: i64) -> OpsResult<Medicine> {
    if db.get_medicine(id)?.is_none() {
        return Err(OpsError::MissingReference {
            entity: "medicine",
            id,
        });
    }
    let medicine = db.adjust_medicine_stock(id, delta)?;
    tracing::debug!(medicine_id = id, delta, stock = medicine.stock, "adjusted stock");
    Ok(medicine)
}

/// Retire a medicine from the catalog.
pub fn deactivate_medicine(db: &Database, id: i64) -> OpsResult<()> {
    if !db.deactivate_medicine(id)? {
        return Err(OpsError::MissingReference {
            entity: "medicine",
            id,
        });
    }
    tracing::info!(medicine_id = id, "deactivated medicine");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_adjust() {
        let db = Database::open_in_memory().unwrap();

        let med = add_medicine(&db, Medicine::new("Arnica Montana".into())).unwrap();
        assert!(med.id > 0);

        let med = adjust_stock(&db, med.id, 40).unwrap();
        assert_eq!(med.stock, 40);

        assert!(matches!(
            adjust_stock(&db, 999, 1),
            Err(OpsError::MissingReference { entity: "medicine", id: 999 })
        ));
    }

    #[test]
    fn test_add_requires_name() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            add_medicine(&db, Medicine::new("".into())),
            Err(OpsError::Validation(_))
        ));
    }

    #[test]
    fn test_deactivate() {
        let db = Database::open_in_memory().unwrap();
        let med = add_medicine(&db, Medicine::new("Belladonna".into())).unwrap();

        deactivate_medicine(&db, med.id).unwrap();
        assert!(db.list_active_medicines().unwrap().is_empty());

        assert!(matches!(
            deactivate_medicine(&db, 999),
            Err(OpsError::MissingReference { entity: "medicine", id: 999 })
        ));
    }
}
