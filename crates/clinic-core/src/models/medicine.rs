//! Medicine master catalog models.

use serde::{Deserialize, Serialize};

/// A stocked medicine in the dispensary catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medicine {
    /// Surrogate row id (0 until inserted)
    pub id: i64,
    pub name: String,
    /// e.g. mother tincture, 6x, 30, 200, 1M
    pub category: Option<String>,
    pub potency: Option<String>,
    /// liquid, tablet, globules
    pub form: Option<String>,
    pub manufacturer: Option<String>,
    pub stock: i64,
    /// Reorder threshold
    pub min_stock: i64,
    pub unit: String,
    /// Whole rupees per unit
    pub price: i64,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Medicine {
    /// Create a new catalog entry with default stock levels.
    pub fn new(name: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            name,
            category: None,
            potency: None,
            form: None,
            manufacturer: None,
            stock: 0,
            min_stock: 10,
            unit: "ml".to_string(),
            price: 0,
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Stock has fallen to or below the reorder threshold.
    pub fn needs_restock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_medicine_defaults() {
        let med = Medicine::new("Arnica Montana".into());
        assert!(med.is_active);
        assert_eq!(med.unit, "ml");
        assert!(med.needs_restock()); // stock 0 <= min 10
    }
}
