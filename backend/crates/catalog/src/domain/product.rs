//! Product aggregate

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, ProductId, StoreId, StoreProductId, UserId};
use rust_decimal::Decimal;

use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Stock held for a product at one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStock {
    pub store_id: StoreId,
    pub store_name: String,
    pub stock: i32,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Grams
    pub weight: i32,
    pub created_by: Option<UserId>,
    pub categories: Vec<Category>,
    pub stock: Vec<StoreStock>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Sum of the per-store stock rows.
    pub fn total_stock(&self) -> i64 {
        self.stock.iter().map(|s| i64::from(s.stock)).sum()
    }
}

/// Inventory row linking a product to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreProduct {
    pub id: StoreProductId,
    pub product_id: ProductId,
    pub store_id: StoreId,
    pub stock: i32,
}

/// Unvalidated creation request. Identifiers are still raw strings.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub weight: Option<i32>,
    pub stock: Option<i32>,
    pub category_ids: Option<Vec<String>>,
    pub store_id: Option<String>,
}

/// A product ready to insert, with its initial inventory.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub weight: i32,
    pub stock: i32,
    pub category_ids: Vec<CategoryId>,
    pub store_id: StoreId,
    pub created_by: UserId,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl NewProduct {
    /// Name is checked first and reported on its own; every other missing or
    /// out-of-range field shares one message.
    pub fn from_draft(draft: ProductDraft, created_by: UserId) -> CatalogResult<Self> {
        let name = non_blank(draft.name).ok_or(CatalogError::ProductNameRequired)?;

        let (Some(description), Some(price), Some(weight), Some(stock), Some(category_ids), Some(store_id)) = (
            non_blank(draft.description),
            draft.price.filter(|p| *p > Decimal::ZERO),
            draft.weight.filter(|w| *w > 0),
            draft.stock.filter(|s| *s >= 0),
            draft.category_ids.filter(|ids| !ids.is_empty()),
            non_blank(draft.store_id),
        ) else {
            return Err(CatalogError::MissingProductFields);
        };

        let mut parsed_categories = Vec::with_capacity(category_ids.len());
        for raw in &category_ids {
            let id: CategoryId = raw.trim().parse()?;
            if !parsed_categories.contains(&id) {
                parsed_categories.push(id);
            }
        }

        Ok(Self {
            id: ProductId::new(),
            name,
            description,
            price,
            weight,
            stock,
            category_ids: parsed_categories,
            store_id: store_id.parse()?,
            created_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: Some("Kopi Gayo 250g".into()),
            description: Some("Single origin arabica".into()),
            price: Some(Decimal::new(8500000, 2)),
            weight: Some(250),
            stock: Some(0),
            category_ids: Some(vec![CategoryId::new().to_string()]),
            store_id: Some(StoreId::new().to_string()),
        }
    }

    #[test]
    fn test_valid_draft() {
        let product = NewProduct::from_draft(draft(), UserId::new()).unwrap();
        assert_eq!(product.name, "Kopi Gayo 250g");
        assert_eq!(product.stock, 0);
        assert_eq!(product.category_ids.len(), 1);
    }

    #[test]
    fn test_name_is_reported_first() {
        let draft = ProductDraft {
            name: Some("   ".into()),
            price: None,
            ..draft()
        };
        assert!(matches!(
            NewProduct::from_draft(draft, UserId::new()),
            Err(CatalogError::ProductNameRequired)
        ));
    }

    #[test]
    fn test_out_of_range_fields() {
        let cases = [
            ProductDraft { price: Some(Decimal::ZERO), ..draft() },
            ProductDraft { weight: Some(0), ..draft() },
            ProductDraft { stock: Some(-1), ..draft() },
            ProductDraft { category_ids: Some(vec![]), ..draft() },
            ProductDraft { store_id: None, ..draft() },
            ProductDraft { description: None, ..draft() },
        ];
        for case in cases {
            assert!(matches!(
                NewProduct::from_draft(case, UserId::new()),
                Err(CatalogError::MissingProductFields)
            ));
        }
    }

    #[test]
    fn test_malformed_ids() {
        let draft = ProductDraft {
            category_ids: Some(vec!["nope".into()]),
            ..draft()
        };
        assert!(matches!(
            NewProduct::from_draft(draft, UserId::new()),
            Err(CatalogError::InvalidIdentifier)
        ));
    }

    #[test]
    fn test_duplicate_categories_collapse() {
        let id = CategoryId::new().to_string();
        let draft = ProductDraft {
            category_ids: Some(vec![id.clone(), id]),
            ..draft()
        };
        let product = NewProduct::from_draft(draft, UserId::new()).unwrap();
        assert_eq!(product.category_ids.len(), 1);
    }

    #[test]
    fn test_total_stock_sums_rows() {
        let product = Product {
            id: ProductId::new(),
            name: "Teh".into(),
            description: "Teh melati".into(),
            price: Decimal::new(1000, 0),
            weight: 100,
            created_by: None,
            categories: vec![],
            stock: vec![
                StoreStock { store_id: StoreId::new(), store_name: "Jakarta".into(), stock: 4 },
                StoreStock { store_id: StoreId::new(), store_name: "Bandung".into(), stock: 7 },
            ],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(product.total_stock(), 11);
    }
}
