use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalog product together with the variants chosen from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductSelection {
    #[schema(example = 8123456789_i64)]
    pub product_id: i64,
    #[serde(default)]
    pub variant_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Product {0} does not exist in the catalog")]
    ProductNotFound(i64),

    #[error("Variant {0} does not exist in the catalog")]
    VariantNotFound(i64),

    #[error("Variant {variant_id} does not belong to product {product_id}")]
    VariantNotInProduct { product_id: i64, variant_id: i64 },
}

impl CatalogError {
    pub fn offending_id(&self) -> i64 {
        match self {
            Self::ProductNotFound(id) | Self::VariantNotFound(id) => *id,
            Self::VariantNotInProduct { variant_id, .. } => *variant_id,
        }
    }
}

/// Product id to variant ids, as the storefront reported them for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    products: HashMap<i64, Vec<i64>>,
}

impl CatalogSnapshot {
    pub fn new(products: HashMap<i64, Vec<i64>>) -> Self {
        Self { products }
    }

    pub fn insert_product(&mut self, product_id: i64, variant_ids: Vec<i64>) {
        self.products
            .entry(product_id)
            .or_default()
            .extend(variant_ids);
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn contains_product(&self, product_id: i64) -> bool {
        self.products.contains_key(&product_id)
    }

    pub fn contains_variant(&self, variant_id: i64) -> bool {
        self.products
            .values()
            .any(|variants| variants.contains(&variant_id))
    }

    /// Fails on the first unknown product, then on the first unknown variant.
    /// Variants are looked up across every product in the snapshot.
    pub fn validate_products_and_variants(
        &self,
        product_ids: &[i64],
        variant_ids: &[i64],
    ) -> Result<(), CatalogError> {
        if let Some(missing) = product_ids.iter().find(|id| !self.contains_product(**id)) {
            return Err(CatalogError::ProductNotFound(*missing));
        }

        if let Some(missing) = variant_ids.iter().find(|id| !self.contains_variant(**id)) {
            return Err(CatalogError::VariantNotFound(*missing));
        }

        Ok(())
    }

    /// Every listed variant must sit under the product it was listed with.
    pub fn validate_product_inputs(&self, products: &[ProductSelection]) -> Result<(), CatalogError> {
        for selection in products {
            let Some(variants) = self.products.get(&selection.product_id) else {
                return Err(CatalogError::ProductNotFound(selection.product_id));
            };

            if let Some(stray) = selection
                .variant_ids
                .iter()
                .find(|id| !variants.contains(id))
            {
                if !self.contains_variant(*stray) {
                    return Err(CatalogError::VariantNotFound(*stray));
                }
                return Err(CatalogError::VariantNotInProduct {
                    product_id: selection.product_id,
                    variant_id: *stray,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot::new(hashmap! {
            10 => vec![100, 101],
            20 => vec![200],
        })
    }

    #[test]
    fn test_known_ids_pass() {
        assert!(snapshot()
            .validate_products_and_variants(&[10, 20], &[101, 200])
            .is_ok());
    }

    #[test]
    fn test_unknown_product_reported_before_variants() {
        let err = snapshot()
            .validate_products_and_variants(&[10, 99, 98], &[999])
            .unwrap_err();

        assert_eq!(err, CatalogError::ProductNotFound(99));
        assert_eq!(err.offending_id(), 99);
    }

    #[test]
    fn test_variants_are_searched_across_products() {
        assert!(snapshot()
            .validate_products_and_variants(&[10], &[200])
            .is_ok());
        assert_eq!(
            snapshot()
                .validate_products_and_variants(&[10], &[100, 555])
                .unwrap_err(),
            CatalogError::VariantNotFound(555)
        );
    }

    #[test]
    fn test_empty_input_is_valid_against_empty_snapshot() {
        assert!(CatalogSnapshot::default()
            .validate_products_and_variants(&[], &[])
            .is_ok());
    }

    #[test]
    fn test_product_inputs_require_variant_ownership() {
        let err = snapshot()
            .validate_product_inputs(&[ProductSelection {
                product_id: 10,
                variant_ids: vec![100, 200],
            }])
            .unwrap_err();

        assert_eq!(
            err,
            CatalogError::VariantNotInProduct {
                product_id: 10,
                variant_id: 200
            }
        );
    }

    #[test]
    fn test_product_inputs_unknown_variant() {
        let err = snapshot()
            .validate_product_inputs(&[ProductSelection {
                product_id: 20,
                variant_ids: vec![7],
            }])
            .unwrap_err();

        assert_eq!(err, CatalogError::VariantNotFound(7));
    }

    #[test]
    fn test_insert_product_merges_pages() {
        let mut snapshot = CatalogSnapshot::default();
        snapshot.insert_product(1, vec![11]);
        snapshot.insert_product(1, vec![12]);

        assert_eq!(snapshot.product_count(), 1);
        assert!(snapshot.contains_variant(12));
    }
}
