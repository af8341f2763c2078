//! Duplicate suppression over mapped records.

use std::collections::HashSet;

use garb_core::CanonicalProduct;

/// Keep the first occurrence of each `(sku, size)` pair, preserving input
/// order. The pair is compared as exact strings — empty components are
/// matchable values, so a batch of all-empty wrapper records collapses to
/// one. Idempotent by construction.
#[must_use]
pub fn dedup_products(products: Vec<CanonicalProduct>) -> Vec<CanonicalProduct> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    products
        .into_iter()
        .filter(|product| {
            let (sku, size) = product.identity();
            seen.insert((sku.to_string(), size.to_string()))
        })
        .collect()
}
