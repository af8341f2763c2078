//! Product record location inside an arbitrarily shaped response tree.
//!
//! The SOAP vendor has moved its product list around more than once —
//! `GetProductsResponse/Products/Product`, `listResponse/items`, bare
//! arrays inside `return` — so the locator never assumes a layout. It
//! tries strategies in falling order of precision and returns the first
//! one that yields records; strategies are never merged. Finding nothing
//! is a valid outcome, not an error.

use crate::tree::RawNode;
use crate::walk::walk;

/// Lowercased key names that mark a mapping as "product-ish" for the
/// shape-sniffing strategy. Recall-biased on purpose: a false positive
/// costs one near-empty record, a false negative loses real inventory.
const PRODUCTISH_KEYS: [&str; 6] = [
    "sku",
    "partnumber",
    "stylenumber",
    "productname",
    "brand",
    "brandname",
];

/// Find the product records in a decoded response tree.
///
/// `products_path` is the operator-pinned dot path from the supplier
/// settings; when it resolves to one or more records it wins outright,
/// and when it resolves to nothing the heuristics still run — a stale
/// path must degrade, not blank the feed.
///
/// Heuristics, in order; first non-empty result wins:
///
/// 1. the `Product` field of the first mapping reached under a key ending
///    in `product`/`products` (one envelope, coerced to a sequence),
/// 2. every sequence or mapping under a key containing `product`/`item`,
///    concatenated in traversal order,
/// 3. elements of any sequence anywhere that look product-ish by key.
///
/// Returns an empty vector when the tree holds no products at all.
#[must_use]
pub fn locate_products<'a>(root: &'a RawNode, products_path: Option<&str>) -> Vec<&'a RawNode> {
    // Strategy 0: operator-pinned path
    if let Some(path) = products_path {
        let pinned = resolve_path(root, path);
        if pinned.is_empty() {
            tracing::debug!(path, "configured products path resolved to nothing, falling back");
        } else {
            tracing::debug!(path, count = pinned.len(), "located products via configured path");
            return pinned;
        }
    }

    // Strategy 1: direct Product field under a *product(s) key
    let direct = find_direct_products(root);
    if !direct.is_empty() {
        tracing::debug!(count = direct.len(), "located products via direct Product field");
        return direct;
    }

    // Strategy 2: buckets keyed by product/item
    let keyed = collect_keyed_buckets(root);
    if !keyed.is_empty() {
        tracing::debug!(count = keyed.len(), "located products via keyed buckets");
        return keyed;
    }

    // Strategy 3: shape sniffing over all sequences
    let sniffed = sniff_product_shapes(root);
    if !sniffed.is_empty() {
        tracing::debug!(count = sniffed.len(), "located products via shape sniffing");
        return sniffed;
    }

    tracing::warn!("no product records found in response tree");
    Vec::new()
}

/// Descend `path` segment by segment with exact key lookups and coerce the
/// terminal node to a record sequence.
fn resolve_path<'a>(root: &'a RawNode, path: &str) -> Vec<&'a RawNode> {
    let mut node = root;
    for segment in path.split('.') {
        match node.get(segment) {
            Some(child) => node = child,
            None => return Vec::new(),
        }
    }
    as_record_seq(node)
}

/// A sequence contributes its elements; a mapping or scalar is a single
/// record; `Null` (a self-closing element) holds no records.
fn as_record_seq(node: &RawNode) -> Vec<&RawNode> {
    match node {
        RawNode::Seq(elements) => elements.iter().collect(),
        RawNode::Null => Vec::new(),
        _ => vec![node],
    }
}

fn key_ends_with_product(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    lower.ends_with("product") || lower.ends_with("products")
}

fn key_is_bucket(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    lower.contains("product") || lower.contains("item")
}

fn looks_like_product(node: &RawNode) -> bool {
    let Some(entries) = node.entries() else {
        return false;
    };
    entries
        .iter()
        .any(|(key, _)| PRODUCTISH_KEYS.contains(&key.to_ascii_lowercase().as_str()))
}

/// Strategy 1: first mapping reached (pre-order) under a `*product(s)` key
/// that carries a `Product` field. The field value is the record set.
fn find_direct_products(root: &RawNode) -> Vec<&RawNode> {
    let mut product_field: Option<&RawNode> = None;
    walk(root, "", &mut |node, key| {
        if product_field.is_some() || !key_ends_with_product(key) {
            return;
        }
        if let Some(value) = node.get("Product") {
            product_field = Some(value);
        }
    });
    product_field.map(as_record_seq).unwrap_or_default()
}

/// Strategy 2: concatenate, in traversal order, the mapping elements of
/// every sequence under a `product`/`item` key plus every mapping sitting
/// directly under such a key.
fn collect_keyed_buckets(root: &RawNode) -> Vec<&RawNode> {
    let mut found = Vec::new();
    collect_keyed(root, "", false, &mut found);
    found
}

fn collect_keyed<'a>(
    node: &'a RawNode,
    key: &str,
    taken_by_parent: bool,
    found: &mut Vec<&'a RawNode>,
) {
    match node {
        RawNode::Map(entries) => {
            if !taken_by_parent && key_is_bucket(key) {
                found.push(node);
            }
            for (entry_key, value) in entries {
                collect_keyed(value, entry_key, false, found);
            }
        }
        RawNode::Seq(elements) => {
            let bucket = key_is_bucket(key);
            if bucket {
                found.extend(elements.iter().filter(|element| element.is_map()));
            }
            for element in elements {
                // Elements inherit the sequence's key; the ones collected just
                // above must not be pushed a second time at their own level.
                collect_keyed(element, key, bucket, found);
            }
        }
        RawNode::Text(_) | RawNode::Number(_) | RawNode::Null => {}
    }
}

/// Strategy 3: elements of any sequence, anywhere, that carry at least one
/// product-ish key.
fn sniff_product_shapes(root: &RawNode) -> Vec<&RawNode> {
    let mut found = Vec::new();
    walk(root, "", &mut |node, _key| {
        if let RawNode::Seq(elements) = node {
            found.extend(elements.iter().filter(|element| looks_like_product(element)));
        }
    });
    found
}

#[cfg(test)]
#[path = "locate_test.rs"]
mod tests;
