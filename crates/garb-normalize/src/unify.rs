//! Cross-vendor reduction to the public product shape.
//!
//! The serving boundary receives records in whichever shape the vendor
//! produced — S&S JSON rows (`brandName`, `customerPrice`,
//! `colorFrontImage`) or already-canonical SanMar rows (`brandName`,
//! `price`, `imageFront`) — and reduces each to one [`UnifiedProduct`].
//! Pure and total: any JSON object maps to something, missing fields
//! default rather than error, and running the pass on its own output
//! changes nothing.

use garb_core::UnifiedProduct;
use serde_json::Value;

/// Reduce one vendor-shaped record to the public shape.
#[must_use]
pub fn unify_record(record: &Value) -> UnifiedProduct {
    UnifiedProduct {
        sku: first_string(record, &["sku", "productId"]),
        brand: first_string(record, &["brand", "brandName"]),
        style: first_string(record, &["style", "styleName"]),
        color: first_string(record, &["color", "colorName"]),
        size: first_string(record, &["size", "sizeName"]),
        price: first_price(record, &["price", "customerPrice", "retailPrice"]),
        image_front: first_string(record, &["imageFront", "colorFrontImage"]),
        image_back: first_string(record, &["imageBack", "colorBackImage"]),
        provider: infer_provider(record),
    }
}

/// Reduce a whole batch, preserving order.
#[must_use]
pub fn unify_records(records: &[Value]) -> Vec<UnifiedProduct> {
    records.iter().map(unify_record).collect()
}

fn first_string(record: &Value, keys: &[&str]) -> String {
    for key in keys {
        match record.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return s.trim().to_string(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    String::new()
}

/// First key holding a number or a numeric string; non-numeric candidates
/// are passed over, mirroring the field mapper's price rule.
fn first_price(record: &Value, keys: &[&str]) -> f64 {
    for key in keys {
        match record.get(key) {
            Some(Value::Number(n)) => {
                if let Some(price) = n.as_f64() {
                    return price;
                }
            }
            Some(Value::String(s)) => {
                if let Ok(price) = s.trim().parse::<f64>() {
                    if price.is_finite() {
                        return price;
                    }
                }
            }
            _ => {}
        }
    }
    0.0
}

/// Explicit `provider` wins; otherwise a `customerPrice` key marks the
/// record as S&S-shaped, and everything else is assumed SanMar.
fn infer_provider(record: &Value) -> String {
    if let Some(Value::String(provider)) = record.get("provider") {
        if !provider.trim().is_empty() {
            return provider.trim().to_string();
        }
    }
    if record.get("customerPrice").is_some() {
        "sns".to_string()
    } else {
        "sanmar".to_string()
    }
}
