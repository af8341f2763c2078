//! Canonical field extraction from one located record.

use garb_core::CanonicalProduct;

use crate::aliases::AliasTable;
use crate::tree::RawNode;

/// Extract a [`CanonicalProduct`] from a raw record.
///
/// Per field, the first alias whose value is a non-empty scalar wins
/// (strings trimmed, numbers stringified). Price keeps scanning past
/// non-numeric candidates instead of zeroing out — `<Price>call for
/// quote</Price>` next to a perfectly good `<PiecePrice>` is a shape the
/// vendor actually ships. Title falls back to the style name, the front
/// image to a key scan. `provider` is the caller's to fill; the record
/// itself does not know which vendor it came from.
///
/// Never fails: a record matching no aliases maps to an all-empty
/// product, which deduplication and downstream filters deal with.
#[must_use]
pub fn map_record(record: &RawNode, aliases: &AliasTable) -> CanonicalProduct {
    let style_name = first_text(record, aliases.style);

    let title = {
        let explicit = first_text(record, aliases.title);
        if explicit.is_empty() {
            style_name.clone()
        } else {
            explicit
        }
    };

    let image_front = {
        let aliased = first_text(record, aliases.image_front);
        if aliased.is_empty() {
            sniff_image_url(record).unwrap_or_default()
        } else {
            aliased
        }
    };

    CanonicalProduct {
        sku: first_text(record, aliases.sku),
        brand_name: first_text(record, aliases.brand),
        style_name,
        color_name: first_text(record, aliases.color),
        size_name: first_text(record, aliases.size),
        title,
        price: first_price(record, aliases.price),
        image_front,
        image_back: first_text(record, aliases.image_back),
        provider: String::new(),
    }
}

fn first_text(record: &RawNode, aliases: &[&str]) -> String {
    aliases
        .iter()
        .find_map(|alias| record.get(alias).and_then(scalar_text))
        .unwrap_or_default()
}

/// First alias that parses to a finite number. Non-numeric candidates are
/// skipped, not treated as zero, so a junk high-priority spelling cannot
/// mask a usable lower-priority one.
fn first_price(record: &RawNode, aliases: &[&str]) -> f64 {
    aliases
        .iter()
        .find_map(|alias| record.get(alias).and_then(scalar_number))
        .unwrap_or(0.0)
}

fn scalar_text(node: &RawNode) -> Option<String> {
    match node {
        RawNode::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        // f64 Display drops a zero fraction, so 12.0 renders as "12".
        RawNode::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn scalar_number(node: &RawNode) -> Option<f64> {
    match node {
        RawNode::Number(n) if n.is_finite() => Some(*n),
        RawNode::Text(s) => parse_price_text(s),
        _ => None,
    }
}

/// Parse a price out of vendor text. Tolerates a currency sign and
/// thousands separators; when the full string does not parse, takes the
/// longest leading numeric prefix ("4.42 USD").
fn parse_price_text(s: &str) -> Option<f64> {
    let cleaned = s.trim().trim_start_matches('$').replace(',', "");
    if let Ok(n) = cleaned.parse::<f64>() {
        return n.is_finite().then_some(n);
    }
    let prefix: String = cleaned
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        .collect();
    let n = prefix.parse::<f64>().ok()?;
    n.is_finite().then_some(n)
}

/// Fallback for the front image only: first key containing `image`
/// (case-insensitive) whose value is a string starting with a URL scheme.
/// The back image stays alias-only — this scan would hand it the front
/// image all over again.
fn sniff_image_url(record: &RawNode) -> Option<String> {
    let entries = record.entries()?;
    for (key, value) in entries {
        if !key.to_ascii_lowercase().contains("image") {
            continue;
        }
        if let RawNode::Text(s) = value {
            let trimmed = s.trim();
            if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
                tracing::debug!(key, "front image found via key scan");
                return Some(trimmed.to_string());
            }
        }
    }
    None
}
