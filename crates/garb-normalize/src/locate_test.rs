use serde_json::json;

use super::*;

fn tree_of(value: serde_json::Value) -> RawNode {
    RawNode::from_json(&value)
}

// Entry order matters in several cases below; `json!` objects iterate
// alphabetically, so order-sensitive trees are built by hand.
fn map(entries: Vec<(&str, RawNode)>) -> RawNode {
    RawNode::Map(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    )
}

fn text(s: &str) -> RawNode {
    RawNode::Text(s.to_string())
}

fn skus(records: &[&RawNode]) -> Vec<String> {
    records
        .iter()
        .map(|record| {
            record
                .get("Sku")
                .or_else(|| record.get("sku"))
                .and_then(RawNode::as_text)
                .unwrap_or("<none>")
                .to_string()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Strategy 1: direct Product field
// ---------------------------------------------------------------------------

#[test]
fn direct_product_sequence_is_returned() {
    let tree = tree_of(json!({
        "Envelope": {
            "Body": {
                "GetProductsResponse": {
                    "ListProducts": {
                        "Product": [
                            {"Sku": "PC61-BLK-S"},
                            {"Sku": "PC61-BLK-M"}
                        ]
                    }
                }
            }
        }
    }));
    let records = locate_products(&tree, None);
    assert_eq!(skus(&records), vec!["PC61-BLK-S", "PC61-BLK-M"]);
}

#[test]
fn direct_product_single_mapping_becomes_singleton() {
    let tree = tree_of(json!({
        "Products": {"Product": {"Sku": "PC61-BLK-L"}}
    }));
    let records = locate_products(&tree, None);
    assert_eq!(skus(&records), vec!["PC61-BLK-L"]);
}

#[test]
fn direct_product_scalar_becomes_singleton() {
    let tree = tree_of(json!({
        "Products": {"Product": "PC61"}
    }));
    let records = locate_products(&tree, None);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].as_text(), Some("PC61"));
}

#[test]
fn direct_product_first_candidate_wins() {
    let tree = map(vec![
        (
            "FirstProducts",
            map(vec![("Product", map(vec![("Sku", text("A"))]))]),
        ),
        (
            "SecondProducts",
            map(vec![("Product", map(vec![("Sku", text("B"))]))]),
        ),
    ]);
    let records = locate_products(&tree, None);
    assert_eq!(skus(&records), vec!["A"], "only the first envelope counts");
}

#[test]
fn direct_product_key_match_is_a_suffix_match() {
    // "GetProductsResponse" ends in "response", not "products": its Product
    // field must not satisfy strategy 1 at that level.
    let tree = tree_of(json!({
        "GetProductsResponse": {"Product": "loose"},
        "status": "ok"
    }));
    let records = locate_products(&tree, None);
    // Strategy 2 still picks the wrapper up via the substring rule.
    assert_eq!(records.len(), 1);
    assert!(records[0].get("Product").is_some());
}

#[test]
fn soap_xml_with_repeated_product_elements_locates_via_direct_field() {
    let xml = r#"
        <S:Envelope xmlns:S="http://schemas.xmlsoap.org/soap/envelope/">
          <S:Body>
            <ns2:GetProductsResponse xmlns:ns2="http://impl.sanmar.com/">
              <SellableProducts>
                <Product><Sku>1</Sku></Product>
                <Product><Sku>2</Sku></Product>
                <Product><Sku>3</Sku></Product>
              </SellableProducts>
            </ns2:GetProductsResponse>
          </S:Body>
        </S:Envelope>
    "#;
    let tree = RawNode::from_xml_str(xml).unwrap();
    let records = locate_products(&tree, None);
    assert_eq!(skus(&records), vec!["1", "2", "3"]);
}

// ---------------------------------------------------------------------------
// Strategy 2: keyed buckets
// ---------------------------------------------------------------------------

#[test]
fn keyed_bucket_sequence_yields_exactly_its_elements() {
    // The regression this guards: sequence elements inherit the sequence's
    // key during traversal, so a naive collector would count each element
    // twice (once via the sequence, once as a mapping under the key).
    let tree = tree_of(json!({
        "response": {"products": [{"sku": "A"}, {"sku": "B"}]}
    }));
    let records = locate_products(&tree, None);
    assert_eq!(skus(&records), vec!["A", "B"]);
}

#[test]
fn keyed_bucket_skips_scalar_elements() {
    let tree = tree_of(json!({
        "items": ["separator", {"sku": "A"}, 42]
    }));
    let records = locate_products(&tree, None);
    assert_eq!(skus(&records), vec!["A"]);
}

#[test]
fn keyed_bucket_mapping_is_a_singleton_record() {
    let tree = tree_of(json!({
        "data": {"item": {"sku": "X", "color": "Black"}}
    }));
    let records = locate_products(&tree, None);
    assert_eq!(skus(&records), vec!["X"]);
}

#[test]
fn keyed_buckets_concatenate_in_traversal_order() {
    let tree = map(vec![
        (
            "lineItems",
            RawNode::Seq(vec![map(vec![("sku", text("A"))])]),
        ),
        ("extraItem", map(vec![("sku", text("B"))])),
    ]);
    let records = locate_products(&tree, None);
    assert_eq!(skus(&records), vec!["A", "B"]);
}

#[test]
fn keyed_bucket_key_match_is_case_insensitive_substring() {
    let tree = tree_of(json!({
        "OrderITEMS": [{"sku": "A"}]
    }));
    let records = locate_products(&tree, None);
    assert_eq!(skus(&records), vec!["A"]);
}

#[test]
fn bucket_mapping_and_inner_sequence_both_collected() {
    // A mapping under "products" that merely wraps the real list is still
    // collected as a (near-empty) record; recall over precision.
    let tree = tree_of(json!({
        "products": {"items": [{"sku": "A"}]}
    }));
    let records = locate_products(&tree, None);
    assert_eq!(records.len(), 2);
    assert!(records[0].get("items").is_some(), "wrapper comes first");
    assert_eq!(records[1].get("sku").and_then(RawNode::as_text), Some("A"));
}

#[test]
fn nested_sequences_under_a_bucket_flatten_once() {
    let tree = tree_of(json!({
        "items": [[{"sku": "A"}], [{"sku": "B"}, {"sku": "C"}]]
    }));
    let records = locate_products(&tree, None);
    assert_eq!(skus(&records), vec!["A", "B", "C"]);
}

// ---------------------------------------------------------------------------
// Strategy 3: shape sniffing
// ---------------------------------------------------------------------------

#[test]
fn shape_sniffing_finds_productish_mappings_in_neutral_sequences() {
    let tree = tree_of(json!({
        "payload": {
            "rows": [
                {"PartNumber": "PC61", "warehouse": "TX"},
                {"warehouse": "GA"}
            ]
        }
    }));
    let records = locate_products(&tree, None);
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].get("PartNumber").and_then(RawNode::as_text),
        Some("PC61")
    );
}

#[test]
fn shape_sniffing_matches_marker_keys_case_insensitively() {
    for marker in ["SKU", "partNumber", "StyleNumber", "ProductName", "BRAND", "brandName"] {
        let tree = tree_of(json!({
            "rows": [{marker: "value"}]
        }));
        let records = locate_products(&tree, None);
        assert_eq!(records.len(), 1, "marker key {marker} should match");
    }
}

#[test]
fn shape_sniffing_only_runs_when_buckets_found_nothing() {
    let tree = tree_of(json!({
        "items": [{"sku": "FROM-BUCKET"}],
        "rows": [{"sku": "FROM-SNIFF"}]
    }));
    let records = locate_products(&tree, None);
    assert_eq!(skus(&records), vec!["FROM-BUCKET"]);
}

#[test]
fn shape_sniffing_ignores_scalars_and_plain_mappings() {
    let tree = tree_of(json!({
        "rows": ["PC61", {"warehouse": "TX"}],
        "meta": {"sku": "not-in-a-sequence"}
    }));
    let records = locate_products(&tree, None);
    assert!(records.is_empty(), "got: {records:?}");
}

// ---------------------------------------------------------------------------
// Configured path override
// ---------------------------------------------------------------------------

#[test]
fn configured_path_wins_over_heuristics() {
    let tree = tree_of(json!({
        "products": [{"sku": "FROM-HEURISTIC"}],
        "wrapper": {"list": [{"sku": "FROM-PATH"}]}
    }));
    let records = locate_products(&tree, Some("wrapper.list"));
    assert_eq!(skus(&records), vec!["FROM-PATH"]);
}

#[test]
fn configured_path_to_mapping_is_a_singleton() {
    let tree = tree_of(json!({
        "wrapper": {"one": {"sku": "X"}}
    }));
    let records = locate_products(&tree, Some("wrapper.one"));
    assert_eq!(skus(&records), vec!["X"]);
}

#[test]
fn stale_path_falls_back_to_heuristics() {
    let tree = tree_of(json!({
        "products": [{"sku": "FROM-HEURISTIC"}]
    }));
    let records = locate_products(&tree, Some("wrapper.gone"));
    assert_eq!(skus(&records), vec!["FROM-HEURISTIC"]);
}

#[test]
fn path_resolving_to_null_falls_back() {
    let tree = tree_of(json!({
        "a": {"b": null},
        "items": [{"sku": "A"}]
    }));
    let records = locate_products(&tree, Some("a.b"));
    assert_eq!(skus(&records), vec!["A"]);
}

#[test]
fn path_lookup_is_case_sensitive() {
    let tree = tree_of(json!({
        "Wrapper": {"list": [{"sku": "A"}]},
        "items": [{"sku": "B"}]
    }));
    let records = locate_products(&tree, Some("wrapper.list"));
    assert_eq!(skus(&records), vec!["B"], "miscased path must fall back");
}

// ---------------------------------------------------------------------------
// Nothing found
// ---------------------------------------------------------------------------

#[test]
fn empty_tree_yields_no_records() {
    let tree = tree_of(json!({"status": "ok", "message": "no matches"}));
    let records = locate_products(&tree, None);
    assert!(records.is_empty());
}

#[test]
fn scalar_root_yields_no_records() {
    let root = RawNode::Text("nothing here".to_string());
    let records = locate_products(&root, None);
    assert!(records.is_empty());
}
