use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use garb_core::{Supplier, UnifiedProduct};

use crate::middleware::RequestId;

use super::{map_supplier_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ProductsQuery {
    pub style: Option<String>,
    pub supplier: Option<String>,
}

/// Payload for the products listing: the unified rows plus the vendor
/// that actually served them (fallback may answer with the secondary).
#[derive(Debug, Serialize)]
pub(super) struct ProductsData {
    products: Vec<UnifiedProduct>,
    count: usize,
    supplier: &'static str,
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<ApiResponse<ProductsData>>, ApiError> {
    let style = query.style.as_deref().map_or("", str::trim);
    if style.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "query parameter 'style' must be a non-empty product style",
        ));
    }

    let (products, supplier) = match query.supplier.as_deref() {
        Some(raw) => {
            let supplier = raw.parse::<Supplier>().map_err(|e| {
                ApiError::new(req_id.0.clone(), "validation_error", e.to_string())
            })?;
            let products = state
                .suppliers
                .fetch_unified(supplier, style)
                .await
                .map_err(|e| map_supplier_error(req_id.0.clone(), &e))?;
            (products, supplier)
        }
        None => {
            let outcome = state
                .suppliers
                .fetch_unified_with_fallback(state.primary, style)
                .await
                .map_err(|e| map_supplier_error(req_id.0.clone(), &e))?;
            (outcome.products, outcome.supplier)
        }
    };

    tracing::debug!(
        style,
        supplier = supplier.as_str(),
        count = products.len(),
        "served products"
    );

    Ok(Json(ApiResponse {
        data: ProductsData {
            count: products.len(),
            products,
            supplier: supplier.as_str(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
