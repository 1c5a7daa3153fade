//! Partial-update SET clause assembly for products.
//!
//! The assignment list is built from a fixed field-name mapping, so caller
//! input never reaches the query text; values travel as parameters only.
//! Omitted (null) fields produce no assignment and are left untouched.

use neo4rs::Query;

use crate::models::ProductPatch;

/// SET clause for the supplied fields. Always touches updated_at, so an
/// empty patch is a valid timestamp-only update.
pub(crate) fn patch_set_clause(patch: &ProductPatch) -> String {
    let mut assignments: Vec<&'static str> = Vec::new();

    if patch.name.is_some() {
        assignments.push("p.name = $name");
    }
    if patch.description.is_some() {
        assignments.push("p.description = $description");
    }
    if patch.price.is_some() {
        assignments.push("p.price = $price");
    }
    if patch.stock_quantity.is_some() {
        assignments.push("p.stock_quantity = $stock_quantity");
    }
    if patch.is_available.is_some() {
        assignments.push("p.is_available = $is_available");
    }
    assignments.push("p.updated_at = datetime()");

    assignments.join(", ")
}

/// Bind parameters for exactly the fields `patch_set_clause` referenced.
pub(crate) fn apply_patch_params(mut q: Query, patch: &ProductPatch) -> Query {
    if let Some(name) = &patch.name {
        q = q.param("name", name.as_str());
    }
    if let Some(description) = &patch.description {
        q = q.param("description", description.as_str());
    }
    if let Some(price) = patch.price {
        q = q.param("price", price);
    }
    if let Some(stock_quantity) = patch.stock_quantity {
        q = q.param("stock_quantity", stock_quantity);
    }
    if let Some(is_available) = patch.is_available {
        q = q.param("is_available", is_available);
    }
    q
}
