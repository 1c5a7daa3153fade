use serde::{Deserialize, Serialize};

/// Product record as returned by the API. Timestamps are the store's
/// datetime values rendered as strings.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i64,
    pub is_available: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i64,
}

/// Partial update: only fields present (non-null) in the request body are
/// applied; omitted fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

/// Public listing filters; all optional and conjunctive.
#[derive(Debug, Default, Deserialize)]
pub struct ProductSearchQuery {
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_omitted_fields_deserialize_to_none() {
        let patch: ProductPatch = serde_json::from_str(r#"{"price": 9.99}"#).unwrap();
        assert_eq!(patch.price, Some(9.99));
        assert!(patch.name.is_none());
        assert!(patch.stock_quantity.is_none());
        assert!(patch.is_available.is_none());
    }

    #[test]
    fn patch_explicit_null_is_treated_as_omitted() {
        let patch: ProductPatch =
            serde_json::from_str(r#"{"name": null, "stock_quantity": 3}"#).unwrap();
        assert!(patch.name.is_none());
        assert_eq!(patch.stock_quantity, Some(3));
    }
}
