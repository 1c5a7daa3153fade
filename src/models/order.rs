use serde::{Deserialize, Serialize};

/// Order record as returned by the API. The joined names are null when the
/// corresponding relationship (or query) does not supply them.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRecord {
    pub id: String,
    pub status: String,
    pub quantity: i64,
    pub created_at: String,
    pub product_name: Option<String>,
    pub customer_name: Option<String>,
    pub baker_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderCreate {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: String,
}
