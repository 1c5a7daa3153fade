use neo4rs::{query, Row};

use super::{decode_err, GraphManager, StoreError};
use crate::models::{OrderCreate, OrderRecord};

fn row_to_order(row: &Row) -> Result<OrderRecord, StoreError> {
    Ok(OrderRecord {
        id: row.get("id").map_err(decode_err)?,
        status: row.get("status").map_err(decode_err)?,
        quantity: row.get("quantity").map_err(decode_err)?,
        created_at: row.get("created_at").map_err(decode_err)?,
        product_name: row.get("product_name").unwrap_or(None),
        customer_name: row.get("customer_name").unwrap_or(None),
        baker_name: row.get("baker_name").unwrap_or(None),
    })
}

/// Create an order placed by the customer against an available product.
/// Returns None when the customer/product match produced no row, which
/// covers both "no such product" and "product unavailable".
pub async fn create_for_customer(
    email: &str,
    input: &OrderCreate,
) -> Result<Option<OrderRecord>, StoreError> {
    let graph = GraphManager::graph().await?;

    let cypher = "MATCH (c:User {email: $email}), (p:Product) \
         WHERE elementId(p) = $product_id AND p.is_available = true \
         CREATE (o:Order {quantity: $quantity, status: 'pending', created_at: datetime()}) \
         CREATE (c)-[:PLACED]->(o) \
         CREATE (o)-[:FOR_PRODUCT]->(p) \
         RETURN elementId(o) AS id, o.status AS status, o.quantity AS quantity, \
                toString(o.created_at) AS created_at, p.name AS product_name";

    let mut rows = graph
        .execute(
            query(cypher)
                .param("email", email)
                .param("product_id", input.product_id.as_str())
                .param("quantity", input.quantity),
        )
        .await?;

    match rows.next().await? {
        Some(row) => Ok(Some(row_to_order(&row)?)),
        None => Ok(None),
    }
}

/// Orders for products the baker BAKES, newest first, with the placing
/// customer joined when the PLACED link exists.
pub async fn for_baker(email: &str) -> Result<Vec<OrderRecord>, StoreError> {
    let graph = GraphManager::graph().await?;

    let cypher = "MATCH (b:User {email: $email})-[:BAKES]->(p:Product)<-[:FOR_PRODUCT]-(o:Order) \
         OPTIONAL MATCH (c:User)-[:PLACED]->(o) \
         RETURN elementId(o) AS id, coalesce(o.status, 'pending') AS status, \
                coalesce(o.quantity, 0) AS quantity, toString(o.created_at) AS created_at, \
                p.name AS product_name, c.name AS customer_name \
         ORDER BY o.created_at DESC";

    let mut rows = graph.execute(query(cypher).param("email", email)).await?;

    let mut orders = Vec::new();
    while let Some(row) = rows.next().await? {
        orders.push(row_to_order(&row)?);
    }
    Ok(orders)
}

/// All orders with product, customer and baker joins, newest first.
pub async fn all() -> Result<Vec<OrderRecord>, StoreError> {
    let graph = GraphManager::graph().await?;

    let cypher = "MATCH (o:Order)-[:FOR_PRODUCT]->(p:Product) \
         OPTIONAL MATCH (c:User)-[:PLACED]->(o) \
         OPTIONAL MATCH (b:User)-[:BAKES]->(p) \
         RETURN elementId(o) AS id, o.status AS status, o.quantity AS quantity, \
                toString(o.created_at) AS created_at, p.name AS product_name, \
                c.name AS customer_name, b.name AS baker_name \
         ORDER BY o.created_at DESC";

    let mut rows = graph.execute(query(cypher)).await?;

    let mut orders = Vec::new();
    while let Some(row) = rows.next().await? {
        orders.push(row_to_order(&row)?);
    }
    Ok(orders)
}

/// Set status and updated_at on the matched order. Succeeds even when no
/// order matched the id.
pub async fn set_status(order_id: &str, status: &str) -> Result<(), StoreError> {
    let graph = GraphManager::graph().await?;

    let cypher = "MATCH (o:Order) WHERE elementId(o) = $order_id \
         SET o.status = $status, o.updated_at = datetime()";

    graph
        .run(
            query(cypher)
                .param("order_id", order_id)
                .param("status", status),
        )
        .await?;
    Ok(())
}
