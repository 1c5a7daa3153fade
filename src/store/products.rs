use neo4rs::{query, Row};

use super::patch::{apply_patch_params, patch_set_clause};
use super::{decode_err, GraphManager, StoreError};
use crate::models::{ProductCreate, ProductPatch, ProductRecord, ProductSearchQuery};

pub(crate) const PRODUCT_PROJECTION: &str = "elementId(p) AS id, p.name AS name, \
     p.description AS description, p.price AS price, p.stock_quantity AS stock_quantity, \
     p.is_available AS is_available, toString(p.created_at) AS created_at, \
     toString(p.updated_at) AS updated_at";

fn row_to_product(row: &Row) -> Result<ProductRecord, StoreError> {
    Ok(ProductRecord {
        id: row.get("id").map_err(decode_err)?,
        name: row.get("name").map_err(decode_err)?,
        description: row.get("description").unwrap_or(None),
        price: row.get("price").map_err(decode_err)?,
        stock_quantity: row.get("stock_quantity").map_err(decode_err)?,
        is_available: row.get("is_available").map_err(decode_err)?,
        created_at: row.get("created_at").map_err(decode_err)?,
        updated_at: row.get("updated_at").unwrap_or(None),
    })
}

/// Create a product owned (BAKES) by the baker. The description property is
/// only written when one was supplied. Returns None when the baker node was
/// not matched.
pub async fn create_for_baker(
    email: &str,
    input: &ProductCreate,
) -> Result<Option<ProductRecord>, StoreError> {
    let graph = GraphManager::graph().await?;

    let props = if input.description.is_some() {
        "{name: $name, description: $description, price: $price, \
         stock_quantity: $stock_quantity, is_available: true, created_at: datetime()}"
    } else {
        "{name: $name, price: $price, stock_quantity: $stock_quantity, \
         is_available: true, created_at: datetime()}"
    };

    let cypher = format!(
        "MATCH (b:User {{email: $email}}) \
         CREATE (p:Product {}) \
         CREATE (b)-[:BAKES]->(p) \
         RETURN {}",
        props, PRODUCT_PROJECTION
    );

    let mut q = query(&cypher)
        .param("email", email)
        .param("name", input.name.as_str())
        .param("price", input.price)
        .param("stock_quantity", input.stock_quantity);
    if let Some(description) = &input.description {
        q = q.param("description", description.as_str());
    }

    let mut rows = graph.execute(q).await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_product(&row)?)),
        None => Ok(None),
    }
}

/// The baker's own products, newest first.
pub async fn for_baker(email: &str) -> Result<Vec<ProductRecord>, StoreError> {
    let graph = GraphManager::graph().await?;

    let cypher = format!(
        "MATCH (b:User {{email: $email}})-[:BAKES]->(p:Product) \
         RETURN {} ORDER BY p.created_at DESC",
        PRODUCT_PROJECTION
    );

    let mut rows = graph.execute(query(&cypher).param("email", email)).await?;

    let mut products = Vec::new();
    while let Some(row) = rows.next().await? {
        products.push(row_to_product(&row)?);
    }
    Ok(products)
}

/// Query text for the public listing. Conditions are fixed fragments chosen
/// by which filters are present; filter values only ever travel as
/// parameters.
pub(crate) fn list_available_cypher(filter: &ProductSearchQuery) -> String {
    let mut conditions = vec!["p.is_available = true"];
    if filter.search.is_some() {
        conditions.push("(p.name CONTAINS $search OR p.description CONTAINS $search)");
    }
    if filter.min_price.is_some() {
        conditions.push("p.price >= $min_price");
    }
    if filter.max_price.is_some() {
        conditions.push("p.price <= $max_price");
    }

    format!(
        "MATCH (p:Product) WHERE {} RETURN {} ORDER BY p.created_at DESC",
        conditions.join(" AND "),
        PRODUCT_PROJECTION
    )
}

/// Public listing: available products with optional conjunctive filters,
/// newest first.
pub async fn list_available(filter: &ProductSearchQuery) -> Result<Vec<ProductRecord>, StoreError> {
    let graph = GraphManager::graph().await?;

    let mut q = query(&list_available_cypher(filter));
    if let Some(search) = &filter.search {
        q = q.param("search", search.as_str());
    }
    if let Some(min_price) = filter.min_price {
        q = q.param("min_price", min_price);
    }
    if let Some(max_price) = filter.max_price {
        q = q.param("max_price", max_price);
    }

    let mut rows = graph.execute(q).await?;

    let mut products = Vec::new();
    while let Some(row) = rows.next().await? {
        products.push(row_to_product(&row)?);
    }
    Ok(products)
}

/// Whether the baker owns (BAKES) the product with this element id.
pub async fn is_owned_by(email: &str, product_id: &str) -> Result<bool, StoreError> {
    let graph = GraphManager::graph().await?;

    let cypher = "MATCH (b:User {email: $email})-[:BAKES]->(p:Product) \
         WHERE elementId(p) = $product_id RETURN elementId(p) AS id";

    let mut rows = graph
        .execute(
            query(cypher)
                .param("email", email)
                .param("product_id", product_id),
        )
        .await?;

    Ok(rows.next().await?.is_some())
}

/// Apply a partial update. Only present fields are assigned; updated_at is
/// always touched.
pub async fn apply_patch(product_id: &str, patch: &ProductPatch) -> Result<(), StoreError> {
    let graph = GraphManager::graph().await?;

    let cypher = format!(
        "MATCH (p:Product) WHERE elementId(p) = $product_id SET {}",
        patch_set_clause(patch)
    );

    let q = apply_patch_params(query(&cypher).param("product_id", product_id), patch);
    graph.run(q).await?;
    Ok(())
}

pub async fn get_by_id(product_id: &str) -> Result<Option<ProductRecord>, StoreError> {
    let graph = GraphManager::graph().await?;

    let cypher = format!(
        "MATCH (p:Product) WHERE elementId(p) = $product_id RETURN {}",
        PRODUCT_PROJECTION
    );

    let mut rows = graph
        .execute(query(&cypher).param("product_id", product_id))
        .await?;

    match rows.next().await? {
        Some(row) => Ok(Some(row_to_product(&row)?)),
        None => Ok(None),
    }
}

/// Soft delete scoped to the caller's BAKES match. A non-match is a no-op.
pub async fn mark_unavailable(email: &str, product_id: &str) -> Result<(), StoreError> {
    let graph = GraphManager::graph().await?;

    let cypher = "MATCH (b:User {email: $email})-[:BAKES]->(p:Product) \
         WHERE elementId(p) = $product_id \
         SET p.is_available = false, p.updated_at = datetime()";

    graph
        .run(
            query(cypher)
                .param("email", email)
                .param("product_id", product_id),
        )
        .await?;
    Ok(())
}

/// Count then detach-delete every product. Operator tooling for the seed
/// binary; the API itself only ever soft-deletes.
pub async fn clear_all() -> Result<i64, StoreError> {
    let graph = GraphManager::graph().await?;

    let mut rows = graph
        .execute(query("MATCH (p:Product) RETURN count(p) AS total"))
        .await?;
    let total: i64 = match rows.next().await? {
        Some(row) => row.get("total").map_err(decode_err)?,
        None => 0,
    };

    graph
        .run(query("MATCH (p:Product) DETACH DELETE p"))
        .await?;
    Ok(total)
}
