use neo4rs::{query, Row};
use std::str::FromStr;

use super::{decode_err, GraphManager, StoreError};
use crate::models::{Role, StoredUser};

const USER_PROJECTION: &str = "elementId(u) AS id, u.email AS email, u.name AS name, \
     u.role AS role, u.is_active AS is_active, u.hashed_password AS hashed_password, \
     toString(u.created_at) AS created_at";

fn row_to_user(row: &Row) -> Result<StoredUser, StoreError> {
    let role: String = row.get("role").map_err(decode_err)?;
    Ok(StoredUser {
        id: row.get("id").map_err(decode_err)?,
        email: row.get("email").map_err(decode_err)?,
        name: row.get("name").map_err(decode_err)?,
        role: Role::from_str(&role).map_err(decode_err)?,
        is_active: row.get("is_active").map_err(decode_err)?,
        hashed_password: row.get("hashed_password").map_err(decode_err)?,
        created_at: row.get("created_at").map_err(decode_err)?,
    })
}

pub async fn find_by_email(email: &str) -> Result<Option<StoredUser>, StoreError> {
    let graph = GraphManager::graph().await?;

    let cypher = format!("MATCH (u:User {{email: $email}}) RETURN {}", USER_PROJECTION);
    let mut rows = graph.execute(query(&cypher).param("email", email)).await?;

    match rows.next().await? {
        Some(row) => Ok(Some(row_to_user(&row)?)),
        None => Ok(None),
    }
}

pub async fn create(
    email: &str,
    name: &str,
    hashed_password: &str,
    role: Role,
) -> Result<StoredUser, StoreError> {
    let graph = GraphManager::graph().await?;

    let cypher = format!(
        "CREATE (u:User {{email: $email, name: $name, hashed_password: $hashed_password, \
         role: $role, is_active: true, created_at: datetime()}}) \
         RETURN {}",
        USER_PROJECTION
    );

    let mut rows = graph
        .execute(
            query(&cypher)
                .param("email", email)
                .param("name", name)
                .param("hashed_password", hashed_password)
                .param("role", role.as_str()),
        )
        .await?;

    match rows.next().await? {
        Some(row) => row_to_user(&row),
        None => Err(StoreError::Query("user create returned no row".to_string())),
    }
}

/// MERGE-upsert on email; used by the seed binary, not the API surface.
pub async fn upsert(
    email: &str,
    name: &str,
    hashed_password: &str,
    role: Role,
) -> Result<StoredUser, StoreError> {
    let graph = GraphManager::graph().await?;

    let cypher = format!(
        "MERGE (u:User {{email: $email}}) \
         ON CREATE SET u.created_at = datetime() \
         SET u.name = $name, u.hashed_password = $hashed_password, \
             u.role = $role, u.is_active = true \
         RETURN {}",
        USER_PROJECTION
    );

    let mut rows = graph
        .execute(
            query(&cypher)
                .param("email", email)
                .param("name", name)
                .param("hashed_password", hashed_password)
                .param("role", role.as_str()),
        )
        .await?;

    match rows.next().await? {
        Some(row) => row_to_user(&row),
        None => Err(StoreError::Query("user upsert returned no row".to_string())),
    }
}
