use axum::{async_trait, extract::FromRequestParts, http::request::Parts, http::HeaderMap};

use crate::auth;
use crate::error::ApiError;
use crate::models::{Role, StoredUser, UserRecord};
use crate::store;

/// Authenticated caller identity, resolved from the bearer token against the
/// store on every request and threaded into handlers as an extractor
/// argument.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: String,
}

impl From<StoredUser> for CurrentUser {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

impl CurrentUser {
    /// Role gate: every protected operation checks its required role before
    /// touching the store.
    pub fn require_role(&self, role: Role, denied: &str) -> Result<(), ApiError> {
        if self.role == role {
            Ok(())
        } else {
            Err(ApiError::forbidden(denied))
        }
    }

    pub fn require_any_role(&self, roles: &[Role], denied: &str) -> Result<(), ApiError> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::forbidden(denied))
        }
    }

    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at.clone(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers).map_err(ApiError::unauthorized)?;

        // Token validation fails before any store access
        let claims = auth::decode_jwt(&token)?;

        let user = store::users::find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Could not validate credentials"))?;

        Ok(CurrentUser::from(user))
    }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn user_with_role(role: Role) -> CurrentUser {
        CurrentUser {
            id: "4:abc:1".to_string(),
            email: "user@example.com".to_string(),
            name: "User".to_string(),
            role,
            is_active: true,
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn role_gate_allows_matching_role_only() {
        let baker = user_with_role(Role::Baker);
        assert!(baker.require_role(Role::Baker, "denied").is_ok());
        assert!(baker.require_role(Role::Customer, "denied").is_err());
        assert!(baker
            .require_any_role(&[Role::Baker, Role::Admin], "denied")
            .is_ok());

        let customer = user_with_role(Role::Customer);
        assert!(customer
            .require_any_role(&[Role::Baker, Role::Admin], "denied")
            .is_err());
    }

    #[test]
    fn bearer_extraction_rejects_malformed_headers() {
        let mut headers = HeaderMap::new();
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Token abc"));
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }
}
