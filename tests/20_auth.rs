mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// Token validation happens before any store access, so the 401 surface is
// testable without a live graph.

#[tokio::test]
async fn protected_routes_reject_missing_authorization() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for (method, path) in [
        ("GET", "/api/auth/me"),
        ("GET", "/api/orders/baker/me"),
        ("GET", "/api/orders/admin/all"),
        ("GET", "/api/products/baker/me"),
    ] {
        let res = match method {
            "GET" => client.get(format!("{}{}", server.base_url, path)),
            _ => unreachable!(),
        }
        .send()
        .await?;
        assert_eq!(
            res.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} without a token",
            method,
            path
        );
    }

    let res = client
        .post(format!("{}/api/orders/", server.base_url))
        .json(&json!({"product_id": "x", "quantity": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn non_bearer_authorization_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/auth/me", server.base_url))
        .header("Authorization", "Token abcdef")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn garbage_bearer_token_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/auth/me", server.base_url))
        .header("Authorization", "Bearer not.a.jwt")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn empty_bearer_token_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/auth/me", server.base_url))
        .header("Authorization", "Bearer   ")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
