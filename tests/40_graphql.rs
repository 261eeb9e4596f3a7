mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn graphiql_served_without_query() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server.get("/graphql").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await?;
    assert!(html.to_lowercase().contains("graphiql"));

    Ok(())
}

#[tokio::test]
async fn products_query_over_post_and_get() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.login_admin().await?;
    server.add_product("Chair", "100.5", "Furniture", None).await?;
    server.add_product("Lamp", "20", "Lighting", None).await?;

    let body: Value = server
        .client
        .post(server.url("/graphql"))
        .json(&json!({ "query": "{ products { id name price currency category photoPath } }" }))
        .send()
        .await?
        .json()
        .await?;
    assert!(body.get("errors").is_none(), "{}", body);
    let products = body["data"]["products"].as_array().cloned().unwrap_or_default();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["name"], "Chair");
    assert_eq!(products[0]["price"], 100.5);
    assert_eq!(products[0]["currency"], "KGS");
    assert!(products[0]["photoPath"].is_null());

    let res = server
        .client
        .get(server.url("/graphql"))
        .query(&[("query", "{ products { name } }")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["products"][1]["name"], "Lamp");

    Ok(())
}

#[tokio::test]
async fn product_lookup_with_variables() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.login_admin().await?;
    server.add_product("Chair", "100", "Furniture", None).await?;
    let id = server.products().await?[0]["id"].as_i64().unwrap_or_default();

    let query = "query Lookup($id: Int!) { product(id: $id) { name } }";
    let body: Value = server
        .client
        .post(server.url("/graphql"))
        .json(&json!({ "query": query, "variables": { "id": id }, "operationName": "Lookup" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"]["product"]["name"], "Chair");

    let body: Value = server
        .client
        .post(server.url("/graphql"))
        .json(&json!({ "query": query, "variables": { "id": id + 100 } }))
        .send()
        .await?
        .json()
        .await?;
    assert!(body["data"]["product"].is_null());

    Ok(())
}

#[tokio::test]
async fn graphql_is_public_and_read_only() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let body: Value = server
        .client
        .post(server.url("/graphql"))
        .json(&json!({ "query": "mutation { addProduct(name: \"x\") { id } }" }))
        .send()
        .await?
        .json()
        .await?;
    assert!(body["errors"].as_array().map(|e| !e.is_empty()).unwrap_or(false), "{}", body);

    let res = server
        .client
        .get(server.url("/graphql"))
        .query(&[("query", "{ products { name } }"), ("variables", "{not json")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
