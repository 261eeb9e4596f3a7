mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_reports_database_ok() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server.get("/health").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "ok");

    Ok(())
}

#[tokio::test]
async fn empty_catalog_renders() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server.get("/").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await?;
    assert!(html.contains("No products yet."));

    assert!(server.products().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn unknown_route_is_not_found() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let res = server.get("/nope").await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
