#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use catalog_admin::{
    app::app,
    config::{AppConfig, DatabaseConfig},
    database::DatabaseManager,
    state::AppState,
};
use reqwest::{multipart, redirect::Policy, Client, Response, StatusCode};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";

/// One server per test: private in-memory database, private upload dir,
/// running on the test's own runtime.
pub struct TestServer {
    pub base_url: String,
    pub upload_dir: PathBuf,
    pub client: Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(|_| {}).await
    }

    /// Like [`spawn`](Self::spawn), with a chance to adjust the config first
    pub async fn spawn_with(configure: impl FnOnce(&mut AppConfig)) -> Result<Self> {
        let upload_dir =
            std::env::temp_dir().join(format!("catalog-admin-it-{}", uuid::Uuid::new_v4().simple()));

        let mut config = AppConfig::development();
        config.database = DatabaseConfig::in_memory();
        config.uploads.dir = upload_dir.to_string_lossy().into_owned();
        config.security.session_secret = "integration-test-secret".to_string();
        config.security.admin_username = ADMIN_USERNAME.to_string();
        config.security.admin_password = ADMIN_PASSWORD.to_string();
        config.security.admin_password_hash = None;
        configure(&mut config);

        let pool = DatabaseManager::connect(&config.database).await?;
        let state = AppState::new(pool, &config)?;
        let router = app(state, &config);

        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            upload_dir,
            client: new_client()?,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?)
    }

    pub async fn login_admin(&self) -> Result<()> {
        let res = self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await?;
        anyhow::ensure!(res.status() == StatusCode::SEE_OTHER, "login failed with {}", res.status());
        Ok(())
    }

    /// Submit the add-product form; `photo` is `(file name, bytes)`
    pub async fn add_product(
        &self,
        name: &str,
        price: &str,
        category: &str,
        photo: Option<(&str, &[u8])>,
    ) -> Result<Response> {
        let mut form = multipart::Form::new()
            .text("product_name", name.to_string())
            .text("price", price.to_string())
            .text("category", category.to_string())
            .text("description", String::new());

        if let Some((file_name, bytes)) = photo {
            let part = multipart::Part::bytes(bytes.to_vec()).file_name(file_name.to_string());
            form = form.part("photo", part);
        }

        Ok(self.client.post(self.url("/add_product")).multipart(form).send().await?)
    }

    pub async fn products(&self) -> Result<Vec<serde_json::Value>> {
        let res = self.get("/view_products").await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "view_products returned {}", res.status());
        Ok(res.json().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

/// Client with its own cookie jar that leaves redirects to the test
pub fn new_client() -> Result<Client> {
    Ok(Client::builder().cookie_store(true).redirect(Policy::none()).build()?)
}

pub fn location(res: &Response) -> Option<&str> {
    res.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
}
