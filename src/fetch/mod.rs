mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Result, anyhow};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Issues a GET for `url` and decodes the JSON body into `T`.
///
/// Non-2xx responses become errors carrying the status and body text.
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(client: &C, url: Url) -> Result<T> {
    let req = reqwest::Request::new(reqwest::Method::GET, url);
    let path = req.url().path().to_string();

    let resp = client.execute(req).await?;
    let status = resp.status();
    debug!(path = %path, status = status.as_u16(), "Provider responded");

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(anyhow!("API returned status {}: {}", status, body));
    }

    Ok(resp.json().await?)
}
