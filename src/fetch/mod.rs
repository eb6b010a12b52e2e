// src/fetch/mod.rs

pub mod metadata;
pub mod values;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

pub use metadata::fetch_metadata;
pub use values::{fetch_values, parse_values};

/// GET `url` and decode the body as JSON. Non-2xx statuses are errors.
#[instrument(level = "debug", skip(client, url), fields(url = %url))]
pub async fn get_json(client: &Client, url: &Url) -> Result<Value> {
    debug!("GET");
    let body = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .json::<Value>()
        .await
        .with_context(|| format!("Decoding JSON from {}", url))?;
    Ok(body)
}
