// src/fetch/metadata.rs

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{info, instrument};
use url::Url;

use super::get_json;
use crate::config::METADATA_URL;
use crate::schema::Metadata;

/// Fetch the table metadata. Any failure here is fatal for the run.
#[instrument(level = "info", skip(client))]
pub async fn fetch_metadata(client: &Client) -> Result<Metadata> {
    let url = Url::parse(METADATA_URL).with_context(|| format!("parsing {}", METADATA_URL))?;
    let body = get_json(client, &url).await?;
    let meta: Metadata =
        serde_json::from_value(body).context("metadata body lacks a usable Periodos.Periodos")?;
    info!(periods = meta.periodos.periodos.len(), "metadata fetched");
    Ok(meta)
}
