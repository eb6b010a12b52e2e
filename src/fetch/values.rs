// src/fetch/values.rs

use anyhow::Context;
use reqwest::Client;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{info, instrument, warn};
use url::Url;

use super::get_json;
use crate::config::values_url;
use crate::error::PipelineError;
use crate::schema::types::scalar_to_string;
use crate::schema::{id_for_name, Observation};

/// Fetch every IPCA observation for the national territory.
#[instrument(level = "info", skip(client))]
pub async fn fetch_values(client: &Client) -> Result<Vec<Observation>, PipelineError> {
    let raw = values_url();
    let url = Url::parse(&raw)
        .with_context(|| format!("parsing {}", raw))
        .map_err(PipelineError::ValuesFetch)?;
    let body = get_json(client, &url)
        .await
        .map_err(PipelineError::ValuesFetch)?;

    let observations = parse_values(&body)?;
    info!(observations = observations.len(), "values fetched");
    Ok(observations)
}

/// Turn a values-API body into observations.
///
/// The first element names the columns; it is either a list of names, with the
/// data rows as aligned lists, or an object whose keys are the column codes, with
/// the data rows as objects keyed the same way.
pub fn parse_values(body: &Value) -> Result<Vec<Observation>, PipelineError> {
    let rows = body
        .as_array()
        .ok_or_else(|| PipelineError::MalformedValues("expected a JSON list".into()))?;
    let (header, data) = match rows.split_first() {
        Some((h, d)) if !d.is_empty() => (h, d),
        _ => return Err(PipelineError::EmptyValues),
    };

    let headers = header_names(header)?;
    for required in ["D2N", "D3C", "V"] {
        if !headers.iter().any(|h| h == required) {
            return Err(PipelineError::MalformedValues(format!(
                "header has no {} column",
                required
            )));
        }
    }

    let mut out = Vec::with_capacity(data.len());
    let mut skipped = 0usize;
    for (i, row) in data.iter().enumerate() {
        let cells = row_cells(&headers, row)
            .map_err(|e| PipelineError::MalformedValues(format!("row {}: {}", i + 1, e)))?;
        let cell = |name: &str| cells.get(name).cloned().flatten();

        let Some(codigo_periodo) = cell("D3C") else {
            skipped += 1;
            continue;
        };
        let variavel = cell("D2N");
        let variavel_id = variavel.as_deref().and_then(id_for_name);

        out.push(Observation {
            codigo_periodo,
            periodo: cell("D1N"),
            variavel,
            variavel_codigo: cell("D2C"),
            variavel_id,
            valor: cell("V"),
        });
    }
    if skipped > 0 {
        warn!(skipped, "values rows without a period code");
    }

    Ok(out)
}

fn normalize_header(h: &str) -> String {
    h.replace(' ', "_")
}

fn header_names(header: &Value) -> Result<Vec<String>, PipelineError> {
    match header {
        Value::Array(names) => names
            .iter()
            .map(|n| match n {
                Value::String(s) => Ok(normalize_header(s)),
                other => Err(PipelineError::MalformedValues(format!(
                    "header entry {} is not a string",
                    other
                ))),
            })
            .collect(),
        Value::Object(map) => Ok(map.keys().map(|k| normalize_header(k)).collect()),
        other => Err(PipelineError::MalformedValues(format!(
            "header row is {}, expected a list or object",
            kind(other)
        ))),
    }
}

fn row_cells(headers: &[String], row: &Value) -> Result<HashMap<String, Option<String>>, String> {
    match row {
        Value::Array(values) => headers
            .iter()
            .zip(values.iter())
            .map(|(h, v)| Ok((h.clone(), scalar_to_string(v)?)))
            .collect(),
        Value::Object(map) => object_cells(map),
        other => Err(format!("expected a list or object, got {}", kind(other))),
    }
}

fn object_cells(map: &Map<String, Value>) -> Result<HashMap<String, Option<String>>, String> {
    map.iter()
        .map(|(k, v)| Ok((normalize_header(k), scalar_to_string(v)?)))
        .collect()
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
