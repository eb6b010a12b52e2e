// src/pipeline.rs
//
// fetch metadata -> fetch values -> tabulize -> write parquet

use anyhow::Result;
use reqwest::Client;
use std::path::Path;
use tracing::{error, info};

use crate::error::PipelineError;
use crate::fetch::{fetch_metadata, fetch_values};
use crate::process::tabulize;
use crate::schema::{write_parquet, Metadata, Observation};

/// How a run ended when the metadata fetch succeeded.
#[derive(Debug)]
pub enum Outcome {
    Written { rows: usize },
    Skipped(PipelineError),
}

/// Run the whole ETL once against the live API.
///
/// Only a metadata failure is returned as `Err`; everything after it ends in
/// an [`Outcome`].
pub async fn run(client: &Client, output: &Path) -> Result<Outcome> {
    info!("fetching metadata");
    let metadata = fetch_metadata(client).await.map_err(|e| {
        error!(error = %format!("{:#}", e), "metadata fetch failed");
        e
    })?;

    info!("fetching and processing IPCA values");
    let values = fetch_values(client).await;
    Ok(finish(&metadata, values, output))
}

/// Everything after the metadata fetch: tabulize the fetched values and write
/// them out. Never returns an error; failures are logged and reported in the
/// outcome, and no file is written.
pub fn finish(
    metadata: &Metadata,
    values: Result<Vec<Observation>, PipelineError>,
    output: &Path,
) -> Outcome {
    let written = values
        .map_err(|e| {
            error!(error = %e, "could not obtain IPCA values");
            e
        })
        .and_then(|obs| tabulize(metadata, obs))
        .and_then(|table| {
            write_parquet(&table, output).map_err(|source| PipelineError::Write {
                path: output.display().to_string(),
                source,
            })
        });

    match written {
        Ok(rows) => {
            info!(path = %output.display(), rows, "parquet written");
            Outcome::Written { rows }
        }
        Err(e) => {
            error!(error = %e, "could not process IPCA data");
            Outcome::Skipped(e)
        }
    }
}
