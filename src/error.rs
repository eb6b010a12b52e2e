// src/error.rs

use thiserror::Error;

/// Recoverable stage failures. The run logs these and ends without output;
/// only a metadata failure aborts with a non-zero exit.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("values request failed: {0:#}")]
    ValuesFetch(#[source] anyhow::Error),

    #[error("malformed values response: {0}")]
    MalformedValues(String),

    #[error("values response carried no data rows")]
    EmptyValues,

    #[error("pivot failed: duplicate entry for period {codigo_periodo}, variable {variavel_id}")]
    Pivot {
        codigo_periodo: String,
        variavel_id: u32,
    },

    #[error("writing {path}: {source:#}")]
    Write {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}
