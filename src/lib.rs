//! Fetch the IPCA series from IBGE SIDRA and store it as one wide Parquet table.

pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod process;
pub mod schema;
