// src/schema/arrow.rs

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

use super::types::WideTable;
use super::VALUE_COLUMNS;

/// Output schema: period columns, then the six IPCA value columns.
///
/// Values stay `Utf8`: SIDRA reports gaps as `"..."`, `"-"` or `"X"` and those
/// markers are kept as published.
pub fn build_arrow_schema() -> Arc<Schema> {
    let mut fields = vec![
        Field::new("codigo_periodo", DataType::Utf8, false),
        Field::new("id", DataType::Int64, false),
        Field::new("mes_ano", DataType::Utf8, false),
        Field::new("disponivel", DataType::Utf8, false),
        Field::new("data_liberacao", DataType::Utf8, true),
    ];
    fields.extend(
        VALUE_COLUMNS
            .iter()
            .map(|(_, name)| Field::new(*name, DataType::Utf8, true)),
    );
    Arc::new(Schema::new(fields))
}

/// Materialize the table as a single `RecordBatch`.
pub fn to_record_batch(table: &WideTable) -> Result<RecordBatch> {
    let rows = &table.rows;
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.period.codigo_periodo.as_str()),
        )),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.period.id))),
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.period.mes_ano.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.period.disponivel.as_str()),
        )),
        Arc::new(StringArray::from_iter(
            rows.iter().map(|r| r.period.data_liberacao.as_deref()),
        )),
    ];
    for slot in 0..VALUE_COLUMNS.len() {
        columns.push(Arc::new(StringArray::from_iter(
            rows.iter().map(|r| r.values[slot].as_deref()),
        )));
    }

    RecordBatch::try_new(build_arrow_schema(), columns).context("building IPCA record batch")
}
