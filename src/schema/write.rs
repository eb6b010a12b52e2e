// src/schema/write.rs

use anyhow::{Context, Result};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};
use tracing::debug;

use super::arrow::to_record_batch;
use super::types::WideTable;

/// Write `table` to `path` as a single Parquet file, replacing any previous one.
///
/// The batch goes to a hidden sibling first and is renamed into place once the
/// writer has closed, so readers never observe a half-written file.
/// Returns the number of rows written.
pub fn write_parquet<P: AsRef<Path>>(table: &WideTable, path: P) -> Result<usize> {
    let path = path.as_ref();
    let batch = to_record_batch(table)?;

    let tmp_path = tmp_sibling(path);
    let file = File::create(&tmp_path).with_context(|| format!("creating {:?}", tmp_path))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let written = (|| -> Result<()> {
        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
            .context("creating Arrow writer")?;
        writer.write(&batch).context("writing IPCA batch")?;
        writer.close().context("closing Parquet writer")?;
        Ok(())
    })();
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    debug!(path = %path.display(), rows = batch.num_rows(), "parquet written");
    Ok(batch.num_rows())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.parquet".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{Period, WideRow};
    use arrow::array::{Array, StringArray};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::tempdir;

    fn sample_table() -> WideTable {
        WideTable {
            rows: vec![WideRow {
                period: Period {
                    codigo_periodo: "202301".into(),
                    id: 1,
                    mes_ano: "janeiro 2023".into(),
                    disponivel: "S".into(),
                    data_liberacao: Some("2023-02-10".into()),
                },
                values: [
                    Some("0.53".into()),
                    None,
                    None,
                    None,
                    None,
                    Some("6220.26".into()),
                ],
            }],
        }
    }

    #[test]
    fn test_write_and_read_back() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("dados_ipca.parquet");

        let rows = write_parquet(&sample_table(), &path).unwrap();
        assert_eq!(rows, 1);
        assert!(path.exists());
        assert!(!tmp_sibling(&path).exists());

        let file = File::open(&path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();
        let batches: Vec<_> = reader.map(|b| b.unwrap()).collect();
        assert_eq!(batches.iter().map(|b| b.num_rows()).sum::<usize>(), 1);

        let batch = &batches[0];
        let indice = batch
            .column_by_name("numero_indice")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(indice.value(0), "6220.26");
        assert!(batch
            .column_by_name("variacao_12_meses")
            .unwrap()
            .is_null(0));
    }

    #[test]
    fn test_overwrites_existing_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("out.parquet");
        fs::write(&path, b"stale").unwrap();

        write_parquet(&sample_table(), &path).unwrap();

        let file = File::open(&path).unwrap();
        assert!(ParquetRecordBatchReaderBuilder::try_new(file).is_ok());
    }

    #[test]
    fn test_missing_directory_fails_without_leftovers() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nope").join("out.parquet");
        assert!(write_parquet(&sample_table(), &path).is_err());
        assert!(!path.exists());
    }
}
