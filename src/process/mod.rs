// src/process/mod.rs

pub mod periods;
pub mod pivot;

use tracing::{debug, info};

use crate::error::PipelineError;
use crate::schema::{Metadata, Observation, WideTable};

pub use periods::build_period_table;
pub use pivot::{filter_and_dedup, left_join, pivot};

/// Join period metadata with the observations into the wide IPCA table.
///
/// Every period in `metadata` yields exactly one row; the six value columns
/// are filled from `observations` where present.
pub fn tabulize(
    metadata: &Metadata,
    observations: Vec<Observation>,
) -> Result<WideTable, PipelineError> {
    if observations.is_empty() {
        return Err(PipelineError::EmptyValues);
    }

    let periods = build_period_table(&metadata.periodos.periodos);
    let total = observations.len();
    let kept = filter_and_dedup(observations);
    debug!(
        periods = periods.len(),
        observations = total,
        kept = kept.len(),
        "tabulizing"
    );

    let wide = pivot(&kept)?;
    let unmatched = wide
        .keys()
        .filter(|k| !periods.iter().any(|p| &p.codigo_periodo == *k))
        .count();
    let rows = left_join(periods, wide);

    info!(
        rows = rows.len(),
        dropped = total - kept.len(),
        unmatched_periods = unmatched,
        "tabulized"
    );
    Ok(WideTable { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata() -> Metadata {
        serde_json::from_value(json!({
            "Periodos": {"Periodos": [
                {"Codigo": "12345678202301", "Id": 1, "Nome": "janeiro 2023",
                 "Disponivel": "S", "DataLiberacao": "2023-02-10"}
            ]}
        }))
        .unwrap()
    }

    fn obs(code: &str, id: Option<u32>, valor: &str) -> Observation {
        Observation {
            codigo_periodo: code.into(),
            periodo: None,
            variavel: None,
            variavel_codigo: None,
            variavel_id: id,
            valor: Some(valor.into()),
        }
    }

    #[test]
    fn test_single_period_end_to_end() {
        let table = tabulize(
            &metadata(),
            vec![obs("202301", Some(63), "0.53"), obs("202301", Some(2266), "6220.26")],
        )
        .unwrap();

        assert_eq!(table.len(), 1);
        let row = table.row("202301").unwrap();
        assert_eq!(row.period.id, 1);
        assert_eq!(row.period.mes_ano, "janeiro 2023");
        assert_eq!(row.period.data_liberacao.as_deref(), Some("2023-02-10"));
        assert_eq!(row.value("variacao_mensal"), Some("0.53"));
        assert_eq!(row.value("numero_indice"), Some("6220.26"));
        for col in [
            "variacao_3_meses",
            "variacao_6_meses",
            "variacao_acumulada_ano",
            "variacao_12_meses",
        ] {
            assert_eq!(row.value(col), None, "{} should be empty", col);
        }
    }

    #[test]
    fn test_empty_observations_fail() {
        assert!(matches!(
            tabulize(&metadata(), Vec::new()),
            Err(PipelineError::EmptyValues)
        ));
    }

    #[test]
    fn test_row_count_follows_periods() {
        let meta: Metadata = serde_json::from_value(json!({
            "Periodos": {"Periodos": [
                {"Codigo": "x202301", "Id": 1, "Nome": "janeiro 2023", "Disponivel": "S", "DataLiberacao": "2023-02-10"},
                {"Codigo": "x202302", "Id": 2, "Nome": "fevereiro 2023", "Disponivel": "S", "DataLiberacao": "2023-03-10"},
                {"Codigo": "x202303", "Id": 3, "Nome": "março 2023", "Disponivel": "N", "DataLiberacao": null}
            ]}
        }))
        .unwrap();
        let table = tabulize(
            &meta,
            vec![
                obs("202302", Some(69), "1.37"),
                obs("202302", Some(69), "1.38"),
                obs("202401", Some(69), "orphan"),
                obs("202301", None, "ignored"),
            ],
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.row("202302").unwrap().value("variacao_acumulada_ano"), Some("1.38"));
        assert!(table.row("202301").unwrap().values.iter().all(Option::is_none));
        assert!(table.row("202401").is_none());
    }

    #[test]
    fn test_only_unknown_variables_still_keeps_periods() {
        let table = tabulize(&metadata(), vec![obs("202301", None, "x")]).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.rows[0].values.iter().all(Option::is_none));
    }
}
