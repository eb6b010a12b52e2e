// src/process/pivot.rs

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::PipelineError;
use crate::schema::variables::slot_for_id;
use crate::schema::{Observation, Period, WideRow, VALUE_COLUMNS};

/// Value cells for one period, indexed like [`VALUE_COLUMNS`].
pub type ValueCells = [Option<String>; 6];

/// Keep observations for the known variables, then drop repeated
/// `(codigo_periodo, variavel_id)` pairs so only the last occurrence survives.
/// Survivors keep their input order.
pub fn filter_and_dedup(observations: Vec<Observation>) -> Vec<Observation> {
    let known: Vec<Observation> = observations
        .into_iter()
        .filter(|o| o.variavel_id.is_some_and(|id| slot_for_id(id).is_some()))
        .collect();

    let mut last: HashMap<(&str, u32), usize> = HashMap::with_capacity(known.len());
    for (i, o) in known.iter().enumerate() {
        if let Some(id) = o.variavel_id {
            last.insert((o.codigo_periodo.as_str(), id), i);
        }
    }
    let keep: Vec<bool> = known
        .iter()
        .enumerate()
        .map(|(i, o)| {
            o.variavel_id
                .and_then(|id| last.get(&(o.codigo_periodo.as_str(), id)))
                == Some(&i)
        })
        .collect();

    known
        .into_iter()
        .zip(keep)
        .filter_map(|(o, k)| k.then_some(o))
        .collect()
}

/// Long → wide: one entry per period code (sorted), one cell per variable.
///
/// Fails on a repeated `(period, variable)` pair; run [`filter_and_dedup`] first.
/// Observations for unknown variables are ignored.
pub fn pivot(observations: &[Observation]) -> Result<BTreeMap<String, ValueCells>, PipelineError> {
    let mut wide: BTreeMap<String, ValueCells> = BTreeMap::new();
    let mut seen: HashSet<(&str, u32)> = HashSet::with_capacity(observations.len());

    for o in observations {
        let Some((id, slot)) = o.variavel_id.and_then(|id| Some((id, slot_for_id(id)?))) else {
            continue;
        };
        if !seen.insert((o.codigo_periodo.as_str(), id)) {
            return Err(PipelineError::Pivot {
                codigo_periodo: o.codigo_periodo.clone(),
                variavel_id: id,
            });
        }
        wide.entry(o.codigo_periodo.clone()).or_default()[slot] = o.valor.clone();
    }

    Ok(wide)
}

/// Left join on `codigo_periodo`: every period appears once, in order; periods
/// without values get empty cells and pivot entries without a period are dropped.
pub fn left_join(periods: Vec<Period>, mut wide: BTreeMap<String, ValueCells>) -> Vec<WideRow> {
    periods
        .into_iter()
        .map(|period| {
            let values = wide.remove(&period.codigo_periodo).unwrap_or_default();
            WideRow { period, values }
        })
        .collect()
}
