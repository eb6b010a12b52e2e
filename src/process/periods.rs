// src/process/periods.rs

use std::collections::HashMap;

use crate::schema::{Period, PeriodDescriptor};

/// One `Period` per distinct trailing-six-character code, in first-seen order.
/// A repeated code takes the later entry's attributes.
pub fn build_period_table(descriptors: &[PeriodDescriptor]) -> Vec<Period> {
    let mut periods: Vec<Period> = Vec::with_capacity(descriptors.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(descriptors.len());

    for d in descriptors {
        let period = Period {
            codigo_periodo: d.period_key(),
            id: d.id,
            mes_ano: d.nome.clone(),
            disponivel: d.disponivel.clone(),
            data_liberacao: d.data_liberacao.clone(),
        };
        match index.get(&period.codigo_periodo) {
            Some(&i) => periods[i] = period,
            None => {
                index.insert(period.codigo_periodo.clone(), periods.len());
                periods.push(period);
            }
        }
    }

    periods
}
