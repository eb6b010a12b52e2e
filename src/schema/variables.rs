// src/schema/variables.rs

/// Variable display name (as SIDRA labels it in `D2N`) → variable id.
static NAME_TO_ID: &[(&str, u32)] = &[
    ("IPCA - Variação mensal", 63),
    ("IPCA - Variação acumulada em 3 meses", 2263),
    ("IPCA - Variação acumulada em 6 meses", 2264),
    ("IPCA - Variação acumulada no ano", 69),
    ("IPCA - Variação acumulada em 12 meses", 2265),
    ("IPCA - Número-índice (base: dezembro de 1993 = 100)", 2266),
];

/// Output value columns, ordered by ascending variable id.
pub static VALUE_COLUMNS: &[(u32, &str)] = &[
    (63, "variacao_mensal"),
    (69, "variacao_acumulada_ano"),
    (2263, "variacao_3_meses"),
    (2264, "variacao_6_meses"),
    (2265, "variacao_12_meses"),
    (2266, "numero_indice"),
];

/// Resolve a `D2N` label to its variable id. Unknown labels yield `None`.
pub fn id_for_name(name: &str) -> Option<u32> {
    NAME_TO_ID
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, id)| id)
}

/// Semantic column name for a variable id.
pub fn column_for_id(id: u32) -> Option<&'static str> {
    VALUE_COLUMNS
        .iter()
        .find(|(i, _)| *i == id)
        .map(|&(_, col)| col)
}

/// Index of `id` within [`VALUE_COLUMNS`].
pub fn slot_for_id(id: u32) -> Option<usize> {
    VALUE_COLUMNS.iter().position(|(i, _)| *i == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VARIABLE_IDS;

    #[test]
    fn test_every_requested_variable_has_a_name_and_column() {
        for &id in VARIABLE_IDS {
            assert!(
                NAME_TO_ID.iter().any(|&(_, i)| i == id),
                "no label for {}",
                id
            );
            assert!(column_for_id(id).is_some(), "no column for {}", id);
        }
        assert_eq!(VALUE_COLUMNS.len(), VARIABLE_IDS.len());
    }

    #[test]
    fn test_lookups() {
        assert_eq!(id_for_name("IPCA - Variação mensal"), Some(63));
        assert_eq!(
            id_for_name("IPCA - Número-índice (base: dezembro de 1993 = 100)"),
            Some(2266)
        );
        assert_eq!(id_for_name("IPCA - Peso mensal"), None);
        assert_eq!(column_for_id(2266), Some("numero_indice"));
        assert_eq!(column_for_id(69), Some("variacao_acumulada_ano"));
        assert_eq!(column_for_id(1), None);
        assert_eq!(slot_for_id(63), Some(0));
        assert_eq!(slot_for_id(2266), Some(5));
    }
}
