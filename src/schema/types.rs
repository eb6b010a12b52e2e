// src/schema/types.rs

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// The slice of the SIDRA table metadata this tool reads.
#[derive(Debug, Deserialize, Clone)]
pub struct Metadata {
    #[serde(rename = "Periodos")]
    pub periodos: PeriodList,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PeriodList {
    #[serde(rename = "Periodos")]
    pub periodos: Vec<PeriodDescriptor>,
}

/// One entry of `Periodos.Periodos`. SIDRA is loose about scalar types here,
/// so every field accepts strings, numbers or booleans.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PeriodDescriptor {
    #[serde(rename = "Codigo", deserialize_with = "lenient_string")]
    pub codigo: String,
    #[serde(rename = "Id", deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(rename = "Nome", deserialize_with = "lenient_string")]
    pub nome: String,
    #[serde(rename = "Disponivel", deserialize_with = "lenient_string")]
    pub disponivel: String,
    #[serde(rename = "DataLiberacao", default, deserialize_with = "lenient_opt_string")]
    pub data_liberacao: Option<String>,
}

impl PeriodDescriptor {
    /// Trailing six characters of `Codigo`, the `YYYYMM` join key.
    pub fn period_key(&self) -> String {
        let n = self.codigo.chars().count();
        self.codigo.chars().skip(n.saturating_sub(6)).collect()
    }
}

/// A period row, keyed by `codigo_periodo`.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    pub codigo_periodo: String,
    pub id: i64,
    pub mes_ano: String,
    pub disponivel: String,
    pub data_liberacao: Option<String>,
}

/// One `(period, variable, value)` cell from the values API.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub codigo_periodo: String,
    pub periodo: Option<String>,
    pub variavel: Option<String>,
    pub variavel_codigo: Option<String>,
    /// `None` when `variavel` is not one of the known IPCA labels.
    pub variavel_id: Option<u32>,
    pub valor: Option<String>,
}

/// Final output row: period columns plus one cell per entry of
/// [`VALUE_COLUMNS`](super::VALUE_COLUMNS), in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub period: Period,
    pub values: [Option<String>; 6],
}

impl WideRow {
    /// Value cell by semantic column name.
    pub fn value(&self, column: &str) -> Option<&str> {
        let slot = super::VALUE_COLUMNS.iter().position(|(_, c)| *c == column)?;
        self.values[slot].as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideTable {
    pub rows: Vec<WideRow>,
}

impl WideTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, codigo_periodo: &str) -> Option<&WideRow> {
        self.rows
            .iter()
            .find(|r| r.period.codigo_periodo == codigo_periodo)
    }
}

/// Render a JSON scalar as text; `null` becomes `None`.
pub fn scalar_to_string(v: &Value) -> Result<Option<String>, String> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(format!("expected a scalar, got {}", other)),
    }
}

fn lenient_opt_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    scalar_to_string(&v).map_err(de::Error::custom)
}

fn lenient_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_opt_string(d)?.ok_or_else(|| de::Error::custom("unexpected null"))
}

fn lenient_i64<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("{} is not an integer", n))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("{:?}: {}", s, e))),
        other => Err(de::Error::custom(format!("expected an integer, got {}", other))),
    }
}
