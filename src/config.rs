// src/config.rs

/// SIDRA table holding the IPCA series.
pub const TABLE_ID: u32 = 1737;

/// Table metadata, including the list of published periods.
pub const METADATA_URL: &str = "https://sidra.ibge.gov.br/Ajax/JSon/Tabela/1/1737?versao=-1";

/// Base of the SIDRA "values" API.
pub const VALUES_BASE_URL: &str = "https://apisidra.ibge.gov.br/values";

/// Territorial level: `n1` is Brazil as a whole, `all` every unit at that level.
pub const TERRITORY: &str = "n1/all";

/// Variables requested from the values API, in request order.
pub static VARIABLE_IDS: &[u32] = &[2265, 63, 2263, 2264, 69, 2266];

/// Where the final table lands, relative to the working directory.
pub const OUTPUT_PATH: &str = "dados_ipca.parquet";

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,ipca_scraper=info";

/// Assemble the values URL: `/t/<table>/<territory>/v/<ids>/p/all?formato=json`.
pub fn values_url() -> String {
    let vars = VARIABLE_IDS
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{}/t/{}/{}/v/{}/p/all?formato=json",
        VALUES_BASE_URL, TABLE_ID, TERRITORY, vars
    )
}
