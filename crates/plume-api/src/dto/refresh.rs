use plume_cache::RefreshReport;
use plume_types::Table;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TableRefreshDTO {
    pub table: Table,
    pub refreshed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefreshReportDTO {
    pub complete: bool,
    /// Every refreshed table is served from the new cache.
    pub reloaded: bool,
    pub tables: Vec<TableRefreshDTO>,
}

impl RefreshReportDTO {
    pub fn new(report: &RefreshReport, reloaded: bool) -> Self {
        let tables = [Table::Overall, Table::Daily]
            .into_iter()
            .map(|table| match report.outcome(table) {
                Ok(rows) => TableRefreshDTO {
                    table,
                    refreshed: true,
                    rows: Some(*rows),
                    error: None,
                },
                Err(e) => TableRefreshDTO {
                    table,
                    refreshed: false,
                    rows: None,
                    error: Some(e.to_string()),
                },
            })
            .collect();

        Self {
            complete: report.is_complete(),
            reloaded,
            tables,
        }
    }
}
