use std::io::{self, Write};

use anyhow::Result;
use pagerangers_client::Transport;
use pagerangers_core::{ExtractedResult, FieldValue, display_value};
use serde::Serialize;
use serde_json::Value;

use crate::app::App;
use crate::output::Report;

const ENDPOINT: &str = "main_kpis";

#[derive(Debug, Serialize)]
pub(crate) struct KpiReport {
    pub(crate) ranking_index: Value,
    pub(crate) top_10_count: Value,
    pub(crate) top_100_count: Value,
    pub(crate) average_position: Value,
}

pub(crate) async fn run<T: Transport>(app: &App<T>) -> Result<KpiReport> {
    let result = app.call(ENDPOINT, &app.bindings()).await?;
    let field = |name: &str| raw(&result, name);
    Ok(KpiReport {
        ranking_index: field("ranking_index"),
        top_10_count: field("top_10_count"),
        top_100_count: field("top_100_count"),
        average_position: field("average_position"),
    })
}

fn raw(result: &ExtractedResult, field: &str) -> Value {
    result.value(field).cloned().unwrap_or(Value::Null)
}

/// Text form, with `N/A` for null, zero and empty values.
fn shown(value: &Value) -> String {
    let field = FieldValue::Present(value.clone());
    display_value(field.truthy(), "N/A")
}

impl Report for KpiReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Project KPIs:\n")?;
        writeln!(out, "  Ranking Index:     {}", shown(&self.ranking_index))?;
        writeln!(out, "  Keywords in Top 10:  {}", shown(&self.top_10_count))?;
        writeln!(out, "  Keywords in Top 100: {}", shown(&self.top_100_count))?;
        writeln!(out, "  Average Position:    {}", shown(&self.average_position))?;
        Ok(())
    }
}
