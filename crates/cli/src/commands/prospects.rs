use std::io::{self, Write};

use anyhow::Result;
use pagerangers_client::Transport;
use pagerangers_core::{display_value, first_field};
use serde::Serialize;
use serde_json::Value;

use crate::app::App;
use crate::output::{Report, list};

const ENDPOINT: &str = "prospects";

#[derive(Debug, Serialize)]
pub(crate) struct ProspectsReport {
    pub(crate) prospects: Vec<Value>,
}

pub(crate) async fn run<T: Transport>(
    app: &App<T>,
    limit: usize,
    offset: Option<usize>,
) -> Result<ProspectsReport> {
    let bindings = app
        .bindings()
        .with("limit", limit.to_string())
        .with_optional("offset", offset.map(|o| o.to_string()));
    let result = app.call(ENDPOINT, &bindings).await?;
    let prospects = list(result.get("prospects")).iter().take(limit).cloned().collect();
    Ok(ProspectsReport { prospects })
}

impl Report for ProspectsReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Top {} Keyword Opportunities:\n", self.prospects.len())?;
        for (i, item) in self.prospects.iter().enumerate() {
            let name = display_value(first_field(item, &["keyword", "name"]), "unknown");
            let position = display_value(first_field(item, &["position", "rank"]), "?");
            let volume = display_value(first_field(item, &["searchVolume", "volume"]), "?");
            writeln!(out, "  {}. {name}", i + 1)?;
            writeln!(out, "      Position: {position}, Search Volume: {volume}")?;
        }
        Ok(())
    }
}
