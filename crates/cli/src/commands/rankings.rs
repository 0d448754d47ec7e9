use std::io::{self, Write};

use anyhow::Result;
use pagerangers_client::Transport;
use pagerangers_core::{display_value, first_field};
use serde::Serialize;
use serde_json::Value;

use crate::app::App;
use crate::output::{Report, list};

const ENDPOINT: &str = "rankings";

#[derive(Debug, Serialize)]
pub(crate) struct RankingsReport {
    pub(crate) rankings: Vec<Value>,
}

pub(crate) async fn run<T: Transport>(
    app: &App<T>,
    limit: usize,
    offset: Option<usize>,
) -> Result<RankingsReport> {
    let bindings = app
        .bindings()
        .with("limit", limit.to_string())
        .with_optional("offset", offset.map(|o| o.to_string()));
    let result = app.call(ENDPOINT, &bindings).await?;
    let rankings = list(result.get("keywords")).iter().take(limit).cloned().collect();
    Ok(RankingsReport { rankings })
}

impl Report for RankingsReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Top {} Keyword Rankings:\n", self.rankings.len())?;
        for (i, item) in self.rankings.iter().enumerate() {
            let name = display_value(first_field(item, &["keyword", "name"]), "unknown");
            let position = display_value(first_field(item, &["position", "rank"]), "?");
            let url = display_value(first_field(item, &["url", "rankingUrl"]), "");
            writeln!(out, "  {}. [{position}] {name}", i + 1)?;
            if !url.is_empty() {
                writeln!(out, "      {url}")?;
            }
        }
        Ok(())
    }
}
