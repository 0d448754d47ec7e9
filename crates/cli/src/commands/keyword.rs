use std::io::{self, Write};

use anyhow::Result;
use pagerangers_client::Transport;
use pagerangers_core::constants::MAX_RELATED_KEYWORDS;
use pagerangers_core::{Competition, normalize_competition, normalize_urls};
use serde::Serialize;
use serde_json::Value;

use crate::app::App;
use crate::output::{Report, text, truthy};

const ENDPOINT: &str = "keyword";

#[derive(Debug, Serialize)]
pub(crate) struct KeywordReport {
    pub(crate) main_keyword: Value,
    pub(crate) search_volume: Value,
    pub(crate) competition: Competition,
    pub(crate) top_urls: Vec<String>,
    pub(crate) important_keywords: Value,
}

pub(crate) async fn run<T: Transport>(app: &App<T>, keyword: &str, top: usize) -> Result<KeywordReport> {
    let bindings = app.bindings().with("keyword", keyword);
    let result = app.call(ENDPOINT, &bindings).await?;

    Ok(KeywordReport {
        main_keyword: truthy(result.get("main_keyword"))
            .cloned()
            .unwrap_or_else(|| Value::String(keyword.to_owned())),
        search_volume: truthy(result.get("search_volume"))
            .cloned()
            .unwrap_or_else(|| Value::String("unknown".to_owned())),
        competition: normalize_competition(result.value("competition")),
        top_urls: normalize_urls(result.value("top_urls"), Some(top)),
        important_keywords: truthy(result.get("important_keywords"))
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())),
    })
}

impl Report for KeywordReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Keyword: {}", text(&self.main_keyword))?;
        writeln!(out, "Search Volume: {}", text(&self.search_volume))?;
        writeln!(out, "Competition: {}", self.competition)?;
        if !self.top_urls.is_empty() {
            writeln!(out, "\nTop {} URLs:", self.top_urls.len())?;
            for (i, url) in self.top_urls.iter().enumerate() {
                writeln!(out, "  {}. {url}", i + 1)?;
            }
        }
        if let Some(related) = self.important_keywords.as_array().filter(|items| !items.is_empty()) {
            writeln!(out, "\nRelated Keywords:")?;
            for keyword in related.iter().take(MAX_RELATED_KEYWORDS) {
                writeln!(out, "  - {}", text(keyword))?;
            }
        }
        Ok(())
    }
}
