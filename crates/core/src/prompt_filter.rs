//! Detects assistant prompts that are about PageRangers.

use regex::Regex;
use std::sync::LazyLock;

static DIRECT_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [Regex::new(r"\bpagerangers\b").unwrap(), Regex::new(r"\branking\s+index\b").unwrap()]
});

static SEO_COMMAND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bseo\b.*\b(rankings?|kpis?|prospects?)\b|\b(rankings?|kpis?|prospects?)\b.*\bseo\b")
        .unwrap()
});

/// True when `text` names PageRangers, its ranking index, or pairs "seo" with
/// one of the skill's commands.
#[must_use]
pub fn mentions_pagerangers(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    DIRECT_PATTERNS.iter().any(|re| re.is_match(&lower)) || SEO_COMMAND_REGEX.is_match(&lower)
}

/// Pulls the prompt out of hook input: a JSON object's `prompt`, `message` or
/// `content` string, or the raw text when the input is not JSON.
#[must_use]
pub fn parse_prompt(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }
    match serde_json::from_str::<serde_json::Value>(input) {
        Ok(json) => ["prompt", "message", "content"]
            .iter()
            .filter_map(|key| json.get(*key).and_then(|v| v.as_str()))
            .find(|s| !s.is_empty())
            .unwrap_or("")
            .to_owned(),
        Err(_) => input.to_owned(),
    }
}
