use std::io::{IsTerminal, Read, Write};
use std::path::Path;

use anyhow::Result;
use pagerangers_core::{CredentialStatus, EnvFile, mentions_pagerangers, parse_prompt};

fn read_stdin() -> String {
    if std::io::stdin().is_terminal() {
        return String::new();
    }
    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        tracing::debug!(error = %e, "failed to read hook input");
    }
    input
}

fn credential_status(path: Option<&Path>) -> CredentialStatus {
    let Some(path) = path else {
        return CredentialStatus::FileMissing;
    };
    match EnvFile::load(path) {
        Ok(file) => CredentialStatus::check(file.as_ref()),
        Err(e) => {
            tracing::warn!(error = %e, "credentials file unreadable");
            CredentialStatus::FileMissing
        },
    }
}

/// Writes setup instructions when `input` is a PageRangers prompt and the
/// credentials file at `credentials` is missing or incomplete.
pub(crate) fn check(input: &str, credentials: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let prompt = parse_prompt(input);
    if !mentions_pagerangers(&prompt) {
        return Ok(());
    }
    let status = credential_status(credentials);
    if status.is_valid() {
        return Ok(());
    }
    writeln!(
        out,
        "<user-prompt-submit-hook>
PageRangers credentials issue: {status}

Create ~/.env.pagerangers with:

    PAGERANGERS_API_TOKEN=your_api_key
    PAGERANGERS_PROJECT_HASH=your_project_hash

Get credentials from PageRangers → Profile → API Settings
</user-prompt-submit-hook>"
    )?;
    Ok(())
}

/// Prompt-submit hook entry point. Never fails the caller.
pub(crate) fn run() {
    let input = read_stdin();
    let path = EnvFile::default_path();
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = check(&input, path.as_deref(), &mut stdout) {
        tracing::debug!(error = %e, "hook output failed");
    }
}
