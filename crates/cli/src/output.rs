use std::io::{self, Write};

use pagerangers_core::{FieldValue, display_value};
use serde::Serialize;
use serde_json::Value;

/// A command result that can be printed as text or JSON.
pub(crate) trait Report: Serialize {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Prints `report` as pretty JSON (two-space indent) or as text.
pub(crate) fn emit<R: Report>(report: &R, json: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
    } else {
        report.write_text(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Value of a field if present and non-empty.
pub(crate) fn truthy(field: Option<&FieldValue>) -> Option<&Value> {
    field.and_then(FieldValue::truthy)
}

/// A list field, or an empty slice when it is missing or not a list.
pub(crate) fn list(field: Option<&FieldValue>) -> &[Value] {
    truthy(field).and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default()
}

/// Text form of a value, with strings unquoted.
pub(crate) fn text(value: &Value) -> String {
    display_value(Some(value), "")
}
