//! JSON reporter
//!
//! Metric collections as a pretty-printed array of records, and findings as
//! the issue-report document.

use crate::models::{IssueReport, MetricRecord};
use anyhow::Result;
use serde_json::Value;

/// Render records as a JSON array, optionally without `raw_source`
pub fn render_metrics<'a>(
    records: impl IntoIterator<Item = &'a MetricRecord>,
    include_raw_source: bool,
) -> Result<String> {
    let values = records
        .into_iter()
        .map(|record| metric_value(record, include_raw_source))
        .collect::<Result<Vec<Value>>>()?;
    Ok(serde_json::to_string_pretty(&values)?)
}

/// One record as a JSON value
pub fn metric_value(record: &MetricRecord, include_raw_source: bool) -> Result<Value> {
    let mut value = serde_json::to_value(record)?;
    if !include_raw_source {
        if let Some(obj) = value.as_object_mut() {
            obj.remove("raw_source");
        }
    }
    Ok(value)
}

/// Render an issue report
pub fn render_issues(report: &IssueReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
