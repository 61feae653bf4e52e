//! CSV reporter
//!
//! One row per metric record, in the fixed column order consumed by the
//! dataset tooling. `raw_source` is never written to CSV.

use crate::models::MetricRecord;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct MetricRow<'a> {
    file_path: &'a str,
    class_name: &'a str,
    package: &'a str,
    #[serde(rename = "LOC")]
    loc: usize,
    #[serde(rename = "WMC")]
    wmc: usize,
    #[serde(rename = "METHODS")]
    methods: usize,
    #[serde(rename = "FIELDS")]
    fields: usize,
    #[serde(rename = "PRIVATE_METHODS")]
    private_methods: usize,
    #[serde(rename = "CBO")]
    cbo: usize,
    #[serde(rename = "DIT")]
    dit: usize,
    #[serde(rename = "LCOM")]
    lcom: usize,
    #[serde(rename = "TCC")]
    tcc: usize,
    #[serde(rename = "ATFD")]
    atfd: usize,
    #[serde(rename = "MAX_METHOD_LOC")]
    max_method_loc: usize,
    #[serde(rename = "NOC")]
    noc: usize,
    project: &'a str,
}

impl<'a> From<&'a MetricRecord> for MetricRow<'a> {
    fn from(r: &'a MetricRecord) -> Self {
        Self {
            file_path: &r.file_path,
            class_name: &r.class_name,
            package: &r.package,
            loc: r.loc,
            wmc: r.wmc,
            methods: r.methods,
            fields: r.fields,
            private_methods: r.private_methods,
            cbo: r.cbo,
            dit: r.dit,
            lcom: r.lcom,
            tcc: r.tcc,
            atfd: r.atfd,
            max_method_loc: r.max_method_loc,
            noc: r.noc,
            project: r.project.as_deref().unwrap_or(""),
        }
    }
}

/// Column names, in output order
pub const COLUMNS: [&str; 16] = [
    "file_path",
    "class_name",
    "package",
    "LOC",
    "WMC",
    "METHODS",
    "FIELDS",
    "PRIVATE_METHODS",
    "CBO",
    "DIT",
    "LCOM",
    "TCC",
    "ATFD",
    "MAX_METHOD_LOC",
    "NOC",
    "project",
];

/// Write records as CSV with a header row (header only when empty)
pub fn write_metrics<'a, W: Write>(
    writer: W,
    records: impl IntoIterator<Item = &'a MetricRecord>,
) -> Result<()> {
    let mut csv = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(COLUMNS)?;
    for record in records {
        csv.serialize(MetricRow::from(record))?;
    }
    csv.flush()?;
    Ok(())
}

/// Render records as a CSV string
pub fn render_metrics<'a>(records: impl IntoIterator<Item = &'a MetricRecord>) -> Result<String> {
    let mut buf = Vec::new();
    write_metrics(&mut buf, records)?;
    Ok(String::from_utf8(buf)?)
}
