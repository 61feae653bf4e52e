//! Metric extraction for one compilation unit
//!
//! The extractor is a text scanner, not a parser. It makes one pass per
//! pattern over the unit and derives every metric independently:
//!
//! ```text
//!   source ──┬── lines ─────────── LOC
//!            ├── class/package ─── class_name, package
//!            ├── private fields ── FIELDS ──────────┐
//!            ├── method headers ── METHODS, WMC ────┤
//!            ├── method bodies ─── MAX_METHOD_LOC ──┴── LCOM
//!            └── identifiers ───── CBO, TCC, ATFD, DIT
//! ```
//!
//! When a pattern finds nothing its metric falls back to its base case
//! (0, empty string, or the file stem for the class name). Extraction
//! always returns a record.

pub mod bodies;
mod cohesion;
pub mod coupling;
pub mod lines;
mod patterns;

pub use bodies::{delimit_body, method_bodies, MethodBody};
pub use cohesion::lack_of_cohesion;
pub use lines::{count_code_lines, is_code_line};

use crate::models::MetricRecord;
use std::path::Path;

/// Extract the metric record for one unit.
///
/// `file_path` only identifies the unit and supplies the class-name fallback;
/// nothing is read from disk.
pub fn extract(source: &str, file_path: &Path) -> MetricRecord {
    let class_name = patterns::class_decl()
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| fallback_class_name(file_path));

    let package = patterns::package_decl()
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let fields: Vec<&str> = patterns::private_field()
        .captures_iter(source)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    let (methods, private_methods) = count_method_headers(source);

    let bodies = method_bodies(source);
    let max_method_loc = bodies.iter().map(MethodBody::code_lines).max().unwrap_or(0);

    MetricRecord {
        file_path: file_path.to_string_lossy().into_owned(),
        loc: count_code_lines(source),
        wmc: methods,
        methods,
        fields: fields.len(),
        private_methods,
        cbo: coupling::coupling_between_objects(source, &class_name),
        dit: coupling::inheritance_depth(source),
        lcom: lack_of_cohesion(source, methods, &fields, &bodies),
        tcc: coupling::distinct_call_receivers(source, &class_name),
        atfd: coupling::foreign_data_accesses(source),
        max_method_loc,
        noc: 1,
        project: None,
        raw_source: source.to_string(),
        class_name,
        package,
    }
}

/// (all method headers, private method headers)
fn count_method_headers(source: &str) -> (usize, usize) {
    patterns::method_header()
        .captures_iter(source)
        .fold((0, 0), |(all, private), c| {
            let is_private = c.get(1).map(|v| v.as_str() == "private").unwrap_or(false);
            (all + 1, private + usize::from(is_private))
        })
}

fn fallback_class_name(file_path: &Path) -> String {
    file_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN_UNIT: &str = "package bc.java.v1;

import java.util.*;

// [SMELL:Clean]
public class ParserBcjava4 {

    private final List<String> items;

    public ParserBcjava4() { this.items = new ArrayList<>(); }

    public void add(String item) {
        if (item != null && !item.isEmpty()) items.add(item);
    }

    public List<String> getItems() { return Collections.unmodifiableList(items); }
    public int size() { return items.size(); }
    public boolean contains(String item) { return items.contains(item); }
}";

    const ENVY_UNIT: &str = "package demo.envy;

// [SMELL:FeatureEnvy]
public class ReportBuilder {

    private int localId;

    public ReportBuilder(int id) { this.localId = id; }

    public String buildReport(UserProfile other) {
        String val0 = other.getName();
        String val1 = other.getEmail();
        String val2 = other.getAge();
        String val3 = other.getCity();
        return other.getName() + other.getEmail() + localId;
    }
}";

    #[test]
    fn test_clean_unit_metrics() {
        let r = extract(CLEAN_UNIT, Path::new("bc/ParserBcjava4.java"));
        assert_eq!(r.class_name, "ParserBcjava4");
        assert_eq!(r.package, "bc.java.v1");
        assert_eq!(r.loc, 12);
        assert_eq!(r.methods, 4);
        assert_eq!(r.wmc, 4);
        assert_eq!(r.private_methods, 0);
        assert_eq!(r.fields, 1);
        assert_eq!(r.max_method_loc, 3);
        // SMELL, Clean, List, ArrayList, Collections
        assert_eq!(r.cbo, 5);
        assert_eq!(r.dit, 0);
        assert_eq!(r.lcom, 3);
        // item, items, Collections
        assert_eq!(r.tcc, 3);
        assert_eq!(r.atfd, 0);
        assert_eq!(r.noc, 1);
        assert_eq!(r.raw_source, CLEAN_UNIT);
        assert_eq!(r.file_path, "bc/ParserBcjava4.java");
    }

    #[test]
    fn test_envy_unit_metrics() {
        let r = extract(ENVY_UNIT, Path::new("ReportBuilder.java"));
        assert_eq!(r.class_name, "ReportBuilder");
        assert_eq!(r.loc, 12);
        // The constructor has no return type and is not a method header
        assert_eq!(r.methods, 1);
        assert_eq!(r.fields, 1);
        assert_eq!(r.atfd, 6);
        assert_eq!(r.tcc, 1);
        assert_eq!(r.cbo, 3);
        assert_eq!(r.lcom, 0);
        assert_eq!(r.max_method_loc, 7);
    }

    #[test]
    fn test_empty_unit() {
        let r = extract("", Path::new("src/Empty.java"));
        assert_eq!(r.methods, 0);
        assert_eq!(r.fields, 0);
        assert_eq!(r.wmc, 0);
        assert_eq!(r.loc, 0);
        assert_eq!(r.max_method_loc, 0);
        assert_eq!(r.class_name, "Empty");
        assert_eq!(r.package, "");
        assert_eq!(r.noc, 1);
    }

    #[test]
    fn test_private_methods_and_inheritance() {
        let src = "public class Svc extends Base {
    private int a = 1;
    private Map<String, List<Integer>> index;
    public void run() { helper(); other(); }
    private void helper() { a++; }
    private void other() { a--; }
    protected int peek() { return a; }
}";
        let r = extract(src, Path::new("Svc.java"));
        assert_eq!(r.methods, 4);
        assert_eq!(r.private_methods, 2);
        assert_eq!(r.fields, 2);
        assert_eq!(r.dit, 1);
        // `a` shows up in three bodies, `index` in none
        assert_eq!(r.lcom, 3);
    }

    #[test]
    fn test_unbalanced_source_does_not_hang() {
        let src = "public class Broken {\n    public void f() {\n        if (true) {\n            x();\n";
        let r = extract(src, Path::new("Broken.java"));
        assert_eq!(r.methods, 1);
        assert_eq!(r.max_method_loc, 0);
        assert_eq!(r.noc, 1);
    }

    #[test]
    fn test_fallback_class_name_without_extension() {
        let r = extract("class hidden {}", Path::new("dir/Thing"));
        assert_eq!(r.class_name, "Thing");
    }
}
