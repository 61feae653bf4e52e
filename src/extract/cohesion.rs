//! Simplified cohesion surrogate (LCOM)
//!
//! This is not LCOM1 or LCOM2. A field is "shared" when its identifier occurs
//! as a substring in more than one method body, and
//! `LCOM = max(0, METHODS - shared)`. Classes with fewer than two methods or
//! no fields have `LCOM = 0`.

use super::bodies::MethodBody;
use memchr::memmem;
use rustc_hash::FxHashMap;
use std::ops::Range;

/// Number of declared fields referenced by more than one method body.
/// Every declaration counts, so a name declared twice counts twice.
pub fn shared_field_count(source: &str, fields: &[&str], bodies: &[MethodBody<'_>]) -> usize {
    let spans: Vec<Range<usize>> = bodies.iter().filter_map(|b| b.span.clone()).collect();
    let mut shared: FxHashMap<&str, bool> = FxHashMap::default();
    fields
        .iter()
        .filter(|field| {
            *shared
                .entry(**field)
                .or_insert_with(|| is_shared(source, field, &spans))
        })
        .count()
}

/// Whether `field` occurs as a substring inside at least two spans
fn is_shared(source: &str, field: &str, spans: &[Range<usize>]) -> bool {
    let occurrences = occurrences(source.as_bytes(), field.as_bytes());
    spans
        .iter()
        .filter(|span| {
            // The first occurrence at or after the span start is the only
            // candidate that can fit before the span end
            let idx = occurrences.partition_point(|&at| at < span.start);
            occurrences
                .get(idx)
                .is_some_and(|&at| at + field.len() <= span.end)
        })
        .take(2)
        .count()
        > 1
}

/// Start offsets of every occurrence of `needle`, overlapping ones included
fn occurrences(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    let finder = memmem::Finder::new(needle);
    let mut found = Vec::new();
    let mut from = 0;
    while let Some(at) = haystack.get(from..).and_then(|rest| finder.find(rest)) {
        found.push(from + at);
        from += at + 1;
    }
    found
}

pub fn lack_of_cohesion(
    source: &str,
    methods: usize,
    fields: &[&str],
    bodies: &[MethodBody<'_>],
) -> usize {
    if methods <= 1 || fields.is_empty() {
        return 0;
    }
    methods.saturating_sub(shared_field_count(source, fields, bodies))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::bodies::method_bodies;

    const SRC: &str = "public class P {
    private int count;
    private String name;
    public int inc() { return count++; }
    public int dec() { return count--; }
    public String label() { return name; }
}";

    #[test]
    fn test_shared_fields() {
        let bodies = method_bodies(SRC);
        assert_eq!(bodies.len(), 3);
        assert_eq!(shared_field_count(SRC, &["count", "name"], &bodies), 1);
        assert_eq!(lack_of_cohesion(SRC, 3, &["count", "name"], &bodies), 2);
    }

    #[test]
    fn test_degenerate_cases_are_zero() {
        let bodies = method_bodies(SRC);
        assert_eq!(lack_of_cohesion(SRC, 1, &["count"], &bodies), 0);
        assert_eq!(lack_of_cohesion(SRC, 3, &[], &bodies), 0);
    }

    #[test]
    fn test_lcom_never_negative() {
        let bodies = method_bodies(SRC);
        // Three shared declarations against two methods saturate at zero
        let fields = ["count", "count", "count"];
        assert_eq!(lack_of_cohesion(SRC, 2, &fields, &bodies), 0);
    }

    #[test]
    fn test_substring_match() {
        // `id` is found inside `width`, the surrogate makes no token distinction
        let src = "public int a() { return width; }\npublic int b() { return width * 2; }";
        let bodies = method_bodies(src);
        assert_eq!(shared_field_count(src, &["id"], &bodies), 1);
    }

    #[test]
    fn test_matches_body_text_search() {
        // Overlapping candidates and nested bodies
        let src = "public class N {
    private int aa;
    public void outer() {
        if (x) { aaa(); }
    }
    public void inner() { a(); }
    public void open() {
";
        let bodies = method_bodies(src);
        for field in ["aa", "a", "x", "zz"] {
            let by_text = bodies
                .iter()
                .filter(|b| b.text().contains(field))
                .count()
                > 1;
            assert_eq!(
                shared_field_count(src, &[field], &bodies) == 1,
                by_text,
                "{}",
                field
            );
        }
        assert_eq!(occurrences(b"aaaa", b"aa"), vec![0, 1, 2]);
    }

    #[test]
    fn test_nested_bodies_with_fields_finish_quickly() {
        let depth = 20_000;
        let mut src = String::from("public class Deep {\n    private int hits;\n");
        src.push_str(&"    public void f() { hits++;\n".repeat(depth));
        src.push_str(&"}\n".repeat(depth));
        let started = std::time::Instant::now();
        let bodies = method_bodies(&src);
        assert_eq!(lack_of_cohesion(&src, depth, &["hits"], &bodies), depth - 1);
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }
}
