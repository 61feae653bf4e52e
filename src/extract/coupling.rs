//! Coupling surrogates: CBO, TCC, ATFD and DIT
//!
//! All four work on the raw unit text. Comments and string literals are not
//! excluded, so identifiers mentioned there are counted too.

use super::patterns;
use rustc_hash::FxHashSet;

/// Primitive-adjacent and runtime type names never counted as coupling
pub const BUILTIN_TYPES: &[&str] = &[
    "int",
    "long",
    "double",
    "float",
    "boolean",
    "char",
    "byte",
    "short",
    "void",
    "String",
    "Object",
    "System",
    "Math",
    "Integer",
    "Long",
    "Double",
    "Float",
    "Boolean",
    "Comparable",
    "Iterable",
    "Exception",
    "RuntimeException",
];

/// Call receivers that never count as external collaborators
pub const IGNORED_RECEIVERS: &[&str] = &["this", "System", "Math", "super"];

/// Distinct capitalized identifiers, minus built-ins and the class itself
pub fn coupling_between_objects(source: &str, class_name: &str) -> usize {
    patterns::type_name()
        .captures_iter(source)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .filter(|name| *name != class_name && !BUILTIN_TYPES.contains(name))
        .collect::<FxHashSet<_>>()
        .len()
}

/// Distinct receivers of `receiver.method(` call expressions
pub fn distinct_call_receivers(source: &str, class_name: &str) -> usize {
    patterns::call_receiver()
        .captures_iter(source)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .filter(|recv| *recv != class_name && !IGNORED_RECEIVERS.contains(recv))
        .collect::<FxHashSet<_>>()
        .len()
}

/// Getter/setter call sites on receivers not starting with `this`
pub fn foreign_data_accesses(source: &str) -> usize {
    patterns::accessor_call()
        .captures_iter(source)
        .filter(|c| {
            c.get(1)
                .map(|recv| !recv.as_str().starts_with("this"))
                .unwrap_or(false)
        })
        .count()
}

/// 1 when an `extends` clause appears anywhere, else 0
pub fn inheritance_depth(source: &str) -> usize {
    usize::from(patterns::extends().is_match(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cbo_excludes_builtins_and_self() {
        let src = "public class Order { Customer c; String s; List<Item> items; Order copy; Integer n; }";
        // Customer, List, Item
        assert_eq!(coupling_between_objects(src, "Order"), 3);
    }

    #[test]
    fn test_cbo_counts_repeats_once_and_ignores_single_letters() {
        let src = "Map<K, V> a; Map b; X y;";
        assert_eq!(coupling_between_objects(src, "Other"), 1);
    }

    #[test]
    fn test_tcc_receivers() {
        let src = "this.run(); super.init(); System.out.println(x); Math.max(1, 2); \
                   repo.save(o); repo.load(); cache.get(k); Self.make(); Helper.now();";
        // repo, cache, Helper ("out" is a receiver of println)
        assert_eq!(distinct_call_receivers(src, "Self"), 4);
    }

    #[test]
    fn test_atfd_skips_this_receivers() {
        let src = "int a = other.getA(); this.setB(1); thisOne.getC(); o.setD(2); o.getD(); o.compute();";
        assert_eq!(foreign_data_accesses(src), 3);
    }

    #[test]
    fn test_atfd_chained_receiver() {
        // After `this.getA` fails to be a call, `getA.getB(` is the match
        assert_eq!(foreign_data_accesses("this.getA.getB();"), 1);
    }

    #[test]
    fn test_dit_is_binary() {
        assert_eq!(inheritance_depth("class A extends B {}"), 1);
        assert_eq!(inheritance_depth("class A implements B {}"), 0);
        assert_eq!(inheritance_depth("class A extends B, C extends D {}"), 1);
    }
}
