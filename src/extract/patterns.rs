//! Compiled scan patterns
//!
//! Each pattern is compiled once per process and shared by all workers.

use regex::Regex;
use std::sync::OnceLock;

static CLASS_DECL_RE: OnceLock<Regex> = OnceLock::new();
static PACKAGE_DECL_RE: OnceLock<Regex> = OnceLock::new();
static PRIVATE_FIELD_RE: OnceLock<Regex> = OnceLock::new();
static METHOD_HEADER_RE: OnceLock<Regex> = OnceLock::new();
static METHOD_BODY_HEADER_RE: OnceLock<Regex> = OnceLock::new();
static TYPE_NAME_RE: OnceLock<Regex> = OnceLock::new();
static EXTENDS_RE: OnceLock<Regex> = OnceLock::new();
static CALL_RECEIVER_RE: OnceLock<Regex> = OnceLock::new();
static ACCESSOR_CALL_RE: OnceLock<Regex> = OnceLock::new();

/// `public class Name`, capture 1 is the class name
pub(crate) fn class_decl() -> &'static Regex {
    CLASS_DECL_RE.get_or_init(|| Regex::new(r"public\s+class\s+(\w+)").expect("valid regex"))
}

/// `package a.b.c`, capture 1 is the dotted name
pub(crate) fn package_decl() -> &'static Regex {
    PACKAGE_DECL_RE.get_or_init(|| Regex::new(r"package\s+([\w.]+)").expect("valid regex"))
}

/// Indented private field declaration, capture 1 is the declared identifier
pub(crate) fn private_field() -> &'static Regex {
    PRIVATE_FIELD_RE.get_or_init(|| {
        Regex::new(r"(?m)^\s+private\s+\w+[\w<>\[\],\s]*\s+(\w+)\s*[=;]").expect("valid regex")
    })
}

/// Indented method header up to its opening parenthesis.
/// Capture 1 is the visibility, capture 2 the method name.
pub(crate) fn method_header() -> &'static Regex {
    METHOD_HEADER_RE.get_or_init(|| {
        Regex::new(r"(?m)^\s+(public|private|protected)\s+[\w<>\[\]]+\s+(\w+)\s*\(")
            .expect("valid regex")
    })
}

/// Method header through the opening brace of its body (not line-anchored)
pub(crate) fn method_body_header() -> &'static Regex {
    METHOD_BODY_HEADER_RE.get_or_init(|| {
        Regex::new(r"(public|private|protected)\s+[\w<>\[\]]+\s+\w+\s*\([^)]*\)\s*\{")
            .expect("valid regex")
    })
}

/// Capitalized identifier of at least two characters
pub(crate) fn type_name() -> &'static Regex {
    TYPE_NAME_RE.get_or_init(|| Regex::new(r"\b([A-Z]\w+)\b").expect("valid regex"))
}

pub(crate) fn extends() -> &'static Regex {
    EXTENDS_RE.get_or_init(|| Regex::new(r"extends\s+\w+").expect("valid regex"))
}

/// `receiver.method(`, capture 1 is the receiver
pub(crate) fn call_receiver() -> &'static Regex {
    CALL_RECEIVER_RE.get_or_init(|| Regex::new(r"(\w+)\.\w+\(").expect("valid regex"))
}

/// `receiver.getX(` / `receiver.setX(`, capture 1 is the receiver
pub(crate) fn accessor_call() -> &'static Regex {
    ACCESSOR_CALL_RE
        .get_or_init(|| Regex::new(r"\b(\w+)\.(?:get|set)\w+\(").expect("valid regex"))
}
