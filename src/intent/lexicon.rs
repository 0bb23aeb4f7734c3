//! Name tokenization and the fixed business-verb lexicon.

use crate::graph::types::CallPath;
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashSet};

/// Verbs that signal durable business behavior in a method or class name.
pub static BUSINESS_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "create", "update", "delete", "save", "process", "validate", "register", "submit",
        "approve", "reject", "cancel", "order", "pay", "charge", "refund", "transfer",
        "calculate", "generate", "send", "notify", "publish", "subscribe", "import", "export",
        "sync", "checkout", "book", "reserve", "confirm", "issue", "settle", "invoice",
        "authorize", "authenticate", "enroll", "activate", "deactivate", "archive",
    ]
    .into_iter()
    .collect()
});

/// Common technical verb prefixes that make a method name readable even
/// when it is not business-facing.
static COMMON_VERB_PREFIXES: &[&str] = &[
    "get", "set", "is", "has", "find", "build", "load", "read", "write", "init", "to", "from",
    "on", "apply", "run", "make", "add", "remove", "clear", "parse", "format", "map", "merge",
    "fetch", "put", "handle", "resolve", "convert", "extract", "collect",
];

/// Split an identifier into lowercase word tokens. Handles camelCase,
/// snake_case, and the `Class#method(params)` id shape.
pub fn name_tokens(name: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if ch.is_uppercase() && current.chars().last().is_some_and(|p| p.is_lowercase()) {
                tokens.push(std::mem::take(&mut current));
            }
            current.push(ch.to_ascii_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens.retain(|t| t.len() >= 2);
    tokens
}

/// Distinct tokens across every method and owning-class name on a path.
pub fn path_tokens(path: &CallPath) -> BTreeSet<String> {
    path.methods
        .iter()
        .flat_map(|m| {
            name_tokens(&m.method_name)
                .into_iter()
                .chain(name_tokens(m.class_id()))
        })
        .collect()
}

/// Whether any token of `name` is a business verb.
pub fn has_business_verb(name: &str) -> bool {
    name_tokens(name)
        .iter()
        .any(|t| BUSINESS_VERBS.contains(t.as_str()))
}

/// Whether a method name reads as intentional: a recognizable verb
/// prefix or at least two words, at a sane length.
pub fn is_well_named(name: &str) -> bool {
    let len = name.len();
    if !(3..=40).contains(&len) {
        return false;
    }
    let tokens = name_tokens(name);
    if tokens.len() >= 2 {
        return true;
    }
    tokens.first().is_some_and(|t| {
        BUSINESS_VERBS.contains(t.as_str()) || COMMON_VERB_PREFIXES.contains(&t.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizes_camel_and_snake_case() {
        assert_eq!(name_tokens("placeOrderAsync"), vec!["place", "order", "async"]);
        assert_eq!(name_tokens("save_user_account"), vec!["save", "user", "account"]);
    }

    #[test]
    fn test_tokenizes_qualified_id() {
        let tokens = name_tokens("com.shop.OrderService#placeOrder(String)");
        assert!(tokens.contains(&"order".to_string()));
        assert!(tokens.contains(&"service".to_string()));
        assert!(tokens.contains(&"place".to_string()));
        assert!(tokens.contains(&"string".to_string()));
    }

    #[test]
    fn test_business_verb_detection() {
        assert!(has_business_verb("processPayment"));
        assert!(has_business_verb("validateInput"));
        assert!(!has_business_verb("toStringHelper"));
    }

    #[test]
    fn test_naming_heuristic() {
        assert!(is_well_named("placeOrder"));
        assert!(is_well_named("getTotal"));
        assert!(!is_well_named("x"));
        assert!(!is_well_named("q7"));
        // Single unknown word is not enough.
        assert!(!is_well_named("widget"));
    }
}
