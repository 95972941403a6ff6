//! The instantiation heuristic as a value.
//!
//! An instantiation is recognised by token shape alone (`TYPE [#(...)] NAME (...) ;`). Which names may
//! stand in the `TYPE` slot, and which optional shape elements are accepted, is configured here so that
//! false positives and negatives can be pinned down by tests and tuned by callers.

use std::collections::BTreeSet;

use crate::lexer::{Token, TokenKind};
use svtopo_core::lang::reserved;

/// Rules deciding which statements count as module instantiations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantiationPolicy {
    /// Reject every IEEE 1800 reserved word as a type name (simple identifiers only; an escaped
    /// identifier such as `\wire` is always a legal name). Net types and port directions are rejected
    /// either way.
    pub exclude_reserved: bool,
    /// Additional type names never treated as instantiations.
    pub excluded: BTreeSet<String>,
    /// Accept `TYPE #(...) NAME (...)` and `TYPE #8 NAME (...)`.
    pub parameter_overrides: bool,
    /// Accept instance arrays `TYPE NAME [3:0] (...)`.
    pub instance_arrays: bool,
    /// Accept comma-separated instance lists `TYPE a (...), b (...);`.
    pub multiple_instances: bool,
    /// Treat `bind TARGET TYPE NAME (...);` as an instantiation of `TYPE`.
    pub bind_directives: bool,
}

impl Default for InstantiationPolicy {
    fn default() -> Self {
        Self {
            exclude_reserved: true,
            excluded: BTreeSet::new(),
            parameter_overrides: true,
            instance_arrays: true,
            multiple_instances: true,
            bind_directives: true,
        }
    }
}

impl InstantiationPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add type names that must never be reported as instantiated.
    pub fn with_excluded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_parameter_overrides(mut self, enabled: bool) -> Self {
        self.parameter_overrides = enabled;
        self
    }

    pub fn with_instance_arrays(mut self, enabled: bool) -> Self {
        self.instance_arrays = enabled;
        self
    }

    pub fn with_multiple_instances(mut self, enabled: bool) -> Self {
        self.multiple_instances = enabled;
        self
    }

    pub fn with_bind_directives(mut self, enabled: bool) -> Self {
        self.bind_directives = enabled;
        self
    }

    /// Return `true` if `name` is rejected as a type name when spelled as a simple identifier.
    pub fn is_excluded(&self, name: &str) -> bool {
        reserved::is_net_or_direction(name)
            || (self.exclude_reserved && reserved::is_reserved(name))
            || self.excluded.contains(name)
    }

    /// Return `true` if `token` may start an instantiation statement.
    pub fn is_candidate_type(&self, token: &Token) -> bool {
        match token.kind {
            TokenKind::Ident => !self.is_excluded(&token.text),
            TokenKind::EscapedIdent => !self.excluded.contains(&token.text),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn first(src: &str) -> Token {
        tokenize(src, "p.sv").remove(0)
    }

    #[test]
    fn reserved_words_are_not_types() {
        let policy = InstantiationPolicy::default();
        for word in ["wire", "logic", "reg", "and", "int", "input"] {
            assert!(!policy.is_candidate_type(&first(word)), "{word} accepted");
        }
        assert!(policy.is_candidate_type(&first("fifo")));
    }

    #[test]
    fn escaped_reserved_word_is_a_type() {
        let policy = InstantiationPolicy::default();
        assert!(policy.is_candidate_type(&first("\\wire ")));
    }

    #[test]
    fn user_exclusions_apply_to_both_spellings() {
        let policy = InstantiationPolicy::default().with_excluded(["my_macro_cell"]);
        assert!(!policy.is_candidate_type(&first("my_macro_cell")));
        assert!(!policy.is_candidate_type(&first("\\my_macro_cell ")));
        assert!(policy.is_candidate_type(&first("fifo")));
    }

    #[test]
    fn reserved_exclusion_can_be_disabled() {
        let policy = InstantiationPolicy {
            exclude_reserved: false,
            ..InstantiationPolicy::default()
        };
        assert!(policy.is_candidate_type(&first("and")));
        assert!(!policy.is_candidate_type(&first("wire")));
        assert!(!policy.is_candidate_type(&first("output")));
        assert!(policy.is_candidate_type(&first("\\wire ")));
    }

    #[test]
    fn keywords_and_punctuation_never_start_instances() {
        let policy = InstantiationPolicy::default();
        assert!(!policy.is_candidate_type(&first("module")));
        assert!(!policy.is_candidate_type(&first("(")));
    }
}
