//! Define the structural keyword vocabulary for SystemVerilog.
//!
//! This module is the single source of truth for the reserved words that shape module topology: a stable
//! identifier ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings,
//! categories, the standard revision that introduced each word, and the keyword that closes a block opener.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** (SystemVerilog keywords are lower-case).
//! - Reserved words that never influence topology (`wire`, `logic`, `posedge`, …) are *not* listed here; they
//!   live in [`crate::lang::reserved`] and reach the scanner as plain identifiers.
//!
//! ## Examples
//! ```rust
//! use svtopo_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("generate"), Some(KeywordId::Generate));
//! assert_eq!(keywords::closer(KeywordId::Generate), Some(KeywordId::Endgenerate));
//! ```

/// Stable identifier for every structural keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Design units
    Module,
    Macromodule,
    Endmodule,
    Interface,
    Endinterface,
    Package,
    Endpackage,
    Program,
    Endprogram,
    Class,
    Endclass,
    Checker,
    Endchecker,
    Primitive,
    Endprimitive,
    Config,
    Endconfig,

    // Skippable module items
    Function,
    Endfunction,
    Task,
    Endtask,
    Covergroup,
    Endgroup,
    Property,
    Endproperty,
    Sequence,
    Endsequence,
    Clocking,
    Endclocking,
    Specify,
    Endspecify,
    Table,
    Endtable,

    // Blocks
    Generate,
    Endgenerate,
    Begin,
    End,
    Fork,
    Join,
    JoinAny,
    JoinNone,
    Case,
    Casex,
    Casez,
    Randcase,
    Randsequence,
    Endcase,

    // Control flow
    If,
    Else,
    For,
    Foreach,
    While,
    Repeat,
    Forever,
    Do,

    // Procedural block starts
    Always,
    AlwaysComb,
    AlwaysFf,
    AlwaysLatch,
    Initial,
    Final,

    // Port directions
    Input,
    Output,
    Inout,
    Ref,

    // Declarations and directives
    Parameter,
    Localparam,
    Defparam,
    Genvar,
    Typedef,
    Import,
    Export,
    Extern,
    Bind,
    Default,
    Assign,
    Static,
    Automatic,
    Virtual,

    // Assertions
    Assert,
    Assume,
    Cover,
    Restrict,
    Expect,
}

/// High-level grouping used by the scanner and by diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// Opens or closes a design unit (`module`, `interface`, `package`, …).
    DesignUnit,
    /// Opens or closes a module item that is skipped wholesale (`function`, `covergroup`, …).
    SkippedItem,
    /// Opens or closes a nesting block tracked on the scope stack (`generate`, `begin`, `case`, …).
    Block,
    /// Control-flow prefix (`if`, `for`, …).
    ControlFlow,
    /// Starts a procedural block (`always_ff`, `initial`, …).
    Procedural,
    /// Port direction.
    Direction,
    /// Declaration or directive keyword that starts a non-instantiation statement.
    Declaration,
    /// Concurrent or immediate assertion statement.
    Assertion,
}

/// Revision of the language that introduced a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Standard {
    /// IEEE 1364-1995.
    Verilog1995,
    /// IEEE 1364-2001.
    Verilog2001,
    /// IEEE 1800-2005.
    SystemVerilog2005,
    /// IEEE 1800-2009.
    SystemVerilog2009,
}

/// Metadata for a keyword.
///
/// ## Notes
/// - `closer` is set for block openers only; the scanner uses it to find the end of skipped constructs.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub since: Standard,
    pub closer: Option<KeywordId>,
}

use KeywordCategory as Cat;
use Standard as Std;

/// Registry of all structural keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Design units
    opener(KeywordId::Module, "module", Cat::DesignUnit, Std::Verilog1995, KeywordId::Endmodule),
    opener(KeywordId::Macromodule, "macromodule", Cat::DesignUnit, Std::Verilog1995, KeywordId::Endmodule),
    info(KeywordId::Endmodule, "endmodule", Cat::DesignUnit, Std::Verilog1995),
    opener(KeywordId::Interface, "interface", Cat::DesignUnit, Std::SystemVerilog2005, KeywordId::Endinterface),
    info(KeywordId::Endinterface, "endinterface", Cat::DesignUnit, Std::SystemVerilog2005),
    opener(KeywordId::Package, "package", Cat::DesignUnit, Std::SystemVerilog2005, KeywordId::Endpackage),
    info(KeywordId::Endpackage, "endpackage", Cat::DesignUnit, Std::SystemVerilog2005),
    opener(KeywordId::Program, "program", Cat::DesignUnit, Std::SystemVerilog2005, KeywordId::Endprogram),
    info(KeywordId::Endprogram, "endprogram", Cat::DesignUnit, Std::SystemVerilog2005),
    opener(KeywordId::Class, "class", Cat::DesignUnit, Std::SystemVerilog2005, KeywordId::Endclass),
    info(KeywordId::Endclass, "endclass", Cat::DesignUnit, Std::SystemVerilog2005),
    opener(KeywordId::Checker, "checker", Cat::DesignUnit, Std::SystemVerilog2009, KeywordId::Endchecker),
    info(KeywordId::Endchecker, "endchecker", Cat::DesignUnit, Std::SystemVerilog2009),
    opener(KeywordId::Primitive, "primitive", Cat::DesignUnit, Std::Verilog1995, KeywordId::Endprimitive),
    info(KeywordId::Endprimitive, "endprimitive", Cat::DesignUnit, Std::Verilog1995),
    opener(KeywordId::Config, "config", Cat::DesignUnit, Std::Verilog2001, KeywordId::Endconfig),
    info(KeywordId::Endconfig, "endconfig", Cat::DesignUnit, Std::Verilog2001),
    // Skippable module items
    opener(KeywordId::Function, "function", Cat::SkippedItem, Std::Verilog1995, KeywordId::Endfunction),
    info(KeywordId::Endfunction, "endfunction", Cat::SkippedItem, Std::Verilog1995),
    opener(KeywordId::Task, "task", Cat::SkippedItem, Std::Verilog1995, KeywordId::Endtask),
    info(KeywordId::Endtask, "endtask", Cat::SkippedItem, Std::Verilog1995),
    opener(KeywordId::Covergroup, "covergroup", Cat::SkippedItem, Std::SystemVerilog2005, KeywordId::Endgroup),
    info(KeywordId::Endgroup, "endgroup", Cat::SkippedItem, Std::SystemVerilog2005),
    opener(KeywordId::Property, "property", Cat::SkippedItem, Std::SystemVerilog2005, KeywordId::Endproperty),
    info(KeywordId::Endproperty, "endproperty", Cat::SkippedItem, Std::SystemVerilog2005),
    opener(KeywordId::Sequence, "sequence", Cat::SkippedItem, Std::SystemVerilog2005, KeywordId::Endsequence),
    info(KeywordId::Endsequence, "endsequence", Cat::SkippedItem, Std::SystemVerilog2005),
    opener(KeywordId::Clocking, "clocking", Cat::SkippedItem, Std::SystemVerilog2005, KeywordId::Endclocking),
    info(KeywordId::Endclocking, "endclocking", Cat::SkippedItem, Std::SystemVerilog2005),
    opener(KeywordId::Specify, "specify", Cat::SkippedItem, Std::Verilog1995, KeywordId::Endspecify),
    info(KeywordId::Endspecify, "endspecify", Cat::SkippedItem, Std::Verilog1995),
    opener(KeywordId::Table, "table", Cat::SkippedItem, Std::Verilog1995, KeywordId::Endtable),
    info(KeywordId::Endtable, "endtable", Cat::SkippedItem, Std::Verilog1995),
    // Blocks
    opener(KeywordId::Generate, "generate", Cat::Block, Std::Verilog2001, KeywordId::Endgenerate),
    info(KeywordId::Endgenerate, "endgenerate", Cat::Block, Std::Verilog2001),
    opener(KeywordId::Begin, "begin", Cat::Block, Std::Verilog1995, KeywordId::End),
    info(KeywordId::End, "end", Cat::Block, Std::Verilog1995),
    opener(KeywordId::Fork, "fork", Cat::Block, Std::Verilog1995, KeywordId::Join),
    info(KeywordId::Join, "join", Cat::Block, Std::Verilog1995),
    info(KeywordId::JoinAny, "join_any", Cat::Block, Std::SystemVerilog2005),
    info(KeywordId::JoinNone, "join_none", Cat::Block, Std::SystemVerilog2005),
    opener(KeywordId::Case, "case", Cat::Block, Std::Verilog1995, KeywordId::Endcase),
    opener(KeywordId::Casex, "casex", Cat::Block, Std::Verilog1995, KeywordId::Endcase),
    opener(KeywordId::Casez, "casez", Cat::Block, Std::Verilog1995, KeywordId::Endcase),
    opener(KeywordId::Randcase, "randcase", Cat::Block, Std::SystemVerilog2005, KeywordId::Endcase),
    opener(KeywordId::Randsequence, "randsequence", Cat::Block, Std::SystemVerilog2005, KeywordId::Endsequence),
    info(KeywordId::Endcase, "endcase", Cat::Block, Std::Verilog1995),
    // Control flow
    info(KeywordId::If, "if", Cat::ControlFlow, Std::Verilog1995),
    info(KeywordId::Else, "else", Cat::ControlFlow, Std::Verilog1995),
    info(KeywordId::For, "for", Cat::ControlFlow, Std::Verilog1995),
    info(KeywordId::Foreach, "foreach", Cat::ControlFlow, Std::SystemVerilog2005),
    info(KeywordId::While, "while", Cat::ControlFlow, Std::Verilog1995),
    info(KeywordId::Repeat, "repeat", Cat::ControlFlow, Std::Verilog1995),
    info(KeywordId::Forever, "forever", Cat::ControlFlow, Std::Verilog1995),
    info(KeywordId::Do, "do", Cat::ControlFlow, Std::SystemVerilog2005),
    // Procedural block starts
    info(KeywordId::Always, "always", Cat::Procedural, Std::Verilog1995),
    info(KeywordId::AlwaysComb, "always_comb", Cat::Procedural, Std::SystemVerilog2005),
    info(KeywordId::AlwaysFf, "always_ff", Cat::Procedural, Std::SystemVerilog2005),
    info(KeywordId::AlwaysLatch, "always_latch", Cat::Procedural, Std::SystemVerilog2005),
    info(KeywordId::Initial, "initial", Cat::Procedural, Std::Verilog1995),
    info(KeywordId::Final, "final", Cat::Procedural, Std::SystemVerilog2005),
    // Port directions
    info(KeywordId::Input, "input", Cat::Direction, Std::Verilog1995),
    info(KeywordId::Output, "output", Cat::Direction, Std::Verilog1995),
    info(KeywordId::Inout, "inout", Cat::Direction, Std::Verilog1995),
    info(KeywordId::Ref, "ref", Cat::Direction, Std::SystemVerilog2005),
    // Declarations and directives
    info(KeywordId::Parameter, "parameter", Cat::Declaration, Std::Verilog1995),
    info(KeywordId::Localparam, "localparam", Cat::Declaration, Std::Verilog2001),
    info(KeywordId::Defparam, "defparam", Cat::Declaration, Std::Verilog1995),
    info(KeywordId::Genvar, "genvar", Cat::Declaration, Std::Verilog2001),
    info(KeywordId::Typedef, "typedef", Cat::Declaration, Std::SystemVerilog2005),
    info(KeywordId::Import, "import", Cat::Declaration, Std::SystemVerilog2005),
    info(KeywordId::Export, "export", Cat::Declaration, Std::SystemVerilog2005),
    info(KeywordId::Extern, "extern", Cat::Declaration, Std::SystemVerilog2005),
    info(KeywordId::Bind, "bind", Cat::Declaration, Std::SystemVerilog2005),
    info(KeywordId::Default, "default", Cat::Declaration, Std::Verilog1995),
    info(KeywordId::Assign, "assign", Cat::Declaration, Std::Verilog1995),
    info(KeywordId::Static, "static", Cat::Declaration, Std::SystemVerilog2005),
    info(KeywordId::Automatic, "automatic", Cat::Declaration, Std::Verilog2001),
    info(KeywordId::Virtual, "virtual", Cat::Declaration, Std::SystemVerilog2005),
    // Assertions
    info(KeywordId::Assert, "assert", Cat::Assertion, Std::SystemVerilog2005),
    info(KeywordId::Assume, "assume", Cat::Assertion, Std::SystemVerilog2005),
    info(KeywordId::Cover, "cover", Cat::Assertion, Std::SystemVerilog2005),
    info(KeywordId::Restrict, "restrict", Cat::Assertion, Std::SystemVerilog2009),
    info(KeywordId::Expect, "expect", Cat::Assertion, Std::SystemVerilog2005),
];

/// Canonical spelling.
///
/// ## Parameters
/// - `id`: Keyword identifier.
///
/// ## Returns
/// - The canonical spelling as it appears in source.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Keyword that closes the block opened by `id`, if `id` is a block opener.
///
/// ## Notes
/// - `fork` reports `join`; use [`closes`] to also accept `join_any` / `join_none`.
pub fn closer(id: KeywordId) -> Option<KeywordId> {
    info_for(id).closer
}

/// Return `true` if `end` legally terminates a block opened by `opener`.
pub fn closes(opener: KeywordId, end: KeywordId) -> bool {
    match opener {
        KeywordId::Fork => matches!(end, KeywordId::Join | KeywordId::JoinAny | KeywordId::JoinNone),
        _ => closer(opener) == Some(end),
    }
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS
        .iter()
        .find(|k| k.id == id)
        .expect("INVARIANT: every KeywordId has a registry entry")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is a structural keyword, `None` otherwise (including reserved words
///   that are not structural).
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory, since: Standard) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        since,
        closer: None,
    }
}

const fn opener(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    since: Standard,
    closer: KeywordId,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        since,
        closer: Some(closer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn canonical_spellings_are_unique() {
        let mut seen = HashSet::new();
        for k in KEYWORDS {
            assert!(seen.insert(k.canonical), "duplicate spelling {:?}", k.canonical);
        }
    }

    #[test]
    fn lookup_round_trips_every_entry() {
        for k in KEYWORDS {
            assert_eq!(from_str(k.canonical), Some(k.id));
            assert_eq!(as_str(k.id), k.canonical);
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(from_str("Module"), None);
        assert_eq!(from_str("MODULE"), None);
    }

    #[test]
    fn non_structural_reserved_words_are_not_keywords() {
        assert_eq!(from_str("wire"), None);
        assert_eq!(from_str("logic"), None);
    }

    #[test]
    fn closers_are_registered_keywords() {
        for k in KEYWORDS {
            if let Some(c) = k.closer {
                assert!(KEYWORDS.iter().any(|other| other.id == c && other.closer.is_none()));
            }
        }
    }

    #[test]
    fn fork_accepts_every_join_flavour() {
        assert!(closes(KeywordId::Fork, KeywordId::Join));
        assert!(closes(KeywordId::Fork, KeywordId::JoinAny));
        assert!(closes(KeywordId::Fork, KeywordId::JoinNone));
        assert!(!closes(KeywordId::Fork, KeywordId::End));
        assert!(closes(KeywordId::Casez, KeywordId::Endcase));
        assert!(!closes(KeywordId::Begin, KeywordId::Endcase));
    }
}
