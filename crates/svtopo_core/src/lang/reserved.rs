//! The complete IEEE 1800-2017 reserved-word list (Annex B).
//!
//! The structural subset has stable IDs in [`crate::lang::keywords`]; the rest (`wire`, `logic`, gate
//! primitives, …) is only ever needed as a set, e.g. to reject `logic [3:0] q;` as an instantiation of a
//! module called `logic`.

/// Every reserved word of SystemVerilog, alphabetically.
pub const RESERVED_WORDS: &[&str] = &[
    "accept_on", "alias", "always", "always_comb", "always_ff", "always_latch", "and", "assert", "assign",
    "assume", "automatic", "before", "begin", "bind", "bins", "binsof", "bit", "break", "buf", "bufif0",
    "bufif1", "byte", "case", "casex", "casez", "cell", "chandle", "checker", "class", "clocking", "cmos",
    "config", "const", "constraint", "context", "continue", "cover", "covergroup", "coverpoint", "cross",
    "deassign", "default", "defparam", "design", "disable", "dist", "do", "edge", "else", "end", "endcase",
    "endchecker", "endclass", "endclocking", "endconfig", "endfunction", "endgenerate", "endgroup",
    "endinterface", "endmodule", "endpackage", "endprimitive", "endprogram", "endproperty", "endspecify",
    "endsequence", "endtable", "endtask", "enum", "event", "eventually", "expect", "export", "extends",
    "extern", "final", "first_match", "for", "force", "foreach", "forever", "fork", "forkjoin", "function",
    "generate", "genvar", "global", "highz0", "highz1", "if", "iff", "ifnone", "ignore_bins",
    "illegal_bins", "implements", "implies", "import", "incdir", "include", "initial", "inout", "input",
    "inside", "instance", "int", "integer", "interconnect", "interface", "intersect", "join", "join_any",
    "join_none", "large", "let", "liblist", "library", "local", "localparam", "logic", "longint",
    "macromodule", "matches", "medium", "modport", "module", "nand", "negedge", "nettype", "new",
    "nexttime", "nmos", "nor", "noshowcancelled", "not", "notif0", "notif1", "null", "or", "output",
    "package", "packed", "parameter", "pmos", "posedge", "primitive", "priority", "program", "property",
    "protected", "pull0", "pull1", "pulldown", "pullup", "pulsestyle_ondetect", "pulsestyle_onevent",
    "pure", "rand", "randc", "randcase", "randsequence", "rcmos", "real", "realtime", "ref", "reg",
    "reject_on", "release", "repeat", "restrict", "return", "rnmos", "rpmos", "rtran", "rtranif0",
    "rtranif1", "s_always", "s_eventually", "s_nexttime", "s_until", "s_until_with", "scalared",
    "sequence", "shortint", "shortreal", "showcancelled", "signed", "small", "soft", "solve", "specify",
    "specparam", "static", "string", "strong", "strong0", "strong1", "struct", "super", "supply0",
    "supply1", "sync_accept_on", "sync_reject_on", "table", "tagged", "task", "this", "throughout", "time",
    "timeprecision", "timeunit", "tran", "tranif0", "tranif1", "tri", "tri0", "tri1", "triand", "trior",
    "trireg", "type", "typedef", "union", "unique", "unique0", "unsigned", "until", "until_with",
    "untyped", "use", "uwire", "var", "vectored", "virtual", "void", "wait", "wait_order", "wand", "weak",
    "weak0", "weak1", "while", "wildcard", "wire", "with", "within", "wor", "xnor", "xor",
];

/// Net types and port directions, the words most often mistaken for a type name at statement start.
///
/// These are never type names, even when the full reserved list is not applied.
pub const NET_AND_DIRECTION_WORDS: &[&str] = &[
    "input", "output", "inout", "ref", "wire", "tri", "tri0", "tri1", "triand", "trior", "trireg", "wand",
    "wor", "supply0", "supply1", "uwire", "interconnect", "reg", "logic", "var",
];

/// Return `true` if `word` is a reserved word.
pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

/// Return `true` if `word` is a net type or port direction.
pub fn is_net_or_direction(word: &str) -> bool {
    NET_AND_DIRECTION_WORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::keywords::KEYWORDS;

    #[test]
    fn every_structural_keyword_is_reserved() {
        for k in KEYWORDS {
            assert!(is_reserved(k.canonical), "{} missing from RESERVED_WORDS", k.canonical);
        }
    }

    #[test]
    fn net_and_direction_words_are_reserved() {
        for w in NET_AND_DIRECTION_WORDS {
            assert!(is_reserved(w), "{w} missing from RESERVED_WORDS");
            assert!(is_net_or_direction(w));
        }
        assert!(!is_net_or_direction("always"));
    }

    #[test]
    fn ordinary_names_are_not_reserved() {
        assert!(!is_reserved("fifo"));
        assert!(!is_reserved("Module"));
    }
}
