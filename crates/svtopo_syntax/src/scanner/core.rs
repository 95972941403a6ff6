/// Scanner core types and entrypoint.
///
/// This chunk defines the [`Scanner`] state, the scope stack markers, and the top-level `scan()` loop.
///
/// ## Notes
/// - This file is `include!`'d into `crate::scanner`.

/// One entry of the explicit nesting stack.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Scope {
    Module { name: String, line: u32 },
    /// An interface body, scanned like a module body.
    Interface { name: String, line: u32 },
    /// `generate`, `begin` or a generate `case`; `opener` is the keyword that opened it.
    Block { opener: KeywordId, line: u32 },
}

/// Marker returned when a structural error ends scanning of the file. The diagnostic has already been
/// recorded.
#[derive(Debug)]
struct Halt;

type Step = Result<(), Halt>;

/// Scanner state for one file.
struct Scanner<'p> {
    tokens: Vec<Token>,
    pos: usize,
    policy: &'p InstantiationPolicy,
    scopes: Vec<Scope>,
    events: Vec<Located>,
    diagnostics: Vec<Diagnostic>,
}

/// Scan one file's token stream into topology events.
///
/// The stream does not need to end in `Eof`; one is appended if missing. Never fails: structural errors
/// end the scan early and are reported in [`ScanOutput::diagnostics`].
#[tracing::instrument(level = "debug", skip_all)]
pub fn scan(tokens: impl IntoIterator<Item = Token>, policy: &InstantiationPolicy) -> ScanOutput {
    let output = Scanner::new(tokens.into_iter().collect(), policy).run();
    tracing::trace!(
        events = output.events.len(),
        diagnostics = output.diagnostics.len(),
        "scanned"
    );
    output
}

impl Scope {
    /// Name of the module or interface this scope opens; `None` for blocks.
    fn unit_name(&self) -> Option<&str> {
        match self {
            Scope::Module { name, .. } | Scope::Interface { name, .. } => Some(name.as_str()),
            Scope::Block { .. } => None,
        }
    }
}

impl<'p> Scanner<'p> {
    fn new(mut tokens: Vec<Token>, policy: &'p InstantiationPolicy) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let (file, line) = tokens
                .last()
                .map(|t| (Arc::clone(&t.file), t.line))
                .unwrap_or_else(|| (Arc::from(""), 1));
            tokens.push(Token::new(TokenKind::Eof, "", file, line, 1));
        }
        Self {
            tokens,
            pos: 0,
            policy,
            scopes: Vec::new(),
            events: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn run(mut self) -> ScanOutput {
        let mut halted = false;
        while !self.is_at_end() {
            let before = self.pos;
            let step = if self.scopes.is_empty() {
                self.top_level_item()
            } else {
                self.module_item()
            };
            if step.is_err() {
                halted = true;
                break;
            }
            // Every item consumes at least one token; guard against a stuck cursor anyway.
            if self.pos == before {
                self.advance();
            }
        }

        if !halted {
            let open: Vec<(DiagnosticKind, u32)> = self
                .scopes
                .iter()
                .rev()
                .filter_map(|s| match s {
                    Scope::Module { name, line } => {
                        Some((DiagnosticKind::UnterminatedModule { name: name.clone() }, *line))
                    }
                    Scope::Interface { line, .. } => {
                        let kind = DiagnosticKind::UnterminatedBlock {
                            opener: keywords::as_str(KeywordId::Interface).to_string(),
                            closer: keywords::as_str(KeywordId::Endinterface).to_string(),
                        };
                        Some((kind, *line))
                    }
                    Scope::Block { .. } => None,
                })
                .collect();
            for (kind, line) in open {
                self.report(line, kind);
            }
        }

        ScanOutput {
            events: self.events,
            diagnostics: self.diagnostics,
        }
    }
}
