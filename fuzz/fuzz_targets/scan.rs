#![no_main]

use libfuzzer_sys::fuzz_target;
use svtopo_syntax::lexer;
use svtopo_syntax::scanner::{self, InstantiationPolicy};

fuzz_target!(|data: &[u8]| {
    // Loaded files are decoded lossily, so every byte sequence is a valid input
    let text = String::from_utf8_lossy(data);
    let tokens = lexer::tokenize(&text, "fuzz.sv");
    let output = scanner::scan(tokens, &InstantiationPolicy::default());
    let last_line = text.matches('\n').count() as u32 + 1;
    for event in &output.events {
        assert!((1..=last_line).contains(&event.event.line()));
    }
    for diag in &output.diagnostics {
        assert!((1..=last_line).contains(&diag.line));
    }
});
