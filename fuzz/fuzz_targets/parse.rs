#![no_main]

use ldt_syntax::diagnostics::DiscardReporter;
use ldt_syntax::parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(source) = std::str::from_utf8(data) {
        // The parser must return a module for every input, never panic or abort.
        let mut reporter = DiscardReporter;
        let module = parser::parse("fuzz.lua", source, &mut reporter);
        let _ = module.is_empty();
    }
});
