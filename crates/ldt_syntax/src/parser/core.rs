/// Parser core type and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
/// - The parser is single-pass and recovers from errors by synchronizing at statement
///   boundaries; each independent malformed region yields one reported problem.

/// Parser state.
pub struct Parser<'a, 'r> {
    /// Significant tokens (trivia filtered out); always `Eof`-terminated.
    tokens: Vec<&'a Token>,
    pos: usize,
    reporter: &'r mut dyn ProblemReporter,
}

impl<'a, 'r> Parser<'a, 'r> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `crate::lexer` (always `Eof`-terminated).
    /// - `reporter`: Sink for the problems found while parsing.
    pub fn new(tokens: &'a [Token], reporter: &'r mut dyn ProblemReporter) -> Self {
        // Comments carry no grammar weight; drop them up front.
        let tokens: Vec<&Token> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();
        Self {
            tokens,
            pos: 0,
            reporter,
        }
    }

    /// Parse the entire token stream into a [`Module`].
    ///
    /// Never fails: malformed regions are reported and skipped, and the returned module
    /// holds every statement that did parse, in source order. `Module::is_empty` is
    /// `true` exactly when zero top-level statements were produced.
    pub fn parse(mut self, file_name: &str) -> Module {
        let mut statements = Vec::new();

        loop {
            self.skip_semicolons();
            if self.is_at_end() {
                break;
            }
            match self.statement() {
                Ok(stmt) => statements.push(stmt),
                Err(error) => {
                    self.report_syntax_error(error);
                    self.synchronize();
                }
            }
        }

        // The Eof token sits at the end of the source, so this covers the whole file.
        let span = Span::new(0, self.current_span().end);
        Module {
            name: file_name.to_string(),
            chunk: Chunk::new(span, statements),
            span,
        }
    }
}
