/// Parse Lua source text into an AST [`Module`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `file_name`: Label carried on the module for diagnostics; never resolved from disk.
/// - `source`: Full source text.
/// - `reporter`: Sink for lexical and syntax problems found along the way.
///
/// ## Notes
/// - The module is never absent: malformed input is described through `reporter` and
///   parsing continues on a best-effort basis, so callers always receive a well-formed
///   (possibly empty) tree.
/// - One call fully consumes its input and returns; independent calls share no state,
///   so parses of distinct files may run concurrently with their own reporters.
#[tracing::instrument(skip_all, fields(file = file_name, source_len = source.len()))]
pub fn parse(file_name: &str, source: &str, reporter: &mut dyn ProblemReporter) -> Module {
    let tokens = crate::lexer::lex(source, reporter);
    Parser::new(&tokens, reporter).parse(file_name)
}
