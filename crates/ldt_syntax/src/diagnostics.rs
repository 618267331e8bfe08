//! Problem reporting for the syntax frontend.
//!
//! The lexer and parser never abort on malformed input; they describe what went wrong as
//! [`Problem`]s and push them into a caller-supplied [`ProblemReporter`]. The reporter is
//! fire-and-forget: the parser never inspects its state, and a reporter that does nothing
//! (see [`DiscardReporter`]) is a fully supported configuration.
//!
//! [`RenderedProblem`] binds a problem to its source text for rich terminal output via
//! `miette`; rendering is optional equipment for CLI/LSP consumers and is never consulted
//! by the parser itself.

use std::fmt;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::ast::Span;

/// Severity of a reported problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A problem produced while lexing or parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub message: String,
    pub severity: Severity,
    pub span: Span,
}

impl Problem {
    pub fn new(message: impl Into<String>, severity: Severity, span: Span) -> Self {
        Self {
            message: message.into(),
            severity,
            span,
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(message, Severity::Error, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(message, Severity::Warning, span)
    }

    pub fn info(message: impl Into<String>, span: Span) -> Self {
        Self::new(message, Severity::Info, span)
    }

    /// Bind this problem to its source text for rendering.
    pub fn with_source(&self, file_name: &str, source: &str) -> RenderedProblem {
        RenderedProblem {
            message: self.message.clone(),
            severity: self.severity,
            span: self.span,
            source: NamedSource::new(file_name, source.to_string()),
        }
    }
}

/// Sink the lexer and parser deliver problems into.
///
/// Implementations must not fail; nothing propagates back into the parse call.
pub trait ProblemReporter {
    fn report_problem(&mut self, problem: Problem);
}

/// Reporter that keeps every problem, in reporting order.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub problems: Vec<Problem>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `true` if any collected problem is an error.
    pub fn has_errors(&self) -> bool {
        self.problems.iter().any(|p| p.severity == Severity::Error)
    }
}

impl ProblemReporter for CollectingReporter {
    fn report_problem(&mut self, problem: Problem) {
        self.problems.push(problem);
    }
}

/// Reporter that drops everything.
///
/// Used when only grammar acceptance matters, e.g. in tests that assert on tree shape
/// without verifying diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardReporter;

impl ProblemReporter for DiscardReporter {
    fn report_problem(&mut self, _problem: Problem) {}
}

/// Internal error type for the grammar engine's `Result`-based productions.
///
/// A `SyntaxError` only travels between parser methods; the statement loop converts it
/// into a reported [`Problem`] before resynchronizing, so it never escapes a parse call.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    pub fn into_problem(self) -> Problem {
        Problem::error(self.message, self.span)
    }
}

/// A [`Problem`] bound to its source text, renderable through `miette`.
#[derive(Debug)]
pub struct RenderedProblem {
    message: String,
    severity: Severity,
    span: Span,
    source: NamedSource<String>,
}

impl fmt::Display for RenderedProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RenderedProblem {}

impl Diagnostic for RenderedProblem {
    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
            Severity::Info => miette::Severity::Advice,
        })
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let length = self.span.end.saturating_sub(self.span.start);
        let label = LabeledSpan::new(Some(self.severity.to_string()), self.span.start, length);
        Some(Box::new(std::iter::once(label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_reporter_keeps_order() {
        let mut reporter = CollectingReporter::new();
        reporter.report_problem(Problem::error("first", Span::new(0, 1)));
        reporter.report_problem(Problem::warning("second", Span::new(2, 3)));

        assert_eq!(reporter.problems.len(), 2);
        assert_eq!(reporter.problems[0].message, "first");
        assert_eq!(reporter.problems[1].severity, Severity::Warning);
        assert!(reporter.has_errors());
    }

    #[test]
    fn syntax_error_converts_to_error_problem() {
        let error = SyntaxError::new("unexpected token", Span::new(4, 7));
        let problem = error.into_problem();
        assert_eq!(problem.severity, Severity::Error);
        assert_eq!(problem.span, Span::new(4, 7));
    }

    #[test]
    fn rendered_problem_reports_its_severity() {
        let problem = Problem::info("note", Span::new(0, 3));
        let rendered = problem.with_source("test.lua", "abc");
        assert_eq!(Diagnostic::severity(&rendered), Some(miette::Severity::Advice));
    }
}
