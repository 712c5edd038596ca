//! Shared chumsky parser utilities
//!
//! Combinators used by both the member notation parser and the diagram
//! script reader. Everything here reports `Rich` errors so callers can turn
//! a failed parse into a readable reason.

use chumsky::prelude::*;

/// Parser extra used across the crate
pub type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Parse inline whitespace only (spaces and tabs, no newlines).
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse at least one space or tab.
pub fn inline_whitespace_required<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone
{
    one_of(" \t").repeated().at_least(1).ignored()
}

/// Parse a Mermaid-style comment (%% to end of line).
pub fn mermaid_comment<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    just("%%").ignore_then(none_of('\n').repeated()).ignored()
}

/// Parse an identifier and return it as an owned string.
pub fn identifier<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    text::ident().map(|s: &str| s.to_string())
}

/// Parse the rest of the input, trimmed.
pub fn rest_trimmed<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    any().repeated().to_slice().map(|s: &str| s.trim().to_string())
}

/// Render the first parse error as `(reason, 1-based column)`.
pub fn first_error(errors: &[Rich<'_, char>]) -> (String, usize) {
    match errors.first() {
        Some(error) => (error.to_string(), error.span().start + 1),
        None => ("unknown parse error".to_string(), 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_whitespace() {
        let parser = inline_whitespace().then(just("test")).then_ignore(end());
        assert!(parser.parse("test").into_result().is_ok());
        assert!(parser.parse(" test").into_result().is_ok());
        assert!(parser.parse("\ttest").into_result().is_ok());
        // Should NOT consume newlines
        assert!(parser.parse("\ntest").into_result().is_err());
    }

    #[test]
    fn test_inline_whitespace_required() {
        let parser = just("a")
            .then(inline_whitespace_required())
            .then(just("b"))
            .then_ignore(end());
        assert!(parser.parse("a b").into_result().is_ok());
        assert!(parser.parse("a \t b").into_result().is_ok());
        assert!(parser.parse("ab").into_result().is_err());
    }

    #[test]
    fn test_mermaid_comment() {
        let parser = mermaid_comment().then_ignore(end());
        assert!(parser.parse("%% this is a comment").into_result().is_ok());
        assert!(parser.parse("%%comment").into_result().is_ok());
        // Not a comment
        assert!(parser.parse("% not a comment").into_result().is_err());
    }

    #[test]
    fn test_identifier_and_rest() {
        let parser = identifier()
            .then_ignore(just(':'))
            .then(rest_trimmed())
            .then_ignore(end());
        let (name, rest) = parser.parse("name: List<String> ").into_result().unwrap();
        assert_eq!(name, "name");
        assert_eq!(rest, "List<String>");
    }

    fn single_a<'src>() -> impl Parser<'src, &'src str, char, Extra<'src>> {
        just('a')
    }

    #[test]
    fn test_first_error_column() {
        let errors = single_a().then_ignore(end()).parse("b").into_errors();
        let (reason, column) = first_error(&errors);
        assert_eq!(column, 1);
        assert!(!reason.is_empty());
    }
}
