//! JavaScript syntax checks for generated page scripts.
//!
//! Scripts are parsed the way a `Function` constructor would read them: as a
//! non-module function body, so a top-level `return` is accepted and a
//! top-level `await` is not.

use std::ops::Range;

use oxc_allocator::Allocator;
use oxc_ast::{
    Visit,
    ast::{RegExpLiteral, StringLiteral, TemplateLiteral},
};
use oxc_parser::{ParseOptions, Parser, ParserReturn};
use oxc_span::{SourceType, Span};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct JsSyntaxError {
    pub message: String,
}

/// Parse `source` as a function body and report the first syntax error.
pub fn check_function_body(source: &str) -> Result<(), JsSyntaxError> {
    let allocator = Allocator::default();
    parse_function_body(&allocator, source).map(|_| ())
}

/// Byte ranges of every string, template and regex literal, ordered by start.
/// A template's range covers its substitutions, so literals nested inside
/// one fall within the outer range.
pub fn literal_spans(source: &str) -> Result<Vec<Range<usize>>, JsSyntaxError> {
    let allocator = Allocator::default();
    let parsed = parse_function_body(&allocator, source)?;

    let mut collector = LiteralSpans::default();
    collector.visit_program(&parsed.program);
    let mut spans = collector.spans;
    spans.sort_by_key(|span| span.start);
    Ok(spans)
}

fn parse_function_body<'a>(
    allocator: &'a Allocator,
    source: &'a str,
) -> Result<ParserReturn<'a>, JsSyntaxError> {
    let options = ParseOptions {
        allow_return_outside_function: true,
        ..ParseOptions::default()
    };
    let parsed = Parser::new(allocator, source, SourceType::default().with_module(false))
        .with_options(options)
        .parse();

    if let Some(error) = parsed.errors.first() {
        return Err(JsSyntaxError {
            message: error.to_string(),
        });
    }
    if parsed.panicked {
        return Err(JsSyntaxError {
            message: "Unexpected token".to_string(),
        });
    }
    Ok(parsed)
}

#[derive(Default)]
struct LiteralSpans {
    spans: Vec<Range<usize>>,
}

impl LiteralSpans {
    fn push(&mut self, span: Span) {
        self.spans.push(span.start as usize..span.end as usize);
    }
}

impl<'a> Visit<'a> for LiteralSpans {
    fn visit_string_literal(&mut self, it: &StringLiteral<'a>) {
        self.push(it.span);
    }

    // substitutions are covered by the template's own span
    fn visit_template_literal(&mut self, it: &TemplateLiteral<'a>) {
        self.push(it.span);
    }

    fn visit_reg_exp_literal(&mut self, it: &RegExpLiteral<'a>) {
        self.push(it.span);
    }
}
