//! Parse measurement and position literals typed into editor fields

use std::str::FromStr;

use miette::{NamedSource, SourceSpan};
use pest::Parser;
use pest::error::{ErrorVariant, InputLocation};
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::errors::ParseError;
use crate::types::{AngularUnit, Measurement, Position};

#[derive(Parser)]
#[grammar = "measurement.pest"]
struct LiteralParser;

const SOURCE_NAME: &str = "input";

fn named_source(source: &str) -> NamedSource<String> {
    NamedSource::new(SOURCE_NAME, source.to_string())
}

fn span_of(pair: &Pair<Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

fn describe(rule: &Rule) -> Option<&'static str> {
    match rule {
        Rule::number => Some("a number"),
        Rule::unit => Some("an angular unit"),
        Rule::measurement => Some("a measurement"),
        Rule::position => Some("a position"),
        Rule::EOI => Some("end of input"),
        _ => None,
    }
}

fn syntax_error(source: &str, err: pest::error::Error<Rule>) -> ParseError {
    let span: SourceSpan = match err.location {
        InputLocation::Pos(p) => (p, 0).into(),
        InputLocation::Span((start, end)) => (start, end - start).into(),
    };
    let expected = match &err.variant {
        ErrorVariant::ParsingError { positives, .. } => {
            let names: Vec<&str> = positives.iter().filter_map(describe).collect();
            if names.is_empty() {
                "valid input".to_string()
            } else {
                names.join(" or ")
            }
        }
        ErrorVariant::CustomError { message } => message.clone(),
    };
    ParseError::Syntax {
        expected,
        src: named_source(source),
        span,
    }
}

fn parse_measurement_pair(source: &str, pair: Pair<Rule>) -> Result<Measurement, ParseError> {
    let mut inner = pair.into_inner();
    let (Some(number), Some(unit)) = (inner.next(), inner.next()) else {
        return Err(ParseError::Syntax {
            expected: "a number followed by a unit".to_string(),
            src: named_source(source),
            span: (0, source.len()).into(),
        });
    };

    let invalid_number = |message: String| ParseError::InvalidNumber {
        message,
        src: named_source(source),
        span: span_of(&number),
    };
    let value: f64 = number
        .as_str()
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid_number(e.to_string()))?;

    let unit_value = AngularUnit::from_symbol(unit.as_str()).ok_or_else(|| ParseError::UnknownUnit {
        unit: unit.as_str().to_string(),
        src: named_source(source),
        span: span_of(&unit),
    })?;

    Measurement::try_new(value, unit_value).map_err(|e| invalid_number(e.to_string()))
}

/// Parse a measurement such as `2.5mil`, `-1 moa` or `0.25°`.
///
/// Unit symbols are case-insensitive; whitespace may separate the number
/// from its unit.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] for malformed input,
/// [`ParseError::UnknownUnit`] for an unrecognized unit symbol, and
/// [`ParseError::InvalidNumber`] when the value is not finite.
pub fn parse_measurement(source: &str) -> Result<Measurement, ParseError> {
    let pair = LiteralParser::parse(Rule::measurement_input, source)
        .map_err(|e| syntax_error(source, e))?
        .next()
        .filter(|p| p.as_rule() == Rule::measurement);
    match pair {
        Some(pair) => parse_measurement_pair(source, pair),
        None => Err(ParseError::Syntax {
            expected: "a measurement".to_string(),
            src: named_source(source),
            span: (0, source.len()).into(),
        }),
    }
}

/// Parse a position such as `(1mil, -2.5mil)`. The two components may use
/// different units.
///
/// # Errors
///
/// Same as [`parse_measurement`], for either component.
pub fn parse_position(source: &str) -> Result<Position, ParseError> {
    let pair = LiteralParser::parse(Rule::position_input, source)
        .map_err(|e| syntax_error(source, e))?
        .next()
        .filter(|p| p.as_rule() == Rule::position);
    let Some(pair) = pair else {
        return Err(ParseError::Syntax {
            expected: "a position".to_string(),
            src: named_source(source),
            span: (0, source.len()).into(),
        });
    };

    let mut components = pair.into_inner();
    match (components.next(), components.next()) {
        (Some(x), Some(y)) => Ok(Position::new(
            parse_measurement_pair(source, x)?,
            parse_measurement_pair(source, y)?,
        )),
        _ => Err(ParseError::Syntax {
            expected: "two measurements".to_string(),
            src: named_source(source),
            span: (0, source.len()).into(),
        }),
    }
}

impl FromStr for Measurement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_measurement(s)
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_position(s)
    }
}
