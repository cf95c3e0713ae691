use nom::{
    IResult, Parser,
    bytes::complete::{is_not, take_while1},
    combinator::map_res,
};

use crate::prelude::*;

/// Magnitude suffixes recognized on numeric values, longest first so that
/// `MEG` wins over `M`.
const SUFFIXES: [(&str, f64); 9] = [
    ("MEG", 1e6),
    ("F", 1e-15),
    ("P", 1e-12),
    ("N", 1e-9),
    ("U", 1e-6),
    ("M", 1e-3),
    ("K", 1e3),
    ("G", 1e9),
    ("T", 1e12),
];

/// Parses a SPICE-style numeric value with an optional magnitude suffix.
///
/// Plain floats and scientific notation (`1e-6`, `1.23E-9`) pass through
/// untouched; a trailing suffix scales the value. Suffix matching is
/// case-insensitive.
pub fn parse_value(s: &str) -> Result<f64> {
    let upper = s.to_uppercase();

    let (number, multiplier) = SUFFIXES
        .iter()
        .find(|(suffix, _)| upper.ends_with(suffix) && upper.len() > suffix.len())
        .map_or((upper.as_str(), 1.0), |(suffix, multiplier)| {
            (&upper[..upper.len() - suffix.len()], *multiplier)
        });

    let base: f64 = number
        .parse()
        .map_err(|_| Error::InvalidFloatValue(format!("Invalid numeric value '{s}'")))?;

    Ok(base * multiplier)
}

/// Parses a string consisting of alphanumeric characters and underscores.
pub fn alphanumeric_or_underscore1(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_').parse(input)
}

/// A nom parser that recognizes a value token and parses it with
/// [`parse_value`].
pub fn value_parser(input: &str) -> IResult<&str, f64> {
    let token_parser = is_not(" \t\r\n()");
    map_res(token_parser, parse_value).parse(input)
}
