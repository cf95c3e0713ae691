use crate::prelude::*;
use std::fmt;

use nom::{
    IResult, Parser,
    bytes::complete::tag_no_case,
    character::complete::space1,
    combinator::{all_consuming, opt},
    sequence::preceded,
};

use super::voltage_source::parse_ac_spec;

#[derive(Debug, Clone)]
/// Represents an independent current source in a circuit.
///
/// The current flows through the source from the plus node to the minus
/// node, so a positive value pushes current into the minus node.
pub struct CurrentSource {
    /// Name of the source.
    pub name: String,
    /// Positive node of the source.
    pub plus: String,
    /// Negative node of the source.
    pub minus: String,
    /// DC value in Amperes.
    pub dc_value: f64,
    /// AC magnitude in Amperes.
    pub ac_magnitude: f64,
    /// AC phase in degrees.
    pub ac_phase: f64,
}

impl Identifiable for CurrentSource {
    fn identifier(&self) -> String {
        format!("I{}", self.name)
    }
}

impl fmt::Display for CurrentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "I{} {} {} {}",
            self.name, self.plus, self.minus, self.dc_value,
        )
    }
}

pub fn parse_current_source(input: &str) -> IResult<&str, CurrentSource> {
    let (input, _) = tag_no_case("I").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, dc_value) = opt(preceded(space1, value_parser)).parse(input)?;
    let (input, ac_spec) = opt(parse_ac_spec).parse(input)?;

    let (ac_magnitude, ac_phase) = ac_spec.unwrap_or((0.0, 0.0));

    let current_source = CurrentSource {
        name: name.to_string(),
        plus: plus.to_string(),
        minus: minus.to_string(),
        dc_value: dc_value.unwrap_or(0.0),
        ac_magnitude,
        ac_phase,
    };

    Ok((input, current_source))
}

impl FromStr for CurrentSource {
    type Err = crate::prelude::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, current_source) = all_consuming(parse_current_source)
            .parse(s.trim())
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;

        Ok(current_source)
    }
}
